//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use pallet_ai_rust::error::PalletAiError;
use pallet_ai_rust::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, PalletAiError::FolderNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// PalletAiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        PalletAiError::Config("テスト設定エラー".to_string()),
        PalletAiError::FileNotFound("pallet.jpg".to_string()),
        PalletAiError::FolderNotFound("/path/to/folder".to_string()),
        PalletAiError::NoImagesFound("フォルダ".to_string()),
        PalletAiError::ImageLoad("読み込み失敗".to_string()),
        PalletAiError::Detection("API呼び出し失敗".to_string()),
        PalletAiError::Decode("zbarimg不調".to_string()),
        PalletAiError::Upload("保管先エラー".to_string()),
        PalletAiError::Persistence("追記失敗".to_string()),
        PalletAiError::Workflow("管理票番号がありません".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// コラボレーター失敗はメッセージをそのまま運ぶ
#[test]
fn test_collaborator_errors_carry_message() {
    let err = PalletAiError::Detection("status 503".to_string());
    assert!(format!("{}", err).contains("status 503"));

    let err = PalletAiError::Persistence("quota exceeded".to_string());
    assert!(format!("{}", err).contains("quota exceeded"));
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let err = PalletAiError::MissingApiKey;
    let display = format!("{}", err);

    assert!(display.contains("APIキー"));
    assert!(display.contains("pallet-ai config"));
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = PalletAiError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PalletAiError = io_err.into();

    assert!(matches!(err, PalletAiError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: PalletAiError = json_err.into();

    assert!(matches!(err, PalletAiError::JsonParse(_)));
}
