use thiserror::Error;

#[derive(Error, Debug)]
pub enum PalletAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`pallet-ai config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("パレット検出エラー: {0}")]
    Detection(String),

    #[error("バーコード読取エラー: {0}")]
    Decode(String),

    #[error("写真アップロードエラー: {0}")]
    Upload(String),

    #[error("記録保存エラー: {0}")]
    Persistence(String),

    #[error("ワークフローエラー: {0}")]
    Workflow(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PalletAiError>;
