use crate::error::{PalletAiError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 検出APIの既定エンドポイント（モデルは環境に合わせて差し替え可）
const DEFAULT_DETECTOR_URL: &str = "https://detect.roboflow.com/pallet-detection-measurement/1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 検出APIキー（環境変数 PALLET_AI_API_KEY が優先）
    pub api_key: Option<String>,
    /// 検出APIエンドポイント
    pub detector_url: String,
    /// スプレッドシート追記Webhook
    pub sheet_url: Option<String>,
    /// 写真アップロードWebhook
    pub upload_url: Option<String>,
    /// ローカルExcel台帳のパス
    pub ledger_path: Option<PathBuf>,
    /// ローカル保管時の写真フォルダ
    pub photo_dir: PathBuf,
    /// 外部呼び出しのタイムアウト秒
    pub timeout_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PalletAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("pallet-ai").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var("PALLET_AI_API_KEY") {
            return Ok(key);
        }

        self.api_key.clone().ok_or(PalletAiError::MissingApiKey)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            detector_url: DEFAULT_DETECTOR_URL.into(),
            sheet_url: None,
            upload_url: None,
            ledger_path: None,
            photo_dir: PathBuf::from("pallet-photos"),
            timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert!(config.detector_url.starts_with("https://"));
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = Config {
            sheet_url: Some("https://example.com/append".into()),
            ..Config::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let loaded: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.sheet_url.as_deref(), Some("https://example.com/append"));
    }
}
