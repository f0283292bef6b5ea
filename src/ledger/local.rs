//! ローカル写真保管
//!
//! アップロード先が設定されていない現場では、写真を台帳と同じマシンの
//! フォルダへ保存し、そのパスをリンク列に残す。

use super::ImageStore;
use crate::error::{PalletAiError, Result};
use std::path::PathBuf;

pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ImageStore for LocalImageStore {
    fn upload(&self, image: &[u8], prefix: &str) -> Result<String> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| PalletAiError::Upload(format!("保存先フォルダ作成失敗: {}", e)))?;

        let file_name = format!(
            "{}_{}.jpg",
            prefix,
            chrono::Local::now().format("%Y%m%d%H%M%S")
        );
        let path = self.dir.join(&file_name);

        std::fs::write(&path, image)
            .map_err(|e| PalletAiError::Upload(format!("{}: {}", path.display(), e)))?;

        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_upload_writes_file_and_returns_path() {
        let dir = tempdir().unwrap();
        let store = LocalImageStore::new(dir.path().join("photos"));

        let link = store.upload(b"jpeg-bytes", "Pallet").unwrap();
        assert!(link.contains("Pallet_"));
        assert!(link.ends_with(".jpg"));
        assert_eq!(std::fs::read(&link).unwrap(), b"jpeg-bytes");
    }
}
