mod exif;

use crate::error::{PalletAiError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// フォルダ内で見つかった写真1枚分のメタ情報
#[derive(Debug, Clone)]
pub struct PhotoInfo {
    pub path: PathBuf,
    pub file_name: String,
    /// キャッシュエントリに残すファイルサイズ
    pub file_size: u64,
    /// EXIFの撮影日時（取れない場合あり）
    pub date: Option<String>,
}

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

fn is_photo_extension(ext: &str) -> bool {
    let lower = ext.to_ascii_lowercase();
    PHOTO_EXTENSIONS.iter().any(|&e| e == lower)
}

/// フォルダ直下の写真を列挙する（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<PhotoInfo>> {
    if !folder.exists() {
        return Err(PalletAiError::FolderNotFound(folder.display().to_string()));
    }

    let mut photos = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext = match path.extension() {
            Some(ext) => ext.to_string_lossy(),
            None => continue,
        };
        if !is_photo_extension(&ext) {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let file_size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        let date = exif::capture_date(path).ok();

        photos.push(PhotoInfo {
            path: path.to_path_buf(),
            file_name,
            file_size,
            date,
        });
    }

    photos.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(photos)
}
