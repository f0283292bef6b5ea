//! 写真の読み込みとJPEG再エンコード
//!
//! 撮影元の形式に関わらず、検出API・保管先へはJPEGで渡す。

use crate::error::{PalletAiError, Result};
use image::ImageFormat;
use std::io::Cursor;
use std::path::Path;

/// 画像ファイルを読み込み、JPEGバイト列へ変換する
pub fn load_jpeg_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(PalletAiError::FileNotFound(path.display().to_string()));
    }

    let img = image::open(path)
        .map_err(|e| PalletAiError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| PalletAiError::ImageLoad(format!("JPEG変換失敗: {}", e)))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::tempdir;

    #[test]
    fn test_load_jpeg_bytes_reencodes_png() {
        let dir = tempdir().unwrap();
        let png_path = dir.path().join("doc.png");

        let img = ImageBuffer::from_pixel(4, 4, Rgb::<u8>([200, 100, 50]));
        img.save(&png_path).unwrap();

        let bytes = load_jpeg_bytes(&png_path).unwrap();
        // JPEGマーカー (SOI)
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_load_jpeg_bytes_missing_file() {
        let result = load_jpeg_bytes(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(PalletAiError::FileNotFound(_))));
    }

    #[test]
    fn test_load_jpeg_bytes_not_an_image() {
        let dir = tempdir().unwrap();
        let txt_path = dir.path().join("broken.jpg");
        std::fs::write(&txt_path, b"not an image").unwrap();

        let result = load_jpeg_bytes(&txt_path);
        assert!(matches!(result, Err(PalletAiError::ImageLoad(_))));
    }
}
