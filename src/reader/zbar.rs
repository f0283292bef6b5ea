//! zbarimg連携
//!
//! 外部CLI `zbarimg` を1回起動してバーコードを読む。
//! 終了コード4は「シンボルなし」で、空リストとして扱う。

use super::CodeReader;
use crate::error::{PalletAiError, Result};
use std::path::Path;
use std::process::Command;

// zbarimg: シンボルが1つも見つからなかったときの終了コード
const EXIT_NO_SYMBOLS: i32 = 4;

#[derive(Debug, Clone, Default)]
pub struct ZbarReader;

impl ZbarReader {
    pub fn new() -> Self {
        Self
    }
}

/// 読取行の掃除
///
/// スキャナ由来の改行・制御文字・BOMを落とす。空行はNone。
fn clean_line(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c.is_control() || c == '\u{FEFF}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl CodeReader for ZbarReader {
    fn decode(&self, image: &Path) -> Result<Vec<String>> {
        if !image.exists() {
            return Err(PalletAiError::FileNotFound(image.display().to_string()));
        }

        let output = Command::new("zbarimg")
            .arg("--raw")
            .arg("-q")
            .arg(image)
            .output()
            .map_err(|e| PalletAiError::Decode(format!("zbarimg実行エラー: {}", e)))?;

        if !output.status.success() {
            if output.status.code() == Some(EXIT_NO_SYMBOLS) {
                return Ok(Vec::new());
            }
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PalletAiError::Decode(format!(
                "zbarimg failed (code {:?}): {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().filter_map(clean_line).collect())
    }
}
