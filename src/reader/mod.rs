//! 管理票のバーコード/テキスト読取
//!
//! 読取は外部コラボレーター。返ってくるのはデコード済み文字列のリストで、
//! 空リストは「何も読めなかった」を意味する（エラーではない）。
//! 番号としての解釈は `manifest` 側の抽出ポリシーが行う。

pub mod zbar;

pub use zbar::ZbarReader;

use crate::error::Result;
use std::path::Path;

/// バーコード/OCR読取のケイパビリティ
pub trait CodeReader {
    /// 画像からデコードされたテキストを返す
    ///
    /// 実行自体の失敗は `PalletAiError::Decode` で返す。
    fn decode(&self, image: &Path) -> Result<Vec<String>>;
}
