//! 記録先・写真保管の抽象化
//!
//! 台帳（スプレッドシート/ローカルExcel）と写真保管先はどちらも
//! 外部コラボレーターとして扱い、コアからはトレイト越しにのみ呼ぶ。
//! 呼び出しは1回限り、失敗したらその操作は中断（部分的な行は書かない）。

pub mod excel;
pub mod local;
pub mod webhook;

pub use excel::ExcelLedger;
pub use local::LocalImageStore;
pub use webhook::{SheetWebhook, WebhookImageStore};

use crate::error::Result;

/// 写真が添付されなかったときにリンク列へ入れる値
pub const NO_IMAGE: &str = "No Image";

/// 1行を耐久的に追記する記録先
pub trait RecordSink {
    /// フラットな1行（スカラー列のみ）を末尾へ追記する
    ///
    /// 失敗は `PalletAiError::Persistence` で返し、行は一切書かれない。
    fn append(&self, row: &[String]) -> Result<()>;
}

/// 写真の保管先
pub trait ImageStore {
    /// JPEGバイト列を保存し、参照用リンクを返す
    ///
    /// `prefix` は保存名の先頭（`Document` / `Pallet`）。
    /// 失敗は `PalletAiError::Upload` で返す。
    fn upload(&self, image: &[u8], prefix: &str) -> Result<String>;
}
