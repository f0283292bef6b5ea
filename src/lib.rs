//! パレット計数AI・搬出記録台帳ツール
//!
//! 管理票番号の抽出・蓄積（コア）と、検出API・バーコード読取・
//! 写真保管・台帳追記（外部コラボレーター）からなる。

pub mod cli;
pub mod config;
pub mod detector;
pub mod error;
pub mod ledger;
pub mod manifest;
pub mod photo;
pub mod reader;
pub mod scanner;
pub mod workflow;

pub use error::{PalletAiError, Result};
pub use manifest::{AddOutcome, ExtractPolicy, ManifestId, ManifestSet, RejectReason};
pub use workflow::{CountSession, PalletRecord, WizardStep};
