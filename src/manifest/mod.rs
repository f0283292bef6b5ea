//! パレット管理票番号モジュール
//!
//! 現場で入力・読取されたテキストから管理票番号を取り出し、
//! 台帳1行分（最大4件）として蓄積する。
//!
//! ## 処理フロー
//! 1. 抽出: 自由入力テキスト → 正規化済み番号（[`extract`]）
//! 2. 蓄積: 重複排除・上限4件の挿入順リスト（[`ManifestSet`]）

pub mod accumulator;
pub mod extract;

pub use accumulator::{AddOutcome, ManifestSet, RejectReason, MAX_SLOTS};
pub use extract::{extract, ExtractPolicy};

use serde::{Deserialize, Serialize};

/// 正規化済みの管理票番号
///
/// 抽出処理を通った数字列のみを保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestId(String);

impl ManifestId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ManifestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
