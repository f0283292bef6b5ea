//! 管理票番号の蓄積
//!
//! 1回の搬出記録に紐づく番号は最大4件。挿入順を保ち、重複は受け付けない。
//! 台帳側の列数は固定のため、出力時は空文字で4列に揃える。

use super::extract::{extract, ExtractPolicy};
use super::ManifestId;
use serde::{Deserialize, Serialize};

/// 1記録あたりの管理票番号の上限
pub const MAX_SLOTS: usize = 4;

/// `add` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// 追加された
    Added(ManifestId),
    /// 追加されなかった（セットは変更されない）
    Rejected(RejectReason),
}

/// 追加が拒否された理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// テキストから番号を抽出できなかった
    NoIdentifierFound,
    /// 同じ番号が登録済み
    DuplicateToken,
    /// 上限4件に達している
    CapacityExceeded,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::NoIdentifierFound => write!(f, "管理票番号が読み取れません"),
            RejectReason::DuplicateToken => write!(f, "同じ管理票番号が登録済みです"),
            RejectReason::CapacityExceeded => {
                write!(f, "管理票番号は{}件までです", MAX_SLOTS)
            }
        }
    }
}

/// 挿入順・重複なし・上限4件の番号リスト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestSet {
    tokens: Vec<ManifestId>,
}

impl ManifestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// テキストを抽出にかけ、成功すればセットへ追加する
    ///
    /// 拒否された場合、セットは一切変更されない。
    pub fn add(&mut self, raw_text: &str, policy: ExtractPolicy) -> AddOutcome {
        let token = match extract(raw_text, policy) {
            Some(token) => token,
            None => return AddOutcome::Rejected(RejectReason::NoIdentifierFound),
        };

        if self.tokens.contains(&token) {
            return AddOutcome::Rejected(RejectReason::DuplicateToken);
        }

        if self.tokens.len() >= MAX_SLOTS {
            return AddOutcome::Rejected(RejectReason::CapacityExceeded);
        }

        self.tokens.push(token.clone());
        AddOutcome::Added(token)
    }

    /// 全件破棄
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &ManifestId) -> bool {
        self.tokens.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManifestId> {
        self.tokens.iter()
    }

    /// 台帳の固定列へ変換（番号 + 空文字パディングで常に4列）
    pub fn to_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self.tokens.iter().map(|t| t.to_string()).collect();
        columns.resize(MAX_SLOTS, String::new());
        columns
    }
}
