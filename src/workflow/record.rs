//! 搬出記録1行分
//!
//! 確定した記録は追記のみで、更新・削除は行わない。

use crate::manifest::MAX_SLOTS;
use serde::{Deserialize, Serialize};

/// 台帳のヘッダ行（9列固定）
pub const HEADERS: [&str; 9] = [
    "記録日時",
    "管理票番号1",
    "管理票番号2",
    "管理票番号3",
    "管理票番号4",
    "検出数",
    "確認数",
    "管理票写真",
    "パレット写真",
];

/// 確定済みの搬出記録
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PalletRecord {
    /// 記録日時（`%Y-%m-%d %H:%M:%S`）
    pub recorded_at: String,
    /// 管理票番号（常に4列、不足分は空文字）
    pub manifest_columns: Vec<String>,
    /// 検出APIが返した台数
    pub detected_count: u32,
    /// オペレーターが確定した台数
    pub confirmed_count: i64,
    /// 管理票写真へのリンク
    pub document_link: String,
    /// パレット写真へのリンク
    pub pallet_link: String,
}

impl PalletRecord {
    /// 台帳へ追記する1行（ヘッダと同じ9列）へ変換する
    pub fn to_row(&self) -> Vec<String> {
        debug_assert_eq!(self.manifest_columns.len(), MAX_SLOTS);

        let mut row = Vec::with_capacity(HEADERS.len());
        row.push(self.recorded_at.clone());
        row.extend(self.manifest_columns.iter().cloned());
        row.push(self.detected_count.to_string());
        row.push(self.confirmed_count.to_string());
        row.push(self.document_link.clone());
        row.push(self.pallet_link.clone());
        row
    }
}
