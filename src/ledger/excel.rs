//! ローカルExcel台帳
//!
//! ネットワークのない現場向けの記録先。xlsxは追記ができないため、
//! 既存の行を読み直してから新しい行を足して全体を書き直す。

use super::RecordSink;
use crate::error::{PalletAiError, Result};
use crate::workflow::record::HEADERS;
use calamine::{open_workbook, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};

pub struct ExcelLedger {
    path: PathBuf,
}

impl ExcelLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 既存台帳のデータ行（ヘッダを除く）を読み込む
    fn read_rows(&self) -> Result<Vec<Vec<String>>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| PalletAiError::Persistence(format!("台帳読み込み失敗: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| PalletAiError::Persistence("台帳にシートがありません".into()))?
            .map_err(|e| PalletAiError::Persistence(format!("台帳読み込み失敗: {}", e)))?;

        Ok(range
            .rows()
            .skip(1) // ヘッダ行
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect())
    }

    fn write_all(&self, rows: &[Vec<String>]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold();

        let to_persistence =
            |e: rust_xlsxwriter::XlsxError| PalletAiError::Persistence(format!("台帳書き込み失敗: {}", e));

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(to_persistence)?;
        }

        for (i, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                worksheet
                    .write_string((i + 1) as u32, col as u16, value)
                    .map_err(to_persistence)?;
            }
        }

        // 記録日時とリンク列は広めに
        worksheet.set_column_width(0, 20).map_err(to_persistence)?;
        worksheet.set_column_width(7, 40).map_err(to_persistence)?;
        worksheet.set_column_width(8, 40).map_err(to_persistence)?;

        workbook.save(&self.path).map_err(to_persistence)?;
        Ok(())
    }
}

impl RecordSink for ExcelLedger {
    fn append(&self, row: &[String]) -> Result<()> {
        let mut rows = self.read_rows()?;
        rows.push(row.to_vec());
        self.write_all(&rows)
    }
}
