//! ローカルExcel台帳テスト
//!
//! 追記のたびに読み直し→書き直しが行われ、既存行が失われないことを検証

use calamine::{open_workbook, Reader, Xlsx};
use pallet_ai_rust::ledger::{ExcelLedger, RecordSink};
use pallet_ai_rust::workflow::HEADERS;
use tempfile::tempdir;

fn sample_row(id: &str, confirmed: &str) -> Vec<String> {
    vec![
        "2026-08-04 09:15:00".to_string(),
        id.to_string(),
        String::new(),
        String::new(),
        String::new(),
        "12".to_string(),
        confirmed.to_string(),
        "No Image".to_string(),
        "pallet-photos/Pallet_20260804091500.jpg".to_string(),
    ]
}

fn read_rows(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("台帳が開けない");
    let range = workbook
        .worksheet_range_at(0)
        .expect("シートがない")
        .expect("読み込み失敗");
    range
        .rows()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

/// 新規作成時はヘッダ+1行
#[test]
fn test_first_append_creates_ledger_with_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.xlsx");

    let ledger = ExcelLedger::new(&path);
    ledger.append(&sample_row("68020045", "11")).unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], HEADERS.map(String::from).to_vec());
    assert_eq!(rows[1][1], "68020045");
    assert_eq!(rows[1][6], "11");
}

/// 2回目の追記で既存行が保持される
#[test]
fn test_append_preserves_existing_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.xlsx");

    let ledger = ExcelLedger::new(&path);
    ledger.append(&sample_row("111", "5")).unwrap();

    // 別インスタンス（別プロセス相当）からの追記
    let reopened = ExcelLedger::new(&path);
    reopened.append(&sample_row("222", "6")).unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][1], "111");
    assert_eq!(rows[2][1], "222");
}

/// 空文字の管理票列もそのまま残る
#[test]
fn test_empty_identifier_columns_survive_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.xlsx");

    let ledger = ExcelLedger::new(&path);
    ledger.append(&sample_row("999", "0")).unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows[1][2], "");
    assert_eq!(rows[1][3], "");
    assert_eq!(rows[1][4], "");
}
