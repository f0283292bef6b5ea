//! 管理票番号の抽出
//!
//! 手入力・バーコード読取・OCRいずれ由来のテキストにも同じ規則を適用する。
//! 現場ごとに「数字だけ」「PTプレフィックス必須」の2方式が併存するため、
//! 抽出ポリシーとして選択式にしている。

use super::ManifestId;
use clap::ValueEnum;
use regex::Regex;

/// 抽出ポリシー
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExtractPolicy {
    /// テキスト中で最初に現れる数字列を番号とみなす
    #[default]
    FirstDigits,
    /// `PT` 直後の数字列のみを番号とみなす（大文字小文字は区別しない）
    Prefixed,
}

impl std::fmt::Display for ExtractPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractPolicy::FirstDigits => write!(f, "first-digits"),
            ExtractPolicy::Prefixed => write!(f, "prefixed"),
        }
    }
}

lazy_static::lazy_static! {
    // 最初の数字列（ASCII数字のみ。タイ数字等は番号として扱わない）
    static ref DIGITS_RE: Regex = Regex::new(r"[0-9]+").unwrap();
    // PT直後の数字列。複数回現れる場合は最初の1件のみ
    static ref PREFIXED_RE: Regex = Regex::new(r"(?i)PT([0-9]+)").unwrap();
}

/// テキストから管理票番号を抽出する
///
/// 見つからない場合は `None`。副作用なし。
///
/// `Prefixed` はマーカーなしの数字列にフォールバックしない。
/// 「68020045」単体は `FirstDigits` でのみ抽出される。
pub fn extract(raw_text: &str, policy: ExtractPolicy) -> Option<ManifestId> {
    match policy {
        ExtractPolicy::FirstDigits => DIGITS_RE
            .find(raw_text)
            .map(|m| ManifestId::new(m.as_str())),
        ExtractPolicy::Prefixed => PREFIXED_RE
            .captures(raw_text)
            .map(|caps| ManifestId::new(&caps[1])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_digits_basic() {
        assert_eq!(
            extract("68020045", ExtractPolicy::FirstDigits),
            Some(ManifestId::new("68020045"))
        );
        assert_eq!(
            extract("PT68020045", ExtractPolicy::FirstDigits),
            Some(ManifestId::new("68020045"))
        );
    }

    #[test]
    fn test_first_digits_takes_first_run_only() {
        assert_eq!(
            extract("123 abc 456", ExtractPolicy::FirstDigits),
            Some(ManifestId::new("123"))
        );
    }

    #[test]
    fn test_first_digits_thai_text() {
        // タイ語の作業指示文に埋め込まれた番号
        assert_eq!(
            extract("คำสั่งงาน 99887 เรื่อง...", ExtractPolicy::FirstDigits),
            Some(ManifestId::new("99887"))
        );
    }

    #[test]
    fn test_prefixed_basic() {
        assert_eq!(
            extract("PT68020045", ExtractPolicy::Prefixed),
            Some(ManifestId::new("68020045"))
        );
    }

    #[test]
    fn test_prefixed_case_insensitive_marker() {
        assert_eq!(
            extract("pt123", ExtractPolicy::Prefixed),
            Some(ManifestId::new("123"))
        );
        assert_eq!(
            extract("Pt456", ExtractPolicy::Prefixed),
            Some(ManifestId::new("456"))
        );
    }

    #[test]
    fn test_prefixed_embedded_in_text() {
        assert_eq!(
            extract("伝票 PT777 搬出分", ExtractPolicy::Prefixed),
            Some(ManifestId::new("777"))
        );
    }

    #[test]
    fn test_prefixed_first_occurrence_wins() {
        assert_eq!(
            extract("PT111 PT222", ExtractPolicy::Prefixed),
            Some(ManifestId::new("111"))
        );
    }

    #[test]
    fn test_prefixed_no_bare_digit_fallback() {
        // マーカーなしの数字列は対象外
        assert_eq!(extract("68020045", ExtractPolicy::Prefixed), None);
        // PTの直後に数字がない場合も対象外
        assert_eq!(extract("PT-123", ExtractPolicy::Prefixed), None);
    }

    #[test]
    fn test_no_digits_returns_none() {
        for policy in [ExtractPolicy::FirstDigits, ExtractPolicy::Prefixed] {
            assert_eq!(extract("", policy), None);
            assert_eq!(extract("   ", policy), None);
            assert_eq!(extract("ไม่มีตัวเลข", policy), None);
            assert_eq!(extract("no digits here", policy), None);
        }
    }
}
