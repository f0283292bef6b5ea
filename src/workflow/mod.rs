//! 搬出記録ワークフロー
//!
//! 2段階ウィザードの状態を1つの構造体で持つ。
//! ステップ1: 管理票番号の登録（入力・バーコード読取）
//! ステップ2: パレット撮影→検出→確認→保存
//!
//! 状態はセッションが専有し、保存完了または明示的なクリアで破棄される。

pub mod record;

pub use record::{PalletRecord, HEADERS};

use crate::error::{PalletAiError, Result};
use crate::ledger::{ImageStore, RecordSink, NO_IMAGE};
use crate::manifest::{AddOutcome, ExtractPolicy, ManifestSet};

/// ウィザードの現在ステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// ステップ1: 管理票の特定
    #[default]
    Document,
    /// ステップ2: パレットの計数
    Counting,
}

/// 進行中の1件分のワークフロー状態
#[derive(Debug, Clone, Default)]
pub struct CountSession {
    step: WizardStep,
    policy: ExtractPolicy,
    manifests: ManifestSet,
    detected_count: Option<u32>,
    confirmed_count: Option<i64>,
}

impl CountSession {
    pub fn new(policy: ExtractPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn policy(&self) -> ExtractPolicy {
        self.policy
    }

    pub fn manifests(&self) -> &ManifestSet {
        &self.manifests
    }

    /// 管理票番号のテキストを登録する（手入力・読取結果の両方が通る）
    pub fn add_manifest_text(&mut self, raw_text: &str) -> AddOutcome {
        self.manifests.add(raw_text, self.policy)
    }

    /// ステップ2へ進む
    ///
    /// 管理票番号が1件もない場合は進めない（状態は変わらない）。
    pub fn advance(&mut self) -> Result<()> {
        if self.manifests.is_empty() {
            return Err(PalletAiError::Workflow(
                "管理票番号を登録してください".into(),
            ));
        }
        self.step = WizardStep::Counting;
        Ok(())
    }

    /// ステップ1へ戻る（登録済みの内容は保持される）
    pub fn back(&mut self) {
        self.step = WizardStep::Document;
    }

    /// 検出結果を記録する
    ///
    /// 確認値の既定は常に最新の検出値になる。
    pub fn record_detection(&mut self, count: u32) {
        self.detected_count = Some(count);
        self.confirmed_count = Some(count as i64);
    }

    /// オペレーターによる確認値の上書き（負数も受け付ける）
    pub fn confirm_count(&mut self, count: i64) {
        self.confirmed_count = Some(count);
    }

    /// 検出された台数（未検出なら0）
    pub fn detected_count(&self) -> u32 {
        self.detected_count.unwrap_or(0)
    }

    /// 確認済み台数（未確認なら検出値）
    pub fn confirmed_count(&self) -> i64 {
        self.confirmed_count
            .unwrap_or_else(|| self.detected_count() as i64)
    }

    /// セッションを確定済み記録へ変換する
    ///
    /// ステップ2でのみ呼べる。セッション自体は変更しない。
    pub fn finish(
        &self,
        recorded_at: String,
        document_link: String,
        pallet_link: String,
    ) -> Result<PalletRecord> {
        if self.step != WizardStep::Counting {
            return Err(PalletAiError::Workflow(
                "パレット計数ステップが完了していません".into(),
            ));
        }

        Ok(PalletRecord {
            recorded_at,
            manifest_columns: self.manifests.to_columns(),
            detected_count: self.detected_count(),
            confirmed_count: self.confirmed_count(),
            document_link,
            pallet_link,
        })
    }

    /// 状態を全て破棄して最初のステップへ戻す
    pub fn clear(&mut self) {
        let policy = self.policy;
        *self = Self::new(policy);
    }
}

/// 確定操作: 写真を保管し、台帳へ1行追記する
///
/// アップロードか追記のどちらが失敗してもその時点で中断し、
/// 部分的な行が書かれることはない。リトライは行わない。
pub fn submit<I, S>(
    session: &CountSession,
    document_photo: Option<&[u8]>,
    pallet_photo: &[u8],
    store: &I,
    sink: &S,
) -> Result<PalletRecord>
where
    I: ImageStore + ?Sized,
    S: RecordSink + ?Sized,
{
    let document_link = match document_photo {
        Some(bytes) => store.upload(bytes, "Document")?,
        None => NO_IMAGE.to_string(),
    };
    let pallet_link = store.upload(pallet_photo, "Pallet")?;

    let recorded_at = chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let record = session.finish(recorded_at, document_link, pallet_link)?;

    sink.append(&record.to_row())?;
    Ok(record)
}
