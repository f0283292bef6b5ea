//! パレット検出モジュール
//!
//! 検出はホスト型の物体検出モデルへの1回のHTTP呼び出し。
//! 返ってきた予測リストの件数をそのまま台数とみなし、
//! モデルの良し悪しはこちらでは検証しない。

pub mod cache;
pub mod roboflow;

pub use cache::DetectCache;
pub use roboflow::RoboflowDetector;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// 1枚の写真に対する検出結果
///
/// 予測の中身は保存しない。件数だけが記録に残る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub count: u32,
}

/// パレット検出のケイパビリティ
pub trait PalletDetector {
    /// JPEGバイト列を検出にかけ、写っているパレットの台数を返す
    ///
    /// 通信・デコードの失敗は `PalletAiError::Detection` で返す。
    fn detect(&self, image: &[u8]) -> Result<DetectionResult>;
}
