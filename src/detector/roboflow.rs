//! ホスト型検出API連携
//!
//! Roboflow形式のエンドポイントへ画像をmultipartでPOSTし、
//! `predictions` 配列の件数を台数として返す。
//! タイムアウトと通信エラー時の1回だけの再送はこの層で持つ。
//! コア側の契約は「1回限り・失敗は中断」のまま。

use super::{DetectionResult, PalletDetector};
use crate::error::{PalletAiError, Result};
use reqwest::blocking::{multipart, Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// 検出APIレスポンス
#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

/// 個々の予測（件数にしか使わないため最小限のフィールドのみ）
#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    #[allow(dead_code)]
    confidence: f64,
    #[serde(default, rename = "class")]
    #[allow(dead_code)]
    label: String,
}

pub struct RoboflowDetector {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl RoboflowDetector {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PalletAiError::Config(format!("HTTPクライアント初期化失敗: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key,
            client,
        })
    }

    fn send(&self, image: &[u8]) -> std::result::Result<Response, reqwest::Error> {
        let part = multipart::Part::bytes(image.to_vec())
            .file_name("pallet.jpg")
            .mime_str("image/jpeg")?;
        let form = multipart::Form::new().part("file", part);

        self.client
            .post(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str())])
            .multipart(form)
            .send()
    }

    /// 通信エラー（タイムアウト・接続失敗）のみ1回だけ再送する
    fn send_with_retry(&self, image: &[u8]) -> Result<Response> {
        match self.send(image) {
            Ok(response) => Ok(response),
            Err(e) if e.is_timeout() || e.is_connect() => self
                .send(image)
                .map_err(|e| PalletAiError::Detection(format!("通信エラー（再送失敗）: {}", e))),
            Err(e) => Err(PalletAiError::Detection(format!("通信エラー: {}", e))),
        }
    }
}

impl PalletDetector for RoboflowDetector {
    fn detect(&self, image: &[u8]) -> Result<DetectionResult> {
        let response = self.send_with_retry(image)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PalletAiError::Detection(format!(
                "検出APIがステータス{}を返しました: {}",
                status,
                body.trim()
            )));
        }

        let parsed: DetectResponse = response
            .json()
            .map_err(|e| PalletAiError::Detection(format!("レスポンス解析失敗: {}", e)))?;

        Ok(DetectionResult {
            count: parsed.predictions.len() as u32,
        })
    }
}
