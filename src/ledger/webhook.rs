//! ホスト型コラボレーター連携（Webhook）
//!
//! スプレッドシート追記と写真保管は、認証やフォルダ管理を抱えた
//! 中継エンドポイント（Apps Script等）へのPOSTとして扱う。
//! 通信エラーのみ1回だけ再送する。

use super::{ImageStore, RecordSink};
use crate::error::{PalletAiError, Result};
use base64::Engine as _;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PalletAiError::Config(format!("HTTPクライアント初期化失敗: {}", e)))
}

/// 通信エラー（タイムアウト・接続失敗）のみ1回だけ再送する
fn post_json_with_retry<T: Serialize>(
    client: &Client,
    endpoint: &str,
    body: &T,
) -> std::result::Result<Response, reqwest::Error> {
    match client.post(endpoint).json(body).send() {
        Ok(response) => Ok(response),
        Err(e) if e.is_timeout() || e.is_connect() => client.post(endpoint).json(body).send(),
        Err(e) => Err(e),
    }
}

/// シート追記リクエスト
#[derive(Serialize)]
struct AppendRequest<'a> {
    row: &'a [String],
}

/// スプレッドシートへ1行追記するWebhook
pub struct SheetWebhook {
    endpoint: String,
    client: Client,
}

impl SheetWebhook {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            endpoint,
            client: build_client(timeout)?,
        })
    }
}

impl RecordSink for SheetWebhook {
    fn append(&self, row: &[String]) -> Result<()> {
        let response = post_json_with_retry(&self.client, &self.endpoint, &AppendRequest { row })
            .map_err(|e| PalletAiError::Persistence(format!("通信エラー: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PalletAiError::Persistence(format!(
                "記録先がステータス{}を返しました: {}",
                status,
                body.trim()
            )));
        }

        Ok(())
    }
}

/// 写真アップロードリクエスト
#[derive(Serialize)]
struct UploadRequest {
    name: String,
    /// JPEGのBase64
    data: String,
}

/// アップロードレスポンス（保管先が返す参照リンク）
#[derive(Deserialize)]
struct UploadResponse {
    link: String,
}

/// 写真をホスト型ストレージへ送るWebhook
pub struct WebhookImageStore {
    endpoint: String,
    client: Client,
}

impl WebhookImageStore {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            endpoint,
            client: build_client(timeout)?,
        })
    }
}

impl ImageStore for WebhookImageStore {
    fn upload(&self, image: &[u8], prefix: &str) -> Result<String> {
        let request = UploadRequest {
            name: format!(
                "{}_{}.jpg",
                prefix,
                chrono::Local::now().format("%Y%m%d%H%M%S")
            ),
            data: base64::engine::general_purpose::STANDARD.encode(image),
        };

        let response = post_json_with_retry(&self.client, &self.endpoint, &request)
            .map_err(|e| PalletAiError::Upload(format!("通信エラー: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(PalletAiError::Upload(format!(
                "保管先がステータス{}を返しました: {}",
                status,
                body.trim()
            )));
        }

        let parsed: UploadResponse = response
            .json()
            .map_err(|e| PalletAiError::Upload(format!("レスポンス解析失敗: {}", e)))?;

        Ok(parsed.link)
    }
}
