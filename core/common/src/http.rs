//! HTTP クライアントの共通処理（blocking reqwest）
//!
//! タイムアウト付きクライアントの生成と、非 2xx レスポンスからのエラーメッセージ抽出。

use crate::error::Error;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// HTTP リクエストのデフォルトタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// タイムアウト付きの blocking クライアントを作る
///
/// 失敗は TLS バックエンド初期化などの内部エラーなので `Error::System`。
pub fn build_client(timeout: Duration) -> Result<Client, Error> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::system(format!("Failed to build HTTP client: {}", e)))
}

/// エラーレスポンスを解析してメッセージを抽出する
///
/// `{"error": {"message": ..}}`（OpenAI / Gemini）と `{"message": ..}`（Pinecone）に対応。
pub fn api_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = v["error"]["message"].as_str() {
            return msg.to_string();
        }
        if let Some(msg) = v["message"].as_str() {
            return msg.to_string();
        }
        if let Some(msg) = v["error"].as_str() {
            return msg.to_string();
        }
    }
    format!("HTTP {}: {}", status, body)
}

/// レスポンス本文を読み、非 2xx なら `Error::Http` にする
pub fn read_body(response: Response, service: &str) -> Result<String, Error> {
    let status = response.status();
    let response_text = response
        .text()
        .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;
    if !status.is_success() {
        return Err(Error::http(format!(
            "{} error: {}",
            service,
            api_error_message(status, &response_text)
        )));
    }
    Ok(response_text)
}
