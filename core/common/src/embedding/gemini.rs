//! Gemini embedContent による埋め込みプロバイダ
//!
//! API キーは呼び出し時に環境変数から読み、`x-goog-api-key` ヘッダで送る（URL には載せない）。
//! 未設定なら最初の呼び出しで `Error::Env`。

use crate::domain::ModelName;
use crate::embedding::EmbeddingProvider;
use crate::error::Error;
use crate::http::{build_client, read_body};
use crate::ports::outbound::EnvResolver;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini 埋め込みプロバイダ
pub struct GeminiEmbeddingProvider {
    model: ModelName,
    base_url: String,
    api_key_env: String,
    env: Arc<dyn EnvResolver>,
    client: Client,
}

impl GeminiEmbeddingProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `model` - モデル名（None のとき DEFAULT_EMBEDDING_MODEL）
    pub fn new(
        model: Option<ModelName>,
        env: Arc<dyn EnvResolver>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        Ok(Self {
            model: model.unwrap_or_else(|| ModelName::new(DEFAULT_EMBEDDING_MODEL)),
            base_url: BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            env,
            client: build_client(timeout)?,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:embedContent", self.base_url, self.model)
    }

    /// リクエストペイロードを生成（検索クエリとして埋め込む）
    pub fn make_request_payload(&self, text: &str) -> Value {
        json!({
            "model": format!("models/{}", self.model),
            "content": { "parts": [{ "text": text }] },
            "taskType": "RETRIEVAL_QUERY"
        })
    }

    /// レスポンスから `embedding.values` を取り出す
    pub fn parse_embedding(response_json: &str) -> Result<Vec<f32>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(error) = v.get("error") {
            let msg = error["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("Gemini API error: {}", msg)));
        }

        let values = v["embedding"]["values"]
            .as_array()
            .ok_or_else(|| Error::json("Gemini embedding response has no embedding.values"))?;
        values
            .iter()
            .map(|x| {
                x.as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| Error::json("Gemini embedding contains a non-numeric value"))
            })
            .collect()
    }
}

impl EmbeddingProvider for GeminiEmbeddingProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn embed_query(&self, text: &str) -> Result<Vec<f32>, Error> {
        let api_key = self.env.require(&self.api_key_env)?;
        let body = serde_json::to_string(&self.make_request_payload(text))
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let response = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .header(API_KEY_HEADER, api_key)
            .body(body)
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e.without_url())))?;
        let response_text = read_body(response, "Gemini API")?;

        let vector = Self::parse_embedding(&response_text)?;
        if vector.is_empty() {
            return Err(Error::json("Gemini returned an empty embedding"));
        }
        Ok(vector)
    }
}
