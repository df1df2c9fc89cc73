//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! base_url で任意のエンドポイント（OpenRouter 等）を指定可能。
//! API キーはリクエスト時に環境変数から読む（未設定なら Authorization を付けない）。

use crate::domain::ModelName;
use crate::error::Error;
use crate::http::{build_client, read_body};
use crate::llm::provider::{LlmProvider, Message};
use crate::ports::outbound::EnvResolver;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "x-ai/grok-4-fast:free";
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    model: ModelName,
    base_url: String,
    api_key_env: Option<String>,
    /// ルーティング用の任意ヘッダ（OpenRouter の HTTP-Referer / X-Title 等）
    extra_headers: Vec<(String, String)>,
    env: Arc<dyn EnvResolver>,
    client: Client,
}

impl OpenAiCompatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `model` - モデル名（None のとき DEFAULT_MODEL）
    /// * `base_url` - ベース URL（None のとき DEFAULT_BASE_URL）
    /// * `api_key_env` - API キーを読む環境変数名（None のとき Authorization を付けない）
    pub fn new(
        model: Option<ModelName>,
        base_url: Option<String>,
        api_key_env: Option<String>,
        env: Arc<dyn EnvResolver>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let model = model.unwrap_or_else(|| ModelName::new(DEFAULT_MODEL));
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            model,
            base_url,
            api_key_env,
            extra_headers: Vec::new(),
            env,
            client: build_client(timeout)?,
        })
    }

    /// 任意ヘッダを追加する
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn auth_header(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|name| self.env.var(name))
            .map(|key| format!("Bearer {}", key))
    }
}

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai_compat"
    }

    fn make_request_payload(&self, messages: &[Message]) -> Result<Value, Error> {
        let messages: Vec<Value> = messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();
        Ok(json!({
            "model": self.model.as_str(),
            "messages": messages,
            "stream": false
        }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let mut builder = self
            .client
            .post(self.url())
            .header("Content-Type", "application/json")
            .body(request_json.to_string());

        if let Some(auth) = self.auth_header() {
            builder = builder.header("Authorization", auth);
        }
        for (name, value) in &self.extra_headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;
        read_body(response, "Chat completions")
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        // OpenRouter は 200 でも error を返すことがある
        if let Some(err) = v.get("error") {
            let msg = err["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("API error: {}", msg)));
        }

        let text = v["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MapEnvResolver;

    fn provider(env: MapEnvResolver) -> OpenAiCompatProvider {
        OpenAiCompatProvider::new(
            None,
            Some("https://example.test/api/v1/".to_string()),
            Some(DEFAULT_API_KEY_ENV.to_string()),
            Arc::new(env),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_and_url() {
        let p = provider(MapEnvResolver::new());
        let payload = p.make_request_payload(&[]).unwrap();
        assert_eq!(payload["model"], DEFAULT_MODEL);
        assert_eq!(p.url(), "https://example.test/api/v1/chat/completions");
    }

    #[test]
    fn test_auth_header_read_from_env_at_call_time() {
        assert!(provider(MapEnvResolver::new()).auth_header().is_none());
        let p = provider(MapEnvResolver::new().with(DEFAULT_API_KEY_ENV, "sk-or-1"));
        assert_eq!(p.auth_header().as_deref(), Some("Bearer sk-or-1"));
    }

    #[test]
    fn test_make_request_payload() {
        let p = provider(MapEnvResolver::new());
        let payload = p
            .make_request_payload(&[Message::user("Q"), Message::assistant("A")])
            .unwrap();
        assert_eq!(payload["model"], DEFAULT_MODEL);
        assert_eq!(payload["stream"], false);
        assert_eq!(payload["messages"].as_array().unwrap().len(), 2);
        assert_eq!(payload["messages"][0]["role"], "user");
        assert_eq!(payload["messages"][1]["content"], "A");
    }

    #[test]
    fn test_parse_response_text_first_choice() {
        let p = provider(MapEnvResolver::new());
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  first  "}},{"message":{"content":"second"}}]}"#;
        assert_eq!(
            p.parse_response_text(body).unwrap().as_deref(),
            Some("  first  ")
        );
    }

    #[test]
    fn test_parse_response_text_missing_content() {
        let p = provider(MapEnvResolver::new());
        assert!(p.parse_response_text(r#"{"choices":[]}"#).unwrap().is_none());
    }

    #[test]
    fn test_parse_response_text_error_body() {
        let p = provider(MapEnvResolver::new());
        let err = p
            .parse_response_text(r#"{"error":{"message":"No auth credentials found","code":401}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Http(ref m) if m.contains("No auth credentials")));
    }

    #[test]
    fn test_parse_response_text_invalid_json() {
        let p = provider(MapEnvResolver::new());
        assert!(matches!(p.parse_response_text("not json"), Err(Error::Json(_))));
    }
}
