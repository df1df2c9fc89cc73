//! Echoプロバイダの実装
//!
//! このプロバイダは実際にLLM APIを呼び出さず、最後の user メッセージをそのまま返します。
//! ネットワーク無しでチャットループを動かすデバッグ用（--echo）。

use crate::error::Error;
use crate::llm::provider::{LlmProvider, Message, Role};
use serde_json::{json, Value};

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn make_request_payload(&self, messages: &[Message]) -> Result<Value, Error> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("");
        Ok(json!({
            "echo": last_user,
            "message_count": messages.len(),
        }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        // 実際のAPI呼び出しは行わず、リクエストをそのまま返す
        Ok(request_json.to_string())
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;
        Ok(v["echo"].as_str().map(|s| format!("[echo] {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_returns_last_user_message() {
        let p = EchoProvider::new();
        let text = p
            .complete(&[
                Message::user("first"),
                Message::assistant("reply"),
                Message::user("second"),
            ])
            .unwrap();
        assert_eq!(text, "[echo] second");
    }

    #[test]
    fn test_echo_empty_messages() {
        let p = EchoProvider::new();
        assert_eq!(p.complete(&[]).unwrap(), "[echo] ");
    }
}
