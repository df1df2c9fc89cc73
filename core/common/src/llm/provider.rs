//! LLMプロバイダのトレイトとメッセージ型

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（OpenAI 互換、Echo）はこのトレイトを実装する必要があります。
pub trait LlmProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストペイロードを生成
    ///
    /// # Arguments
    /// * `messages` - 送信するメッセージ列（時系列順）
    fn make_request_payload(&self, messages: &[Message]) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンスJSON文字列を取得
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスから最初の choice のテキストを抽出
    ///
    /// # Returns
    /// * `Ok(None)` - テキストが存在しない
    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error>;

    /// ペイロード生成 → 送信 → 抽出を 1 回で行う。テキストが無ければ `Error::Json`
    fn complete(&self, messages: &[Message]) -> Result<String, Error> {
        let payload = self.make_request_payload(messages)?;
        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;
        let response_json = self.make_http_request(&request_json)?;
        self.parse_response_text(&response_json)?.ok_or_else(|| {
            Error::json(format!("{}: response has no message content", self.name()))
        })
    }
}

/// メッセージのロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// メッセージ構造体（user / assistant）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
