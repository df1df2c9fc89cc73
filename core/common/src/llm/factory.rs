//! プロバイダファクトリー
//!
//! プロバイダタイプに基づいて適切なプロバイダを作成します。

use crate::domain::ModelName;
use crate::error::Error;
use crate::llm::echo::EchoProvider;
use crate::llm::openai_compat::OpenAiCompatProvider;
use crate::llm::provider::{LlmProvider, Message};
use crate::ports::outbound::EnvResolver;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// プロバイダタイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// OpenAI Chat Completions 互換 (/chat/completions)
    OpenAiCompat,
    /// Echo（最後の user メッセージを返すだけ）
    Echo,
}

impl ProviderType {
    /// プロバイダタイプを文字列に変換（ログ用）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAiCompat => "openai_compat",
            Self::Echo => "echo",
        }
    }
}

/// プロバイダ生成オプション（OpenAiCompat 用。Echo では無視される）
#[derive(Clone)]
pub struct ProviderOptions {
    pub model: Option<ModelName>,
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
    /// (ヘッダ名, 値)
    pub extra_headers: Vec<(String, String)>,
    pub timeout: Duration,
    pub env: Arc<dyn EnvResolver>,
}

/// プロバイダのenumラッパー
///
/// 異なるプロバイダタイプを型安全に扱うために使用します。
pub enum AnyProvider {
    OpenAiCompat(OpenAiCompatProvider),
    Echo(EchoProvider),
}

impl LlmProvider for AnyProvider {
    fn name(&self) -> &str {
        match self {
            Self::OpenAiCompat(p) => p.name(),
            Self::Echo(p) => p.name(),
        }
    }

    fn make_request_payload(&self, messages: &[Message]) -> Result<Value, Error> {
        match self {
            Self::OpenAiCompat(p) => p.make_request_payload(messages),
            Self::Echo(p) => p.make_request_payload(messages),
        }
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        match self {
            Self::OpenAiCompat(p) => p.make_http_request(request_json),
            Self::Echo(p) => p.make_http_request(request_json),
        }
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        match self {
            Self::OpenAiCompat(p) => p.parse_response_text(response_json),
            Self::Echo(p) => p.parse_response_text(response_json),
        }
    }
}

/// プロバイダを作成する
pub fn create_provider(
    provider_type: ProviderType,
    options: ProviderOptions,
) -> Result<AnyProvider, Error> {
    match provider_type {
        ProviderType::OpenAiCompat => {
            let mut provider = OpenAiCompatProvider::new(
                options.model,
                options.base_url,
                options.api_key_env,
                options.env,
                options.timeout,
            )?;
            for (name, value) in options.extra_headers {
                provider = provider.with_header(name, value);
            }
            Ok(AnyProvider::OpenAiCompat(provider))
        }
        ProviderType::Echo => Ok(AnyProvider::Echo(EchoProvider::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MapEnvResolver;

    fn options() -> ProviderOptions {
        ProviderOptions {
            model: Some(ModelName::new("test-model")),
            base_url: None,
            api_key_env: None,
            extra_headers: vec![("X-Title".to_string(), "ragchat".to_string())],
            timeout: Duration::from_secs(1),
            env: Arc::new(MapEnvResolver::new()),
        }
    }

    #[test]
    fn test_provider_type_as_str() {
        assert_eq!(ProviderType::OpenAiCompat.as_str(), "openai_compat");
        assert_eq!(ProviderType::Echo.as_str(), "echo");
    }

    #[test]
    fn test_create_provider_names() {
        let p = create_provider(ProviderType::OpenAiCompat, options()).unwrap();
        assert_eq!(p.name(), "openai_compat");
        let p = create_provider(ProviderType::Echo, options()).unwrap();
        assert_eq!(p.name(), "echo");
    }

    #[test]
    fn test_create_provider_uses_model_option() {
        let p = create_provider(ProviderType::OpenAiCompat, options()).unwrap();
        let payload = p.make_request_payload(&[Message::user("hi")]).unwrap();
        assert_eq!(payload["model"], "test-model");
    }
}
