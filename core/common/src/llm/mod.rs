//! LLM（チャット補完）プロバイダの実装
//!
//! OpenAI Chat Completions 互換エンドポイント（OpenRouter 等）と、通信しない Echo を提供します。

pub mod echo;
pub mod factory;
pub mod openai_compat;
pub mod provider;

pub use factory::{create_provider, AnyProvider, ProviderType};
pub use provider::{LlmProvider, Message, Role};
