//! チャット補完の標準実装（common の LlmProvider に委譲）

use common::error::Error;
use common::llm::{LlmProvider, Message};

use crate::ports::outbound::ChatCompletion;

/// LlmProvider で 1 回リクエストし、最初の choice の本文を返す
pub struct ProviderChatCompletion<P: LlmProvider> {
    provider: P,
}

impl<P: LlmProvider> ProviderChatCompletion<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: LlmProvider> ChatCompletion for ProviderChatCompletion<P> {
    fn complete(&self, messages: &[Message]) -> Result<String, Error> {
        self.provider.complete(messages)
    }
}
