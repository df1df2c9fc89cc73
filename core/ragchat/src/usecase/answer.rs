//! Answer Generator: コンテキスト付きの履歴をチャット補完に渡して回答を得る

use std::sync::Arc;

use common::error::Error;
use common::llm::Message;

use crate::ports::outbound::ChatCompletion;

pub struct AnswerGenerator {
    chat: Arc<dyn ChatCompletion>,
}

impl AnswerGenerator {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }

    /// 回答本文（前後の空白を除去）。空なら `Error::Json`
    pub fn answer(&self, messages: &[Message]) -> Result<String, Error> {
        let text = self.chat.complete(messages)?;
        let answer = text.trim();
        if answer.is_empty() {
            return Err(Error::json("Answer generator returned an empty response"));
        }
        Ok(answer.to_string())
    }
}
