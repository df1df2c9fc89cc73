//! Query Rewriter: 履歴を踏まえて後続質問を単独で意味の通る質問に言い換える
//!
//! 履歴は読むだけで変更しない。指示付きの user メッセージは一時的なリストにだけ積む。

use std::sync::Arc;

use common::error::Error;
use common::llm::Message;

use crate::domain::prompt::rewrite_instruction;
use crate::ports::outbound::ChatCompletion;

pub struct QueryRewriter {
    chat: Arc<dyn ChatCompletion>,
}

impl QueryRewriter {
    pub fn new(chat: Arc<dyn ChatCompletion>) -> Self {
        Self { chat }
    }

    /// 言い換え用のメッセージ列（履歴 + 指示付き質問）
    pub fn build_messages(history: &[Message], question: &str) -> Vec<Message> {
        let mut messages = history.to_vec();
        messages.push(Message::user(rewrite_instruction(question)));
        messages
    }

    /// 言い換え後のクエリ（前後の空白を除去）。空なら `Error::Json`
    pub fn rewrite(&self, history: &[Message], question: &str) -> Result<String, Error> {
        let messages = Self::build_messages(history, question);
        let text = self.chat.complete(&messages)?;
        let rewritten = text.trim();
        if rewritten.is_empty() {
            return Err(Error::json("Query rewriter returned an empty response"));
        }
        Ok(rewritten.to_string())
    }
}
