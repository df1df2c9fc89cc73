//! アプリケーション（新しいセッションで対話ループを実行する）

use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Log, LogRecord};

use crate::domain::{ChatSession, HistoryRetention};
use crate::ports::inbound::RunChat;
use crate::ports::outbound::{LineInput, TurnSink};
use crate::usecase::ChatLoop;

pub struct RagChatApp {
    chat_loop: ChatLoop,
    retention: HistoryRetention,
    logger: Arc<dyn Log>,
}

impl RagChatApp {
    pub fn new(chat_loop: ChatLoop, retention: HistoryRetention, logger: Arc<dyn Log>) -> Self {
        Self {
            chat_loop,
            retention,
            logger,
        }
    }
}

impl RunChat for RagChatApp {
    fn run(&self, input: &mut dyn LineInput, sink: &mut dyn TurnSink) -> Result<i32, Error> {
        let mut session = ChatSession::new(self.retention);
        let _ = self.logger.log(
            &LogRecord::info("session started")
                .layer("usecase")
                .kind("lifecycle")
                .field("retention", self.retention.to_string()),
        );
        let summary = self.chat_loop.run(&mut session, input, sink)?;
        let _ = self.logger.log(
            &LogRecord::info("session finished")
                .layer("usecase")
                .kind("lifecycle")
                .field("turns_ok", summary.turns_ok)
                .field("turns_failed", summary.turns_failed)
                .field("history_len", session.history().len()),
        );
        Ok(0)
    }
}
