//! 対話ループ（AwaitingInput ⇄ Processing → Exited）
//!
//! 1 行読み、終了コマンドなら終了、それ以外は 1 ターン実行して回答を表示する。
//! ターンの失敗は表示・記録して次の入力へ進む。ループ自体はターンの失敗で終了しない。

use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Log, LogRecord};

use crate::domain::ChatSession;
use crate::ports::outbound::{LineInput, TurnSink};
use crate::usecase::RagTurn;

pub const DEFAULT_PROMPT: &str = "Ask me anything--> ";
pub const EXIT_COMMAND: &str = "exit";
pub const DEFAULT_WELCOME: &str = "Welcome to the DSA Chatbot! Type 'exit' to quit.";
pub const GOODBYE: &str = "Goodbye!";

/// ループの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    AwaitingInput,
    Processing,
    Exited,
}

/// 終了コマンドか（前後の空白を除き、大文字小文字を区別しない）
pub fn is_exit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

/// ループの集計（ログ用）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub turns_ok: usize,
    pub turns_failed: usize,
}

pub struct ChatLoop {
    turn: RagTurn,
    logger: Arc<dyn Log>,
    prompt: String,
    welcome: String,
}

impl ChatLoop {
    pub fn new(turn: RagTurn, logger: Arc<dyn Log>) -> Self {
        Self {
            turn,
            logger,
            prompt: DEFAULT_PROMPT.to_string(),
            welcome: DEFAULT_WELCOME.to_string(),
        }
    }

    pub fn with_welcome(mut self, welcome: impl Into<String>) -> Self {
        self.welcome = welcome.into();
        self
    }

    /// Exited になるまで回す
    ///
    /// 入力・表示の I/O エラーはループを終了させて返す。ターンのエラーは返さない。
    pub fn run(
        &self,
        session: &mut ChatSession,
        input: &mut dyn LineInput,
        sink: &mut dyn TurnSink,
    ) -> Result<LoopSummary, Error> {
        let mut summary = LoopSummary::default();
        sink.on_notice(&self.welcome).map_err(sink_error)?;

        let mut state = LoopState::AwaitingInput;
        let mut pending: Option<String> = None;
        while state != LoopState::Exited {
            state = match state {
                LoopState::AwaitingInput => match input.read_line(&self.prompt)? {
                    None => LoopState::Exited,
                    Some(line) if is_exit_command(&line) => {
                        sink.on_notice(GOODBYE).map_err(sink_error)?;
                        LoopState::Exited
                    }
                    Some(line) if line.trim().is_empty() => LoopState::AwaitingInput,
                    Some(line) => {
                        pending = Some(line);
                        LoopState::Processing
                    }
                },
                LoopState::Processing => {
                    if let Some(question) = pending.take() {
                        self.process(session, question.trim(), sink, &mut summary)?;
                    }
                    LoopState::AwaitingInput
                }
                LoopState::Exited => LoopState::Exited,
            };
        }
        Ok(summary)
    }

    fn process(
        &self,
        session: &mut ChatSession,
        question: &str,
        sink: &mut dyn TurnSink,
        summary: &mut LoopSummary,
    ) -> Result<(), Error> {
        match self.turn.run(session, question) {
            Ok(outcome) => {
                summary.turns_ok += 1;
                let _ = self.logger.log(
                    &LogRecord::info("turn finished")
                        .layer("usecase")
                        .kind("turn")
                        .field("matches", outcome.match_count)
                        .field("history_len", session.history().len()),
                );
                sink.on_rewritten(&outcome.rewritten_query)
                    .map_err(sink_error)?;
                sink.on_answer(&outcome.answer).map_err(sink_error)?;
            }
            Err(e) => {
                summary.turns_failed += 1;
                let _ = self.logger.log(
                    &LogRecord::error(e.to_string())
                        .layer("usecase")
                        .kind("error")
                        .field("history_len", session.history().len()),
                );
                sink.on_error(&e).map_err(sink_error)?;
            }
        }
        Ok(())
    }
}

fn sink_error(e: anyhow::Error) -> Error {
    Error::io_msg(format!("Failed to write output: {}", e))
}
