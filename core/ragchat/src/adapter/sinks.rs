//! 対話ループの出力を stdout / stderr に表示する Sink

use anyhow::Result;
use common::error::Error;
use std::io::{self, Write};

use crate::ports::outbound::TurnSink;

pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnSink for StdoutSink {
    fn on_notice(&mut self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", text)?;
        out.flush()?;
        Ok(())
    }

    fn on_rewritten(&mut self, query: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "\n(Rewritten Query: {})", query)?;
        Ok(())
    }

    fn on_answer(&mut self, answer: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "\n")?;
        writeln!(out, "{}", answer)?;
        out.flush()?;
        Ok(())
    }

    fn on_error(&mut self, error: &Error) -> Result<()> {
        let mut err = io::stderr().lock();
        writeln!(err, "An error occurred during chat: {}", error)?;
        Ok(())
    }
}
