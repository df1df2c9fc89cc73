//! 標準入力から 1 行読む LineInput 実装

use common::error::Error;
use std::io::{self, BufRead, Write};

use crate::ports::outbound::LineInput;

pub struct StdinLineInput;

impl StdinLineInput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdinLineInput {
    fn default() -> Self {
        Self::new()
    }
}

/// 行末の \n / \r\n を取り除く
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

impl LineInput for StdinLineInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error> {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| Error::io_msg(e.to_string()))?;

        let mut line = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&line).to_string()))
    }
}
