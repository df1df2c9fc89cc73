//! 端末からの 1 行入力の Outbound ポート

use common::error::Error;

/// プロンプトを表示して 1 行読む
pub trait LineInput {
    /// 改行を除いた 1 行。入力の終端（EOF）なら None
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error>;
}
