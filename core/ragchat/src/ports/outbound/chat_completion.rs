//! チャット補完の Outbound ポート
//!
//! メッセージ列を渡し、最初の choice の本文を受け取る（ストリーミングしない）。

use common::error::Error;
use common::llm::Message;

/// 単発のチャット補完
pub trait ChatCompletion: Send + Sync {
    fn complete(&self, messages: &[Message]) -> Result<String, Error>;
}
