//! 対話ループの出力先 Outbound ポート
//!
//! 実装は adapter::StdoutSink（stdout / stderr に表示）やテスト用の記録 Sink。

use anyhow::Result;
use common::error::Error;

/// 対話ループが表示するイベントの受け口
pub trait TurnSink {
    /// 起動時・終了時などの案内文
    fn on_notice(&mut self, text: &str) -> Result<()>;
    /// 言い換え後のクエリ
    fn on_rewritten(&mut self, query: &str) -> Result<()>;
    /// 回答
    fn on_answer(&mut self, answer: &str) -> Result<()>;
    /// ターンの失敗
    fn on_error(&mut self, error: &Error) -> Result<()>;
}
