//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use common::error::Error;

use crate::ports::outbound::{LineInput, TurnSink};

/// 対話ループを実行する Inbound ポート
///
/// main はこの trait を実装した型（RagChatApp）の run を呼び出す。
pub trait RunChat {
    /// 入力が尽きるか終了コマンドを受けるまで実行し、終了コードを返す
    fn run(&self, input: &mut dyn LineInput, sink: &mut dyn TurnSink) -> Result<i32, Error>;
}
