//! 会話履歴の保持ポリシー
//!
//! 無制限・メッセージ数・文字数の上限を明示的に選ぶ。捨てるのは常に先頭（古い側）。

use common::error::Error;
use common::llm::{Message, Role};
use std::fmt;
use std::str::FromStr;

/// 履歴の保持ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryRetention {
    /// 全件保持する
    #[default]
    Unbounded,
    /// 新しい方から `max_messages` 件だけ保持する
    Window { max_messages: usize },
    /// 内容の合計文字数が `max_chars` 以下になるまで古い方を捨てる（最新の 1 件は予算超過でも残す）
    CharBudget { max_chars: usize },
}

impl HistoryRetention {
    /// 残すべき先頭のインデックスを返す（`messages[start..]` を保持する）
    ///
    /// 先頭が assistant なら落とす。assistant しか残らない場合は空になる（ペアごと捨てる）。
    pub fn retained_start(&self, messages: &[Message]) -> usize {
        let len = messages.len();
        if len == 0 {
            return 0;
        }
        let mut start = match *self {
            HistoryRetention::Unbounded => 0,
            HistoryRetention::Window { max_messages } => len.saturating_sub(max_messages.max(1)),
            HistoryRetention::CharBudget { max_chars } => {
                let mut total = 0usize;
                let mut start = len;
                for (i, m) in messages.iter().enumerate().rev() {
                    total += m.content.chars().count();
                    if total > max_chars && i != len - 1 {
                        break;
                    }
                    start = i;
                }
                start
            }
        };
        while start < len && messages[start].role == Role::Assistant {
            start += 1;
        }
        start
    }

    /// 保持ポリシーを適用したスライス
    pub fn view<'a>(&self, messages: &'a [Message]) -> &'a [Message] {
        &messages[self.retained_start(messages)..]
    }
}

impl fmt::Display for HistoryRetention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryRetention::Unbounded => write!(f, "unbounded"),
            HistoryRetention::Window { max_messages } => write!(f, "window:{}", max_messages),
            HistoryRetention::CharBudget { max_chars } => write!(f, "chars:{}", max_chars),
        }
    }
}

impl FromStr for HistoryRetention {
    type Err = Error;

    /// `unbounded` / `window:<n>` / `chars:<n>`（n は 1 以上）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "unbounded" {
            return Ok(HistoryRetention::Unbounded);
        }
        let (kind, value) = s.split_once(':').ok_or_else(|| {
            Error::invalid_argument(format!(
                "Invalid history policy '{}': expected unbounded, window:<n> or chars:<n>",
                s
            ))
        })?;
        let n: usize = value
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "Invalid history policy '{}': limit must be a positive integer",
                    s
                ))
            })?;
        match kind {
            "window" => Ok(HistoryRetention::Window { max_messages: n }),
            "chars" => Ok(HistoryRetention::CharBudget { max_chars: n }),
            _ => Err(Error::invalid_argument(format!(
                "Unknown history policy '{}': expected unbounded, window:<n> or chars:<n>",
                kind
            ))),
        }
    }
}
