//! 会話履歴のドメイン型
//!
//! user/assistant メッセージ列を時系列順に保持する。プロセス終了で破棄され、永続化しない。

use common::llm::Message;

use super::retention::HistoryRetention;

/// 会話履歴（メッセージ列）
#[derive(Debug, Clone, Default)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    pub fn new() -> Self {
        History {
            messages: Vec::new(),
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// 先頭 `len` 件だけを残す（失敗したターンの巻き戻し用）
    pub fn truncate(&mut self, len: usize) {
        self.messages.truncate(len);
    }

    /// 保持ポリシーから外れた古いメッセージを先頭から捨てる
    pub fn apply_retention(&mut self, retention: &HistoryRetention) {
        let start = retention.retained_start(&self.messages);
        if start > 0 {
            self.messages.drain(..start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::llm::Role;

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut h = History::new();
        assert!(h.is_empty());
        h.push_user("q1");
        h.push_assistant("a1");
        h.push_user("q2");
        let roles: Vec<Role> = h.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(h.messages()[2].content, "q2");
    }

    #[test]
    fn test_truncate() {
        let mut h = History::new();
        h.push_user("q1");
        h.push_assistant("a1");
        h.push_user("dangling");
        h.truncate(2);
        assert_eq!(h.len(), 2);
        assert_eq!(h.messages()[1].content, "a1");
    }

    #[test]
    fn test_apply_retention_window() {
        let mut h = History::new();
        for i in 0..3 {
            h.push_user(format!("q{}", i));
            h.push_assistant(format!("a{}", i));
        }
        h.apply_retention(&HistoryRetention::Window { max_messages: 4 });
        assert_eq!(h.len(), 4);
        assert_eq!(h.messages()[0].content, "q1");
    }
}
