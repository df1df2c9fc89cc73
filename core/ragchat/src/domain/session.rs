//! 対話セッション（会話履歴と保持ポリシーを所有する）
//!
//! グローバルな履歴を持たず、ループがセッションを所有して `&mut` で各ターンへ渡す。

use common::llm::Message;

use super::{History, HistoryRetention};

/// 対話セッション
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    history: History,
    retention: HistoryRetention,
}

impl ChatSession {
    pub fn new(retention: HistoryRetention) -> Self {
        Self {
            history: History::new(),
            retention,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// LLM に送る履歴（保持ポリシー適用後）
    pub fn request_view(&self) -> &[Message] {
        self.retention.view(self.history.messages())
    }

    /// コンテキスト付きの user メッセージを追加し、巻き戻し用の位置を返す
    pub fn push_question(&mut self, prompt: impl Into<String>) -> usize {
        let mark = self.history.len();
        self.history.push_user(prompt);
        mark
    }

    /// 回答を追加してターンを確定し、保持ポリシーを適用する
    pub fn commit_answer(&mut self, answer: impl Into<String>) {
        self.history.push_assistant(answer);
        self.history.apply_retention(&self.retention);
    }

    /// `push_question` が返した位置まで巻き戻す
    pub fn rollback_to(&mut self, mark: usize) {
        self.history.truncate(mark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::llm::Role;

    #[test]
    fn test_commit_adds_pair() {
        let mut s = ChatSession::new(HistoryRetention::Unbounded);
        s.push_question("ctx + q");
        s.commit_answer("a");
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.history().messages()[0].role, Role::User);
        assert_eq!(s.history().messages()[1].role, Role::Assistant);
    }

    #[test]
    fn test_rollback_removes_dangling_question() {
        let mut s = ChatSession::new(HistoryRetention::Unbounded);
        s.push_question("q1");
        s.commit_answer("a1");
        let mark = s.push_question("q2");
        assert_eq!(s.history().len(), 3);
        s.rollback_to(mark);
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.history().messages()[1].content, "a1");
    }

    #[test]
    fn test_window_retention_applied_on_commit() {
        let mut s = ChatSession::new(HistoryRetention::Window { max_messages: 2 });
        for i in 0..3 {
            s.push_question(format!("q{}", i));
            s.commit_answer(format!("a{}", i));
        }
        assert_eq!(s.history().len(), 2);
        assert_eq!(s.history().messages()[0].content, "q2");
    }

    #[test]
    fn test_window_one_history_never_starts_with_assistant() {
        let mut s = ChatSession::new(HistoryRetention::Window { max_messages: 1 });
        s.push_question("q0");
        assert_eq!(s.request_view().len(), 1);
        s.commit_answer("a0");
        assert!(s.history().messages().iter().all(|m| m.role != Role::Assistant));
        assert!(s.history().is_empty());

        s.push_question("q1");
        assert_eq!(s.request_view()[0].content, "q1");
    }

    #[test]
    fn test_request_view_includes_pending_question() {
        let mut s = ChatSession::new(HistoryRetention::Window { max_messages: 2 });
        s.push_question("q0");
        s.commit_answer("a0");
        s.push_question("q1");
        let view = s.request_view();
        // 窓 2 件 → [a0, q1] だが先頭 assistant は落とす
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].content, "q1");
    }
}
