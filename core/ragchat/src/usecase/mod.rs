//! ユースケース（Query Rewriter → 埋め込み → 検索 → 回答生成 → 対話ループ）

pub mod answer;
pub mod app;
pub mod chat_loop;
pub mod rewriter;
pub mod turn;

pub use answer::AnswerGenerator;
pub use app::RagChatApp;
pub use chat_loop::ChatLoop;
pub use rewriter::QueryRewriter;
pub use turn::RagTurn;
