//! ragchat 固有のドメイン型（型と不変条件）

pub mod command;
pub mod history;
pub mod prompt;
pub mod retention;
pub mod search_match;
pub mod session;

pub use command::RagCommand;
pub use history::History;
pub use retention::HistoryRetention;
pub use search_match::SearchMatch;
pub use session::ChatSession;
