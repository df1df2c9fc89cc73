//! Outbound ポート: usecase が外界（チャット補完・埋め込み・索引・端末）を使うための trait

pub mod chat_completion;
pub mod embedder;
pub mod line_input;
pub mod turn_sink;
pub mod vector_search;

pub use chat_completion::ChatCompletion;
pub use embedder::Embedder;
pub use line_input::LineInput;
pub use turn_sink::TurnSink;
pub use vector_search::VectorSearch;
