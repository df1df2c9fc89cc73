//! アダプター（Outbound ポートの実装）

pub(crate) mod embedder;
pub(crate) mod line_input;
pub(crate) mod llm_chat;
pub(crate) mod offline;
pub(crate) mod settings;
pub(crate) mod sinks;
pub(crate) mod stub;
pub(crate) mod vector_search;

pub(crate) use embedder::ProviderEmbedder;
pub(crate) use line_input::StdinLineInput;
pub(crate) use llm_chat::ProviderChatCompletion;
pub(crate) use offline::{EmptyVectorSearch, ZeroEmbedder};
pub(crate) use settings::RagSettings;
pub(crate) use sinks::StdoutSink;
pub(crate) use vector_search::IndexVectorSearch;
