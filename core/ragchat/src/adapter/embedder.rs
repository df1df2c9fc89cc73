//! 埋め込みの標準実装（common の EmbeddingProvider に委譲）

use std::sync::Arc;

use common::embedding::EmbeddingProvider;
use common::error::Error;

use crate::ports::outbound::Embedder;

pub struct ProviderEmbedder {
    provider: Arc<dyn EmbeddingProvider>,
}

impl ProviderEmbedder {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }
}

impl Embedder for ProviderEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, Error> {
        self.provider.embed_query(text)
    }
}
