//! 類似検索の標準実装（common の VectorIndex に委譲し、SearchMatch に変換）

use std::sync::Arc;

use common::error::Error;
use common::vector::{VectorIndex, VectorMatch};

use crate::domain::SearchMatch;
use crate::ports::outbound::VectorSearch;

pub struct IndexVectorSearch {
    index: Arc<dyn VectorIndex>,
}

impl IndexVectorSearch {
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self { index }
    }
}

/// metadata.text の無いヒットは索引の不正なレスポンスとして扱う
fn to_search_match(m: VectorMatch) -> Result<SearchMatch, Error> {
    let text = m
        .text()
        .map(|s| s.to_string())
        .ok_or_else(|| Error::json(format!("Match '{}' has no metadata.text", m.id)))?;
    Ok(SearchMatch::new(m.id, m.score, text))
}

impl VectorSearch for IndexVectorSearch {
    fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<SearchMatch>, Error> {
        self.index
            .query(vector, top_k)?
            .into_iter()
            .map(to_search_match)
            .collect()
    }
}
