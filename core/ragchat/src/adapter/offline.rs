//! --echo 用: ネットワークを使わない埋め込み・検索

use common::error::Error;

use crate::domain::SearchMatch;
use crate::ports::outbound::{Embedder, VectorSearch};

const OFFLINE_DIMENSIONS: usize = 8;

/// 常にゼロベクトルを返す
#[derive(Debug, Clone, Default)]
pub struct ZeroEmbedder;

impl Embedder for ZeroEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, Error> {
        Ok(vec![0.0; OFFLINE_DIMENSIONS])
    }
}

/// 常に 0 件を返す
#[derive(Debug, Clone, Default)]
pub struct EmptyVectorSearch;

impl VectorSearch for EmptyVectorSearch {
    fn search(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<SearchMatch>, Error> {
        Ok(Vec::new())
    }
}
