//! ベクトル索引（類似検索）クライアント

pub mod pinecone;

pub use pinecone::PineconeIndex;

use crate::error::Error;
use serde::Deserialize;
use serde_json::{Map, Value};

/// 類似検索の 1 件（順位は索引サービスの順序そのまま）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VectorMatch {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl VectorMatch {
    /// metadata.text（本文）
    pub fn text(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("text"))
            .and_then(Value::as_str)
    }
}

/// ベクトル索引のトレイト
pub trait VectorIndex: Send + Sync {
    /// 索引名を返す（ログ用。未解決なら None）
    fn index_name(&self) -> Option<String>;

    /// 上位 `top_k` 件を metadata 付きで返す
    fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>, Error>;
}
