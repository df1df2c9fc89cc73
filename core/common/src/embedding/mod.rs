//! 埋め込み（テキスト → 固定長ベクトル）プロバイダ

pub mod gemini;

pub use gemini::GeminiEmbeddingProvider;

use crate::error::Error;

/// 埋め込みプロバイダのトレイト
pub trait EmbeddingProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// 検索クエリ用の埋め込みベクトルを返す（次元数はモデル依存）
    fn embed_query(&self, text: &str) -> Result<Vec<f32>, Error>;
}
