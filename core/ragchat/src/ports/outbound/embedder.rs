//! 埋め込みの Outbound ポート

use common::error::Error;

/// テキストを固定長ベクトルに変換する
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, Error>;
}
