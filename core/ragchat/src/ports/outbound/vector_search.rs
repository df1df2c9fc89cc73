//! 類似検索の Outbound ポート

use common::error::Error;

use crate::domain::SearchMatch;

/// クエリベクトルに近いパッセージを上位 `top_k` 件まで返す
///
/// 並び順・同点時の扱いは索引サービスに委ねる。
pub trait VectorSearch: Send + Sync {
    fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<SearchMatch>, Error>;
}
