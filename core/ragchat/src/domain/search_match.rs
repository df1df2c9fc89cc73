//! 類似検索でヒットした 1 件（ターン内でのみ使う）

/// 検索結果の 1 件。並び順は索引サービスの順位そのまま
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    pub id: String,
    /// 類似度（表示・ログ用。並べ替えには使わない）
    pub score: Option<f32>,
    /// metadata.text
    pub text: String,
}

impl SearchMatch {
    pub fn new(id: impl Into<String>, score: Option<f32>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            score,
            text: text.into(),
        }
    }
}
