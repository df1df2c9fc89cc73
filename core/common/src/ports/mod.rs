//! ポート（trait）定義

pub mod outbound;
