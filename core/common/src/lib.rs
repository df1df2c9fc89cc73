//! ragchat 共通ライブラリ
//!
//! エラー型・ログ・環境変数解決と、外部サービス（チャット補完・埋め込み・ベクトル索引）の
//! HTTP クライアントを提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Outbound ポート（trait）
pub mod ports;

/// ポートの標準実装
pub mod adapter;

/// HTTP クライアントの共通処理
pub mod http;

/// LLM（チャット補完）プロバイダ
pub mod llm;

/// 埋め込みプロバイダ
pub mod embedding;

/// ベクトル索引クライアント
pub mod vector;
