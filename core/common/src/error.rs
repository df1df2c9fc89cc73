//! エラーハンドリング
//!
//! 全レイヤーで共通の `Error` を使い、CLI では `exit_code()` で終了コードに変換する。

/// エラー型
///
/// バリアントごとに sysexits.h 相当の終了コードを持つ。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数・設定値の不正（usage を表示する）
    #[error("{0}")]
    InvalidArgument(String),
    /// 必須の環境変数が未設定
    #[error("{0}")]
    Env(String),
    /// HTTP 通信・API エラー
    #[error("{0}")]
    Http(String),
    /// JSON の生成・解析エラー、想定外のレスポンス形式
    #[error("{0}")]
    Json(String),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    System(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Error::Env(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn system(msg: impl Into<String>) -> Self {
        Error::System(msg.into())
    }

    /// 終了コード（sysexits.h）
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Json(_) => 65,
            Error::Http(_) => 69,
            Error::System(_) => 70,
            Error::Io(_) => 74,
            Error::Env(_) => 78,
        }
    }

    /// usage を表示すべきエラーか
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}
