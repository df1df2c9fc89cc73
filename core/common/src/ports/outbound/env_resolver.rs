//! 環境変数解決 Outbound ポート
//!
//! usecase・adapter はこの trait 経由でのみ環境変数にアクセスする。
//! テストでは固定の値を返すモックを注入する。

use crate::domain::HomeDir;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用の `MapEnvResolver` など。
pub trait EnvResolver: Send + Sync {
    /// 環境変数の値。未設定・空文字は None
    fn var(&self, name: &str) -> Option<String>;

    /// 必須の環境変数。未設定なら `Error::Env`
    fn require(&self, name: &str) -> Result<String, Error> {
        self.var(name)
            .ok_or_else(|| Error::env(format!("{} environment variable is not set", name)))
    }

    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. RAGCHAT_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/ragchat（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/ragchat
    fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
        if let Some(home) = self.var("RAGCHAT_HOME") {
            return Ok(HomeDir::new(home));
        }
        let config_base = self
            .var("XDG_CONFIG_HOME")
            .map(std::path::PathBuf::from)
            .or_else(|| {
                self.var("HOME")
                    .map(|h| std::path::PathBuf::from(h).join(".config"))
            })
            .ok_or_else(|| Error::env("HOME is not set"))?;
        Ok(HomeDir::new(config_base.join("ragchat")))
    }
}
