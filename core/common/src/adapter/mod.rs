//! アダプター（Outbound ポートの標準実装）
//!
//! usecase はポートの trait 経由でのみ環境変数・ファイル・ログに触れる。
//! 実装は標準実装（Std*）やテスト用のモックを注入する。

pub mod file_json_log;
pub mod map_env_resolver;
pub mod std_env_resolver;
pub mod std_fs;
pub mod stderr_log;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use map_env_resolver::MapEnvResolver;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use stderr_log::{FanoutLog, StderrLog};
