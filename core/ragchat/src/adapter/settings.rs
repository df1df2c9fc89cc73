//! 実行設定の解決（環境変数 + CLI 指定）
//!
//! 優先順位: CLI 指定 > 環境変数 > デフォルト。
//! モデル名・件数・保持ポリシーは起動時に検査する。API キーと索引名は使う時に読む。

use std::time::Duration;

use common::domain::{IndexName, ModelName};
use common::embedding::gemini::DEFAULT_EMBEDDING_MODEL;
use common::error::Error;
use common::http::DEFAULT_TIMEOUT_SECS;
use common::llm::openai_compat::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
use common::ports::outbound::EnvResolver;

use crate::cli::args::validate_top_k;
use crate::cli::Config;
use crate::domain::HistoryRetention;
use crate::usecase::turn::DEFAULT_TOP_K;

pub const CHAT_MODEL_ENV: &str = "RAGCHAT_CHAT_MODEL";
pub const CHAT_BASE_URL_ENV: &str = "RAGCHAT_CHAT_BASE_URL";
pub const HTTP_REFERER_ENV: &str = "RAGCHAT_HTTP_REFERER";
pub const APP_TITLE_ENV: &str = "RAGCHAT_APP_TITLE";
pub const EMBEDDING_MODEL_ENV: &str = "RAGCHAT_EMBEDDING_MODEL";
pub const TOP_K_ENV: &str = "RAGCHAT_TOP_K";
pub const HISTORY_ENV: &str = "RAGCHAT_HISTORY";
pub const HTTP_TIMEOUT_ENV: &str = "RAGCHAT_HTTP_TIMEOUT_SECS";

/// 解決済みの実行設定
#[derive(Debug, Clone, PartialEq)]
pub struct RagSettings {
    pub chat_model: ModelName,
    pub chat_base_url: String,
    pub chat_api_key_env: String,
    /// OpenRouter 向けの任意ヘッダ (HTTP-Referer, X-Title)
    pub http_referer: Option<String>,
    pub app_title: Option<String>,
    pub embedding_model: ModelName,
    /// None なら PINECONE_INDEX_NAME を検索時に読む
    pub index_name: Option<IndexName>,
    pub top_k: usize,
    pub retention: HistoryRetention,
    pub http_timeout: Duration,
    pub echo: bool,
    pub verbose: bool,
}

impl RagSettings {
    pub fn resolve(env: &dyn EnvResolver, config: &Config) -> Result<Self, Error> {
        let chat_model = config
            .model
            .clone()
            .or_else(|| env.var(CHAT_MODEL_ENV).map(ModelName::new))
            .unwrap_or_else(|| ModelName::new(DEFAULT_MODEL));
        let embedding_model = config
            .embedding_model
            .clone()
            .or_else(|| env.var(EMBEDDING_MODEL_ENV).map(ModelName::new))
            .unwrap_or_else(|| ModelName::new(DEFAULT_EMBEDDING_MODEL));

        let top_k = match config.top_k {
            Some(k) => k,
            None => match env.var(TOP_K_ENV) {
                Some(s) => validate_top_k(parse_number(TOP_K_ENV, &s)?)?,
                None => DEFAULT_TOP_K,
            },
        };

        let retention = match config.history {
            Some(r) => r,
            None => env
                .var(HISTORY_ENV)
                .map(|s| s.parse::<HistoryRetention>())
                .transpose()?
                .unwrap_or_default(),
        };

        let http_timeout = match env.var(HTTP_TIMEOUT_ENV) {
            Some(s) => {
                let secs = parse_number(HTTP_TIMEOUT_ENV, &s)?;
                if secs == 0 {
                    return Err(Error::invalid_argument(format!(
                        "{} must be a positive number of seconds",
                        HTTP_TIMEOUT_ENV
                    )));
                }
                Duration::from_secs(secs as u64)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            chat_model,
            chat_base_url: env
                .var(CHAT_BASE_URL_ENV)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            chat_api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            http_referer: env.var(HTTP_REFERER_ENV),
            app_title: env.var(APP_TITLE_ENV),
            embedding_model,
            index_name: config.index.clone(),
            top_k,
            retention,
            http_timeout,
            echo: config.echo,
            verbose: config.verbose,
        })
    }

    /// チャット補完リクエストに付ける任意ヘッダ
    pub fn routing_headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if let Some(r) = &self.http_referer {
            headers.push(("HTTP-Referer".to_string(), r.clone()));
        }
        if let Some(t) = &self.app_title {
            headers.push(("X-Title".to_string(), t.clone()));
        }
        headers
    }
}

fn parse_number(name: &str, value: &str) -> Result<usize, Error> {
    value.trim().parse::<usize>().map_err(|_| {
        Error::invalid_argument(format!("{} must be a non-negative integer (got '{}')", name, value))
    })
}
