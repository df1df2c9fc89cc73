//! 配線: 設定から標準アダプタで RagChatApp を組み立てる

use std::sync::Arc;

use common::adapter::{FanoutLog, FileJsonLog, NoopLog, StdFileSystem, StderrLog};
use common::embedding::GeminiEmbeddingProvider;
use common::error::Error;
use common::llm::factory::ProviderOptions;
use common::llm::{create_provider, ProviderType};
use common::embedding::EmbeddingProvider;
use common::llm::LlmProvider;
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogRecord};
use common::vector::{PineconeIndex, VectorIndex};

use crate::adapter::{
    EmptyVectorSearch, IndexVectorSearch, ProviderChatCompletion, ProviderEmbedder, RagSettings,
    ZeroEmbedder,
};
use crate::ports::outbound::{ChatCompletion, Embedder, VectorSearch};
use crate::usecase::{AnswerGenerator, ChatLoop, QueryRewriter, RagChatApp, RagTurn};

/// ロガーを組み立てる（ホームが解決できればファイル、--verbose なら stderr にも）
pub fn wire_logger(env: &dyn EnvResolver, verbose: bool) -> Arc<dyn Log> {
    let mut sinks: Vec<Arc<dyn Log>> = Vec::new();
    if let Ok(home) = env.resolve_home_dir() {
        let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
        sinks.push(Arc::new(FileJsonLog::new(fs, home.log_file())));
    }
    if verbose {
        sinks.push(Arc::new(StderrLog::new()));
    }
    match sinks.len() {
        0 => Arc::new(NoopLog),
        1 => sinks.remove(0),
        _ => Arc::new(FanoutLog::new(sinks)),
    }
}

/// 配線: 設定に従って RagChatApp を組み立てる
pub fn wire_rag(
    settings: &RagSettings,
    env: Arc<dyn EnvResolver>,
    logger: Arc<dyn Log>,
) -> Result<RagChatApp, Error> {
    let provider_type = if settings.echo {
        ProviderType::Echo
    } else {
        ProviderType::OpenAiCompat
    };
    let provider = create_provider(
        provider_type,
        ProviderOptions {
            model: Some(settings.chat_model.clone()),
            base_url: Some(settings.chat_base_url.clone()),
            api_key_env: Some(settings.chat_api_key_env.clone()),
            extra_headers: settings.routing_headers(),
            timeout: settings.http_timeout,
            env: Arc::clone(&env),
        },
    )?;
    let mut wired = LogRecord::info("adapters wired")
        .layer("wiring")
        .kind("config")
        .field("provider_type", provider_type.as_str())
        .field("chat_provider", provider.name());
    let chat: Arc<dyn ChatCompletion> = Arc::new(ProviderChatCompletion::new(provider));

    let (embedder, search): (Arc<dyn Embedder>, Arc<dyn VectorSearch>) = if settings.echo {
        wired = wired.field("embedder", "offline").field("index", "offline");
        (Arc::new(ZeroEmbedder), Arc::new(EmptyVectorSearch))
    } else {
        let embedding = GeminiEmbeddingProvider::new(
            Some(settings.embedding_model.clone()),
            Arc::clone(&env),
            settings.http_timeout,
        )?;
        let index = PineconeIndex::new(
            settings.index_name.clone(),
            Arc::clone(&env),
            settings.http_timeout,
        )?;
        // 索引名が未設定でもここでは失敗させない（検索時に Error::Env）
        wired = wired
            .field("embedder", embedding.name())
            .field("index", index.index_name());
        (
            Arc::new(ProviderEmbedder::new(Arc::new(embedding))),
            Arc::new(IndexVectorSearch::new(Arc::new(index))),
        )
    };

    let _ = logger.log(&wired);

    let turn = RagTurn::new(
        QueryRewriter::new(Arc::clone(&chat)),
        embedder,
        search,
        AnswerGenerator::new(chat),
        settings.top_k,
        Arc::clone(&logger),
    );
    let mut chat_loop = ChatLoop::new(turn, Arc::clone(&logger));
    if let Some(title) = &settings.app_title {
        chat_loop = chat_loop.with_welcome(format!("Welcome to the {}! Type 'exit' to quit.", title));
    }
    Ok(RagChatApp::new(chat_loop, settings.retention, logger))
}
