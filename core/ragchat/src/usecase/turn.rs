//! 1 ターン分のパイプライン
//!
//! 言い換え → 埋め込み → 検索 → コンテキスト組み立て → 回答 を順に 1 回ずつ実行する。
//! どこかで失敗したらそのターンを中断し、履歴はターン開始前の状態に戻す。

use std::sync::Arc;
use std::time::Instant;

use common::error::Error;
use common::ports::outbound::{Log, LogRecord};

use crate::domain::prompt::{build_final_prompt, context_from_matches};
use crate::domain::ChatSession;
use crate::ports::outbound::{Embedder, VectorSearch};
use crate::usecase::{AnswerGenerator, QueryRewriter};

/// 検索件数のデフォルト
pub const DEFAULT_TOP_K: usize = 10;

/// 成功したターンの結果
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub rewritten_query: String,
    pub answer: String,
    /// 検索でヒットした件数
    pub match_count: usize,
}

pub struct RagTurn {
    rewriter: QueryRewriter,
    embedder: Arc<dyn Embedder>,
    search: Arc<dyn VectorSearch>,
    answerer: AnswerGenerator,
    top_k: usize,
    logger: Arc<dyn Log>,
}

impl RagTurn {
    pub fn new(
        rewriter: QueryRewriter,
        embedder: Arc<dyn Embedder>,
        search: Arc<dyn VectorSearch>,
        answerer: AnswerGenerator,
        top_k: usize,
        logger: Arc<dyn Log>,
    ) -> Self {
        Self {
            rewriter,
            embedder,
            search,
            answerer,
            top_k,
            logger,
        }
    }

    /// 1 ターンを実行する。成功時のみ履歴が user + assistant の 2 件増える
    pub fn run(&self, session: &mut ChatSession, question: &str) -> Result<TurnOutcome, Error> {
        let rewritten = self.stage("rewrite", || {
            self.rewriter.rewrite(session.request_view(), question)
        })?;
        let vector = self.stage("embed", || self.embedder.embed(&rewritten))?;
        let matches = self.stage("search", || self.search.search(&vector, self.top_k))?;
        let _ = self.logger.log(
            &LogRecord::info("retrieved context")
                .layer("usecase")
                .kind("retrieval")
                .field("top_k", self.top_k)
                .field("matches", matches.len())
                .field("ids", matches.iter().map(|m| m.id.clone()).collect::<Vec<String>>())
                .field("top_score", matches.first().and_then(|m| m.score))
                .field("dimensions", vector.len()),
        );

        let context = context_from_matches(&matches);
        let prompt = build_final_prompt(&context, &rewritten);

        let mark = session.push_question(prompt);
        let answer = match self.stage("answer", || self.answerer.answer(session.request_view())) {
            Ok(a) => a,
            Err(e) => {
                session.rollback_to(mark);
                return Err(e);
            }
        };
        session.commit_answer(answer.clone());

        Ok(TurnOutcome {
            rewritten_query: rewritten,
            answer,
            match_count: matches.len(),
        })
    }

    /// 1 ステージを実行し、所要時間と成否をログに残す
    fn stage<T>(&self, name: &str, f: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
        let started = Instant::now();
        let result = f();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let record = match &result {
            Ok(_) => LogRecord::info("turn stage finished"),
            Err(e) => LogRecord::error(format!("turn stage failed: {}", e)),
        };
        let _ = self.logger.log(
            &record
                .layer("usecase")
                .kind("perf")
                .field("stage", name)
                .field("elapsed_ms", elapsed_ms),
        );
        result
    }
}
