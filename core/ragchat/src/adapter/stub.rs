//! テスト用: 呼び出し順を記録する固定応答の Outbound 実装

#[cfg(test)]
mod stubs {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use common::error::Error;
    use common::llm::Message;

    use crate::domain::SearchMatch;
    use crate::ports::outbound::{ChatCompletion, Embedder, LineInput, TurnSink, VectorSearch};

    /// 呼び出し順の記録（"rewrite", "embed", "search", "answer"）
    pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

    pub fn call_log() -> CallLog {
        Arc::new(Mutex::new(Vec::new()))
    }

    /// テスト用: 用意した応答を順に返す ChatCompletion
    pub struct StubChat {
        label: &'static str,
        calls: CallLog,
        responses: Mutex<VecDeque<Result<String, Error>>>,
        pub requests: Mutex<Vec<Vec<Message>>>,
    }

    impl StubChat {
        pub fn new(label: &'static str, calls: CallLog, responses: Vec<Result<String, Error>>) -> Self {
            Self {
                label,
                calls,
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn requests(&self) -> Vec<Vec<Message>> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl ChatCompletion for StubChat {
        fn complete(&self, messages: &[Message]) -> Result<String, Error> {
            self.calls.lock().unwrap().push(self.label);
            self.requests.lock().unwrap().push(messages.to_vec());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::http("StubChat: no response left")))
        }
    }

    /// テスト用: 固定ベクトル（またはエラー）を返す Embedder
    pub struct StubEmbedder {
        calls: CallLog,
        result: Result<Vec<f32>, Error>,
        pub inputs: Mutex<Vec<String>>,
    }

    impl StubEmbedder {
        pub fn new(calls: CallLog, result: Result<Vec<f32>, Error>) -> Self {
            Self {
                calls,
                result,
                inputs: Mutex::new(Vec::new()),
            }
        }
    }

    impl Embedder for StubEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>, Error> {
            self.calls.lock().unwrap().push("embed");
            self.inputs.lock().unwrap().push(text.to_string());
            self.result.clone()
        }
    }

    /// テスト用: 固定の検索結果（またはエラー）を返す VectorSearch
    pub struct StubSearch {
        calls: CallLog,
        result: Result<Vec<SearchMatch>, Error>,
        pub requests: Mutex<Vec<(Vec<f32>, usize)>>,
    }

    impl StubSearch {
        pub fn new(calls: CallLog, result: Result<Vec<SearchMatch>, Error>) -> Self {
            Self {
                calls,
                result,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn texts(calls: CallLog, texts: &[&str]) -> Self {
            let matches = texts
                .iter()
                .enumerate()
                .map(|(i, t)| SearchMatch::new(format!("m{}", i), Some(1.0 - i as f32 * 0.1), *t))
                .collect();
            Self::new(calls, Ok(matches))
        }
    }

    impl VectorSearch for StubSearch {
        fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<SearchMatch>, Error> {
            self.calls.lock().unwrap().push("search");
            self.requests.lock().unwrap().push((vector.to_vec(), top_k));
            self.result.clone()
        }
    }

    /// テスト用: 用意した行を順に返し、尽きたら EOF
    pub struct ScriptedInput {
        lines: VecDeque<String>,
        pub prompts: Vec<String>,
    }

    impl ScriptedInput {
        pub fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
                prompts: Vec::new(),
            }
        }
    }

    impl LineInput for ScriptedInput {
        fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error> {
            self.prompts.push(prompt.to_string());
            Ok(self.lines.pop_front())
        }
    }

    /// テスト用: 出力を "kind:text" 形式で記録する TurnSink
    #[derive(Default)]
    pub struct RecordingSink {
        pub events: Vec<String>,
    }

    impl TurnSink for RecordingSink {
        fn on_notice(&mut self, text: &str) -> anyhow::Result<()> {
            self.events.push(format!("notice:{}", text));
            Ok(())
        }
        fn on_rewritten(&mut self, query: &str) -> anyhow::Result<()> {
            self.events.push(format!("rewritten:{}", query));
            Ok(())
        }
        fn on_answer(&mut self, answer: &str) -> anyhow::Result<()> {
            self.events.push(format!("answer:{}", answer));
            Ok(())
        }
        fn on_error(&mut self, error: &Error) -> anyhow::Result<()> {
            self.events.push(format!("error:{}", error));
            Ok(())
        }
    }
}

#[cfg(test)]
pub use stubs::*;
