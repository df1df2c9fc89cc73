//! Pinecone 索引クライアント
//!
//! データプレーンのホストは PINECONE_INDEX_HOST があればそれを使い、
//! 無ければコントロールプレーン（describe_index）で 1 度だけ解決してキャッシュする。
//! API キー・索引名は最初のクエリ時に環境変数から読む。

use crate::domain::IndexName;
use crate::error::Error;
use crate::http::{build_client, read_body};
use crate::ports::outbound::EnvResolver;
use crate::vector::{VectorIndex, VectorMatch};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

pub const API_KEY_ENV: &str = "PINECONE_API_KEY";
pub const INDEX_NAME_ENV: &str = "PINECONE_INDEX_NAME";
pub const INDEX_HOST_ENV: &str = "PINECONE_INDEX_HOST";
const CONTROL_PLANE_URL: &str = "https://api.pinecone.io";
const API_VERSION: &str = "2024-07";

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<VectorMatch>,
}

/// Pinecone 索引
pub struct PineconeIndex {
    /// 明示指定（--index）。None なら PINECONE_INDEX_NAME
    index_name: Option<IndexName>,
    env: Arc<dyn EnvResolver>,
    client: Client,
    host: OnceLock<String>,
}

impl PineconeIndex {
    pub fn new(
        index_name: Option<IndexName>,
        env: Arc<dyn EnvResolver>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        Ok(Self {
            index_name,
            env,
            client: build_client(timeout)?,
            host: OnceLock::new(),
        })
    }

    fn resolve_index_name(&self) -> Result<IndexName, Error> {
        match &self.index_name {
            Some(name) => Ok(name.clone()),
            None => self.env.require(INDEX_NAME_ENV).map(IndexName::new),
        }
    }

    /// データプレーンのベース URL（https://<host>）
    fn data_plane_url(&self, api_key: &str) -> Result<String, Error> {
        if let Some(host) = self.host.get() {
            return Ok(host.clone());
        }
        let host = match self.env.var(INDEX_HOST_ENV) {
            Some(h) => h,
            None => self.describe_index_host(api_key)?,
        };
        let url = normalize_host(&host);
        Ok(self.host.get_or_init(|| url).clone())
    }

    fn describe_index_host(&self, api_key: &str) -> Result<String, Error> {
        let name = self.resolve_index_name()?;
        let response = self
            .client
            .get(format!("{}/indexes/{}", CONTROL_PLANE_URL, name))
            .header("Api-Key", api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;
        let body = read_body(response, "Pinecone describe_index")?;
        parse_index_host(&body)
    }

    pub fn make_query_payload(vector: &[f32], top_k: usize) -> Value {
        json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true
        })
    }

    pub fn parse_query_response(response_json: &str) -> Result<Vec<VectorMatch>, Error> {
        let parsed: QueryResponse = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse Pinecone query response: {}", e)))?;
        Ok(parsed.matches)
    }
}

/// scheme が無ければ https:// を付け、末尾の / を落とす
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

fn parse_index_host(body: &str) -> Result<String, Error> {
    let v: Value = serde_json::from_str(body)
        .map_err(|e| Error::json(format!("Failed to parse describe_index response: {}", e)))?;
    v["host"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| Error::json("describe_index response has no host"))
}

impl VectorIndex for PineconeIndex {
    fn index_name(&self) -> Option<String> {
        self.resolve_index_name().ok().map(|n| n.to_string())
    }

    fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>, Error> {
        let api_key = self.env.require(API_KEY_ENV)?;
        let base = self.data_plane_url(&api_key)?;
        let body = serde_json::to_string(&Self::make_query_payload(vector, top_k))
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;

        let response = self
            .client
            .post(format!("{}/query", base))
            .header("Api-Key", api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;
        let response_text = read_body(response, "Pinecone query")?;
        Self::parse_query_response(&response_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MapEnvResolver;

    fn index(name: Option<&str>, env: MapEnvResolver) -> PineconeIndex {
        PineconeIndex::new(name.map(IndexName::new), Arc::new(env), Duration::from_secs(1))
            .unwrap()
    }

    #[test]
    fn test_make_query_payload() {
        let payload = PineconeIndex::make_query_payload(&[0.5, 1.0], 10);
        assert_eq!(payload["topK"], 10);
        assert_eq!(payload["includeMetadata"], true);
        assert_eq!(payload["vector"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_query_response_keeps_service_order() {
        let body = r#"{
            "matches": [
                {"id": "b", "score": 0.9, "metadata": {"text": "B text"}},
                {"id": "a", "score": 0.7, "metadata": {"text": "A text", "page": 3}}
            ],
            "namespace": ""
        }"#;
        let matches = PineconeIndex::parse_query_response(body).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "b");
        assert_eq!(matches[0].text(), Some("B text"));
        assert_eq!(matches[1].score, Some(0.7));
    }

    #[test]
    fn test_parse_query_response_without_matches() {
        assert!(PineconeIndex::parse_query_response(r#"{"namespace":""}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_match_without_text_metadata() {
        let body = r#"{"matches":[{"id":"x","score":0.1}]}"#;
        let matches = PineconeIndex::parse_query_response(body).unwrap();
        assert!(matches[0].text().is_none());
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("docs-abc.svc.pinecone.io"), "https://docs-abc.svc.pinecone.io");
        assert_eq!(normalize_host("http://localhost:5080/"), "http://localhost:5080");
    }

    #[test]
    fn test_parse_index_host() {
        assert_eq!(
            parse_index_host(r#"{"name":"docs","host":"docs-abc.svc.pinecone.io"}"#).unwrap(),
            "docs-abc.svc.pinecone.io"
        );
        assert!(parse_index_host(r#"{"name":"docs"}"#).is_err());
    }

    #[test]
    fn test_missing_api_key_fails_at_first_use() {
        let idx = index(None, MapEnvResolver::new().with(INDEX_NAME_ENV, "docs"));
        let err = idx.query(&[1.0], 10).unwrap_err();
        assert!(matches!(err, Error::Env(ref m) if m.contains(API_KEY_ENV)));
    }

    #[test]
    fn test_index_name_prefers_explicit_over_env() {
        let env = MapEnvResolver::new().with(INDEX_NAME_ENV, "from-env");
        assert_eq!(index(Some("cli"), env.clone()).index_name().as_deref(), Some("cli"));
        assert_eq!(index(None, env).index_name().as_deref(), Some("from-env"));
        assert!(index(None, MapEnvResolver::new()).index_name().is_none());
    }

    #[test]
    fn test_host_override_skips_control_plane() {
        let env = MapEnvResolver::new().with(INDEX_HOST_ENV, "docs-abc.svc.pinecone.io");
        let idx = index(None, env);
        assert_eq!(
            idx.data_plane_url("key").unwrap(),
            "https://docs-abc.svc.pinecone.io"
        );
    }
}
