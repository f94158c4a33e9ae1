use async_trait::async_trait;
use claimguard_core::{Error, Result, RetrievedPassage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::store::KnowledgeStore;

/// Knowledge store reached over a vector-search retrieve endpoint:
/// `POST {endpoint}/knowledgebases/{id}/retrieve`.
pub struct HttpKnowledgeStore {
    client: reqwest::Client,
    endpoint: String,
    knowledge_base_id: String,
}

impl HttpKnowledgeStore {
    pub fn new(
        endpoint: impl Into<String>,
        knowledge_base_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("claimguard/0.1 (policy context retrieval)")
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Retrieval(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            knowledge_base_id: knowledge_base_id.into(),
        })
    }

    fn retrieve_url(&self) -> String {
        format!(
            "{}/knowledgebases/{}/retrieve",
            self.endpoint.trim_end_matches('/'),
            self.knowledge_base_id
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrieveRequest<'a> {
    retrieval_query: RetrievalQuery<'a>,
    retrieval_configuration: RetrievalConfiguration,
}

#[derive(Serialize)]
struct RetrievalQuery<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrievalConfiguration {
    vector_search_configuration: VectorSearchConfiguration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VectorSearchConfiguration {
    number_of_results: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RetrieveResponse {
    #[serde(default)]
    retrieval_results: Vec<RetrievalHit>,
}

#[derive(Deserialize)]
struct RetrievalHit {
    content: HitContent,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    location: Option<serde_json::Value>,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct HitContent {
    text: String,
}

impl From<RetrievalHit> for RetrievedPassage {
    fn from(hit: RetrievalHit) -> Self {
        let empty = || serde_json::Value::Object(Default::default());
        RetrievedPassage {
            content: hit.content.text,
            score: hit.score.unwrap_or(0.0),
            location: hit.location.unwrap_or_else(empty),
            metadata: hit.metadata.unwrap_or_else(empty),
        }
    }
}

#[async_trait]
impl KnowledgeStore for HttpKnowledgeStore {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RetrievedPassage>> {
        let request = RetrieveRequest {
            retrieval_query: RetrievalQuery { text: query },
            retrieval_configuration: RetrievalConfiguration {
                vector_search_configuration: VectorSearchConfiguration {
                    number_of_results: max_results,
                },
            },
        };

        let response = self
            .client
            .post(self.retrieve_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Retrieval(format!("Failed to query knowledge base: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Retrieval(format!(
                "HTTP error {} from knowledge base {}",
                response.status().as_u16(),
                self.knowledge_base_id
            )));
        }

        let body: RetrieveResponse = response
            .json()
            .await
            .map_err(|e| Error::Retrieval(format!("Failed to read response: {}", e)))?;

        Ok(body
            .retrieval_results
            .into_iter()
            .map(RetrievedPassage::from)
            .collect())
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> HttpKnowledgeStore {
        HttpKnowledgeStore::new(server.uri(), "kb-123", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_maps_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/knowledgebases/kb-123/retrieve"))
            .and(body_partial_json(json!({
                "retrievalQuery": { "text": "hail damage" },
                "retrievalConfiguration": {
                    "vectorSearchConfiguration": { "numberOfResults": 2 }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "retrievalResults": [
                    {
                        "content": { "text": "Comprehensive covers hail." },
                        "score": 0.91,
                        "location": { "type": "S3", "s3Location": { "uri": "s3://policies/auto.pdf" } },
                        "metadata": { "page": 4 }
                    },
                    { "content": { "text": "Deductibles apply per event." } }
                ]
            })))
            .mount(&server)
            .await;

        let results = store(&server).search("hail damage", 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "Comprehensive covers hail.");
        assert_eq!(results[0].score, 0.91);
        assert_eq!(results[0].location["type"], "S3");
        assert_eq!(results[0].metadata["page"], 4);
        assert_eq!(results[1].score, 0.0);
        assert_eq!(results[1].location, json!({}));
        assert_eq!(results[1].metadata, json!({}));
    }

    #[tokio::test]
    async fn test_empty_response_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let results = store(&server).search("anything", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_retrieval_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = store(&server).search("anything", 5).await.unwrap_err();
        assert!(matches!(err, Error::Retrieval(ref msg) if msg.contains("503")));
    }

    #[test]
    fn test_retrieve_url_trims_trailing_slash() {
        let store =
            HttpKnowledgeStore::new("http://kb.local/", "abc", Duration::from_secs(1)).unwrap();
        assert_eq!(store.retrieve_url(), "http://kb.local/knowledgebases/abc/retrieve");
    }
}
