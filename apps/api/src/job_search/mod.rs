//! Job search via the Jooble REST API.

pub mod handlers;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

const JOOBLE_API_URL: &str = "https://jooble.org/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum JobSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jooble API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct JoobleRequest<'a> {
    keywords: &'a str,
    location: &'a str,
}

#[derive(Debug, Deserialize)]
struct JoobleResponse {
    #[serde(default)]
    jobs: Option<Vec<JobListing>>,
}

/// A single job listing, passed through to clients as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub updated: String,
}

/// Jooble returns numeric ids; normalize to strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[derive(Clone)]
pub struct JobSearchClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl JobSearchClient {
    pub fn new(api_key: String) -> Result<Self, JobSearchError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            base_url: JOOBLE_API_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Searches listings. An empty `jobs` field (or none at all) is an empty result.
    pub async fn search(
        &self,
        keywords: &str,
        location: &str,
    ) -> Result<Vec<JobListing>, JobSearchError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, self.api_key))
            .json(&JoobleRequest { keywords, location })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(JobSearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: JoobleResponse = response.json().await?;
        let jobs = body.jobs.unwrap_or_default();
        debug!("Jooble returned {} jobs for '{keywords}' in '{location}'", jobs.len());
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> JobSearchClient {
        JobSearchClient::new("secret".to_string())
            .unwrap()
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_search_posts_keywords_and_parses_jobs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/secret"))
            .and(body_json(json!({"keywords": "rust", "location": "Pune"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalCount": 1,
                "jobs": [{
                    "id": -4711,
                    "title": "Rust Developer",
                    "location": "Pune",
                    "snippet": "Systems work",
                    "salary": "",
                    "source": "example.in",
                    "type": "Full-time",
                    "link": "https://jooble.org/desc/-4711",
                    "company": "Acme",
                    "updated": "2026-10-01T00:00:00.0000000"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let jobs = client(&server).search("rust", "Pune").await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "-4711");
        assert_eq!(jobs[0].job_type, "Full-time");
        assert_eq!(jobs[0].company, "Acme");
    }

    #[tokio::test]
    async fn test_missing_jobs_field_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalCount": 0})))
            .mount(&server)
            .await;

        let jobs = client(&server).search("astronaut", "Goa").await.unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("bad key"))
            .mount(&server)
            .await;

        match client(&server).search("rust", "Pune").await {
            Err(JobSearchError::Api { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "bad key");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }
}
