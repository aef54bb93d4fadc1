//! Thin JSON client for the recommender service.
//!
//! Error policy: transport failures, non-success statuses and undecodable
//! bodies are logged here and re-thrown; presenting a user-facing message is
//! the caller's job.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::models::{
    ClusteringInsights, LogStudyAck, RecommendationReport, StudentStats, StudySession,
};
use crate::config::AppConfig;
use crate::{Error, Result};

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured service.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Url::parse(&config.server.base_url)?;
        let client = Self::build_client(config.server.request_timeout_secs)?;

        Ok(Self {
            client,
            base_url: config.server.base_url.clone(),
        })
    }

    fn build_client(timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers(Self::default_headers())
            .build()
            .map_err(Error::Http)
    }

    /// JSON in, JSON out. Callers may still override per request via
    /// reqwest, but these are the defaults every request carries.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Resolve a path against the configured base URL. Absolute URLs pass
    /// through after validation.
    pub fn resolve_url(&self, path: &str) -> Result<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path)?;
            return Ok(path.to_string());
        }

        let resolved = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&resolved)?;
        Ok(resolved)
    }

    /// Issue a request and return the raw body of a successful response.
    ///
    /// A non-success status becomes [`Error::Status`]; the response body is
    /// discarded on that path, only the code survives.
    pub async fn request(&self, method: Method, path: &str, body: Option<String>) -> Result<Bytes> {
        let url = self.resolve_url(path)?;
        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("request failed for {url}: {e}");
            Error::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            };
            tracing::error!("{err}");
            return Err(err);
        }

        response.bytes().await.map_err(|e| {
            tracing::error!("failed to read response body from {url}: {e}");
            Error::Http(e)
        })
    }

    fn decode<T: DeserializeOwned>(url: &str, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::error!("invalid JSON from {url}: {e}");
            Error::Json(e)
        })
    }

    /// GET `path` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.request(Method::GET, path, None).await?;
        Self::decode(path, &bytes)
    }

    /// POST `data` as JSON to `path` and decode the JSON body.
    ///
    /// Serialization happens before any network I/O, so an unserializable
    /// payload fails without touching the wire.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, data: &B) -> Result<T> {
        let body = serde_json::to_string(data)?;
        let bytes = self.request(Method::POST, path, Some(body)).await?;
        Self::decode(path, &bytes)
    }

    /// Record a study session.
    pub async fn log_study(&self, session: &StudySession) -> Result<LogStudyAck> {
        self.post("/api/log-study", session).await
    }

    /// Fetch the personalized recommendation report.
    pub async fn recommendations(&self) -> Result<RecommendationReport> {
        self.get("/api/get-recommendations").await
    }

    /// Fetch the student's aggregate stats.
    pub async fn student_stats(&self) -> Result<StudentStats> {
        self.get("/api/student-stats").await
    }

    /// Fetch clustering insights for the insights dashboard.
    pub async fn clustering_insights(&self) -> Result<ClusteringInsights> {
        self.get("/api/clustering-insights").await
    }
}
