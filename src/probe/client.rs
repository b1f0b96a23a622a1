//! HTTP probes against the monitored service.
//!
//! # Responsibilities
//! - Issue health and predict requests with a per-request timeout
//! - Map every failure to an explicit [`ProbeError`] kind
//! - Return the parsed JSON payload on success
//!
//! # Design Decisions
//! - No swallowed errors: the sampling loop branches on `Result`, never on
//!   the shape of a maybe-JSON value
//! - A non-2xx status carries the raw response body for diagnostics

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Why a probe failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("response is not valid JSON: {0}")]
    Decode(String),

    #[error("cannot read probe image {path}: {source}")]
    Payload {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ProbeError {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProbeError::Timeout
        } else if e.is_connect() {
            ProbeError::Connect(e.to_string())
        } else {
            ProbeError::Transport(e.to_string())
        }
    }
}

/// Client for the health and predict endpoints of the monitored service.
pub struct ProbeClient {
    client: reqwest::Client,
    base_url: Url,
    image_path: PathBuf,
}

impl ProbeClient {
    /// Build a probe client with the given per-request timeout.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        image_path: impl Into<PathBuf>,
    ) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            image_path: image_path.into(),
        })
    }

    /// Path of the image uploaded by the predict probe.
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    /// `GET {base_url}/health`: liveness check.
    pub async fn health(&self) -> Result<Value, ProbeError> {
        let url = self.endpoint("health");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ProbeError::from_transport)?;

        Self::into_json(response).await
    }

    /// `POST {base_url}/predict`: inference request used as a
    /// latency/availability proxy, uploading the configured image.
    pub async fn predict(&self) -> Result<Value, ProbeError> {
        let bytes = tokio::fs::read(&self.image_path)
            .await
            .map_err(|source| ProbeError::Payload {
                path: self.image_path.clone(),
                source,
            })?;

        let file_name = self
            .image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "img.jpg".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/jpeg")
            .map_err(|e| ProbeError::Transport(e.to_string()))?;
        let form = Form::new().part("file", part);

        let url = self.endpoint("predict");
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(ProbeError::from_transport)?;

        Self::into_json(response).await
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        // Url::join would discard a non-slash-terminated base path.
        // http(s) URLs always support path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(path);
        }
        url
    }

    async fn into_json(response: reqwest::Response) -> Result<Value, ProbeError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| ProbeError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ProbeClient {
        ProbeClient::new(
            Url::parse(base).unwrap(),
            Duration::from_millis(200),
            "img.jpg",
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_path() {
        let c = client("http://127.0.0.1:8000");
        assert_eq!(c.endpoint("health").as_str(), "http://127.0.0.1:8000/health");
    }

    #[test]
    fn test_endpoint_preserves_base_path() {
        let c = client("http://127.0.0.1:8000/v1");
        assert_eq!(
            c.endpoint("predict").as_str(),
            "http://127.0.0.1:8000/v1/predict"
        );
    }

    #[tokio::test]
    async fn test_connect_error_kind() {
        // Nothing listens here; the connection is refused.
        let c = client("http://127.0.0.1:59999");
        let err = c.health().await.unwrap_err();
        assert!(matches!(err, ProbeError::Connect(_) | ProbeError::Timeout));
    }

    #[tokio::test]
    async fn test_missing_image_is_payload_error() {
        let c = ProbeClient::new(
            Url::parse("http://127.0.0.1:59999").unwrap(),
            Duration::from_millis(200),
            "/nonexistent/probe.jpg",
        )
        .unwrap();

        let err = c.predict().await.unwrap_err();
        assert!(matches!(err, ProbeError::Payload { .. }));
    }
}
