use std::time::Duration;

use desk_logging::{desk_debug, desk_warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::QueryRequest;
use crate::{BackendError, HealthResponse, IngestResponse, QueryResponse, UploadFile};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Multipart field name shared by every uploaded file.
pub const INGEST_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    /// Whole-request limit. Unset means a silent backend keeps the request open.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn ingest(&self, files: &[UploadFile]) -> Result<IngestResponse, BackendError>;

    async fn query(&self, question: &str) -> Result<QueryResponse, BackendError>;

    async fn health(&self) -> Result<HealthResponse, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestBackend {
    pub fn new(settings: ClientSettings) -> Result<Self, BackendError> {
        let base = parse_base_url(&settings.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| BackendError::Network(err.to_string()))?;

        Ok(Self { client, base })
    }

    /// Resolves `path` below the base address, keeping any base path prefix.
    pub fn endpoint(&self, path: &str) -> Url {
        // The base always ends with '/', so joining a relative segment cannot fail.
        self.base.join(path).unwrap_or_else(|_| self.base.clone())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
    let invalid = |message: String| BackendError::InvalidUrl {
        url: raw.to_string(),
        message,
    };
    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn ingest(&self, files: &[UploadFile]) -> Result<IngestResponse, BackendError> {
        let mut form = Form::new();
        for file in files {
            let bytes = file.read().await?;
            desk_debug!("ingest part name={} bytes={}", file.name, bytes.len());
            form = form.part(
                INGEST_FIELD,
                Part::bytes(bytes).file_name(file.name.clone()),
            );
        }

        let response = self
            .client
            .post(self.endpoint("ingest"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        decode_json(response).await
    }

    async fn query(&self, question: &str) -> Result<QueryResponse, BackendError> {
        let response = self
            .client
            .post(self.endpoint("query"))
            .json(&QueryRequest { question })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        decode_json(response).await
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        let response = self
            .client
            .get(self.base.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        decode_json(response).await
    }
}

/// Decodes the body regardless of HTTP status; only the body shape decides
/// success. Non-2xx statuses are logged.
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        desk_warn!(
            "backend answered {} for {}; decoding body anyway",
            status,
            response.url()
        );
    }

    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body).map_err(|err| BackendError::Decode {
        status: status.as_u16(),
        message: err.to_string(),
    })
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::Timeout(err.to_string());
    }
    BackendError::Network(err.to_string())
}
