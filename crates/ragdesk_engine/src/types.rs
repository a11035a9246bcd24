use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

pub type RequestId = u64;

/// Bytes for one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPayload {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub payload: UploadPayload,
}

impl UploadFile {
    pub(crate) async fn read(&self) -> Result<Vec<u8>, BackendError> {
        match &self.payload {
            UploadPayload::Bytes(bytes) => Ok(bytes.to_vec()),
            UploadPayload::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| BackendError::ReadFile {
                        name: self.name.clone(),
                        source,
                    })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestResponse {
    pub file: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sources: Vec<WireSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireSource {
    pub source: String,
    #[serde(default)]
    pub chunk: WireChunk,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireChunk {
    Number(i64),
    Text(String),
}

impl Default for WireChunk {
    fn default() -> Self {
        WireChunk::Number(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<WireSource>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<WireSource>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug)]
pub enum EngineEvent {
    IngestCompleted {
        request_id: RequestId,
        result: Result<IngestResponse, BackendError>,
    },
    QueryCompleted {
        request_id: RequestId,
        result: Result<QueryResponse, BackendError>,
    },
    HealthChecked(Result<HealthResponse, BackendError>),
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("invalid backend url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("failed to read {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("undecodable response body (http {status}): {message}")]
    Decode { status: u16, message: String },
}

impl BackendError {
    pub fn kind(&self) -> FailureKind {
        match self {
            BackendError::InvalidUrl { .. } => FailureKind::InvalidUrl,
            BackendError::Network(_) => FailureKind::Network,
            BackendError::Timeout(_) => FailureKind::Timeout,
            BackendError::ReadFile { .. } => FailureKind::ReadFile,
            BackendError::Decode { .. } => FailureKind::Decode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    ReadFile,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::ReadFile => write!(f, "file read error"),
            FailureKind::Decode => write!(f, "decode error"),
        }
    }
}
