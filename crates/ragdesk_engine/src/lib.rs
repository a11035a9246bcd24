//! RagDesk engine: backend client and request execution off the UI thread.
mod client;
mod engine;
mod types;

pub use client::{Backend, ClientSettings, ReqwestBackend, DEFAULT_BASE_URL, INGEST_FIELD};
pub use engine::{ChannelEventSink, EngineHandle, EngineStartError, EventSink};
pub use types::{
    BackendError, EngineEvent, FailureKind, HealthResponse, IngestResponse, QueryResponse,
    RequestId, UploadFile, UploadPayload, WireChunk, WireSource,
};
