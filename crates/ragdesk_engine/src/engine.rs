use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use desk_logging::{desk_debug, desk_warn};

use crate::client::{Backend, ClientSettings, ReqwestBackend};
use crate::{BackendError, EngineEvent, RequestId, UploadFile};

/// Receives engine completions. Called from runtime worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineStartError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
}

enum EngineCommand {
    Ingest {
        request_id: RequestId,
        files: Vec<UploadFile>,
    },
    Query {
        request_id: RequestId,
        question: String,
    },
    CheckHealth,
}

/// Runs backend round-trips on a dedicated tokio runtime thread. Every
/// accepted command produces exactly one event on the sink.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        settings: ClientSettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineStartError> {
        let backend = ReqwestBackend::new(settings)?;
        Self::with_backend(Arc::new(backend), sink)
    }

    pub fn with_backend(
        backend: Arc<dyn Backend>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineStartError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("ragdesk-io")
            .build()?;

        thread::Builder::new()
            .name("ragdesk-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let backend = backend.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(backend.as_ref(), command, sink.as_ref()).await;
                    });
                }
                desk_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn ingest(&self, request_id: RequestId, files: Vec<UploadFile>) {
        self.send(EngineCommand::Ingest { request_id, files });
    }

    pub fn query(&self, request_id: RequestId, question: impl Into<String>) {
        self.send(EngineCommand::Query {
            request_id,
            question: question.into(),
        });
    }

    pub fn check_health(&self) {
        self.send(EngineCommand::CheckHealth);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            desk_warn!("engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(backend: &dyn Backend, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Ingest { request_id, files } => {
            let result = backend.ingest(&files).await;
            sink.emit(EngineEvent::IngestCompleted { request_id, result });
        }
        EngineCommand::Query {
            request_id,
            question,
        } => {
            let result = backend.query(&question).await;
            sink.emit(EngineEvent::QueryCompleted { request_id, result });
        }
        EngineCommand::CheckHealth => {
            sink.emit(EngineEvent::HealthChecked(backend.health().await));
        }
    }
}
