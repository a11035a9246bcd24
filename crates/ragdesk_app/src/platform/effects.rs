use std::sync::{mpsc, Arc};

use desk_logging::{desk_debug, desk_info, desk_warn, preview};
use eframe::egui;
use ragdesk_core::{
    Answer, ChunkId, Effect, FailureKind, FileHandle, FileSource, IngestReceipt, Msg, SourceRef,
};
use ragdesk_engine::{
    BackendError, ClientSettings, EngineEvent, EngineHandle, EngineStartError, EventSink,
    UploadFile, UploadPayload, WireChunk, WireSource,
};

const LOG_PREVIEW_CHARS: usize = 80;

/// Executes network effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        msg_tx: mpsc::Sender<Msg>,
        ctx: egui::Context,
    ) -> Result<Self, EngineStartError> {
        let sink = Arc::new(MsgSink { msg_tx, ctx });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine })
    }

    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::CheckBackend => {
                desk_debug!("CheckBackend");
                self.engine.check_health();
            }
            Effect::Ingest { request_id, files } => {
                let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
                desk_info!(
                    "Ingest request_id={} files={} names={:?}",
                    request_id,
                    files.len(),
                    names
                );
                let uploads = files.into_iter().map(to_upload).collect();
                self.engine.ingest(request_id, uploads);
            }
            Effect::Query {
                request_id,
                question,
            } => {
                desk_info!(
                    "Query request_id={} question={:?}",
                    request_id,
                    preview(&question, LOG_PREVIEW_CHARS)
                );
                self.engine.query(request_id, question);
            }
            other @ (Effect::OpenFileBrowser | Effect::FocusQuestionInput) => {
                desk_warn!("UI effect {:?} reached the effect runner; ignored", other);
            }
        }
    }
}

struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
    ctx: egui::Context,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        if self.msg_tx.send(map_event(event)).is_ok() {
            self.ctx.request_repaint();
        }
    }
}

fn to_upload(file: FileHandle) -> UploadFile {
    let payload = match file.source {
        FileSource::Path(path) => UploadPayload::Path(path),
        FileSource::Bytes(bytes) => UploadPayload::Bytes(bytes),
    };
    UploadFile {
        name: file.name,
        payload,
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::IngestCompleted { request_id, result } => {
            let result = match result {
                Ok(response) => {
                    desk_info!(
                        "Ingest request_id={} accepted file={} status={:?}",
                        request_id,
                        response.file,
                        response.status
                    );
                    Ok(IngestReceipt {
                        file: response.file,
                    })
                }
                Err(err) => Err(log_failure("Ingest", request_id, &err)),
            };
            Msg::IngestFinished { request_id, result }
        }
        EngineEvent::QueryCompleted { request_id, result } => {
            let result = match result {
                Ok(response) => {
                    desk_info!(
                        "Query request_id={} answered sources={} answer={:?}",
                        request_id,
                        response.sources.len(),
                        preview(&response.answer, LOG_PREVIEW_CHARS)
                    );
                    Ok(Answer {
                        text: response.answer,
                        sources: response.sources.into_iter().map(map_source).collect(),
                    })
                }
                Err(err) => Err(log_failure("Query", request_id, &err)),
            };
            Msg::QueryFinished { request_id, result }
        }
        EngineEvent::HealthChecked(result) => match result {
            Ok(health) => {
                desk_info!("Backend ready: {}", health.message);
                Msg::BackendChecked(Ok(health.message))
            }
            Err(err) => {
                desk_warn!("Backend health check failed: {}", err);
                Msg::BackendChecked(Err(map_failure(err.kind())))
            }
        },
    }
}

fn log_failure(operation: &str, request_id: u64, err: &BackendError) -> FailureKind {
    desk_warn!("{} request_id={} failed: {}", operation, request_id, err);
    map_failure(err.kind())
}

fn map_source(source: WireSource) -> SourceRef {
    SourceRef {
        source: source.source,
        chunk: match source.chunk {
            WireChunk::Number(n) => ChunkId::Number(n),
            WireChunk::Text(s) => ChunkId::Text(s),
        },
    }
}

fn map_failure(kind: ragdesk_engine::FailureKind) -> FailureKind {
    match kind {
        ragdesk_engine::FailureKind::InvalidUrl => FailureKind::InvalidUrl,
        ragdesk_engine::FailureKind::Network => FailureKind::Network,
        ragdesk_engine::FailureKind::Timeout => FailureKind::Timeout,
        ragdesk_engine::FailureKind::ReadFile => FailureKind::ReadFile,
        ragdesk_engine::FailureKind::Decode => FailureKind::Decode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdesk_engine::{HealthResponse, IngestResponse, QueryResponse};

    #[test]
    fn ingest_success_becomes_receipt() {
        let msg = map_event(EngineEvent::IngestCompleted {
            request_id: 4,
            result: Ok(IngestResponse {
                file: "report.pdf".to_string(),
                status: Some("ingestion started".to_string()),
            }),
        });

        assert_eq!(
            msg,
            Msg::IngestFinished {
                request_id: 4,
                result: Ok(IngestReceipt {
                    file: "report.pdf".to_string()
                }),
            }
        );
    }

    #[test]
    fn query_sources_keep_order_and_chunk_kind() {
        let msg = map_event(EngineEvent::QueryCompleted {
            request_id: 9,
            result: Ok(QueryResponse {
                answer: "X is Y.".to_string(),
                sources: vec![
                    WireSource {
                        source: "doc1".to_string(),
                        chunk: WireChunk::Number(3),
                    },
                    WireSource {
                        source: "doc2".to_string(),
                        chunk: WireChunk::Text("p-2".to_string()),
                    },
                ],
            }),
        });

        let Msg::QueryFinished { request_id, result } = msg else {
            panic!("expected QueryFinished");
        };
        let answer = result.expect("answer");
        assert_eq!(request_id, 9);
        assert_eq!(answer.text, "X is Y.");
        assert_eq!(answer.sources[0].chunk, ChunkId::Number(3));
        assert_eq!(answer.sources[1].chunk, ChunkId::Text("p-2".to_string()));
        assert_eq!(answer.sources[1].source, "doc2");
    }

    #[test]
    fn engine_errors_collapse_to_failure_kinds() {
        let msg = map_event(EngineEvent::QueryCompleted {
            request_id: 1,
            result: Err(BackendError::Timeout("slow".to_string())),
        });
        assert_eq!(
            msg,
            Msg::QueryFinished {
                request_id: 1,
                result: Err(FailureKind::Timeout),
            }
        );

        let msg = map_event(EngineEvent::IngestCompleted {
            request_id: 2,
            result: Err(BackendError::ReadFile {
                name: "a.txt".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        });
        assert_eq!(
            msg,
            Msg::IngestFinished {
                request_id: 2,
                result: Err(FailureKind::ReadFile),
            }
        );
    }

    #[test]
    fn health_maps_greeting() {
        let ok = map_event(EngineEvent::HealthChecked(Ok(HealthResponse {
            message: "RAG ready".to_string(),
        })));
        assert_eq!(ok, Msg::BackendChecked(Ok("RAG ready".to_string())));

        let err = map_event(EngineEvent::HealthChecked(Err(BackendError::Network(
            "refused".to_string(),
        ))));
        assert_eq!(err, Msg::BackendChecked(Err(FailureKind::Network)));
    }

    #[test]
    fn byte_payloads_pass_through_to_uploads() {
        let upload = to_upload(FileHandle::from_bytes("a.txt", b"abc".to_vec()));
        assert_eq!(upload.name, "a.txt");
        assert_eq!(upload.payload, UploadPayload::Bytes(b"abc".to_vec().into()));
    }
}
