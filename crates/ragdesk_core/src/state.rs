use std::fmt;

use crate::text::{
    ingest_success_status, ingest_system_message, selection_prompt, CHAT_FALLBACK_ANSWER,
    DROP_ZONE_IDLE_PROMPT, UPLOADING_STATUS, UPLOAD_FAILED_STATUS,
};
use crate::transcript::render_message;
use crate::view_model::{AppViewModel, DropZoneView};
use crate::{ChatMessage, FileHandle, Sender, SourceRef, Transcript};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Neutral,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendHealth {
    #[default]
    Unknown,
    Ready(String),
    Unreachable,
}

/// Why a round-trip failed. The state machine treats all kinds alike.
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
            FailureKind::Decode => write!(f, "unexpected response body"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReceipt {
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<SourceRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct UploadState {
    pending: Vec<FileHandle>,
    in_flight: Option<RequestId>,
    status: Option<StatusLine>,
    drag_hover: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ChatState {
    input: String,
    in_flight: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    upload: UploadState,
    chat: ChatState,
    transcript: Transcript,
    backend: BackendHealth,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let pending = &self.upload.pending;
        let uploading = self.upload.in_flight.is_some();
        let awaiting_answer = self.chat.in_flight.is_some();
        AppViewModel {
            drop_zone: DropZoneView {
                prompt: if pending.is_empty() {
                    DROP_ZONE_IDLE_PROMPT.to_string()
                } else {
                    selection_prompt(pending.len())
                },
                has_selection: !pending.is_empty(),
                drag_hover: self.upload.drag_hover,
            },
            pending_names: pending.iter().map(|file| file.name.clone()).collect(),
            ingest_enabled: !uploading && !pending.is_empty(),
            uploading,
            upload_status: self.upload.status.clone(),
            question: self.chat.input.clone(),
            send_enabled: !awaiting_answer,
            awaiting_answer,
            transcript: self
                .transcript
                .messages()
                .iter()
                .map(render_message)
                .collect(),
            backend: self.backend.clone(),
        }
    }

    pub fn pending_files(&self) -> &[FileHandle] {
        &self.upload.pending
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn question(&self) -> &str {
        &self.chat.input
    }

    pub fn upload_in_flight(&self) -> Option<RequestId> {
        self.upload.in_flight
    }

    pub fn query_in_flight(&self) -> Option<RequestId> {
        self.chat.in_flight
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    pub(crate) fn set_drag_hover(&mut self, hovering: bool) {
        if self.upload.drag_hover != hovering {
            self.upload.drag_hover = hovering;
            self.mark_dirty();
        }
    }

    /// Replaces the pending selection. Callers pass an already filtered, non-empty list.
    pub(crate) fn replace_selection(&mut self, files: Vec<FileHandle>) {
        self.upload.pending = files;
        self.upload.drag_hover = false;
        self.mark_dirty();
    }

    /// Starts an ingest round-trip if a selection exists and none is running.
    pub(crate) fn begin_ingest(&mut self) -> Option<(RequestId, Vec<FileHandle>)> {
        if self.upload.in_flight.is_some() || self.upload.pending.is_empty() {
            return None;
        }
        let request_id = self.next_request_id();
        self.upload.in_flight = Some(request_id);
        self.upload.status = Some(StatusLine {
            text: UPLOADING_STATUS.to_string(),
            tone: StatusTone::Neutral,
        });
        self.mark_dirty();
        Some((request_id, self.upload.pending.clone()))
    }

    /// Applies an ingest completion. Returns false for a completion that does
    /// not belong to the running request.
    pub(crate) fn finish_ingest(
        &mut self,
        request_id: RequestId,
        result: Result<IngestReceipt, FailureKind>,
    ) -> bool {
        if self.upload.in_flight != Some(request_id) {
            return false;
        }

        match result {
            Ok(receipt) => {
                self.upload.status = Some(StatusLine {
                    text: ingest_success_status(&receipt.file),
                    tone: StatusTone::Success,
                });
                self.transcript.append(ChatMessage::new(
                    Sender::System,
                    ingest_system_message(&receipt.file),
                    Vec::new(),
                ));
            }
            Err(_) => {
                self.upload.status = Some(StatusLine {
                    text: UPLOAD_FAILED_STATUS.to_string(),
                    tone: StatusTone::Error,
                });
            }
        }

        self.upload.in_flight = None;
        self.upload.pending.clear();
        self.mark_dirty();
        true
    }

    pub(crate) fn set_question(&mut self, text: String) {
        if self.chat.input != text {
            self.chat.input = text;
            self.mark_dirty();
        }
    }

    /// Starts a query round-trip with the trimmed input, if it is non-empty
    /// and no query is running.
    pub(crate) fn begin_query(&mut self) -> Option<(RequestId, String)> {
        if self.chat.in_flight.is_some() {
            return None;
        }
        let question = self.chat.input.trim().to_string();
        if question.is_empty() {
            return None;
        }

        self.transcript
            .append(ChatMessage::new(Sender::You, question.clone(), Vec::new()));
        self.chat.input.clear();
        let request_id = self.next_request_id();
        self.chat.in_flight = Some(request_id);
        self.mark_dirty();
        Some((request_id, question))
    }

    pub(crate) fn finish_query(
        &mut self,
        request_id: RequestId,
        result: Result<Answer, FailureKind>,
    ) -> bool {
        if self.chat.in_flight != Some(request_id) {
            return false;
        }

        let message = match result {
            Ok(answer) => ChatMessage::new(Sender::Assistant, answer.text, answer.sources),
            Err(_) => ChatMessage::new(Sender::Assistant, CHAT_FALLBACK_ANSWER, Vec::new()),
        };
        self.transcript.append(message);
        self.chat.in_flight = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_backend_health(&mut self, health: BackendHealth) {
        if self.backend != health {
            self.backend = health;
            self.mark_dirty();
        }
    }
}
