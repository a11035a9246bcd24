//! RagDesk core: pure state machine, selection filter and transcript rendering.
mod effect;
mod msg;
mod selection;
mod state;
mod text;
mod transcript;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use selection::{filter_supported, is_supported_name, FileHandle, FileSource, ALLOWED_EXTENSIONS};
pub use state::{
    Answer, AppState, BackendHealth, FailureKind, IngestReceipt, RequestId, StatusLine, StatusTone,
};
pub use text::{
    ingest_success_status, ingest_system_message, selection_prompt, CHAT_FALLBACK_ANSWER,
    DROP_ZONE_IDLE_PROMPT, UPLOADING_STATUS, UPLOAD_FAILED_STATUS,
};
pub use transcript::{
    render_message, Bubble, ChatMessage, ChunkId, CitationAnchor, CitationLine, MessageView,
    Sender, SourceRef, Transcript,
};
pub use update::update;
pub use view_model::{AppViewModel, DropZoneView};
