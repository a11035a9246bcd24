use crate::{BackendHealth, MessageView, StatusLine};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropZoneView {
    /// Idle prompt, or `"<n> file(s) selected"` while a selection is pending.
    pub prompt: String,
    pub has_selection: bool,
    pub drag_hover: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub drop_zone: DropZoneView,
    pub pending_names: Vec<String>,
    pub ingest_enabled: bool,
    /// Busy indicator for the upload panel.
    pub uploading: bool,
    pub upload_status: Option<StatusLine>,
    pub question: String,
    pub send_enabled: bool,
    pub awaiting_answer: bool,
    pub transcript: Vec<MessageView>,
    pub backend: BackendHealth,
}
