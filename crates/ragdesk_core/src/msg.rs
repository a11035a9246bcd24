use crate::{Answer, FailureKind, FileHandle, IngestReceipt, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The shell is up and the first frame is about to render.
    Started,
    /// User clicked the drop zone.
    DropZoneClicked,
    /// Files started (true) or stopped (false) hovering over the window.
    DragHoverChanged(bool),
    /// Candidate files from a drop or from the file browser, unfiltered.
    FilesSelected(Vec<FileHandle>),
    /// User clicked the ingest button.
    IngestClicked,
    /// Engine completion for an ingest request.
    IngestFinished {
        request_id: RequestId,
        result: Result<IngestReceipt, FailureKind>,
    },
    /// User edited the question input.
    QuestionEdited(String),
    /// User clicked Send or pressed Enter in the question input.
    QuestionSubmitted,
    /// Engine completion for a query request.
    QueryFinished {
        request_id: RequestId,
        result: Result<Answer, FailureKind>,
    },
    /// Result of the backend health probe, carrying its greeting on success.
    BackendChecked(Result<String, FailureKind>),
}
