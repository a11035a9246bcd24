use crate::{FileHandle, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Probe the backend root endpoint once.
    CheckBackend,
    /// Show the file browser so the user can pick candidate files.
    OpenFileBrowser,
    /// Upload every file as one multipart request to the ingest endpoint.
    Ingest {
        request_id: RequestId,
        files: Vec<FileHandle>,
    },
    /// Send the question to the query endpoint.
    Query {
        request_id: RequestId,
        question: String,
    },
    /// Give keyboard focus back to the question input.
    FocusQuestionInput,
}
