//! User-visible strings produced by the state machine.

pub const DROP_ZONE_IDLE_PROMPT: &str = "Drop files here or click to upload";
pub const UPLOADING_STATUS: &str = "Uploading and ingesting...";
pub const UPLOAD_FAILED_STATUS: &str = "Upload failed.";
pub const CHAT_FALLBACK_ANSWER: &str = "Sorry, something went wrong.";

pub fn selection_prompt(count: usize) -> String {
    format!("{count} file(s) selected")
}

pub fn ingest_success_status(file: &str) -> String {
    format!("Success: {file} — ingestion started!")
}

pub fn ingest_system_message(file: &str) -> String {
    format!("Document \"{file}\" uploaded and being processed.")
}
