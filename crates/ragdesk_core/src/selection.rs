use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Filename suffixes accepted for ingestion, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 5] = [".txt", ".pdf", ".png", ".jpg", ".jpeg"];

/// Where the bytes of a selected file come from.
#[derive(Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Read lazily from disk when the upload is built.
    Path(PathBuf),
    /// Already in memory, e.g. a drop that carried its payload.
    Bytes(Arc<[u8]>),
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            FileSource::Bytes(bytes) => write!(f, "Bytes({} B)", bytes.len()),
        }
    }
}

/// A candidate or pending file: display name plus payload source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub source: FileSource,
}

impl FileHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: display_name(&path),
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Bytes(bytes.into()),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

pub fn is_supported_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Keeps the files whose name ends with an allowed extension, in input order.
pub fn filter_supported(files: Vec<FileHandle>) -> Vec<FileHandle> {
    files
        .into_iter()
        .filter(|file| is_supported_name(&file.name))
        .collect()
}
