//! Path-entry file browser opened by clicking the drop zone.

use std::path::Path;

use desk_logging::desk_debug;
use ragdesk_core::FileHandle;

#[derive(Debug, Default)]
pub struct FileBrowser {
    open: bool,
    input: String,
}

impl FileBrowser {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn cancel(&mut self) {
        self.open = false;
        self.input.clear();
    }

    /// Closes the browser and returns the entered paths that name existing files.
    pub fn submit(&mut self) -> Vec<FileHandle> {
        let paths = parse_paths(&self.input);
        self.cancel();
        paths
            .into_iter()
            .filter(|path| {
                let exists = Path::new(path).is_file();
                if !exists {
                    desk_debug!("browser: skipping {:?}, not a file", path);
                }
                exists
            })
            .map(FileHandle::from_path)
            .collect()
    }
}

/// One path per line; surrounding whitespace and quotes are stripped.
pub fn parse_paths(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim().trim_matches(['"', '\'']).trim())
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parse_paths_trims_quotes_and_blank_lines() {
        let raw = "  /tmp/a.txt \n\n\"/tmp/with space.pdf\"\n   \n'/tmp/c.png'\n";
        assert_eq!(
            parse_paths(raw),
            vec!["/tmp/a.txt", "/tmp/with space.pdf", "/tmp/c.png"]
        );
    }

    #[test]
    fn submit_keeps_existing_files_only_and_closes() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("notes.txt");
        fs::write(&present, "hello").unwrap();
        let missing = dir.path().join("missing.pdf");

        let mut browser = FileBrowser::default();
        browser.open();
        *browser.input_mut() = format!(
            "{}\n{}\n{}",
            present.display(),
            missing.display(),
            dir.path().display()
        );

        let handles = browser.submit();

        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].name, "notes.txt");
        assert!(!browser.is_open());
        assert!(browser.input_mut().is_empty());
    }

    #[test]
    fn cancel_discards_input() {
        let mut browser = FileBrowser::default();
        browser.open();
        browser.input_mut().push_str("/tmp/x.txt");
        browser.cancel();

        assert!(!browser.is_open());
        assert!(browser.submit().is_empty());
    }
}
