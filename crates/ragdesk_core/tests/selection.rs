use ragdesk_core::{filter_supported, is_supported_name, FileHandle, FileSource};

fn named(names: &[&str]) -> Vec<FileHandle> {
    names
        .iter()
        .map(|name| FileHandle::from_bytes(*name, Vec::new()))
        .collect()
}

fn names(files: &[FileHandle]) -> Vec<&str> {
    files.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn keeps_allowed_extensions_in_order() {
    let files = named(&[
        "notes.txt",
        "movie.mp4",
        "scan.PNG",
        "report.pdf",
        "photo.jpeg",
        "archive.zip",
        "photo.jpg",
    ]);

    let kept = filter_supported(files);

    assert_eq!(
        names(&kept),
        vec!["notes.txt", "scan.PNG", "report.pdf", "photo.jpeg", "photo.jpg"]
    );
}

#[test]
fn only_the_final_suffix_counts() {
    assert!(!is_supported_name("a.txt.exe"));
    assert!(is_supported_name("a.exe.txt"));
    assert!(is_supported_name("A.PDF"));
    assert!(!is_supported_name("pdf"));
    assert!(!is_supported_name("report.docx"));
    assert!(!is_supported_name(""));
}

#[test]
fn nothing_survives_when_nothing_matches() {
    assert!(filter_supported(named(&["a.txt.exe", "b.doc", "c"])).is_empty());
    assert!(filter_supported(Vec::new()).is_empty());
}

#[test]
fn from_path_uses_file_name() {
    let handle = FileHandle::from_path("/tmp/uploads/Report.PDF");
    assert_eq!(handle.name, "Report.PDF");
    assert_eq!(
        handle.source,
        FileSource::Path("/tmp/uploads/Report.PDF".into())
    );
    assert!(is_supported_name(&handle.name));
}

#[test]
fn byte_payload_debug_shows_length_only() {
    let handle = FileHandle::from_bytes("a.txt", b"hello".to_vec());
    assert_eq!(format!("{:?}", handle.source), "Bytes(5 B)");
}
