use super::*;

#[test]
fn from_bytes_derives_extension_size_and_base64() {
    let file = FileData::from_bytes("Report.PDF", b"hello", RagConfig::default());
    assert_eq!(file.file_id, "Report.PDF");
    assert_eq!(file.extension, "pdf");
    assert_eq!(file.file_size, 5);
    assert_eq!(file.content, "aGVsbG8=");
    assert_eq!(file.status, FileStatus::Ready);
    assert_eq!(file.content_bytes().expect("decode"), b"hello");
}

#[test]
fn extension_is_empty_for_dotfiles_and_plain_names() {
    assert_eq!(FileData::from_bytes(".env", b"", RagConfig::default()).extension, "");
    assert_eq!(FileData::from_bytes("README", b"", RagConfig::default()).extension, "");
    assert_eq!(FileData::from_bytes("a.tar.gz", b"", RagConfig::default()).extension, "gz");
}

#[test]
fn from_url_marks_url_import() {
    let file = FileData::from_url("https://example.com/page", RagConfig::default());
    assert!(file.is_url);
    assert_eq!(file.source, "https://example.com/page");
    assert!(file.content.is_empty());
}

#[test]
fn content_bytes_rejects_invalid_base64() {
    let mut file = FileData::from_bytes("a.txt", b"x", RagConfig::default());
    file.content = "!!not-base64!!".into();
    assert!(matches!(file.content_bytes(), Err(FrameError::Base64(_))));
}

#[test]
fn record_moves_status_and_keeps_report_per_stage() {
    let mut file = FileData::from_bytes("a.txt", b"x", RagConfig::default());
    file.record(StatusReport::new("a.txt", FileStatus::Loading, "Loaded", 0.1));
    file.record(StatusReport::new("a.txt", FileStatus::Chunking, "Chunked", 0.2));
    assert_eq!(file.status, FileStatus::Chunking);
    assert_eq!(file.status_message(), Some("Chunked"));
    assert_eq!(file.status_report.len(), 2);
}

#[test]
fn file_data_serializes_with_wire_keys() {
    let mut file = FileData::from_bytes("a.txt", b"x", RagConfig::default());
    file.record(StatusReport::new("a.txt", FileStatus::Done, "ok", 0.0));
    let value = serde_json::to_value(&file).expect("json");
    assert_eq!(value["fileID"], "a.txt");
    assert_eq!(value["isURL"], false);
    assert_eq!(value["status"], "DONE");
    assert_eq!(value["status_report"]["DONE"]["message"], "ok");
    let back: FileData = serde_json::from_value(value).expect("parse");
    assert_eq!(back, file);
}

#[test]
fn deployment_parse_is_case_insensitive() {
    assert_eq!(Deployment::parse("docker"), Some(Deployment::Docker));
    assert_eq!(Deployment::parse("Weaviate"), Some(Deployment::Weaviate));
    assert_eq!(Deployment::parse("cloud"), None);
}

#[test]
fn credentials_default_to_local_deployment() {
    let creds: Credentials = serde_json::from_str("{}").expect("credentials");
    assert_eq!(creds.deployment, Deployment::Local);
    let value = serde_json::to_value(&creds).expect("json");
    assert_eq!(value["deployment"], "Local");
    assert!(value.get("default_deployment").is_none());
}
