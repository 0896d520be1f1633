use super::*;

#[test]
fn status_labels_are_uppercase_on_the_wire() {
    assert_eq!(serde_json::to_string(&FileStatus::Chunking).expect("json"), "\"CHUNKING\"");
    assert_eq!(serde_json::to_string(&FileStatus::Ner).expect("json"), "\"NER\"");
    let parsed: FileStatus = serde_json::from_str("\"SUMMARIZING\"").expect("status");
    assert_eq!(parsed, FileStatus::Summarizing);
    assert_eq!(FileStatus::Embedding.to_string(), "EMBEDDING");
}

#[test]
fn terminal_statuses_are_done_error_ready() {
    assert!(FileStatus::Done.is_terminal());
    assert!(FileStatus::Error.is_terminal());
    assert!(FileStatus::Ready.is_terminal());
    assert!(!FileStatus::Waiting.is_terminal());
    assert!(!FileStatus::Starting.is_terminal());
    assert!(!FileStatus::Ingesting.is_terminal());
}

#[test]
fn parse_status_report_frame() {
    let frame = parse_ingest_frame(r#"{"fileID":"a.pdf","status":"EMBEDDING","message":"Embedding 12 chunks","took":1.5}"#)
        .expect("frame");
    let IngestFrame::Status(report) = frame else {
        panic!("expected status frame");
    };
    assert_eq!(report.file_id, "a.pdf");
    assert_eq!(report.status, FileStatus::Embedding);
    assert_eq!(report.took, 1.5);
}

#[test]
fn parse_rename_frame() {
    let frame = parse_ingest_frame(r#"{"original_file_id":"docs.zip","new_file_id":"docs.zip/a.md","filename":"a.md"}"#)
        .expect("frame");
    assert_eq!(
        frame,
        IngestFrame::Rename(RenameNotice {
            original_file_id: "docs.zip".into(),
            new_file_id: "docs.zip/a.md".into(),
            filename: "a.md".into(),
        })
    );
}

#[test]
fn parse_rejects_unknown_shapes() {
    assert!(matches!(parse_ingest_frame(r#"{"hello":1}"#), Err(FrameError::UnknownShape)));
    assert!(matches!(parse_ingest_frame("[1,2]"), Err(FrameError::UnknownShape)));
    assert!(matches!(parse_ingest_frame("{"), Err(FrameError::Json(_))));
    assert!(matches!(
        parse_ingest_frame(r#"{"fileID":"a","status":"TELEPORTING"}"#),
        Err(FrameError::Json(_))
    ));
}

#[test]
fn status_report_to_json_uses_file_id_key() {
    let frame = IngestFrame::Status(StatusReport::new("f1", FileStatus::Done, "Imported", 0.25));
    let text = frame.to_json().expect("json");
    let back = parse_ingest_frame(&text).expect("parse");
    assert_eq!(back, frame);
    assert!(text.contains("\"fileID\":\"f1\""));
}
