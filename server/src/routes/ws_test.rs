use super::*;
use crate::state::test_helpers::test_app_state;
use frames::{Credentials, FileStatus, RagConfig, UPLOAD_CHUNK_SIZE, split_into_batches};

fn batch_texts(file: &FileData) -> Vec<String> {
    let payload = serde_json::to_string(file).expect("payload");
    split_into_batches(&payload, &file.file_id, &Credentials::default(), UPLOAD_CHUNK_SIZE)
        .iter()
        .map(|b| serde_json::to_string(b).expect("batch"))
        .collect()
}

#[tokio::test]
async fn generate_streams_deltas_then_stop_and_records_suggestion() {
    let state = test_app_state();
    let payload = GeneratePayload { query: "What is Verba?".into(), context: "Verba is a RAG app.".into(), ..GeneratePayload::default() };
    let frames = generate_frames(&state, &serde_json::to_string(&payload).expect("json")).await;

    let (stop, deltas) = frames.split_last().expect("frames");
    assert!(stop.is_stop());
    assert!(!deltas.is_empty());
    let streamed: String = deltas.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(stop.full_text.as_deref(), Some(streamed.as_str()));
    assert!(streamed.contains("Verba is a RAG app."));

    let store = state.store.read().await;
    assert_eq!(store.suggestions("verba", 3).len(), 1);
}

#[tokio::test]
async fn repeated_question_is_a_cache_hit() {
    let state = test_app_state();
    let text = serde_json::to_string(&GeneratePayload { query: "q?".into(), ..GeneratePayload::default() }).expect("json");
    let first = generate_frames(&state, &text).await;
    let second = generate_frames(&state, &text).await;
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].cached, Some(true));
    assert_eq!(second[0].full_text, first.last().and_then(|f| f.full_text.clone()));
}

#[tokio::test]
async fn malformed_generate_payload_gets_error_stop_frame() {
    let frames = generate_frames(&test_app_state(), "{not json").await;
    assert_eq!(frames.len(), 1);
    assert!(frames[0].is_stop());
    assert!(frames[0].message.starts_with("Invalid generate payload"));
}

#[tokio::test]
async fn import_reassembles_out_of_order_batches() {
    let state = test_app_state();
    let mut assembler = BatchAssembler::new();
    let content = "word ".repeat(1500);
    let file = FileData::from_bytes("big.txt", content.as_bytes(), RagConfig::new());
    let mut texts = batch_texts(&file);
    assert!(texts.len() > 2);
    texts.reverse();

    let last = texts.pop().expect("first batch");
    for text in &texts {
        assert!(import_frame(&state, &mut assembler, text).await.expect("batch").is_empty());
    }
    let reports = import_frame(&state, &mut assembler, &last).await.expect("complete");
    assert_eq!(reports.first().map(|r| r.status), Some(FileStatus::Starting));
    assert_eq!(reports.last().map(|r| r.status), Some(FileStatus::Done));
    assert_eq!(assembler.pending_files(), 0);
    assert_eq!(state.store.read().await.document_count(), 1);
}

#[tokio::test]
async fn malformed_frames_error_and_duplicates_fail_ingest() {
    let state = test_app_state();
    let mut assembler = BatchAssembler::new();
    assert!(matches!(import_frame(&state, &mut assembler, "[]").await, Err(ImportFrameError::Json(_))));

    let file = FileData::from_bytes("a.txt", b"hello", RagConfig::new());
    let text = batch_texts(&file).remove(0);
    assert_eq!(import_frame(&state, &mut assembler, &text).await.expect("first").len(), 6);
    let again = import_frame(&state, &mut assembler, &text).await.expect("second");
    assert_eq!(again.last().map(|r| r.status), Some(FileStatus::Error));
}

#[tokio::test]
async fn duplicate_ordinal_is_rejected() {
    let state = test_app_state();
    let mut assembler = BatchAssembler::new();
    let file = FileData::from_bytes("big.txt", "x".repeat(5000).as_bytes(), RagConfig::new());
    let text = batch_texts(&file).remove(0);
    import_frame(&state, &mut assembler, &text).await.expect("first");
    assert!(matches!(import_frame(&state, &mut assembler, &text).await, Err(ImportFrameError::Frame(_))));
}

#[test]
fn encode_frame_skips_unserializable_values() {
    let mut bad = std::collections::HashMap::new();
    bad.insert((1u8, 2u8), "tuple keys are not JSON object keys");
    assert_eq!(encode_frame(&bad), None);
    assert_eq!(encode_frame(&ChatFrame::delta("hi")).as_deref(), Some(r#"{"message":"hi","finish_reason":null}"#));
}
