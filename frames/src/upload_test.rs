use super::*;

fn creds() -> Credentials {
    Credentials { url: "http://localhost:8080".into(), ..Credentials::default() }
}

#[test]
fn split_4500_chars_into_three_batches() {
    let payload = "x".repeat(4500);
    let batches = split_into_batches(&payload, "f1", &creds(), 2000);
    assert_eq!(batches.len(), 3);
    assert_eq!(batches.iter().map(|b| b.order).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(batches.iter().map(|b| b.chunk.len()).collect::<Vec<_>>(), vec![2000, 2000, 500]);
    assert_eq!(
        batches.iter().map(|b| b.is_last_chunk).collect::<Vec<_>>(),
        vec![false, false, true]
    );
    assert!(batches.iter().all(|b| b.total == 3 && b.file_id == "f1"));
}

#[test]
fn split_count_is_ceiling_and_concatenation_reconstructs() {
    for len in [1_usize, 1999, 2000, 2001, 4000, 10_001] {
        let payload: String = (0..len).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let batches = split_into_batches(&payload, "f", &creds(), UPLOAD_CHUNK_SIZE);
        assert_eq!(batches.len(), len.div_ceil(UPLOAD_CHUNK_SIZE), "len {len}");
        assert_eq!(batches.iter().filter(|b| b.is_last_chunk).count(), 1);
        assert!(batches.last().expect("last").is_last_chunk);
        let joined: String = batches.iter().map(|b| b.chunk.as_str()).collect();
        assert_eq!(joined, payload);
    }
}

#[test]
fn split_respects_multibyte_character_boundaries() {
    let payload = "é".repeat(5);
    let batches = split_into_batches(&payload, "f", &creds(), 2);
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].chunk, "éé");
    assert_eq!(batches[2].chunk, "é");
}

#[test]
fn empty_payload_yields_single_last_batch() {
    let batches = split_into_batches("", "f", &creds(), UPLOAD_CHUNK_SIZE);
    assert_eq!(batches.len(), 1);
    assert!(batches[0].is_last_chunk);
    assert_eq!(batches[0].total, 1);
}

#[test]
fn batch_serializes_with_wire_keys() {
    let batch = &split_into_batches("abc", "f1", &creds(), 2)[1];
    let value = serde_json::to_value(batch).expect("json");
    assert_eq!(value["chunk"], "c");
    assert_eq!(value["isLastChunk"], true);
    assert_eq!(value["total"], 2);
    assert_eq!(value["order"], 1);
    assert_eq!(value["fileID"], "f1");
    assert_eq!(value["credentials"]["url"], "http://localhost:8080");
}

#[test]
fn assembler_reassembles_out_of_order_arrival() {
    let payload = "0123456789".repeat(30);
    let mut batches = split_into_batches(&payload, "f", &creds(), 40);
    batches.reverse();
    let mut assembler = BatchAssembler::new();
    let mut result = None;
    for batch in batches {
        assert!(result.is_none());
        result = assembler.add(batch).expect("add");
    }
    assert_eq!(result.as_deref(), Some(payload.as_str()));
    assert_eq!(assembler.pending_files(), 0);
}

#[test]
fn assembler_keeps_files_independent() {
    let mut assembler = BatchAssembler::new();
    let a = split_into_batches("aaaa", "a", &creds(), 2);
    let b = split_into_batches("bb", "b", &creds(), 2);
    assert!(assembler.add(a[0].clone()).expect("a0").is_none());
    assert_eq!(assembler.add(b[0].clone()).expect("b0").as_deref(), Some("bb"));
    assert_eq!(assembler.pending_files(), 1);
    assert_eq!(assembler.add(a[1].clone()).expect("a1").as_deref(), Some("aaaa"));
}

#[test]
fn assembler_rejects_inconsistent_batches() {
    let mut assembler = BatchAssembler::new();
    let batches = split_into_batches("abcdef", "f", &creds(), 2);

    assert!(assembler.add(batches[0].clone()).expect("first").is_none());
    let dup = assembler.add(batches[0].clone()).expect_err("duplicate");
    assert!(matches!(dup, FrameError::DuplicateChunk { order: 0, .. }));

    let mut wrong_total = batches[1].clone();
    wrong_total.total = 4;
    assert!(matches!(
        assembler.add(wrong_total),
        Err(FrameError::TotalMismatch { expected: 3, got: 4 })
    ));

    let mut out_of_range = batches[1].clone();
    out_of_range.order = 3;
    assert!(matches!(assembler.add(out_of_range), Err(FrameError::OrderOutOfRange { .. })));

    let mut early_last = batches[1].clone();
    early_last.is_last_chunk = true;
    assert!(matches!(assembler.add(early_last), Err(FrameError::LastChunkMismatch { .. })));

    let mut empty = batches[1].clone();
    empty.total = 0;
    assert!(matches!(assembler.add(empty), Err(FrameError::EmptyBatch { .. })));

    assert!(assembler.add(batches[1].clone()).expect("second").is_none());
    assert_eq!(assembler.add(batches[2].clone()).expect("third").as_deref(), Some("abcdef"));
}

#[test]
fn abandon_drops_partial_upload() {
    let mut assembler = BatchAssembler::new();
    let batches = split_into_batches("abcd", "f", &creds(), 2);
    assembler.add(batches[0].clone()).expect("first");
    assert!(assembler.abandon("f"));
    assert!(!assembler.abandon("f"));
    assert_eq!(assembler.pending_files(), 0);
}
