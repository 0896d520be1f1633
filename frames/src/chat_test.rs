use super::*;
use serde_json::json;

#[test]
fn parse_chat_frame_reads_delta_frame() {
    let frame = parse_chat_frame(r#"{"message":"Hel","finish_reason":null}"#).expect("frame");
    assert_eq!(frame.message, "Hel");
    assert!(!frame.is_stop());
    assert!(frame.full_text.is_none());
}

#[test]
fn parse_chat_frame_accepts_delta_alias() {
    let frame = parse_chat_frame(r#"{"delta":"lo"}"#).expect("frame");
    assert_eq!(frame.message, "lo");
}

#[test]
fn parse_chat_frame_reads_numeric_and_string_distance() {
    let numeric = parse_chat_frame(r#"{"message":"","finish_reason":"stop","cached":true,"distance":0.12}"#)
        .expect("numeric");
    assert_eq!(numeric.distance, Some(0.12));
    assert_eq!(numeric.cached, Some(true));

    let text = parse_chat_frame(r#"{"message":"","distance":"0.5"}"#).expect("string");
    assert_eq!(text.distance, Some(0.5));
}

#[test]
fn parse_chat_frame_rejects_garbage() {
    assert!(parse_chat_frame("not json").is_err());
    assert!(parse_chat_frame(r#"{"message": 42}"#).is_err());
    assert!(parse_chat_frame(r#"{"distance": "far"}"#).is_err());
}

#[test]
fn preview_is_concatenation_of_non_terminal_deltas() {
    let mut stream = ChatStream::new();
    let mut expected = String::new();
    for piece in ["The ", "answer ", "is ", "42"] {
        expected.push_str(piece);
        assert!(stream.apply(ChatFrame::delta(piece)).is_none());
        assert_eq!(stream.preview(), expected);
    }
    assert!(stream.is_streaming());
}

#[test]
fn reasoning_accumulates_separately() {
    let mut stream = ChatStream::new();
    let frame = ChatFrame { reasoning: Some("think ".into()), ..ChatFrame::default() };
    assert!(stream.apply(frame).is_none());
    let frame = ChatFrame { message: "a".into(), reasoning: Some("more".into()), ..ChatFrame::default() };
    assert!(stream.apply(frame).is_none());
    assert_eq!(stream.reasoning(), "think more");
    assert_eq!(stream.preview(), "a");
}

#[test]
fn stop_frame_flushes_full_text_and_clears_accumulators() {
    let mut stream = ChatStream::new();
    stream.apply(ChatFrame::delta("Hello "));
    stream.apply(ChatFrame { reasoning: Some("hmm".into()), ..ChatFrame::delta("world") });

    let done = stream.apply(ChatFrame::stop("Hello world")).expect("completed");
    assert_eq!(done.text, "Hello world");
    assert_eq!(done.reasoning.as_deref(), Some("hmm"));
    assert!(!done.cached);
    assert_eq!(stream.preview(), "");
    assert_eq!(stream.reasoning(), "");
    assert!(!stream.is_streaming());
}

#[test]
fn stop_frame_without_full_text_uses_accumulated_preview() {
    let mut stream = ChatStream::new();
    stream.apply(ChatFrame::delta("partial "));
    let frame = ChatFrame {
        message: "end".into(),
        finish_reason: Some("stop".into()),
        ..ChatFrame::default()
    };
    let done = stream.apply(frame).expect("completed");
    assert_eq!(done.text, "partial end");
    assert!(done.reasoning.is_none());
}

#[test]
fn cached_stop_frame_carries_cache_metadata() {
    let mut stream = ChatStream::new();
    let frame: ChatFrame = serde_json::from_value(json!({
        "message": "cached answer",
        "finish_reason": "stop",
        "full_text": "cached answer",
        "cached": true,
        "distance": "0.03"
    }))
    .expect("frame");
    let done = stream.apply(frame).expect("completed");
    assert!(done.cached);
    assert_eq!(done.distance, Some(0.03));
}

#[test]
fn other_finish_reasons_are_not_terminal() {
    let mut stream = ChatStream::new();
    let frame = ChatFrame { finish_reason: Some("length".into()), ..ChatFrame::delta("x") };
    assert!(stream.apply(frame).is_none());
    assert_eq!(stream.preview(), "x");
}

#[test]
fn discard_drops_partial_text() {
    let mut stream = ChatStream::new();
    stream.apply(ChatFrame::delta("half"));
    stream.discard();
    assert_eq!(stream.preview(), "");
    assert!(!stream.is_streaming());
}

#[test]
fn generate_payload_uses_wire_field_names() {
    let payload = GeneratePayload {
        query: "what is verba".into(),
        context: "ctx".into(),
        conversation: vec![ConversationItem { kind: "user".into(), content: "hi".into() }],
        rag_config: RagConfig::default(),
    };
    let value = serde_json::to_value(&payload).expect("serialize");
    assert_eq!(value["query"], "what is verba");
    assert_eq!(value["conversation"][0]["type"], "user");
    assert!(value["rag_config"].is_object());
}
