use super::*;

#[test]
fn deltas_pass_through_until_stop() {
    let mut stream = ChatStream::new();
    assert_eq!(
        step(&mut stream, ChatFrame::delta("Hel")),
        Step::Delta { text: "Hel".into(), reasoning: None }
    );
    let _ = step(&mut stream, ChatFrame::delta("lo"));
    match step(&mut stream, ChatFrame::stop("Hello")) {
        Step::Done(answer) => {
            assert_eq!(answer.text, "Hello");
            assert!(!answer.cached);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(!stream.is_streaming());
}

#[test]
fn reasoning_is_reported_separately() {
    let mut stream = ChatStream::new();
    let frame = ChatFrame { reasoning: Some("thinking".into()), ..ChatFrame::delta("") };
    assert_eq!(
        step(&mut stream, frame),
        Step::Delta { text: String::new(), reasoning: Some("thinking".into()) }
    );
}

#[test]
fn stop_without_full_text_uses_streamed_text() {
    let mut stream = ChatStream::new();
    let _ = step(&mut stream, ChatFrame::delta("partial answer"));
    match step(&mut stream, ChatFrame::stop("")) {
        Step::Done(answer) => assert_eq!(answer.text, "partial answer"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn stop_frame_message_is_printed_after_deltas() {
    let mut stream = ChatStream::new();
    let _ = step(&mut stream, ChatFrame::delta("Verba is a RAG app"));
    let stop = ChatFrame { message: ".".into(), full_text: None, ..ChatFrame::stop("") };
    let Step::Done(answer) = step(&mut stream, stop) else {
        panic!("expected completion");
    };
    assert_eq!(unprinted_tail(&answer.text, "Verba is a RAG app"), ".");
}

#[test]
fn unprinted_tail_cases() {
    assert_eq!(unprinted_tail("full answer", ""), "full answer");
    assert_eq!(unprinted_tail("full answer", "full answer"), "");
    assert_eq!(unprinted_tail("rewritten", "draft"), "");
}
