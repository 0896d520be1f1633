use super::*;

#[test]
fn socket_url_follows_page_protocol() {
    assert_eq!(socket_url("http:", "localhost:8000", "/ws/generate_stream"), "ws://localhost:8000/ws/generate_stream");
    assert_eq!(socket_url("https:", "verba.example", "ws/import_files"), "wss://verba.example/ws/import_files");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn detached_sender_drops_frames() {
    let mut sender = SocketSender::default();
    assert!(!sender.is_attached());
    assert!(!sender.send_text("{}".into()));
    assert!(!sender.send_json(&serde_json::json!({"query": "q"})));
    sender.release();
    assert!(!sender.is_attached());
}
