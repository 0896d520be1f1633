use super::*;
use crate::state::test_helpers::{demo_app_state, test_app_state};
use frames::api::{QueryRequest, QueryResponse};
use frames::{
    ChatFrame, ChatStream, Credentials, FileData, FileStatus, GeneratePayload, IngestFrame, RagConfig,
    UPLOAD_CHUNK_SIZE, parse_ingest_frame, split_into_batches,
};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio::time::{Duration, timeout};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

async fn spawn_server(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app(state)).await;
    });
    addr
}

async fn next_text<S>(stream: &mut S) -> Option<String>
where
    S: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        match timeout(Duration::from_secs(5), stream.next()).await.expect("frame timed out")? {
            Ok(Message::Text(text)) => return Some(text.to_string()),
            Ok(Message::Close(_)) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

#[tokio::test]
async fn health_over_http() {
    let addr = spawn_server(test_app_state()).await;
    let body: serde_json::Value =
        reqwest::get(format!("http://{addr}/api/health")).await.expect("get").json().await.expect("json");
    assert_eq!(body["message"], "Alive!");
    assert_eq!(body["deployments"]["WEAVIATE_URL_VERBA"], "");
}

#[tokio::test]
async fn malformed_body_is_an_http_error() {
    let addr = spawn_server(test_app_state()).await;
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/connect"))
        .header("content-type", "application/json")
        .body("{")
        .send()
        .await
        .expect("post");
    assert!(response.status().is_client_error());
    let body: serde_json::Value = response.json().await.expect("json");
    assert!(body["error"].as_str().is_some_and(|e| e.starts_with("invalid request body")));
}

#[tokio::test]
async fn chat_stream_end_to_end() {
    let addr = spawn_server(test_app_state()).await;
    let (mut ws, _) = connect_async(format!("ws://{addr}/ws/generate_stream")).await.expect("connect");
    let payload = GeneratePayload { query: "hello".into(), context: "greeting context".into(), ..GeneratePayload::default() };
    ws.send(Message::Text(serde_json::to_string(&payload).expect("json").into())).await.expect("send");

    let mut stream = ChatStream::new();
    let answer = loop {
        let text = next_text(&mut ws).await.expect("frame");
        let frame: ChatFrame = frames::parse_chat_frame(&text).expect("chat frame");
        if let Some(done) = stream.apply(frame) {
            break done;
        }
    };
    assert!(answer.text.contains("greeting context"));

    ws.send(Message::Text("not json".into())).await.expect("send");
    let text = next_text(&mut ws).await.expect("error frame");
    let frame = frames::parse_chat_frame(&text).expect("chat frame");
    assert!(frame.is_stop());
}

#[tokio::test]
async fn import_then_query_end_to_end() {
    let state = test_app_state();
    let addr = spawn_server(state).await;
    let (mut ws, _) = connect_async(format!("ws://{addr}/ws/import_files")).await.expect("connect");

    let mut file = FileData::from_bytes("guide.md", "Verba imports markdown guides.".as_bytes(), RagConfig::new());
    file.labels = vec!["Guides".into()];
    let payload = serde_json::to_string(&file).expect("payload");
    for batch in split_into_batches(&payload, &file.file_id, &Credentials::default(), UPLOAD_CHUNK_SIZE) {
        ws.send(Message::Text(serde_json::to_string(&batch).expect("batch").into())).await.expect("send");
    }

    let mut statuses = Vec::new();
    while statuses.last() != Some(&FileStatus::Done) {
        let text = next_text(&mut ws).await.expect("report");
        match parse_ingest_frame(&text).expect("ingest frame") {
            IngestFrame::Status(report) => {
                assert_eq!(report.file_id, "guide.md");
                statuses.push(report.status);
            }
            IngestFrame::Rename(_) => {}
        }
    }
    assert_eq!(statuses.len(), 6);

    let reply: QueryResponse = reqwest::Client::new()
        .post(format!("http://{addr}/api/query"))
        .json(&QueryRequest { query: "markdown guides".into(), labels: vec!["Guides".into()], ..QueryRequest::default() })
        .send()
        .await
        .expect("post")
        .json()
        .await
        .expect("json");
    assert_eq!(reply.documents.len(), 1);
    assert_eq!(reply.documents[0].title, "guide.md");
}

#[tokio::test]
async fn invalid_import_frame_closes_socket() {
    let addr = spawn_server(test_app_state()).await;
    let (mut ws, _) = connect_async(format!("ws://{addr}/ws/import_files")).await.expect("connect");
    ws.send(Message::Text("{\"chunk\": 1}".into())).await.expect("send");
    assert!(next_text(&mut ws).await.is_none());
}

#[tokio::test]
async fn demo_mode_closes_import_socket() {
    let addr = spawn_server(demo_app_state()).await;
    let (mut ws, _) = connect_async(format!("ws://{addr}/ws/import_files")).await.expect("connect");
    assert!(next_text(&mut ws).await.is_none());
}
