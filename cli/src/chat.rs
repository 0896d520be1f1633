//! `chat`: retrieval over REST, then the streamed answer over
//! `/ws/generate_stream`.
//!
//! Answer text goes to stdout as it streams; reasoning goes to stderr.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::io::Write;
use std::time::Duration;

use frames::api::{ConnectRequest, ConnectResponse, QueryRequest, QueryResponse};
use frames::{ChatFrame, ChatStream, CompletedAnswer, GeneratePayload};

use crate::CliError;
use crate::rest::RestClient;
use crate::socket;

const GENERATE_PATH: &str = "/ws/generate_stream";
const FRAME_TIMEOUT: Duration = Duration::from_secs(120);

/// What one inbound frame means for the terminal.
#[derive(Debug, PartialEq)]
pub enum Step {
    Delta { text: String, reasoning: Option<String> },
    Done(CompletedAnswer),
}

/// Feed `frame` through the accumulator.
pub fn step(stream: &mut ChatStream, frame: ChatFrame) -> Step {
    let text = frame.message.clone();
    let reasoning = frame.reasoning.clone().filter(|r| !r.is_empty());
    match stream.apply(frame) {
        Some(answer) => Step::Done(answer),
        None => Step::Delta { text, reasoning },
    }
}

/// Part of the completed answer not yet written to stdout. A final text that
/// no longer extends what was streamed is not repeated.
pub fn unprinted_tail<'a>(answer: &'a str, streamed: &str) -> &'a str {
    answer.strip_prefix(streamed).unwrap_or_default()
}

pub async fn run(client: &RestClient, query: String) -> Result<(), CliError> {
    let connect: ConnectResponse = client
        .post_checked("connect", &ConnectRequest { credentials: client.credentials.clone(), port: client.port.clone() })
        .await?;
    let rag_config = connect.rag_config;

    let retrieval: QueryResponse = client
        .post_checked(
            "query",
            &QueryRequest {
                query: query.clone(),
                rag: rag_config.clone(),
                labels: Vec::new(),
                document_filter: Vec::new(),
                credentials: client.credentials.clone(),
            },
        )
        .await?;
    tracing::info!(documents = retrieval.documents.len(), "retrieved context");
    for doc in &retrieval.documents {
        eprintln!("[{:.2}] {}", doc.score, doc.title);
    }

    let payload =
        GeneratePayload { query, context: retrieval.context, conversation: Vec::new(), rag_config };
    let mut ws = socket::open(&client.socket_url(GENERATE_PATH)?).await?;
    socket::send_text(&mut ws, serde_json::to_string(&payload)?).await?;

    let mut stream = ChatStream::new();
    let mut streamed = String::new();
    let mut stdout = std::io::stdout();
    loop {
        let text = socket::recv_text(&mut ws, FRAME_TIMEOUT).await?;
        let frame = match frames::parse_chat_frame(&text) {
            Ok(frame) => frame,
            Err(error) => {
                tracing::warn!(%error, "dropping chat frame");
                continue;
            }
        };
        match step(&mut stream, frame) {
            Step::Delta { text, reasoning } => {
                if let Some(reasoning) = reasoning {
                    eprint!("{reasoning}");
                }
                if !text.is_empty() {
                    print!("{text}");
                    let _ = stdout.flush();
                    streamed.push_str(&text);
                }
            }
            Step::Done(answer) => {
                println!("{}", unprinted_tail(&answer.text, &streamed));
                if answer.cached {
                    tracing::info!(distance = ?answer.distance, "answer served from cache");
                }
                return Ok(());
            }
        }
    }
}
