//! Websocket plumbing shared by the chat and import commands.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::CliError;

pub type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

pub async fn open(url: &str) -> Result<Socket, CliError> {
    tracing::debug!(%url, "opening websocket");
    let (stream, _) = connect_async(url).await.map_err(|error| CliError::WsConnect(Box::new(error)))?;
    Ok(stream)
}

pub async fn send_text(stream: &mut Socket, text: String) -> Result<(), CliError> {
    stream
        .send(Message::Text(text.into()))
        .await
        .map_err(|error| CliError::WsConnect(Box::new(error)))
}

/// Next text frame, skipping pings and binary frames.
pub async fn recv_text(stream: &mut Socket, timeout: Duration) -> Result<String, CliError> {
    let fut = async {
        loop {
            let Some(message) = stream.next().await else {
                return Err(CliError::WsClosed);
            };
            match message.map_err(|error| CliError::WsConnect(Box::new(error)))? {
                Message::Text(text) => return Ok(text.to_string()),
                Message::Close(_) => return Err(CliError::WsClosed),
                _ => {}
            }
        }
    };

    tokio::time::timeout(timeout, fut).await.map_err(|_| CliError::Timeout)?
}
