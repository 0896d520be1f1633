//! Shared websocket plumbing for the chat and import channels.
//!
//! Both channels speak JSON text frames and follow the same lifecycle: a
//! view opens one socket when it mounts, writes outbound frames through an
//! unbounded channel, and tears the socket down by dropping the sender when
//! it unmounts or reconnects. There is no reconnect loop; a lost socket
//! stays lost until the user asks for a new one.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

/// Websocket endpoint for a path on the page's own origin.
///
/// `protocol` is `window.location.protocol` (`"https:"` selects `wss`).
#[cfg(any(test, feature = "hydrate"))]
pub fn socket_url(protocol: &str, host: &str, path: &str) -> String {
    let scheme = if protocol.starts_with("https") { "wss" } else { "ws" };
    let path = path.trim_start_matches('/');
    format!("{scheme}://{host}/{path}")
}

/// How a socket task ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SocketEnd {
    /// The owning view dropped its sender.
    Released,
    /// Transport error or close initiated by the backend.
    Lost(String),
}

/// Outbound handle for one socket.
///
/// Cloning shares the same channel. A default handle is detached and drops
/// every frame.
#[derive(Clone, Debug, Default)]
pub struct SocketSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<String>>,
}

impl SocketSender {
    #[cfg(feature = "hydrate")]
    pub fn new(tx: futures::channel::mpsc::UnboundedSender<String>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Whether a live channel is attached.
    pub fn is_attached(&self) -> bool {
        #[cfg(feature = "hydrate")]
        {
            self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            false
        }
    }

    /// Queue one text frame. Returns `false` if no socket is attached.
    pub fn send_text(&self, text: String) -> bool {
        #[cfg(feature = "hydrate")]
        {
            self.tx.as_ref().is_some_and(|tx| tx.unbounded_send(text).is_ok())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = text;
            false
        }
    }

    /// Serialize and queue one frame.
    pub fn send_json<T: serde::Serialize>(&self, value: &T) -> bool {
        serde_json::to_string(value).is_ok_and(|text| self.send_text(text))
    }

    /// Detach and close the outbound channel, ending the socket task.
    pub fn release(&mut self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(tx) = self.tx.take() {
                tx.close_channel();
            }
        }
    }
}

/// Websocket URL for `path` on the current page origin.
#[cfg(feature = "hydrate")]
pub fn page_socket_url(path: &str) -> String {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location.as_ref().and_then(|l| l.protocol().ok()).unwrap_or_default();
    let host = location
        .as_ref()
        .and_then(|l| l.host().ok())
        .unwrap_or_else(|| "localhost:8000".to_owned());
    socket_url(&protocol, &host, path)
}

/// Open a socket and pump frames until either side ends.
///
/// `on_open` runs once the socket object exists; `on_text` runs for every
/// inbound text frame. Binary frames are ignored.
#[cfg(feature = "hydrate")]
pub async fn run_text_socket(
    url: &str,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
    on_open: impl FnOnce(),
    mut on_text: impl FnMut(String),
) -> SocketEnd {
    use futures::future::Either;
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = match WebSocket::open(url) {
        Ok(ws) => ws,
        Err(e) => return SocketEnd::Lost(e.to_string()),
    };
    let (mut ws_write, mut ws_read) = ws.split();
    on_open();

    let mut rx = rx;
    let send_task = async {
        while let Some(text) = rx.next().await {
            if let Err(e) = ws_write.send(Message::Text(text)).await {
                return Some(e.to_string());
            }
        }
        None
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => on_text(text),
                Ok(Message::Bytes(_)) => {}
                Err(e) => return e.to_string(),
            }
        }
        "socket closed".to_owned()
    };

    match futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await {
        Either::Left((None, _)) => SocketEnd::Released,
        Either::Left((Some(err), _)) | Either::Right((err, _)) => SocketEnd::Lost(err),
    }
}
