//! Chat generation socket (`/ws/generate_stream`).
//!
//! One socket per chat view mount. Outbound frames are `GeneratePayload`s;
//! inbound frames are streamed tokens handed to `ChatState::apply_frame`.
//! Unparsable frames are dropped with a console warning.

#[cfg(test)]
#[path = "chat_socket_test.rs"]
mod chat_socket_test;

#[cfg(any(test, feature = "hydrate"))]
use crate::state::chat::ChatState;

pub const CHAT_SOCKET_PATH: &str = "/ws/generate_stream";

/// Apply one inbound text frame. Returns `false` when the frame was dropped.
#[cfg(any(test, feature = "hydrate"))]
pub fn handle_chat_text(chat: &mut ChatState, text: &str) -> bool {
    match frames::parse_chat_frame(text) {
        Ok(frame) => {
            chat.apply_frame(frame);
            true
        }
        Err(e) => {
            leptos::logging::warn!("dropping chat frame: {e}");
            false
        }
    }
}

/// Open the chat socket and wire its events into `chat`.
#[cfg(feature = "hydrate")]
pub fn spawn_chat_socket(chat: leptos::prelude::RwSignal<ChatState>) -> super::socket::SocketSender {
    use futures::channel::mpsc;
    use leptos::prelude::Update;

    use super::socket::{SocketEnd, SocketSender, page_socket_url, run_text_socket};

    let (tx, rx) = mpsc::unbounded::<String>();
    chat.update(ChatState::on_socket_connecting);

    leptos::task::spawn_local(async move {
        let url = page_socket_url(CHAT_SOCKET_PATH);
        let end = run_text_socket(
            &url,
            rx,
            || chat.update(ChatState::on_socket_open),
            |text| {
                chat.update(|c| {
                    handle_chat_text(c, &text);
                });
            },
        )
        .await;
        match end {
            SocketEnd::Released => {
                leptos::logging::log!("chat socket released");
                chat.try_update(ChatState::on_socket_closed);
            }
            SocketEnd::Lost(err) => {
                leptos::logging::warn!("chat socket lost: {err}");
                chat.try_update(ChatState::on_socket_lost);
            }
        }
    });

    SocketSender::new(tx)
}
