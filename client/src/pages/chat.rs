//! Chat page: retrieval + streamed generation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns the chat socket for as long as it is mounted. A query first
//! goes to `/api/query`; the retrieval result turns into a generate request
//! written to the socket, and streamed frames land in `ChatState` through
//! `net::chat_socket`. A lost socket leaves the page offline until the user
//! presses Reconnect.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use frames::api::{QueryRequest, SuggestionsRequest};
use leptos::prelude::*;

use crate::components::chat_messages::ChatMessages;
use crate::components::ui::button::Button;
use crate::net::socket::SocketSender;
use crate::state::chat::ChatState;
use crate::state::documents::DocumentsState;
use crate::state::settings::SettingsState;

/// Autocompletion candidates requested per keystroke.
pub const SUGGESTION_LIMIT: u32 = 3;

/// Retrieval request for `query` with the current pipeline and credentials.
pub fn query_request(settings: &SettingsState, query: String) -> QueryRequest {
    QueryRequest {
        query,
        rag: settings.rag_config.clone(),
        labels: Vec::new(),
        document_filter: Vec::new(),
        credentials: settings.credentials.clone(),
    }
}

/// Suggestion lookup for partially typed input, if worth asking for.
pub fn suggestion_request(settings: &SettingsState, input: &str) -> Option<SuggestionsRequest> {
    let query = input.trim();
    if query.is_empty() || !settings.connected {
        return None;
    }
    Some(SuggestionsRequest {
        query: query.to_owned(),
        limit: SUGGESTION_LIMIT,
        credentials: settings.credentials.clone(),
    })
}

/// Message for a generate request that could not be written.
pub const SOCKET_UNAVAILABLE: &str = "Chat socket is not connected";

#[component]
pub fn ChatPage() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();
    let docs = expect_context::<RwSignal<DocumentsState>>();

    let socket = StoredValue::new(SocketSender::default());
    let reconnect_seq = Memo::new(move |_| chat.with(|c| c.reconnect_seq));

    Effect::new(move || {
        let _ = reconnect_seq.get();
        socket.update_value(SocketSender::release);
        #[cfg(feature = "hydrate")]
        {
            let sender = untrack(|| crate::net::chat_socket::spawn_chat_socket(chat));
            socket.set_value(sender);
        }
    });
    on_cleanup(move || socket.update_value(SocketSender::release));

    let input = RwSignal::new(String::new());

    let send = move || {
        let text = input.get_untracked();
        let Some(query) = chat.try_update(|c| c.begin_query(&text)).flatten() else {
            return;
        };
        input.set(String::new());
        let request = settings.with_untracked(|s| query_request(s, query));
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::query(&request).await {
                Ok(response) => {
                    let rag = settings.with_untracked(|s| s.rag_config.clone());
                    let Some(payload) = chat.try_update(|c| c.apply_retrieval(response, &rag)).flatten() else {
                        return;
                    };
                    if !socket.with_value(|s| s.send_json(&payload)) {
                        chat.update(|c| c.fail_query(SOCKET_UNAVAILABLE));
                    }
                }
                Err(err) => chat.update(|c| c.fail_query(&err)),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let on_input = Callback::new(move |text: String| {
        let Some(request) = settings.with_untracked(|s| suggestion_request(s, &text)) else {
            chat.update(|c| c.suggestions.clear());
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Ok(response) = crate::net::api::get_suggestions(&request).await {
                chat.update(|c| c.suggestions = response.suggestions);
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    });

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    let on_open_document = Callback::new(move |uuid: String| {
        docs.update(|d| {
            d.select(&uuid);
        });
    });

    let on_clear = Callback::new(move |_| {
        let theme = settings.with_untracked(|s| s.theme_config.theme.clone());
        chat.update(|c| c.clear(&theme));
    });
    let on_reconnect = Callback::new(move |_| chat.update(ChatState::request_reconnect));
    let on_toggle_reasoning = Callback::new(move |_| chat.update(|c| c.show_reasoning = !c.show_reasoning));

    let can_send = move || chat.with(|c| !c.is_fetching() && !c.offline) && !input.get().trim().is_empty();

    view! {
        <div class="chat-page">
            <div class="chat-page__toolbar">
                <Button small=true on_click=on_toggle_reasoning>
                    {move || if chat.get().show_reasoning { "Hide reasoning" } else { "Show reasoning" }}
                </Button>
                <Button small=true on_click=on_clear disabled=Signal::derive(move || chat.with(ChatState::is_fetching))>
                    "Clear chat"
                </Button>
                <Show when=move || chat.with(|c| c.offline)>
                    <span class="chat-page__offline">"Connection lost"</span>
                    <Button variant="primary" small=true on_click=on_reconnect>
                        "Reconnect"
                    </Button>
                </Show>
            </div>

            <ChatMessages on_open_document=on_open_document/>

            <ul class="chat-page__suggestions">
                {move || {
                    chat.get()
                        .suggestions
                        .into_iter()
                        .map(|s| {
                            let text = s.query.clone();
                            view! {
                                <li
                                    class="chat-page__suggestion"
                                    on:click=move |_| {
                                        input.set(text.clone());
                                        chat.update(|c| c.suggestions.clear());
                                    }
                                >
                                    {s.query}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>

            <div class="chat-page__input-row">
                <input
                    class="chat-page__input"
                    type="text"
                    placeholder=move || {
                        if chat.with(|c| c.offline) { "Reconnect to keep chatting" } else { "Ask your data..." }
                    }
                    disabled=move || chat.with(|c| c.is_fetching() || c.offline)
                    prop:value=move || input.get()
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        input.set(text.clone());
                        on_input.run(text);
                    }
                    on:keydown=on_keydown
                />
                <button class="btn btn--primary" disabled=move || !can_send() on:click=move |_| send()>
                    "Send"
                </button>
            </div>
        </div>
    }
}
