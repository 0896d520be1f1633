//! Chat message list with the live streaming preview.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders `ChatState.messages` in order. System answers are markdown
//! (raw HTML stripped); retrieval entries list the documents that grounded
//! the following answer. While a generation streams, the partial text is
//! shown below the list and replaced by a permanent message on the stop
//! frame.

#[cfg(test)]
#[path = "chat_messages_test.rs"]
mod chat_messages_test;

use leptos::prelude::*;

use crate::state::chat::{ChatState, FetchStage, Message, MessageKind};
use crate::util::format;
use crate::util::markdown::render_markdown_html;

/// Pending-request indicator text.
pub fn stage_label(stage: FetchStage) -> Option<&'static str> {
    match stage {
        FetchStage::Idle => None,
        FetchStage::Retrieving => Some("Retrieving chunks..."),
        FetchStage::Generating => Some("Generating answer..."),
    }
}

/// Badge text for a cached answer.
pub fn cache_badge(message: &Message) -> Option<String> {
    if !message.cached {
        return None;
    }
    Some(match message.distance {
        Some(distance) => format!("cached ({})", format::score(distance)),
        None => "cached".to_owned(),
    })
}

#[component]
pub fn ChatMessages(
    /// Called with a document uuid before navigating to the explorer.
    on_open_document: Callback<String>,
) -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let list_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        chat.with(|c| (c.messages.len(), c.stream.preview().len()));
        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = list_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    view! {
        <div class="chat-messages" node_ref=list_ref>
            {move || {
                let show_reasoning = chat.with(|c| c.show_reasoning);
                chat.get()
                    .messages
                    .into_iter()
                    .map(|message| message_view(message, show_reasoning, on_open_document))
                    .collect_view()
            }}

            {move || {
                let (preview, reasoning, show) = chat.with(|c| {
                    (c.stream.preview().to_owned(), c.stream.reasoning().to_owned(), c.show_reasoning)
                });
                (!preview.is_empty() || !reasoning.is_empty()).then(|| {
                    view! {
                        <div class="chat-message chat-message--system chat-message--streaming">
                            {(show && !reasoning.is_empty())
                                .then(|| view! { <div class="chat-message__reasoning">{reasoning}</div> })}
                            <div class="chat-message__markdown" inner_html=render_markdown_html(&preview)></div>
                        </div>
                    }
                })
            }}

            {move || {
                stage_label(chat.get().stage).map(|label| view! { <div class="chat-messages__loading">{label}</div> })
            }}
        </div>
    }
}

fn message_view(message: Message, show_reasoning: bool, on_open_document: Callback<String>) -> AnyView {
    match message.kind {
        MessageKind::User => view! {
            <div class="chat-message chat-message--user">
                <span>{message.content}</span>
            </div>
        }
        .into_any(),
        MessageKind::Error => view! {
            <div class="chat-message chat-message--error">
                <span>{message.content}</span>
            </div>
        }
        .into_any(),
        MessageKind::System => {
            let badge = cache_badge(&message);
            let reasoning = message.reasoning.filter(|r| show_reasoning && !r.is_empty());
            let html = render_markdown_html(&message.content);
            view! {
                <div class="chat-message chat-message--system">
                    {badge.map(|b| view! { <span class="chat-message__badge">{b}</span> })}
                    {reasoning.map(|r| view! { <div class="chat-message__reasoning">{r}</div> })}
                    <div class="chat-message__markdown" inner_html=html></div>
                </div>
            }
            .into_any()
        }
        MessageKind::Retrieval => {
            let empty = message.documents.is_empty();
            view! {
                <div class="chat-message chat-message--retrieval">
                    {empty.then(|| view! { <span class="chat-message__empty">"No documents retrieved"</span> })}
                    <ul class="chat-message__documents">
                        {message
                            .documents
                            .into_iter()
                            .map(|doc| {
                                let uuid = doc.uuid.clone();
                                view! {
                                    <li class="chat-message__document">
                                        <a
                                            class="chat-message__document-title"
                                            href="/documents"
                                            on:click=move |_| on_open_document.run(uuid.clone())
                                        >
                                            {doc.title}
                                        </a>
                                        <span class="chat-message__document-score">{format::score(doc.score)}</span>
                                        <span class="chat-message__document-chunks">
                                            {format!("{} chunks", doc.chunks.len())}
                                        </span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </div>
            }
            .into_any()
        }
    }
}
