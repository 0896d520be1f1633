//! Import page: pick files or URLs, tune labels and pipeline, send them to
//! the ingestion socket and watch their status.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns the import socket while mounted. Drafts live in
//! `IngestState` and survive page switches but not reloads. Sending marks a
//! draft `WAITING` and writes its batch frames in one loop; progress arrives
//! as status frames handled by `net::ingest_socket`.
//!
//! ERROR HANDLING
//! ==============
//! A send started while the socket is not open is abandoned and a reconnect
//! is requested. A socket that drops mid-send fails every in-flight draft.

#[cfg(test)]
#[path = "import_test.rs"]
mod import_test;

use frames::{Credentials, FileStatus, StatusReport};
use leptos::prelude::*;

use crate::components::file_row::FileRow;
use crate::components::rag_config_editor::{ConfigEdit, RagConfigEditor, apply_edit};
use crate::components::ui::button::Button;
use crate::components::ui::input::TextInput;
use crate::net::socket::SocketSender;
use crate::net::upload::{SendOutcome, send_file};
use crate::state::ingest::{CONNECTION_INTERRUPTED, ImportScope, IngestState};
use crate::state::query_cache::ResponseCache;
use crate::state::settings::SettingsState;
use crate::state::ui::UiState;
use crate::util::file_reader::url_draft;

/// Result of an import action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportOutcome {
    /// No draft was eligible.
    Nothing,
    /// The socket was not open; a reconnect was requested instead.
    Reconnecting,
    /// Every eligible draft was written.
    Sent(usize),
    /// The socket went away part way through.
    Interrupted,
}

impl ImportOutcome {
    /// Toast text for the outcome.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Nothing => None,
            Self::Reconnecting => Some("Import socket not connected, reconnecting. Try again in a moment.".to_owned()),
            Self::Sent(1) => Some("Importing 1 file".to_owned()),
            Self::Sent(n) => Some(format!("Importing {n} files")),
            Self::Interrupted => Some(CONNECTION_INTERRUPTED.to_owned()),
        }
    }
}

/// Send the drafts selected by `scope` over `socket`.
pub fn run_import(
    ingest: &mut IngestState,
    socket: &SocketSender,
    credentials: &Credentials,
    scope: ImportScope,
) -> ImportOutcome {
    let ids = ingest.selected_for_import(scope);
    if ids.is_empty() {
        return ImportOutcome::Nothing;
    }
    if !ingest.connection.is_open() || !socket.is_attached() {
        ingest.request_reconnect();
        return ImportOutcome::Reconnecting;
    }
    ingest.mark_waiting(&ids);
    let mut sent = 0;
    for id in &ids {
        let Some(file) = ingest.files.get(id) else {
            continue;
        };
        match send_file(socket, ingest.connection, file, credentials) {
            Ok(SendOutcome::Sent { .. }) => sent += 1,
            Ok(SendOutcome::NotConnected | SendOutcome::Interrupted { .. }) => {
                ingest.on_socket_lost();
                return ImportOutcome::Interrupted;
            }
            Err(err) => {
                let report = StatusReport::new(id.clone(), FileStatus::Error, err, 0.0);
                ingest.apply_frame(frames::IngestFrame::Status(report));
            }
        }
    }
    ImportOutcome::Sent(sent)
}

/// "2 DONE · 1 CHUNKING" style summary.
pub fn status_summary(ingest: &IngestState) -> String {
    ingest
        .status_counts()
        .into_iter()
        .map(|(status, count)| format!("{count} {status}"))
        .collect::<Vec<_>>()
        .join(" · ")
}

#[component]
pub fn ImportPage() -> impl IntoView {
    let ingest = expect_context::<RwSignal<IngestState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let cache = expect_context::<RwSignal<ResponseCache>>();

    let socket = StoredValue::new(SocketSender::default());
    let reconnect_seq = Memo::new(move |_| ingest.with(|s| s.reconnect_seq));
    Effect::new(move || {
        let _ = reconnect_seq.get();
        socket.update_value(SocketSender::release);
        #[cfg(feature = "hydrate")]
        {
            let sender = untrack(|| crate::net::ingest_socket::spawn_ingest_socket(ingest, cache));
            socket.set_value(sender);
        }
    });
    on_cleanup(move || socket.update_value(SocketSender::release));

    let read_only = Signal::derive(move || settings.with(SettingsState::is_demo));
    let url = RwSignal::new(String::new());
    let label = RwSignal::new(String::new());

    let on_files = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let rag = settings.with_untracked(|s| s.rag_config.clone());
            leptos::task::spawn_local(async move {
                let drafts = crate::util::file_reader::read_input_files(&input, &rag).await;
                input.set_value("");
                ingest.update(|s| {
                    s.add_files(drafts);
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let add_url = Callback::new(move |()| {
        let draft = settings.with_untracked(|s| url_draft(&url.get_untracked(), &s.rag_config));
        match draft {
            Some(file) => {
                ingest.update(|s| {
                    s.add_files([file]);
                });
                url.set(String::new());
            }
            None => {
                ui.update(|u| {
                    u.show_error("Enter an http(s) URL");
                });
            }
        }
    });

    let add_label = Callback::new(move |()| {
        let text = label.get_untracked();
        ingest.update(|s| {
            if let Some(id) = s.selected.clone() {
                s.add_label(&id, &text);
            }
        });
        label.set(String::new());
    });

    let import = move |scope: ImportScope| {
        let credentials = settings.with_untracked(|s| s.credentials.clone());
        let outcome = socket.with_value(|sock| {
            ingest.try_update(|s| run_import(s, sock, &credentials, scope)).unwrap_or(ImportOutcome::Nothing)
        });
        if let Some(message) = outcome.message() {
            ui.update(|u| match outcome {
                ImportOutcome::Sent(_) => {
                    u.show_status(message);
                }
                _ => {
                    u.show_error(message);
                }
            });
        }
    };

    let on_edit = Callback::new(move |edit: ConfigEdit| {
        ingest.update(|s| {
            let Some(id) = s.selected.clone() else {
                return;
            };
            let Some(mut config) = s.files.get(&id).map(|f| f.rag_config.clone()) else {
                return;
            };
            if apply_edit(&mut config, &edit) {
                s.set_file_rag_config(&id, config);
            }
        });
    });

    let selected_config = Signal::derive(move || {
        ingest.with(|s| s.selected_file().map(|f| f.rag_config.clone()).unwrap_or_default())
    });
    let on_select = Callback::new(move |id: String| {
        ingest.update(|s| {
            s.select(&id);
        });
    });
    let on_remove = Callback::new(move |id: String| {
        ingest.update(|s| {
            s.remove_file(&id);
        });
    });

    view! {
        <div class="import-page">
            <div class="import-page__toolbar">
                <label class="btn btn--secondary import-page__picker">
                    "Add files"
                    <input type="file" multiple=true class="import-page__file-input" on:change=on_files/>
                </label>
                <TextInput value=url placeholder="https://..." input_type="url" on_enter=add_url/>
                <Button small=true on_click=Callback::new(move |_| add_url.run(()))>"Add URL"</Button>
                <span class="import-page__spacer"></span>
                <span class="import-page__summary">{move || status_summary(&ingest.get())}</span>
                <span class="import-page__socket">{move || ingest.get().connection.label()}</span>
                <Show when=move || ingest.with(|s| s.connection == crate::state::connection::ConnectionStatus::Error)>
                    <Button small=true on_click=Callback::new(move |_| ingest.update(IngestState::request_reconnect))>
                        "Reconnect"
                    </Button>
                </Show>
            </div>

            <div class="import-page__body">
                <ul class="import-page__files">
                    {move || {
                        let state = ingest.get();
                        if state.files.is_empty() {
                            return view! { <li class="import-page__empty">"No files selected"</li> }.into_any();
                        }
                        let selected = state.selected.clone();
                        state
                            .files
                            .into_values()
                            .map(|file| {
                                let is_selected = selected.as_deref() == Some(file.file_id.as_str());
                                view! {
                                    <FileRow
                                        file=file
                                        selected=is_selected
                                        on_select=on_select
                                        on_remove=on_remove
                                    />
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </ul>

                <Show when=move || ingest.with(|s| s.selected_file().is_some())>
                    <div class="import-page__detail">
                        <h3>{move || ingest.with(|s| s.selected_file().map(|f| f.filename.clone()).unwrap_or_default())}</h3>
                        <div class="import-page__labels">
                            {move || {
                                let (id, labels) = ingest.with(|s| {
                                    s.selected_file().map(|f| (f.file_id.clone(), f.labels.clone())).unwrap_or_default()
                                });
                                labels
                                    .into_iter()
                                    .map(|l| {
                                        let (id, name) = (id.clone(), l.clone());
                                        view! {
                                            <span class="chip">
                                                {l}
                                                <button
                                                    class="chip__remove"
                                                    on:click=move |_| {
                                                        ingest.update(|s| {
                                                            s.remove_label(&id, &name);
                                                        });
                                                    }
                                                >
                                                    "✕"
                                                </button>
                                            </span>
                                        }
                                    })
                                    .collect_view()
                            }}
                            <TextInput value=label placeholder="Add label" on_enter=add_label/>
                        </div>
                        <label class="import-page__overwrite">
                            <input
                                type="checkbox"
                                prop:checked=move || ingest.with(|s| s.selected_file().is_some_and(|f| f.overwrite))
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    ingest.update(|s| {
                                        if let Some(id) = s.selected.clone() {
                                            s.set_overwrite(&id, checked);
                                        }
                                    });
                                }
                            />
                            "Overwrite existing document"
                        </label>
                        <RagConfigEditor config=selected_config on_edit=on_edit/>
                        <div class="import-page__config-actions">
                            <Button
                                small=true
                                on_click=Callback::new(move |_| {
                                    let config = selected_config.get_untracked();
                                    ingest.update(|s| s.apply_rag_config_to_all(&config));
                                })
                            >
                                "Apply config to all"
                            </Button>
                            <Button
                                small=true
                                on_click=Callback::new(move |_| {
                                    let config = settings.with_untracked(|s| s.rag_config.clone());
                                    ingest.update(|s| {
                                        if let Some(id) = s.selected.clone() {
                                            s.set_file_rag_config(&id, config);
                                        }
                                    });
                                })
                            >
                                "Reset to default config"
                            </Button>
                        </div>
                    </div>
                </Show>
            </div>

            <div class="import-page__actions">
                <Button on_click=Callback::new(move |_| ingest.update(IngestState::remove_all))>"Clear all"</Button>
                <Button variant="primary" disabled=read_only on_click=Callback::new(move |_| import(ImportScope::Selected))>
                    "Import Selected"
                </Button>
                <Button variant="primary" disabled=read_only on_click=Callback::new(move |_| import(ImportScope::All))>
                    "Import All"
                </Button>
            </div>
        </div>
    }
}
