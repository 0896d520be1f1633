//! Settings page: deployment connection, pipeline configuration, themes,
//! suggestion admin, cluster metadata and resets.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything here edits `SettingsState`. `start_connect` is shared with the
//! app root, which runs `bootstrap` once on load to adopt the backend's
//! advertised defaults and auto-connect when a default deployment is set.
//!
//! ERROR HANDLING
//! ==============
//! Every request reports through the status toast. Demo deployments accept
//! write requests but answer with a status message and keep the old state;
//! the page disables write controls while in demo mode.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use frames::Deployment;
use frames::api::{
    AllSuggestionsRequest, DeleteSuggestionRequest, MetaResponse, ResetMode, ResetRequest, SetRagConfigRequest,
    SetThemeConfigRequest, SetUserConfigRequest,
};
use leptos::prelude::*;

use crate::components::rag_config_editor::{ConfigEdit, RagConfigEditor};
use crate::components::ui::button::Button;
use crate::components::ui::dialog::ConfirmDialog;
use crate::components::ui::input::TextInput;
use crate::state::chat::ChatState;
use crate::state::documents::DocumentsState;
use crate::state::query_cache::{Mutation, ResponseCache, keys};
use crate::state::settings::{SUGGESTION_PAGE_SIZE, SettingsState};
use crate::state::ui::UiState;

/// What a reset mode wipes, for the confirmation dialog.
pub fn reset_description(mode: ResetMode) -> &'static str {
    match mode {
        ResetMode::All => "Delete every document, chunk, suggestion and stored configuration?",
        ResetMode::Documents => "Delete every imported document and its chunks?",
        ResetMode::Config => "Reset the pipeline, theme and user configuration to defaults?",
        ResetMode::Suggestions => "Delete every stored query suggestion?",
    }
}

/// Whether a reset wipes stored documents.
pub fn reset_clears_documents(mode: ResetMode) -> bool {
    matches!(mode, ResetMode::All | ResetMode::Documents)
}

/// Whether the backend config must be reloaded after a reset.
pub fn reset_reloads_config(mode: ResetMode) -> bool {
    matches!(mode, ResetMode::All | ResetMode::Config)
}

pub fn rag_save_request(settings: &SettingsState) -> SetRagConfigRequest {
    SetRagConfigRequest { rag_config: settings.rag_config.clone(), credentials: settings.credentials.clone() }
}

pub fn theme_save_request(settings: &SettingsState) -> SetThemeConfigRequest {
    SetThemeConfigRequest {
        theme: settings.theme_config.theme.clone(),
        themes: settings.theme_config.themes.clone(),
        credentials: settings.credentials.clone(),
    }
}

pub fn suggestion_page_request(settings: &SettingsState) -> AllSuggestionsRequest {
    AllSuggestionsRequest {
        page: settings.suggestion_page,
        page_size: SUGGESTION_PAGE_SIZE,
        credentials: settings.credentials.clone(),
    }
}

/// Issue `/api/connect` with the current credentials.
///
/// On success the response cache is dropped (it may hold another
/// deployment's data) and an untouched chat is re-seeded with the new
/// theme's intro message.
pub fn start_connect(
    settings: RwSignal<SettingsState>,
    chat: RwSignal<ChatState>,
    cache: RwSignal<ResponseCache>,
    ui: RwSignal<UiState>,
) {
    let Some(request) = settings.try_update(SettingsState::begin_connect).flatten() else {
        return;
    };
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = match crate::net::api::connect(&request).await {
            Ok(response) => settings.try_update(|s| s.apply_connect(response)).unwrap_or(Ok(())),
            Err(err) => Err(settings.try_update(|s| s.fail_connect(&err)).unwrap_or(err)),
        };
        if result.is_ok() {
            cache.update(ResponseCache::clear);
            let theme = settings.with_untracked(|s| s.theme_config.theme.clone());
            chat.update(|c| {
                if c.messages.len() <= 1 && !c.is_fetching() {
                    c.clear(&theme);
                }
            });
            leptos::logging::log!("connected to {}", request.credentials.deployment.as_str());
        }
        ui.update(|u| u.report(&result, Some("Connected")));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (request, chat, cache, ui);
}

/// Load `/api/health` and auto-connect when the backend names a default
/// deployment.
pub fn bootstrap(
    settings: RwSignal<SettingsState>,
    chat: RwSignal<ChatState>,
    cache: RwSignal<ResponseCache>,
    ui: RwSignal<UiState>,
) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::health().await {
            Ok(health) => {
                settings.update(|s| s.apply_health(health));
                if settings.with_untracked(|s| s.credentials.default_deployment.is_some()) {
                    start_connect(settings, chat, cache, ui);
                }
            }
            Err(err) => {
                leptos::logging::warn!("health check failed: {err}");
                ui.update(|u| {
                    u.show_error(format!("Backend unreachable: {err}"));
                });
            }
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (settings, chat, cache, ui);
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let settings = expect_context::<RwSignal<SettingsState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let docs = expect_context::<RwSignal<DocumentsState>>();
    let cache = expect_context::<RwSignal<ResponseCache>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let demo = Signal::derive(move || settings.with(SettingsState::is_demo));
    let connected = Memo::new(move |_| settings.with(|s| s.connected));

    let url = RwSignal::new(settings.get_untracked().credentials.url);
    let key = RwSignal::new(settings.get_untracked().credentials.key);
    let port = RwSignal::new(settings.get_untracked().port);

    let on_connect = Callback::new(move |_| {
        settings.update(|s| {
            s.credentials.url = url.get_untracked();
            s.credentials.key = key.get_untracked();
            s.port = port.get_untracked();
        });
        start_connect(settings, chat, cache, ui);
    });
    let on_disconnect = Callback::new(move |_| {
        settings.update(SettingsState::disconnect);
        docs.set(DocumentsState::default());
        cache.update(ResponseCache::clear);
    });

    let on_edit = Callback::new(move |edit: ConfigEdit| {
        settings.update(|s| {
            match edit {
                ConfigEdit::Select { stage, component } => s.select_component(&stage, &component),
                ConfigEdit::Setting { stage, component, key, raw } => {
                    s.set_component_setting(&stage, &component, &key, &raw)
                }
            };
        });
    });
    let rag_config = Signal::derive(move || settings.with(|s| s.rag_config.clone()));

    let on_save_rag = Callback::new(move |_| {
        let request = settings.with_untracked(rag_save_request);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let mutation = Mutation::invalidating([keys::config()]);
            let result = crate::state::query_cache::run_mutation(cache, mutation, || {
                crate::net::api::set_rag_config(&request)
            })
            .await;
            if result.is_ok() {
                settings.update(SettingsState::mark_rag_saved);
            }
            let message = result.as_ref().map(|r| r.status_msg.clone()).unwrap_or_default();
            ui.update(|u| u.report(&result, Some(if message.is_empty() { "Config saved" } else { &message })));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    });

    let on_save_theme = Callback::new(move |_| {
        let request = settings.with_untracked(theme_save_request);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::set_theme_config(&request).await;
            ui.update(|u| u.report(&result, Some("Theme saved")));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    });

    let on_getting_started = move |ev: leptos::ev::Event| {
        let enabled = event_target_checked(&ev);
        settings.update(|s| s.user_config.getting_started = enabled);
        let request = settings.with_untracked(|s| SetUserConfigRequest {
            user_config: s.user_config.clone(),
            credentials: s.credentials.clone(),
        });
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::set_user_config(&request).await;
            ui.update(|u| u.report(&result, None));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    // Suggestion admin list, refetched per page.
    let suggestion_key = Memo::new(move |_| settings.with(|s| (s.connected, s.suggestion_page)));
    Effect::new(move || {
        let (is_connected, page) = suggestion_key.get();
        if !is_connected {
            return;
        }
        let request = settings.with_untracked(suggestion_page_request);
        let key = keys::suggestion_page(page);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::state::query_cache::cached_query(cache, key, crate::state::query_cache::DEFAULT_STALE_MS, || {
                crate::net::api::get_all_suggestions(&request)
            })
            .await;
            match result {
                Ok(response) => settings.update(|s| s.apply_suggestion_page(response)),
                Err(err) => {
                    ui.update(|u| {
                        u.show_error(err);
                    });
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, key);
    });

    let on_delete_suggestion = Callback::new(move |uuid: String| {
        let request = DeleteSuggestionRequest { uuid, credentials: settings.with_untracked(|s| s.credentials.clone()) };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let mutation = Mutation::invalidating([keys::suggestions()]);
            let result = crate::state::query_cache::run_mutation(cache, mutation, || {
                crate::net::api::delete_suggestion(&request)
            })
            .await;
            if result.is_ok() {
                settings.update(|s| {
                    s.remove_suggestion(&request.uuid);
                });
            }
            ui.update(|u| u.report(&result, None));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    });

    let on_load_meta = Callback::new(move |_| {
        let credentials = settings.with_untracked(|s| s.credentials.clone());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::state::query_cache::cached_query(
                cache,
                keys::meta(),
                crate::state::query_cache::DEFAULT_STALE_MS,
                || crate::net::api::get_meta(&credentials),
            )
            .await;
            match result {
                Ok(meta) => settings.update(|s| s.meta = Some(meta)),
                Err(err) => {
                    ui.update(|u| {
                        u.show_error(err);
                    });
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = credentials;
    });

    let on_cancel_reset = Callback::new(move |()| settings.update(SettingsState::cancel_reset));
    let on_confirm_reset = Callback::new(move |()| {
        let Some(mode) = settings.try_update(SettingsState::confirm_reset).flatten() else {
            return;
        };
        let request = ResetRequest { reset_mode: mode, credentials: settings.with_untracked(|s| s.credentials.clone()) };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::reset(&request).await;
            if result.is_ok() {
                cache.update(ResponseCache::clear);
                if reset_clears_documents(mode) {
                    docs.set(DocumentsState::default());
                }
                if reset_reloads_config(mode) {
                    start_connect(settings, chat, cache, ui);
                }
            }
            ui.update(|u| u.report(&result, Some(&format!("Reset {}", mode.as_str()))));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    });

    view! {
        <div class="settings-page">
            <section class="settings-page__section">
                <h2>"Deployment"</h2>
                <select
                    class="settings-page__deployment"
                    on:change=move |ev| {
                        if let Some(deployment) = Deployment::parse(&event_target_value(&ev)) {
                            settings.update(|s| s.set_deployment(deployment));
                        }
                    }
                >
                    {Deployment::ALL
                        .into_iter()
                        .map(|d| {
                            view! {
                                <option
                                    value=d.as_str()
                                    selected=move || settings.with(|s| s.credentials.deployment == d)
                                >
                                    {d.as_str()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <TextInput value=url placeholder="Weaviate URL" input_type="url"/>
                <TextInput value=key placeholder="API key" input_type="password"/>
                <TextInput value=port placeholder="Port"/>
                <div class="settings-page__row">
                    <Button
                        variant="primary"
                        disabled=Signal::derive(move || settings.with(|s| s.connecting))
                        on_click=on_connect
                    >
                        {move || if settings.with(|s| s.connecting) { "Connecting..." } else { "Connect" }}
                    </Button>
                    <Button disabled=Signal::derive(move || !connected.get()) on_click=on_disconnect>
                        "Disconnect"
                    </Button>
                </div>
                <Show when=move || settings.with(|s| s.connect_error.is_some())>
                    <p class="settings-page__error">{move || settings.get().connect_error.unwrap_or_default()}</p>
                </Show>
                <Show when=move || demo.get()>
                    <p class="settings-page__hint">"Demo deployment: configuration changes are not saved."</p>
                </Show>
            </section>

            <Show when=move || connected.get()>
                <section class="settings-page__section">
                    <h2>"Pipeline"</h2>
                    <RagConfigEditor config=rag_config on_edit=on_edit read_only=demo/>
                    <Button
                        variant="primary"
                        disabled=Signal::derive(move || demo.get() || !settings.with(|s| s.rag_dirty))
                        on_click=on_save_rag
                    >
                        "Save config"
                    </Button>
                </section>

                <section class="settings-page__section">
                    <h2>"Theme"</h2>
                    <select on:change=move |ev| {
                        let name = event_target_value(&ev);
                        settings.update(|s| {
                            s.select_theme(&name);
                        });
                    }>
                        {move || {
                            let state = settings.get();
                            let current = state.theme_config.theme.theme_name.clone();
                            state
                                .theme_config
                                .themes
                                .into_keys()
                                .map(|name| {
                                    let selected = name == current;
                                    view! { <option value=name.clone() selected=selected>{name.clone()}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                    <label class="settings-page__check">
                        <input
                            type="checkbox"
                            prop:checked=move || settings.with(|s| s.user_config.getting_started)
                            on:change=on_getting_started
                        />
                        "Show getting started"
                    </label>
                    <Button disabled=demo on_click=on_save_theme>"Save theme"</Button>
                </section>

                <section class="settings-page__section">
                    <h2>"Suggestions"</h2>
                    <ul class="settings-page__suggestions">
                        {move || {
                            settings
                                .get()
                                .suggestions
                                .into_iter()
                                .map(|s| {
                                    let uuid = s.uuid.clone();
                                    view! {
                                        <li>
                                            <span>{s.query}</span>
                                            <span class="settings-page__timestamp">{s.timestamp}</span>
                                            <button
                                                class="btn btn--ghost btn--small"
                                                disabled=move || demo.get()
                                                on:click=move |_| on_delete_suggestion.run(uuid.clone())
                                            >
                                                "✕"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                    <div class="settings-page__row">
                        <Button
                            small=true
                            on_click=Callback::new(move |_| settings.update(|s| {
                                s.prev_suggestion_page();
                            }))
                        >
                            "Previous"
                        </Button>
                        <span>
                            {move || settings.with(|s| format!("{} / {}", s.suggestion_page, s.suggestion_page_count()))}
                        </span>
                        <Button
                            small=true
                            on_click=Callback::new(move |_| settings.update(|s| {
                                s.next_suggestion_page();
                            }))
                        >
                            "Next"
                        </Button>
                    </div>
                </section>

                <section class="settings-page__section">
                    <h2>"Cluster"</h2>
                    <Button on_click=on_load_meta>"Load cluster info"</Button>
                    {move || settings.get().meta.map(meta_view)}
                </section>

                <section class="settings-page__section">
                    <h2>"Reset"</h2>
                    <div class="settings-page__row">
                        {ResetMode::ALL_MODES
                            .into_iter()
                            .map(|mode| {
                                view! {
                                    <Button
                                        variant="danger"
                                        disabled=demo
                                        on_click=Callback::new(move |_| settings.update(|s| s.request_reset(mode)))
                                    >
                                        {format!("Reset {}", mode.as_str())}
                                    </Button>
                                }
                            })
                            .collect_view()}
                    </div>
                </section>
            </Show>

            {move || {
                settings
                    .with(|s| s.pending_reset)
                    .map(|mode| {
                        view! {
                            <ConfirmDialog
                                title=format!("Reset {}", mode.as_str())
                                message=reset_description(mode)
                                confirm_label="Reset"
                                on_confirm=on_confirm_reset
                                on_cancel=on_cancel_reset
                            />
                        }
                    })
            }}
        </div>
    }
}

fn meta_view(meta: MetaResponse) -> impl IntoView {
    let nodes = meta.node_payload;
    let collections = meta.collection_payload;
    view! {
        <div class="settings-page__meta">
            <p>{format!("Weaviate {} · {} nodes", nodes.weaviate_version, nodes.node_count)}</p>
            <ul>
                {nodes
                    .nodes
                    .into_iter()
                    .map(|n| view! { <li>{format!("{} ({}) · {} shards · {}", n.name, n.status, n.shards, n.version)}</li> })
                    .collect_view()}
            </ul>
            <p>{format!("{} collections", collections.collection_count)}</p>
            <ul>
                {collections
                    .collections
                    .into_iter()
                    .map(|c| view! { <li>{format!("{} · {} objects", c.name, c.count)}</li> })
                    .collect_view()}
            </ul>
        </div>
    }
}
