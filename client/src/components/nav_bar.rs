//! Top navigation bar with route links, connection indicator and toast.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered once by `App` above the routed page. Reads the settings state for
//! backend connectivity, the chat socket status for the live indicator and
//! `UiState` for the dark mode toggle and the status toast.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::chat::ChatState;
use crate::state::connection::ConnectionStatus;
use crate::state::settings::SettingsState;
use crate::state::ui::{ToastKind, UiState};

/// Route links in display order.
pub const NAV_LINKS: &[(&str, &str)] = &[("/", "Chat"), ("/documents", "Documents"), ("/import", "Import"), ("/settings", "Settings")];

/// How long a toast stays up before it dismisses itself.
pub const TOAST_MS: u32 = 4000;

/// Indicator modifier class for a socket status.
pub fn connection_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Open => "nav-bar__dot--online",
        ConnectionStatus::Connecting => "nav-bar__dot--connecting",
        ConnectionStatus::Closed => "nav-bar__dot--closed",
        ConnectionStatus::Error => "nav-bar__dot--offline",
    }
}

/// Header text describing the backend connection.
pub fn backend_label(settings: &SettingsState) -> String {
    if settings.connecting {
        return "Connecting...".to_owned();
    }
    if !settings.connected {
        return "Not connected".to_owned();
    }
    let mut label = settings.credentials.deployment.as_str().to_owned();
    if settings.is_demo() {
        label.push_str(" (demo)");
    }
    label
}

#[component]
pub fn NavBar() -> impl IntoView {
    let settings = expect_context::<RwSignal<SettingsState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let title = move || {
        let theme = settings.get().theme_config.theme;
        if theme.title.text.is_empty() { "Verba".to_owned() } else { theme.title.text }
    };
    let socket_status = move || chat.get().connection;

    view! {
        <nav class="nav-bar">
            <span class="nav-bar__title">{title}</span>
            <div class="nav-bar__links">
                {NAV_LINKS
                    .iter()
                    .map(|(href, label)| {
                        view! {
                            <A href=*href attr:class="nav-bar__link">
                                {*label}
                            </A>
                        }
                    })
                    .collect_view()}
            </div>
            <span class="nav-bar__spacer"></span>
            <span class="nav-bar__backend">{move || backend_label(&settings.get())}</span>
            <span
                class=move || format!("nav-bar__dot {}", connection_class(socket_status()))
                title=move || socket_status().label()
            ></span>
            <button
                class="btn btn--ghost nav-bar__dark-toggle"
                title="Toggle dark mode"
                on:click=move |_| {
                    let next = crate::util::dark_mode::toggle(ui.get_untracked().dark_mode);
                    ui.update(|u| u.dark_mode = next);
                }
            >
                {move || if ui.get().dark_mode { "☀" } else { "☾" }}
            </button>
        </nav>
        <StatusToast/>
    }
}

/// Transient one-line status, dismissed after [`TOAST_MS`] or on click.
#[component]
fn StatusToast() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    Effect::new(move || {
        let Some(seq) = ui.with(|u| u.toast.as_ref().map(|t| t.seq)) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(TOAST_MS).await;
                ui.try_update(|u| u.dismiss(seq));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = seq;
        }
    });

    move || {
        ui.get().toast.map(|toast| {
            let seq = toast.seq;
            view! {
                <div
                    class="toast"
                    class:toast--error=toast.kind == ToastKind::Error
                    on:click=move |_| {
                        ui.update(|u| {
                            u.dismiss(seq);
                        });
                    }
                >
                    {toast.message}
                </div>
            }
        })
    }
}
