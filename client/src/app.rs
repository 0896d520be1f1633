//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::pages::{
    chat::ChatPage,
    documents::DocumentsPage,
    import::ImportPage,
    settings::{SettingsPage, bootstrap},
};
use crate::state::{
    chat::ChatState, documents::DocumentsState, ingest::IngestState, query_cache::ResponseCache,
    settings::SettingsState, ui::UiState,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let settings = RwSignal::new(SettingsState::default());
    let chat = RwSignal::new(ChatState::default());
    let ingest = RwSignal::new(IngestState::default());
    let docs = RwSignal::new(DocumentsState::default());
    let ui = RwSignal::new(UiState::default());
    let cache = RwSignal::new(ResponseCache::new());

    provide_context(settings);
    provide_context(chat);
    provide_context(ingest);
    provide_context(docs);
    provide_context(ui);
    provide_context(cache);

    // Client-only startup: theme preference, health check, auto-connect.
    Effect::new(move |prev: Option<()>| {
        if prev.is_some() {
            return;
        }
        let dark = crate::util::dark_mode::read_preference();
        crate::util::dark_mode::apply(dark);
        ui.update(|u| u.dark_mode = dark);
        bootstrap(settings, chat, cache, ui);
    });

    view! {
        <Title text="Verba"/>

        <Router>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=ChatPage/>
                    <Route path=StaticSegment("documents") view=DocumentsPage/>
                    <Route path=StaticSegment("import") view=ImportPage/>
                    <Route path=StaticSegment("settings") view=SettingsPage/>
                </Routes>
            </main>
        </Router>
    }
}
