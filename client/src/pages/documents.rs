//! Document explorer page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists stored documents with search, label filter and paging, and shows the
//! selected document's content, chunks and vector scatter. List and detail
//! reads go through the query cache; deleting a document invalidates every
//! cached document and label query so the next read refetches.

#[cfg(test)]
#[path = "documents_test.rs"]
mod documents_test;

use frames::Credentials;
use frames::api::{ChunksRequest, ContentRequest, DocumentRequest, SearchDocumentsRequest, VectorsRequest};
use leptos::prelude::*;

use crate::components::document_detail::{DetailPage, DocumentDetail};
use crate::components::document_list::DocumentList;
use crate::components::ui::dialog::ConfirmDialog;
use crate::state::documents::{CHUNK_PAGE_SIZE, DocumentTab, DocumentsState};
use crate::state::query_cache::{Mutation, ResponseCache, keys};
use crate::state::settings::SettingsState;
use crate::state::ui::UiState;

/// List request for the current search, filter and page.
pub fn list_request(docs: &DocumentsState, credentials: &Credentials) -> SearchDocumentsRequest {
    SearchDocumentsRequest {
        query: docs.query.clone(),
        labels: docs.label_filter.clone(),
        page: docs.page,
        page_size: docs.page_size,
        credentials: credentials.clone(),
    }
}

/// Which detail request the current tab needs.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailFetch {
    Content(ContentRequest),
    Chunks(ChunksRequest),
    Vectors(VectorsRequest),
}

/// Request for the active detail tab of the selected document.
pub fn detail_request(docs: &DocumentsState, credentials: &Credentials) -> Option<DetailFetch> {
    let uuid = docs.selected.clone()?;
    let credentials = credentials.clone();
    Some(match docs.tab {
        DocumentTab::Content => DetailFetch::Content(ContentRequest {
            uuid,
            page: docs.content_page,
            chunk_scores: Vec::new(),
            credentials,
        }),
        DocumentTab::Chunks => DetailFetch::Chunks(ChunksRequest {
            uuid,
            page: docs.chunk_page,
            page_size: CHUNK_PAGE_SIZE,
            credentials,
        }),
        DocumentTab::Vectors => DetailFetch::Vectors(VectorsRequest { uuid, show_all: docs.show_all_vectors, credentials }),
    })
}

/// Mutation descriptor for deleting a document.
pub fn delete_mutation() -> Mutation {
    Mutation::invalidating([keys::documents(), keys::labels()])
}

#[component]
pub fn DocumentsPage() -> impl IntoView {
    let docs = expect_context::<RwSignal<DocumentsState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let cache = expect_context::<RwSignal<ResponseCache>>();

    let connected = Memo::new(move |_| settings.with(|s| s.connected));
    let read_only = Signal::derive(move || settings.with(SettingsState::is_demo));

    // Refetch the list whenever search, filter or page change.
    let list_key = Memo::new(move |_| docs.with(|d| (d.query.clone(), d.label_filter.clone(), d.page)));
    Effect::new(move || {
        let (query, labels, page) = list_key.get();
        if !connected.get() {
            return;
        }
        let request = untrack(|| list_request(&docs.get(), &settings.get().credentials));
        let key = keys::document_page(&query, &labels, page);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::state::query_cache::cached_query(cache, key, crate::state::query_cache::DEFAULT_STALE_MS, || {
                crate::net::api::get_all_documents(&request)
            })
            .await;
            match result {
                Ok(response) => docs.update(|d| d.apply_list(response)),
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

    // Load document metadata when the selection changes.
    let selected = Memo::new(move |_| docs.with(|d| d.selected.clone()));
    Effect::new(move || {
        let Some(uuid) = selected.get() else {
            return;
        };
        let request = DocumentRequest { uuid: uuid.clone(), credentials: settings.with_untracked(|s| s.credentials.clone()) };
        let key = keys::document(&uuid);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = crate::state::query_cache::cached_query(cache, key, crate::state::query_cache::DEFAULT_STALE_MS, || {
                crate::net::api::get_document(&request)
            })
            .await;
            match result {
                Ok(response) => docs.update(|d| d.apply_document(response)),
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

    // Load the active detail tab.
    let detail_key =
        Memo::new(move |_| docs.with(|d| (d.selected.clone(), d.tab, d.content_page, d.chunk_page, d.show_all_vectors)));
    Effect::new(move || {
        let _ = detail_key.get();
        let Some(fetch) = untrack(|| detail_request(&docs.get(), &settings.get().credentials)) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match fetch {
                DetailFetch::Content(request) => {
                    crate::net::api::get_content(&request).await.map(|r| docs.update(|d| d.apply_content(r)))
                }
                DetailFetch::Chunks(request) => {
                    crate::net::api::get_chunks(&request).await.map(|r| docs.update(|d| d.apply_chunks(r)))
                }
                DetailFetch::Vectors(request) => {
                    crate::net::api::get_vectors(&request).await.map(|r| docs.update(|d| d.apply_vectors(r)))
                }
            };
            if let Err(err) = result {
                ui.update(|u| {
                    u.show_error(err);
                });
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = fetch;
    });

    let on_search = Callback::new(move |query: String| docs.update(|d| d.set_query(&query)));
    let on_toggle_label = Callback::new(move |label: String| docs.update(|d| d.toggle_label(&label)));
    let on_select = Callback::new(move |uuid: String| {
        docs.update(|d| {
            d.select(&uuid);
        });
    });
    let on_delete = Callback::new(move |uuid: String| docs.update(|d| d.request_delete(&uuid)));
    let on_page = Callback::new(move |forward: bool| {
        docs.update(|d| {
            if forward { d.next_page() } else { d.prev_page() };
        });
    });
    let on_tab = Callback::new(move |tab: DocumentTab| docs.update(|d| d.tab = tab));
    let on_detail_page = Callback::new(move |page: DetailPage| {
        docs.update(|d| {
            match page {
                DetailPage::Content(true) => d.next_content_page(),
                DetailPage::Content(false) => d.prev_content_page(),
                DetailPage::Chunks(true) => d.next_chunk_page(),
                DetailPage::Chunks(false) => d.prev_chunk_page(),
            };
        });
    });
    let on_toggle_all_vectors = Callback::new(move |()| {
        docs.update(|d| {
            d.show_all_vectors = !d.show_all_vectors;
            d.vectors = None;
        });
    });
    let on_close = Callback::new(move |()| docs.update(DocumentsState::close_detail));

    let on_cancel_delete = Callback::new(move |()| docs.update(DocumentsState::cancel_delete));
    let on_confirm_delete = Callback::new(move |()| {
        let Some(uuid) = docs.try_update(DocumentsState::confirm_delete).flatten() else {
            return;
        };
        let request = DocumentRequest { uuid, credentials: settings.with_untracked(|s| s.credentials.clone()) };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result =
                crate::state::query_cache::run_mutation(cache, delete_mutation(), || crate::net::api::delete_document(&request))
                    .await;
            if result.is_ok() {
                docs.update(|d| d.apply_deleted(&request.uuid));
            }
            ui.update(|u| u.report(&result, Some("Document deleted")));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    });

    view! {
        <div class="documents-page">
            <Show
                when=move || connected.get()
                fallback=|| view! { <p class="documents-page__hint">"Connect to a deployment on the Settings page first."</p> }
            >
                <DocumentList
                    on_search=on_search
                    on_toggle_label=on_toggle_label
                    on_select=on_select
                    on_delete=on_delete
                    on_page=on_page
                    read_only=read_only
                />
                <Show when=move || docs.with(|d| d.selected.is_some())>
                    <DocumentDetail
                        on_tab=on_tab
                        on_page=on_detail_page
                        on_toggle_all_vectors=on_toggle_all_vectors
                        on_close=on_close
                    />
                </Show>
            </Show>
            {move || {
                docs.with(|d| d.pending_delete.clone())
                    .map(|uuid| {
                        let title = docs.with(|d| {
                            d.documents.iter().find(|doc| doc.uuid == uuid).map(|doc| doc.title.clone()).unwrap_or(uuid)
                        });
                        view! {
                            <ConfirmDialog
                                title="Delete document"
                                message=format!("Delete \"{title}\" and all of its chunks?")
                                confirm_label="Delete"
                                on_confirm=on_confirm_delete
                                on_cancel=on_cancel_delete
                            />
                        }
                    })
            }}
        </div>
    }
}
