//! Detail panes for the selected document: content pages, chunk list and
//! the vector scatter.

#[cfg(test)]
#[path = "document_detail_test.rs"]
mod document_detail_test;

use leptos::prelude::*;

use crate::components::vector_view::VectorView;
use crate::state::documents::{DocumentTab, DocumentsState};
use crate::util::format;
use crate::util::markdown::render_markdown_html;

pub const TABS: [(DocumentTab, &str); 3] =
    [(DocumentTab::Content, "Content"), (DocumentTab::Chunks, "Chunks"), (DocumentTab::Vectors, "Vectors")];

/// Content snippets of kind `extract` are highlighted retrieval hits.
pub fn is_extract(kind: &str) -> bool {
    kind.eq_ignore_ascii_case("extract")
}

/// Pager moves for the detail panes. `true` advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailPage {
    Content(bool),
    Chunks(bool),
}

#[component]
pub fn DocumentDetail(
    on_tab: Callback<DocumentTab>,
    on_page: Callback<DetailPage>,
    on_toggle_all_vectors: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let docs = expect_context::<RwSignal<DocumentsState>>();

    let vectors = Signal::derive(move || docs.with(|d| d.vectors.clone()));
    let show_all = Signal::derive(move || docs.with(|d| d.show_all_vectors));

    view! {
        <div class="document-detail">
            <div class="document-detail__header">
                {move || {
                    docs.get()
                        .detail
                        .map(|doc| {
                            view! {
                                <h2 class="document-detail__title">{doc.title}</h2>
                                <span class="document-detail__meta">
                                    {format!("{} · {}", doc.extension, format::file_size(doc.file_size))}
                                </span>
                                {(!doc.source.is_empty())
                                    .then(|| view! { <a class="document-detail__source" href=doc.source.clone() target="_blank">{doc.source.clone()}</a> })}
                            }
                        })
                }}
                <button class="btn btn--ghost" title="Close" on:click=move |_| on_close.run(())>"✕"</button>
            </div>

            <div class="document-detail__tabs">
                {TABS
                    .into_iter()
                    .map(|(tab, label)| {
                        view! {
                            <button
                                class="tab"
                                class:tab--active=move || docs.with(|d| d.tab == tab)
                                on:click=move |_| on_tab.run(tab)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            {move || match docs.with(|d| d.tab) {
                DocumentTab::Content => view! {
                    <div class="document-detail__content">
                        {move || {
                            docs.get()
                                .content
                                .into_iter()
                                .map(|snippet| {
                                    let extract = is_extract(&snippet.kind);
                                    view! {
                                        <div class="document-detail__snippet" class:document-detail__snippet--extract=extract>
                                            {extract.then(|| view! { <span class="chip">{format!("chunk {} · {}", snippet.chunk_id, format::score(snippet.score))}</span> })}
                                            <div inner_html=render_markdown_html(&snippet.content)></div>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                        <div class="document-detail__pager">
                            <button class="btn btn--small" disabled=move || docs.with(|d| d.content_page <= 1) on:click=move |_| on_page.run(DetailPage::Content(false))>
                                "Previous"
                            </button>
                            <span>{move || docs.with(|d| format!("{} / {}", d.content_page, d.max_content_page))}</span>
                            <button class="btn btn--small" disabled=move || docs.with(|d| d.content_page >= d.max_content_page) on:click=move |_| on_page.run(DetailPage::Content(true))>
                                "Next"
                            </button>
                        </div>
                    </div>
                }
                .into_any(),
                DocumentTab::Chunks => view! {
                    <div class="document-detail__chunks">
                        {move || {
                            docs.get()
                                .chunks
                                .into_iter()
                                .map(|chunk| {
                                    view! {
                                        <div class="document-detail__chunk">
                                            <span class="chip">{format!("chunk {}", chunk.chunk_id)}</span>
                                            <p>{chunk.content}</p>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                        <div class="document-detail__pager">
                            <button class="btn btn--small" disabled=move || docs.with(|d| d.chunk_page <= 1) on:click=move |_| on_page.run(DetailPage::Chunks(false))>
                                "Previous"
                            </button>
                            <span>{move || docs.with(|d| format!("page {}", d.chunk_page))}</span>
                            <button
                                class="btn btn--small"
                                disabled=move || docs.with(|d| d.chunks.len() < crate::state::documents::CHUNK_PAGE_SIZE as usize)
                                on:click=move |_| on_page.run(DetailPage::Chunks(true))
                            >
                                "Next"
                            </button>
                        </div>
                    </div>
                }
                .into_any(),
                DocumentTab::Vectors => view! {
                    <VectorView groups=vectors show_all=show_all on_toggle_all=on_toggle_all_vectors/>
                }
                .into_any(),
            }}
        </div>
    }
}
