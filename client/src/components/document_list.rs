//! Document explorer list: search box, label filter chips, pager.

#[cfg(test)]
#[path = "document_list_test.rs"]
mod document_list_test;

use leptos::prelude::*;

use crate::components::ui::input::TextInput;
use crate::state::documents::DocumentsState;

/// "Page 2 of 5 (230 documents)".
pub fn pager_label(state: &DocumentsState) -> String {
    format!("Page {} of {} ({} documents)", state.page, state.page_count(), state.total)
}

/// Document list. Every user action is routed through a callback so the page
/// decides what to refetch.
#[component]
pub fn DocumentList(
    on_search: Callback<String>,
    on_toggle_label: Callback<String>,
    on_select: Callback<String>,
    on_delete: Callback<String>,
    /// `true` for next, `false` for previous.
    on_page: Callback<bool>,
    #[prop(into)] read_only: Signal<bool>,
) -> impl IntoView {
    let docs = expect_context::<RwSignal<DocumentsState>>();
    let search = RwSignal::new(docs.get_untracked().query);

    view! {
        <div class="document-list">
            <div class="document-list__search">
                <TextInput
                    value=search
                    placeholder="Search documents..."
                    on_enter=Callback::new(move |()| on_search.run(search.get_untracked()))
                />
                <button class="btn btn--primary" on:click=move |_| on_search.run(search.get_untracked())>
                    "Search"
                </button>
            </div>

            <div class="document-list__labels">
                {move || {
                    let state = docs.get();
                    state
                        .labels
                        .iter()
                        .map(|label| {
                            let active = state.label_filter.contains(label);
                            let name = label.clone();
                            view! {
                                <button
                                    class="chip"
                                    class:chip--active=active
                                    on:click=move |_| on_toggle_label.run(name.clone())
                                >
                                    {label.clone()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>

            <Show when=move || docs.with(|d| d.error.is_some())>
                <p class="document-list__error">{move || docs.get().error.unwrap_or_default()}</p>
            </Show>

            <ul class="document-list__items">
                {move || {
                    let state = docs.get();
                    if state.documents.is_empty() {
                        return view! { <li class="document-list__empty">"No documents"</li> }.into_any();
                    }
                    state
                        .documents
                        .into_iter()
                        .map(|doc| {
                            let selected = state.selected.as_deref() == Some(doc.uuid.as_str());
                            let open_id = doc.uuid.clone();
                            let delete_id = doc.uuid.clone();
                            view! {
                                <li class="document-list__item" class:document-list__item--selected=selected>
                                    <span
                                        class="document-list__title"
                                        on:click=move |_| on_select.run(open_id.clone())
                                    >
                                        {doc.title}
                                    </span>
                                    <span class="document-list__item-labels">{doc.labels.join(", ")}</span>
                                    <button
                                        class="btn btn--ghost btn--small"
                                        title="Delete document"
                                        disabled=move || read_only.get()
                                        on:click=move |_| on_delete.run(delete_id.clone())
                                    >
                                        "✕"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </ul>

            <div class="document-list__pager">
                <button
                    class="btn btn--small"
                    disabled=move || docs.with(|d| d.page <= 1)
                    on:click=move |_| on_page.run(false)
                >
                    "Previous"
                </button>
                <span>{move || pager_label(&docs.get())}</span>
                <button
                    class="btn btn--small"
                    disabled=move || docs.with(|d| d.page >= d.page_count())
                    on:click=move |_| on_page.run(true)
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}
