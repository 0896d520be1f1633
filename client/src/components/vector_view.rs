//! SVG scatter of chunk embeddings for one document (or all documents).
//!
//! DESIGN
//! ======
//! Points come from `util::scatter::project`; x/y are the first two reduced
//! components and the third maps to radius. Hovering a point shows its chunk
//! id in the native SVG tooltip.

#[cfg(test)]
#[path = "vector_view_test.rs"]
mod vector_view_test;

use frames::api::VectorGroups;
use leptos::prelude::*;

use crate::util::scatter::{group_color, project};

const CANVAS_SIZE: f64 = 360.0;
const CANVAS_PADDING: f64 = 16.0;

/// Legend rows: group name with its point color.
pub fn legend(groups: &VectorGroups) -> Vec<(String, &'static str)> {
    groups.groups.iter().enumerate().map(|(i, g)| (g.name.clone(), group_color(i))).collect()
}

#[component]
pub fn VectorView(
    #[prop(into)] groups: Signal<Option<VectorGroups>>,
    #[prop(into)] show_all: Signal<bool>,
    on_toggle_all: Callback<()>,
) -> impl IntoView {
    let view_box = format!("0 0 {CANVAS_SIZE} {CANVAS_SIZE}");

    view! {
        <div class="vector-view">
            <div class="vector-view__header">
                <span class="vector-view__embedder">
                    {move || {
                        groups
                            .get()
                            .map(|g| format!("{} ({}d)", g.embedder, g.dimensions))
                            .unwrap_or_default()
                    }}
                </span>
                <label class="vector-view__toggle">
                    <input type="checkbox" prop:checked=move || show_all.get() on:change=move |_| on_toggle_all.run(()) />
                    "Show all documents"
                </label>
            </div>
            {move || match groups.get() {
                None => view! { <p class="vector-view__empty">"Loading vectors..."</p> }.into_any(),
                Some(groups) if groups.groups.iter().all(|g| g.chunks.is_empty()) => {
                    view! { <p class="vector-view__empty">"No vectors stored for this document"</p> }.into_any()
                }
                Some(groups) => {
                    let points = project(&groups, CANVAS_SIZE, CANVAS_PADDING);
                    let legend = legend(&groups);
                    view! {
                        <svg class="vector-view__canvas" viewBox=view_box.clone()>
                            {points
                                .into_iter()
                                .map(|p| {
                                    view! {
                                        <circle cx=p.x cy=p.y r=p.radius fill=p.color>
                                            <title>{format!("chunk {}", p.chunk_id)}</title>
                                        </circle>
                                    }
                                })
                                .collect_view()}
                        </svg>
                        <ul class="vector-view__legend">
                            {legend
                                .into_iter()
                                .map(|(name, color)| {
                                    view! {
                                        <li>
                                            <span class="vector-view__swatch" style=format!("background:{color}")></span>
                                            {name}
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
