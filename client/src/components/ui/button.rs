#[cfg(test)]
#[path = "button_test.rs"]
mod button_test;

use leptos::prelude::*;

/// Button with a visual variant (`primary`, `secondary`, `danger`, `ghost`).
#[component]
pub fn Button(
    #[prop(optional, into)] variant: MaybeProp<String>,
    /// Renders the compact size.
    #[prop(optional, into)]
    small: MaybeProp<bool>,
    #[prop(optional, into)] class: MaybeProp<String>,
    #[prop(optional, into)] title: MaybeProp<String>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
    #[prop(optional)] on_click: Option<Callback<leptos::ev::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let variant_class = move || variant_class(variant.get().as_deref());
    let size_class = move || if small.get().unwrap_or(false) { "btn--small" } else { "" };
    let extra = move || class.get().unwrap_or_default();

    view! {
        <button
            type="button"
            class=move || format!("btn {} {} {}", variant_class(), size_class(), extra())
            title=move || title.get().unwrap_or_default()
            disabled=move || disabled.get().unwrap_or(false)
            on:click=move |ev| {
                if let Some(handler) = on_click {
                    handler.run(ev);
                }
            }
        >
            {children()}
        </button>
    }
}

fn variant_class(variant: Option<&str>) -> &'static str {
    match variant.unwrap_or("secondary") {
        "primary" => "btn--primary",
        "danger" => "btn--danger",
        "ghost" => "btn--ghost",
        _ => "btn--secondary",
    }
}
