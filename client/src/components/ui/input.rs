use leptos::prelude::*;

/// Single-line text input bound to a signal.
///
/// `on_enter` fires on Enter without Shift.
#[component]
pub fn TextInput(
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional, into)] class: MaybeProp<String>,
    /// `text` unless given (e.g. `password`, `url`).
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
    #[prop(optional)] on_enter: Option<Callback<()>>,
    #[prop(optional)] on_change: Option<Callback<String>>,
) -> impl IntoView {
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            if let Some(handler) = on_enter {
                ev.prevent_default();
                handler.run(());
            }
        }
    };

    view! {
        <input
            class=move || format!("text-input {}", class.get().unwrap_or_default())
            type=move || input_type.get().unwrap_or_else(|| "text".to_owned())
            placeholder=move || placeholder.get().unwrap_or_default()
            disabled=move || disabled.get().unwrap_or(false)
            prop:value=move || value.get()
            on:input=move |ev| {
                let text = event_target_value(&ev);
                value.set(text.clone());
                if let Some(handler) = on_change {
                    handler.run(text);
                }
            }
            on:keydown=on_keydown
        />
    }
}
