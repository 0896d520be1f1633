//! Modal dialog with an overlay, used for destructive confirmations.

use leptos::prelude::*;

/// Overlay dialog. Clicking the backdrop or pressing Escape cancels.
#[component]
pub fn Dialog(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    /// Footer actions rendered next to the close button.
    #[prop(optional)]
    actions: Option<ChildrenFn>,
    children: Children,
) -> impl IntoView {
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    view! {
        <div class="dialog__backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog"
                role="dialog"
                tabindex="0"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
            >
                <div class="dialog__header">
                    <h2 class="dialog__title">{title}</h2>
                    <button class="dialog__close" on:click=move |_| on_close.run(()) title="Close">
                        "✕"
                    </button>
                </div>
                <div class="dialog__body">{children()}</div>
                <div class="dialog__actions">{move || actions.as_ref().map(|a| a())}</div>
            </div>
        </div>
    }
}

/// Yes/no confirmation built on [`Dialog`].
#[component]
pub fn ConfirmDialog(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(into, default = "Confirm".to_owned())] confirm_label: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let actions: ChildrenFn = std::sync::Arc::new(move || {
        let label = confirm_label.clone();
        view! {
            <button class="btn btn--secondary" on:click=move |_| on_cancel.run(())>
                "Cancel"
            </button>
            <button class="btn btn--danger" on:click=move |_| on_confirm.run(())>
                {label}
            </button>
        }
        .into_any()
    });

    view! {
        <Dialog title=title on_close=on_cancel actions=actions>
            <p class="dialog__message">{message}</p>
        </Dialog>
    }
}
