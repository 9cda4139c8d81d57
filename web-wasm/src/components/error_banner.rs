//! エラーバナー

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(message: Signal<Option<String>>, visible: Signal<bool>) -> impl IntoView {
    view! {
        <div
            id="error-message"
            class="alert alert-danger"
            role="alert"
            style:display=move || if visible.get() { "block" } else { "none" }
        >
            {move || message.get().unwrap_or_default()}
        </div>
    }
}
