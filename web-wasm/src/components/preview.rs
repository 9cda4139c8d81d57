//! 送信画像のプレビュー

use leptos::prelude::*;

#[component]
pub fn Preview(src: Signal<Option<String>>, visible: Signal<bool>) -> impl IntoView {
    view! {
        <div
            id="query-image-display"
            class="query-image"
            style:display=move || if visible.get() { "block" } else { "none" }
        >
            <h5>"Tu imagen"</h5>
            <img
                id="query-image-preview"
                class="img-fluid rounded"
                alt="Imagen consultada"
                src=move || src.get().unwrap_or_else(|| "#".to_string())
            />
        </div>
    }
}
