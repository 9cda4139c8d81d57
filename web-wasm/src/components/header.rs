//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Búsqueda Visual de Productos"</h1>
            <p class="text-muted">"Sube una foto y encuentra artículos similares en el catálogo"</p>
        </header>
    }
}
