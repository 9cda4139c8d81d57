//! 結果カードの詳細モーダル

use leptos::prelude::*;
use visual_search_common::ResultCard;

#[component]
pub fn DetailModal<F>(card: ReadSignal<Option<ResultCard>>, on_close: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    let field = move |get: fn(&ResultCard) -> String| {
        move || card.with(|c| c.as_ref().map(get).unwrap_or_default())
    };

    view! {
        <Show when=move || card.with(Option::is_some)>
            <div
                id="productDetailModal"
                class="modal-overlay"
                on:click={
                    let on_close = on_close.clone();
                    move |_| on_close(())
                }
            >
                <div class="modal-panel" on:click=|ev| ev.stop_propagation()>
                    <button
                        class="btn-close"
                        aria-label="Cerrar"
                        on:click={
                            let on_close = on_close.clone();
                            move |_| on_close(())
                        }
                    />
                    <img
                        id="modal-product-image"
                        class="img-fluid"
                        src=field(|c| c.image_url.clone())
                        alt=field(|c| c.alt_text())
                    />
                    <h5 id="modal-product-name">{field(|c| c.name.clone())}</h5>
                    <p>
                        "Similitud: "
                        <span id="modal-product-similarity">{field(|c| c.similarity_label.clone())}</span>
                    </p>
                </div>
            </div>
        </Show>
    }
}
