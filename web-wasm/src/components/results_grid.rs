//! 類似アイテムのグリッド

use leptos::prelude::*;
use visual_search_common::{ResultCard, ResultsView, EMPTY_RESULTS_MESSAGE};

#[component]
pub fn ResultsGrid<F>(
    results: Signal<Option<ResultsView>>,
    visible: Signal<bool>,
    on_select: F,
) -> impl IntoView
where
    F: Fn(ResultCard) + 'static + Clone + Send + Sync,
{
    view! {
        <div
            id="similar-products-display"
            class="similar-products"
            style:display=move || if visible.get() { "block" } else { "none" }
        >
            <h5>"Productos similares"</h5>
            <div id="similar-products" class="row row-cols-2 row-cols-md-3 row-cols-lg-5 g-3">
                {move || match results.get() {
                    Some(ResultsView::Cards(cards)) => cards
                        .into_iter()
                        .map(|card| {
                            let on_select = on_select.clone();
                            view! { <ResultCardView card=card on_select=on_select /> }
                        })
                        .collect_view()
                        .into_any(),
                    Some(ResultsView::Empty) => view! {
                        <div class="col-12">
                            <p class="text-center text-muted mt-3 no-results">{EMPTY_RESULTS_MESSAGE}</p>
                        </div>
                    }
                    .into_any(),
                    None => ().into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn ResultCardView<F>(card: ResultCard, on_select: F) -> impl IntoView
where
    F: Fn(ResultCard) + 'static + Clone + Send + Sync,
{
    let alt = card.alt_text();
    let selected = card.clone();

    view! {
        <div class="col">
            <div
                class="card h-100 result-item shadow-sm"
                style="cursor: pointer;"
                data-image-path=card.image_url.clone()
                data-image-name=card.name.clone()
                data-similarity=card.similarity_label.clone()
                on:click=move |_| on_select(selected.clone())
            >
                <img src=card.image_url.clone() class="card-img-top" alt=alt />
                <div class="card-body">
                    <p class="card-text small text-muted mb-0">
                        "Similitud: "
                        <strong class="fs-6">{card.similarity_label.clone()}</strong>
                    </p>
                </div>
            </div>
        </div>
    }
}
