//! プログレスバーコンポーネント

use leptos::prelude::*;
use visual_search_common::ProgressView;

#[component]
pub fn ProgressBar(progress: Signal<ProgressView>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <p id="progress-stage-text" class="progress-text">
                {move || progress.with(|p| p.stage_text.clone())}
            </p>
            <div class="progress">
                <div
                    id="progress-bar"
                    role="progressbar"
                    class=move || progress.with(|p| p.tone.css_class())
                    style=move || progress.with(|p| p.width_style())
                    aria-valuenow=move || progress.with(|p| p.percent.to_string())
                    aria-valuemin="0"
                    aria-valuemax="100"
                >
                    {move || progress.with(|p| p.bar_text.clone())}
                </div>
            </div>
        </div>
    }
}
