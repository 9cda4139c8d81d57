//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;
use visual_search_common::{
    ResultCard, SearchConfig, SearchController, SearchError, Settlement, SubmitOutcome,
};
use crate::animation::{run_completion, schedule_hide, Ticker};
use crate::api::search::upload_image;
use crate::components::{
    header::Header,
    upload_form::{read_preview, UploadForm},
    progress_bar::ProgressBar,
    log_console::LogConsole,
    preview::Preview,
    results_grid::ResultsGrid,
    error_banner::ErrorBanner,
    detail_modal::DetailModal,
};

/// コンソール行用の時刻（HH:MM:SS, 24時間表記）
fn browser_clock() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:02}:{:02}:{:02}",
        now.get_hours(),
        now.get_minutes(),
        now.get_seconds()
    )
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let controller = RwSignal::new(SearchController::new(SearchConfig::default(), browser_clock));
    let ticker = Ticker::new();
    let selected_file = StoredValue::new_local(None::<File>);
    let (detail, set_detail) = signal(None::<ResultCard>);

    let panels = Memo::new(move |_| controller.with(|c| c.panels()));
    let can_submit = Signal::derive(move || controller.with(|c| c.can_submit()));
    let is_submitting = Signal::derive(move || controller.with(|c| c.is_request_in_flight()));
    let progress = Signal::derive(move || controller.with(|c| c.progress().clone()));
    let console_lines = Signal::derive(move || controller.with(|c| c.console().to_vec()));
    let preview_src = Signal::derive(move || {
        controller.with(|c| c.selected_file().and_then(|f| f.preview.clone()))
    });
    let results = Signal::derive(move || controller.with(|c| c.results().cloned()));
    let error = Signal::derive(move || controller.with(|c| c.error().map(str::to_string)));

    // ファイル選択ハンドラ
    let on_file_change = {
        let ticker = ticker.clone();
        move |file: Option<File>| {
            ticker.cancel();
            set_detail.set(None);

            let Some(file) = file else {
                selected_file.set_value(None);
                controller.update(|c| c.reset());
                return;
            };

            let name = file.name();
            let Some(id) = controller.try_update(|c| c.select_file(Some(&name))).flatten() else {
                return;
            };
            selected_file.set_value(Some(file.clone()));
            read_preview(file, move |data_url| {
                controller.try_update(|c| c.preview_loaded(id, data_url));
            });
        }
    };

    // 検索ハンドラ
    let on_submit = move |_: ()| {
        gloo::console::log!("Evento submit del formulario detectado.");

        match controller.try_update(|c| c.begin_submit()) {
            Some(SubmitOutcome::Started(generation)) => {
                let (endpoint, interval_ms) = controller.with_untracked(|c| {
                    (c.config().endpoint.clone(), c.config().stage_interval_ms())
                });
                ticker.start(controller, generation, interval_ms);

                let file = selected_file.get_value();
                let ticker = ticker.clone();
                spawn_local(async move {
                    let outcome = match file {
                        Some(file) => upload_image(&endpoint, &file).await,
                        None => Err(SearchError::NoFileSelected),
                    };
                    ticker.cancel_generation(generation);

                    match &outcome {
                        Err(e) if e.reached_network() => {
                            gloo::console::error!(format!("Error en la subida o procesamiento: {}", e));
                        }
                        Err(_) => gloo::console::error!("No se seleccionó ningún archivo."),
                        Ok(hits) => gloo::console::log!(format!("{} resultado(s) recibidos.", hits.len())),
                    }

                    match controller.try_update(|c| c.finish_request(generation, outcome)) {
                        Some(Settlement::Succeeded(done)) => run_completion(controller, done).await,
                        Some(Settlement::Failed(hide)) => schedule_hide(controller, hide),
                        _ => {}
                    }
                });
            }
            Some(SubmitOutcome::Rejected(hide)) => {
                gloo::console::error!("No se seleccionó ningún archivo.");
                schedule_hide(controller, hide);
            }
            _ => {}
        }
    };

    view! {
        <div class="container">
            <Header />

            <UploadForm
                can_submit=can_submit
                is_submitting=is_submitting
                on_file_change=on_file_change
                on_submit=on_submit
            />

            <div
                id="processing-output-area"
                style:display=move || if panels.get().output { "block" } else { "none" }
            >
                <div
                    id="loading-progress-area"
                    style:display=move || if panels.get().progress { "block" } else { "none" }
                >
                    <ProgressBar progress=progress />
                </div>

                <LogConsole
                    lines=console_lines
                    visible=Signal::derive(move || panels.get().console)
                />

                <div id="results-area" class="results-area">
                    <Preview
                        src=preview_src
                        visible=Signal::derive(move || panels.get().preview)
                    />
                    <ResultsGrid
                        results=results
                        visible=Signal::derive(move || panels.get().results)
                        on_select=move |card| set_detail.set(Some(card))
                    />
                </div>

                <ErrorBanner
                    message=error
                    visible=Signal::derive(move || panels.get().error)
                />
            </div>

            <DetailModal card=detail on_close=move |_| set_detail.set(None) />
        </div>
    }
}
