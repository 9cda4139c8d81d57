//! 画像選択フォーム

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement, SubmitEvent};

#[component]
pub fn UploadForm<FC, FS>(
    can_submit: Signal<bool>,
    is_submitting: Signal<bool>,
    on_file_change: FC,
    on_submit: FS,
) -> impl IntoView
where
    FC: Fn(Option<File>) + 'static + Clone,
    FS: Fn(()) + 'static + Clone,
{
    view! {
        <form
            id="upload-form"
            class="upload-form"
            on:submit={
                let on_submit = on_submit.clone();
                move |ev: SubmitEvent| {
                    // ブラウザ標準の送信はしない
                    ev.prevent_default();
                    on_submit(())
                }
            }
        >
            <div class="form-group">
                <label for="file-upload">"Selecciona una imagen"</label>
                <input
                    type="file"
                    id="file-upload"
                    name="file"
                    accept="image/png, image/jpeg"
                    on:change={
                        let on_file_change = on_file_change.clone();
                        move |ev| {
                            let input: HtmlInputElement = event_target(&ev);
                            let file = input.files().and_then(|files| files.get(0));
                            on_file_change(file)
                        }
                    }
                />
            </div>
            <button
                type="submit"
                id="submit-button"
                class="btn btn-primary"
                disabled=move || !can_submit.get()
            >
                {move || if is_submitting.get() { "Buscando..." } else { "Buscar similares" }}
            </button>
        </form>
    }
}

/// 画像をData URLとして読み込む
pub fn read_preview<F>(file: File, on_loaded: F)
where
    F: Fn(String) + 'static,
{
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            gloo::console::error!("FileReader no disponible:", e);
            return;
        }
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Ok(result) = reader_clone.result() {
            if let Some(data_url) = result.as_string() {
                on_loaded(data_url);
            }
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        gloo::console::error!("No se pudo leer la imagen:", e);
    }
}
