//! 画像検索エンドポイントへの送信
//!
//! 選択された画像を multipart/form-data（フィールド名 `file`）で1回だけPOSTする。
//! ステータスとボディの解釈は共通ライブラリに任せる。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};
use visual_search_common::{interpret_response, SearchError, SearchHit, FILE_FIELD};

/// JS側の例外をネットワークエラーに変換
fn js_error(value: JsValue) -> SearchError {
    let detail = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    SearchError::Network(detail)
}

/// 画像を送信して類似アイテムを受け取る
///
/// # Arguments
/// * `endpoint` - 送信先（通常は "/upload"）
/// * `file` - ファイル入力で選ばれた画像
pub async fn upload_image(endpoint: &str, file: &File) -> Result<Vec<SearchHit>, SearchError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(FILE_FIELD, file, &file.name())
        .map_err(js_error)?;

    // Content-Typeはブラウザがboundary付きで設定する
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(endpoint, &opts).map_err(js_error)?;

    let window = web_sys::window()
        .ok_or_else(|| SearchError::Network("window is not available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;
    let status = resp.status();

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let body = text.as_string().unwrap_or_default();

    gloo::console::log!(format!("/upload -> {}", status));

    interpret_response(status, &body)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_js_error_uses_error_message() {
        let err = js_error(js_sys::Error::new("Failed to fetch").into());
        assert_eq!(err, SearchError::Network("Failed to fetch".to_string()));
    }

    #[wasm_bindgen_test]
    fn test_js_error_from_string() {
        let err = js_error(JsValue::from_str("aborted"));
        assert_eq!(err, SearchError::Network("aborted".to_string()));
    }
}
