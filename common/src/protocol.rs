//! 検索エンドポイントとのやり取り
//!
//! HTTPクライアント自体は各フロントエンド（ブラウザの`fetch`、CLIの`reqwest`）が持つ。
//! ここではステータスとボディから結果を解釈する部分だけを共有する。

use crate::error::{server_fallback_message, SearchError};
use crate::types::{ErrorBody, SearchHit, SearchResponse};

/// 画像を送信するエンドポイント
pub const UPLOAD_ENDPOINT: &str = "/upload";

/// multipartフォームのフィールド名
pub const FILE_FIELD: &str = "file";

/// ステータスが成功（2xx）かどうか
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// レスポンスを解釈する
///
/// - 2xx以外: ボディの`error`を取り出し、無ければ`Error del servidor: <status>`
/// - 2xxで`error`あり: アプリケーションエラー
/// - 2xx: `results`を返す（無い・`null`なら空）
pub fn interpret_response(status: u16, body: &str) -> Result<Vec<SearchHit>, SearchError> {
    if !is_success(status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message())
            .unwrap_or_else(|| server_fallback_message(status));
        return Err(SearchError::Server { status, message });
    }

    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

    match response.error_message() {
        Some(message) => Err(SearchError::Application(message)),
        None => Ok(response.into_results()),
    }
}

/// MIMEタイプをファイル名の拡張子から推定（サーバーが受け付けるのはpng/jpg/jpeg）
pub fn guess_mime_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
