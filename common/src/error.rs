//! エラー型定義

use thiserror::Error;

/// 「ファイル未選択」時に表示するメッセージ
pub const NO_FILE_MESSAGE: &str = "Por favor, selecciona un archivo de imagen antes de buscar.";

/// 検索失敗時にバナーへ付与する接頭辞
pub const SEARCH_ERROR_PREFIX: &str = "Error en la búsqueda";

/// 共通エラー型（設定の読み込み・検証）
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 画像検索の失敗
///
/// どの種類もエラーバナーという同じ表示経路に集約される。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// 送信時にファイルが選択されていない（ネットワークには到達しない）
    #[error("{}", NO_FILE_MESSAGE)]
    NoFileSelected,

    /// 2xx以外のステータス
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 2xxだがボディに`error`フィールドがある
    #[error("{0}")]
    Application(String),

    /// 2xxだがボディが期待したJSONではない
    #[error("Respuesta inválida del servidor: {0}")]
    InvalidResponse(String),

    /// 通信自体の失敗
    #[error("Error de red: {0}")]
    Network(String),
}

impl SearchError {
    /// エラーバナーに表示する文言
    pub fn user_message(&self) -> String {
        match self {
            SearchError::NoFileSelected => self.to_string(),
            other => format!("{}: {}", SEARCH_ERROR_PREFIX, other),
        }
    }

    /// ネットワークに到達したかどうか
    pub fn reached_network(&self) -> bool {
        !matches!(self, SearchError::NoFileSelected)
    }
}

/// 2xx以外でボディからメッセージを取り出せなかった場合の文言
pub fn server_fallback_message(status: u16) -> String {
    format!("Error del servidor: {}", status)
}
