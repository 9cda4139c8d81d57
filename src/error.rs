use thiserror::Error;
use visual_search_common::SearchError;

#[derive(Error, Debug)]
pub enum VisualSearchError {
    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("{}", .0.user_message())]
    Search(#[from] SearchError),

    #[error("Error HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] visual_search_common::Error),
}

pub type Result<T> = std::result::Result<T, VisualSearchError>;
