//! Visual Search Common Library
//!
//! CLIとWeb(WASM)で共有される型・状態遷移・ユーティリティ

pub mod types;
pub mod error;
pub mod protocol;
pub mod stages;
pub mod config;
pub mod render;
pub mod controller;

pub use types::{SearchHit, SearchResponse, ErrorBody};
pub use error::{Error, Result, SearchError, NO_FILE_MESSAGE};
pub use protocol::{interpret_response, guess_mime_type, UPLOAD_ENDPOINT, FILE_FIELD};
pub use stages::{StageDescriptor, ProgressView, ProgressTone, STAGES};
pub use config::SearchConfig;
pub use render::{ResultCard, ResultsView, EMPTY_RESULTS_MESSAGE};
pub use controller::{
    Clock, FlushStep, Generation, Panels, Phase, SearchController, SelectedFile, SelectionId,
    Settlement, SubmitOutcome, TickOutcome,
};
