//! UIコンポーネント

pub mod header;
pub mod upload_form;
pub mod progress_bar;
pub mod log_console;
pub mod preview;
pub mod results_grid;
pub mod error_banner;
pub mod detail_modal;
