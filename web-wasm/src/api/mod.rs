//! サーバー連携

pub mod search;
