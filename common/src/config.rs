//! タイミング・エンドポイント設定

use crate::error::{Error, Result};
use crate::protocol::UPLOAD_ENDPOINT;
use crate::stages::STAGES;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 検索画面の設定
///
/// 時間はすべてミリ秒（ブラウザのタイマーに合わせてu32）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// 送信先エンドポイント
    pub endpoint: String,
    /// 全ステージを流し切るまでの時間
    pub total_animation_ms: u32,
    /// 完了時に残りステージを流す間隔
    pub flush_step_ms: u32,
    /// 「Compilando...」表示の停止時間
    pub compile_pause_ms: u32,
    /// 100%表示から結果表示までの待ち
    pub settle_ms: u32,
    /// エラー表示後にプログレスを隠すまでの待ち
    pub error_hide_ms: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: UPLOAD_ENDPOINT.to_string(),
            total_animation_ms: 4800,
            flush_step_ms: 200,
            compile_pause_ms: 300,
            settle_ms: 500,
            error_hide_ms: 2000,
        }
    }
}

impl SearchConfig {
    /// JSON文字列から読み込み（欠けている項目はデフォルト）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::Config("endpoint is empty".into()));
        }
        if self.total_animation_ms == 0 {
            return Err(Error::Config("totalAnimationMs must be greater than 0".into()));
        }
        Ok(())
    }

    /// ステージ1つあたりのタイマー間隔
    pub fn stage_interval_ms(&self) -> u32 {
        (self.total_animation_ms / STAGES.len() as u32).max(1)
    }

    pub fn stage_interval(&self) -> Duration {
        Duration::from_millis(self.stage_interval_ms() as u64)
    }

    pub fn flush_step(&self) -> Duration {
        Duration::from_millis(self.flush_step_ms as u64)
    }

    pub fn compile_pause(&self) -> Duration {
        Duration::from_millis(self.compile_pause_ms as u64)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms as u64)
    }

    pub fn error_hide(&self) -> Duration {
        Duration::from_millis(self.error_hide_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval() {
        let config = SearchConfig::default();
        assert_eq!(config.stage_interval_ms(), 800);
        assert_eq!(config.stage_interval(), Duration::from_millis(800));
        assert_eq!(config.endpoint, "/upload");
    }

    #[test]
    fn test_from_json_partial() {
        let config = SearchConfig::from_json(r#"{"totalAnimationMs": 600}"#).expect("読み込み失敗");
        assert_eq!(config.total_animation_ms, 600);
        assert_eq!(config.stage_interval_ms(), 100);
        assert_eq!(config.settle_ms, 500);
    }

    #[test]
    fn test_from_json_rejects_zero_duration() {
        let result = SearchConfig::from_json(r#"{"totalAnimationMs": 0}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_json_rejects_empty_endpoint() {
        let result = SearchConfig::from_json(r#"{"endpoint": "  "}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_json_invalid() {
        let result = SearchConfig::from_json("{");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_interval_never_zero() {
        let config = SearchConfig {
            total_animation_ms: 3,
            ..Default::default()
        };
        assert_eq!(config.stage_interval_ms(), 1);
    }
}
