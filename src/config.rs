use crate::error::{Result, VisualSearchError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use visual_search_common::SearchConfig;

/// サーバーURLを上書きする環境変数
pub const SERVER_URL_ENV: &str = "VISUAL_SEARCH_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub timeout_seconds: u64,
    /// エンドポイントと演出のタイミング
    pub timing: SearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            timeout_seconds: 120,
            timing: SearchConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.timing.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VisualSearchError::Config("No se encontró el directorio personal".into()))?;
        Ok(home.join(".config").join("visual-search").join("config.json"))
    }

    /// サーバーURLを検証して設定（保存はしない）
    pub fn set_server_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(VisualSearchError::Config(format!(
                "URL inválida: {} (debe empezar por http:// o https://)",
                url
            )));
        }
        self.server_url = url.trim_end_matches('/').to_string();
        Ok(())
    }

    /// 使用するサーバーURL（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_server_url(&self, cli_override: Option<&str>) -> String {
        if let Some(url) = cli_override.filter(|u| !u.trim().is_empty()) {
            return url.to_string();
        }
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                return url;
            }
        }
        self.server_url.clone()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// サーバーURLとエンドポイントを連結
pub fn join_url(server_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        server_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
