//! 検索エンドポイントへのHTTP送信

use crate::error::Result;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use visual_search_common::{guess_mime_type, interpret_response, SearchError, SearchHit, FILE_FIELD};

pub struct SearchClient {
    http: reqwest::Client,
    upload_url: String,
}

fn network_error(e: reqwest::Error) -> SearchError {
    SearchError::Network(e.to_string())
}

impl SearchClient {
    pub fn new(upload_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            upload_url: upload_url.into(),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// 画像を multipart/form-data（フィールド `file`）で1回だけ送信
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> std::result::Result<Vec<SearchHit>, SearchError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(guess_mime_type(file_name))
            .map_err(network_error)?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;

        interpret_response(status, &body)
    }
}
