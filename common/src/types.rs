//! `/upload` のワイヤフォーマット
//!
//! - SearchHit: 類似アイテム1件
//! - SearchResponse: 成功ステータス時のボディ
//! - ErrorBody: 失敗ステータス時のボディ

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 類似アイテム（カタログ画像のパスと類似度）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// サイトルートからの相対パス（例: "catalog_data/a.jpg"）
    pub path: String,
    /// 類似度（0.0〜1.0）
    pub similarity: f64,
}

/// 成功ステータス時のレスポンス
///
/// `results` が無い、または`null`の場合は空として扱う。`error` があればアプリケーションエラー。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchHit>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl SearchResponse {
    /// エラーメッセージ（偽値なら`None`）
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().and_then(truthy_message)
    }

    /// 結果一覧（無ければ空）
    pub fn into_results(self) -> Vec<SearchHit> {
        self.results.unwrap_or_default()
    }
}

/// 失敗ステータス時のレスポンス
///
/// `error` は文字列以外（オブジェクト等）でもJSON文字列にして使う。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().and_then(truthy_message)
    }
}

/// `error` フィールドの値をメッセージにする
///
/// `null`、`false`、`0`、空文字列はエラー無しとみなす。
fn truthy_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserialize() {
        let json = r#"{"results": [{"path": "catalog/a.jpg", "similarity": 0.873}]}"#;
        let response: SearchResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert!(response.error_message().is_none());
        let results = response.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, "catalog/a.jpg");
        assert!((results[0].similarity - 0.873).abs() < f64::EPSILON);
    }

    #[test]
    fn test_search_response_missing_results() {
        let response: SearchResponse = serde_json::from_str("{}").expect("デシリアライズ失敗");
        assert!(response.into_results().is_empty());
    }

    #[test]
    fn test_search_response_null_results() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"results": null}"#).expect("デシリアライズ失敗");
        assert!(response.error_message().is_none());
        assert!(response.into_results().is_empty());
    }

    #[test]
    fn test_search_response_with_error() {
        let json = r#"{"error": "catalog not loaded"}"#;
        let response: SearchResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.error_message().as_deref(), Some("catalog not loaded"));
    }

    #[test]
    fn test_search_hit_serialize() {
        let hit = SearchHit {
            path: "catalog/b.png".to_string(),
            similarity: 0.5,
        };
        let json = serde_json::to_string(&hit).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"path":"catalog/b.png","similarity":0.5}"#);
    }

    #[test]
    fn test_error_body_without_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "x"}"#).expect("デシリアライズ失敗");
        assert!(body.message().is_none());
    }

    #[test]
    fn test_error_body_falsy_values() {
        for json in [r#"{"error": null}"#, r#"{"error": false}"#, r#"{"error": 0}"#, r#"{"error": ""}"#] {
            let body: ErrorBody = serde_json::from_str(json).expect("デシリアライズ失敗");
            assert!(body.message().is_none(), "{} はエラー無しのはず", json);
        }
    }

    #[test]
    fn test_error_body_object_is_stringified() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": {"detail": "x"}}"#).expect("デシリアライズ失敗");
        assert_eq!(body.message().as_deref(), Some(r#"{"detail":"x"}"#));
    }
}
