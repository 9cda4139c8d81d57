//! 端末版セッションのテスト
//!
//! 送信部分はクロージャで差し替え、演出タイマーは短い設定で回す。

use indicatif::ProgressBar;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use visual_search::client::SearchClient;
use visual_search::session::SearchSession;
use visual_search_common::{
    interpret_response, Phase, ProgressTone, ResultsView, SearchConfig, SearchError, SearchHit,
    STAGES,
};

fn fast_timing() -> SearchConfig {
    SearchConfig {
        total_animation_ms: 6,
        flush_step_ms: 1,
        compile_pause_ms: 1,
        settle_ms: 1,
        error_hide_ms: 1,
        ..Default::default()
    }
}

fn session() -> SearchSession {
    SearchSession::new(fast_timing(), ProgressBar::hidden(), false)
}

fn write_image(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    path
}

/// ファイル未選択ならネットワークに出ない
#[tokio::test]
async fn test_submit_without_file_never_sends() {
    let called = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&called);
    let mut session = session();

    let result = session
        .submit(move |_| async move {
            flag.store(true, Ordering::SeqCst);
            Ok(vec![])
        })
        .await;

    assert_eq!(result, Err(SearchError::NoFileSelected));
    assert!(!called.load(Ordering::SeqCst));

    let controller = session.controller();
    assert_eq!(
        controller.error(),
        Some("Por favor, selecciona un archivo de imagen antes de buscar.")
    );
    assert!(!controller.panels().results);
}

/// 存在しないパスは選択解除扱い
#[tokio::test]
async fn test_missing_path_is_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = session();

    let selected = session.select(&dir.path().join("nope.jpg")).expect("選択処理失敗");
    assert!(!selected);
    assert!(session.image().is_none());

    let result = session.submit(|_| async { Ok(vec![]) }).await;
    assert_eq!(result, Err(SearchError::NoFileSelected));
}

/// 成功シナリオ: cat.jpg → 1件
#[tokio::test]
async fn test_success_renders_one_card() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_image(dir.path(), "cat.jpg");
    let mut session = session();
    assert!(session.select(&path).expect("選択処理失敗"));
    assert_eq!(session.image().map(|i| i.name.as_str()), Some("cat.jpg"));

    let hits = session
        .submit(|image| async move {
            assert_eq!(image.name, "cat.jpg");
            assert_eq!(image.bytes.len(), 4);
            interpret_response(
                200,
                r#"{"results":[{"path":"catalog/a.jpg","similarity":0.873}]}"#,
            )
        })
        .await
        .expect("成功のはず");
    assert_eq!(hits.len(), 1);

    let Some(ResultsView::Cards(cards)) = session.results() else {
        panic!("結果カードが表示されていない");
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].similarity_label, "0.873");
    assert_eq!(cards[0].image_url, "/catalog/a.jpg");

    let controller = session.controller();
    assert_eq!(controller.phase(), Phase::ResultsShown);
    assert_eq!(controller.progress().percent, 100);
    assert!(controller.panels().preview);
    assert!(controller.can_submit());
}

/// 空の結果はプレースホルダ
#[tokio::test]
async fn test_empty_results() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_image(dir.path(), "cat.jpg");
    let mut session = session();
    session.select(&path).expect("選択処理失敗");

    let hits = session
        .submit(|_| async { interpret_response(200, r#"{"results":[]}"#) })
        .await
        .expect("成功のはず");

    assert!(hits.is_empty());
    assert_eq!(session.results(), Some(ResultsView::Empty));
}

/// 遅い送信の間にステージが進む
#[tokio::test]
async fn test_stages_advance_while_waiting() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_image(dir.path(), "cat.jpg");
    let mut session = session();
    session.select(&path).expect("選択処理失敗");

    let result = session
        .submit(|_| async {
            tokio::time::sleep(Duration::from_millis(60)).await;
            Ok(vec![SearchHit {
                path: "catalog/b.jpg".to_string(),
                similarity: 0.5,
            }])
        })
        .await;

    assert!(result.is_ok());
    let controller = session.controller();
    assert_eq!(controller.stage_index(), STAGES.len());
    assert_eq!(controller.phase(), Phase::ResultsShown);
}

/// サーバーエラー: メッセージを表示し結果は隠す
#[tokio::test]
async fn test_server_error_shows_message() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_image(dir.path(), "cat.jpg");
    let mut session = session();
    session.select(&path).expect("選択処理失敗");

    let err = session
        .submit(|_| async { interpret_response(500, r#"{"error":"model unavailable"}"#) })
        .await
        .unwrap_err();
    assert!(err.user_message().contains("model unavailable"));

    let controller = session.controller();
    assert_eq!(controller.phase(), Phase::ErrorShown);
    assert_eq!(controller.progress().tone, ProgressTone::Error);
    assert!(controller.error().is_some_and(|m| m.contains("model unavailable")));
    assert!(controller.panels().preview);
    assert!(!controller.panels().results);
    assert!(session.results().is_none());
}

/// 接続できないサーバーはネットワークエラー
#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind失敗");
    let addr = listener.local_addr().expect("アドレス取得失敗");
    drop(listener);

    let client = SearchClient::new(format!("http://{}/upload", addr), Duration::from_secs(5))
        .expect("クライアント作成失敗");
    let err = client
        .upload("cat.jpg", vec![1, 2, 3])
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Network(_)));
}
