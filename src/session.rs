//! 端末版の検索セッション
//!
//! ブラウザ版と同じコントローラを使い、演出タイマーはtokioのタスク、
//! 表示はindicatifのプログレスバーで行う。送信が終わった時点でタイマーのタスクを止める。

use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};
use visual_search_common::{
    FlushStep, Generation, ResultsView, SearchConfig, SearchController, SearchError, SearchHit,
    Settlement, SubmitOutcome, TickOutcome,
};

/// 送信する画像
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

struct Shared {
    controller: SearchController,
    /// 出力済みのコンソール行数
    printed: usize,
}

pub struct SearchSession {
    shared: Arc<Mutex<Shared>>,
    bar: ProgressBar,
    timing: SearchConfig,
    verbose: bool,
    image: Option<SelectedImage>,
}

/// コンソール行用の時刻
fn local_clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// 端末用のプログレスバー
pub fn progress_bar() -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bar = ProgressBar::new(100);
    bar.set_style(style);
    bar
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// コントローラの状態をプログレスバーに反映
fn render(shared: &mut Shared, bar: &ProgressBar, verbose: bool) {
    let progress = shared.controller.progress();
    bar.set_position(progress.percent as u64);
    bar.set_message(progress.stage_text.clone());

    if !verbose {
        return;
    }
    let console = shared.controller.console();
    if shared.printed > console.len() {
        shared.printed = 0;
    }
    for line in &console[shared.printed..] {
        bar.println(line);
    }
    shared.printed = console.len();
}

impl SearchSession {
    pub fn new(timing: SearchConfig, bar: ProgressBar, verbose: bool) -> Self {
        let controller = SearchController::new(timing.clone(), local_clock);
        Self {
            shared: Arc::new(Mutex::new(Shared {
                controller,
                printed: 0,
            })),
            bar,
            timing,
            verbose,
            image: None,
        }
    }

    /// 画像ファイルを選択して読み込む
    ///
    /// ファイルでなければ選択を解除して`false`を返す（その後の送信は拒否される）。
    pub fn select(&mut self, path: &Path) -> Result<bool> {
        if !path.is_file() {
            self.image = None;
            lock(&self.shared).controller.select_file(None);
            return Ok(false);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path)?;

        let mut shared = lock(&self.shared);
        if let Some(id) = shared.controller.select_file(Some(&name)) {
            shared.controller.preview_loaded(id, path.display().to_string());
        }
        self.image = Some(SelectedImage { name, bytes });
        Ok(true)
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    /// コントローラのスナップショット
    pub fn controller(&self) -> SearchController {
        lock(&self.shared).controller.clone()
    }

    /// 表示中の結果
    pub fn results(&self) -> Option<ResultsView> {
        lock(&self.shared).controller.results().cloned()
    }

    /// 送信する
    ///
    /// `send`は画像が選択されているときだけ呼ばれる。送信中は演出タイマーが回り、
    /// 成功時は残りのステージを流してから結果を返す。
    pub async fn submit<F, Fut>(&mut self, send: F) -> std::result::Result<Vec<SearchHit>, SearchError>
    where
        F: FnOnce(SelectedImage) -> Fut,
        Fut: Future<Output = std::result::Result<Vec<SearchHit>, SearchError>>,
    {
        let outcome = self.update(|c| c.begin_submit());
        let generation = match outcome {
            SubmitOutcome::Started(generation) => generation,
            SubmitOutcome::Rejected(_) => {
                self.bar.abandon();
                return Err(SearchError::NoFileSelected);
            }
            SubmitOutcome::Busy => {
                return Err(SearchError::Network("ya hay una búsqueda en curso".to_string()));
            }
        };

        let result = match self.image.clone() {
            Some(image) => {
                let ticker = self.spawn_ticker(generation);
                let result = send(image).await;
                ticker.abort();
                result
            }
            None => Err(SearchError::NoFileSelected),
        };

        match self.update(|c| c.finish_request(generation, result.clone())) {
            Settlement::Succeeded(done) => {
                self.complete(done).await;
                result
            }
            Settlement::Failed(_) => {
                match &result {
                    Err(e) if self.verbose && e.reached_network() => {
                        self.bar.println(format!("- Respuesta con error: {}", e));
                    }
                    _ => {}
                }
                self.bar.abandon();
                result
            }
            Settlement::Discarded => Err(SearchError::Network("búsqueda descartada".to_string())),
        }
    }

    /// 完了演出（残りステージ → 99% → 100% → 結果表示）
    async fn complete(&self, generation: Generation) {
        loop {
            match self.update(|c| c.flush_step(generation)) {
                FlushStep::Stage => sleep(self.timing.flush_step()).await,
                FlushStep::Compiling => sleep(self.timing.compile_pause()).await,
                FlushStep::Complete => {
                    sleep(self.timing.settle()).await;
                    self.update(|c| c.show_results(generation));
                    break;
                }
                FlushStep::Stale => break,
            }
        }
        self.bar.finish();
    }

    /// ステージ送りのタスクを起動
    fn spawn_ticker(&self, generation: Generation) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        let bar = self.bar.clone();
        let verbose = self.verbose;
        let period = self.timing.stage_interval();

        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let outcome = {
                    let mut shared = lock(&shared);
                    let outcome = shared.controller.tick(generation);
                    render(&mut shared, &bar, verbose);
                    outcome
                };
                if outcome != TickOutcome::Advanced {
                    break;
                }
            }
        })
    }

    /// コントローラを更新して表示に反映
    fn update<T>(&self, f: impl FnOnce(&mut SearchController) -> T) -> T {
        let mut shared = lock(&self.shared);
        let value = f(&mut shared.controller);
        render(&mut shared, &self.bar, self.verbose);
        value
    }
}
