//! アップロード・進捗・結果表示のコントローラ
//!
//! 画面の状態（選択ファイル、送信中フラグ、進捗ステージ、結果/エラー、各領域の表示）を
//! 1つの構造体で持つ。タイマーやHTTPはフロントエンド側の仕事で、ここは同期的な状態遷移のみ。
//!
//! 状態遷移:
//! `Idle → FileSelected → Submitting → {Completing → ResultsShown, ErrorShown}`
//! 新しいファイル選択でどこからでも`FileSelected`、リセットで`Idle`に戻る。
//!
//! 演出タイマーと送信は並行に動くため、タイマー由来の呼び出しには[`Generation`]を渡す。
//! 開始・停止・リセット・ファイル選択のたびに世代が進み、古い世代の呼び出しは無視される。

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::render::ResultsView;
use crate::stages::{
    ProgressView, COMPILING_LABEL, COMPILING_LOG, COMPILING_PERCENT, COMPLETE_LABEL,
    COMPLETE_LOG, EXHAUSTED_LABEL, STAGES, START_LABEL, START_LOG,
};
use crate::types::SearchHit;

/// コンソール行のタイムスタンプ（HH:MM:SS）を返す関数
pub type Clock = fn() -> String;

/// 演出の世代
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

/// ファイル選択の識別子（プレビュー読み込みの突き合わせ用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionId(u64);

/// 選択中のファイル
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    /// 読み込み完了後のData URL
    pub preview: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    FileSelected,
    Submitting,
    /// 成功レスポンス受信後、完了演出中
    Completing,
    ResultsShown,
    ErrorShown,
}

/// 各表示領域の表示/非表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panels {
    /// 処理結果エリア全体
    pub output: bool,
    pub preview: bool,
    pub progress: bool,
    pub console: bool,
    pub results: bool,
    pub error: bool,
}

/// 送信開始の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 送信してよい。返した世代でタイマーを回す
    Started(Generation),
    /// ファイル未選択。ネットワークには出ない。世代はプログレスを隠すタイマー用
    Rejected(Generation),
    /// 送信中
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    /// 全ステージ表示済み。タイマーを止める
    Finished,
    Stale,
}

/// レスポンス受信後の処理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// 完了演出へ（[`SearchController::flush_step`]を回す）
    Succeeded(Generation),
    /// エラー表示済み。世代はプログレスを隠すタイマー用
    Failed(Generation),
    /// リセットや再選択で無効になった送信
    Discarded,
}

/// 完了演出の1ステップ。戻り値ごとにフロントエンドが待つ時間が違う
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushStep {
    /// 残りステージを1つ表示した（flush_step_ms待つ）
    Stage,
    /// 99%表示（compile_pause_ms待つ）
    Compiling,
    /// 100%表示（settle_ms待ってから結果表示）
    Complete,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Completion {
    #[default]
    Pending,
    Compiling,
    Complete,
}

#[derive(Debug, Clone)]
pub struct SearchController {
    config: SearchConfig,
    clock: Clock,
    selected: Option<SelectedFile>,
    selection: u64,
    phase: Phase,
    can_submit: bool,
    in_flight: Option<Generation>,
    generation: u64,
    animating: bool,
    stage_index: usize,
    completion: Completion,
    progress: ProgressView,
    console: Vec<String>,
    last_results: Vec<SearchHit>,
    results: Option<ResultsView>,
    error: Option<String>,
    panels: Panels,
}

impl SearchController {
    /// 初期状態（リセット済み）で作る
    pub fn new(config: SearchConfig, clock: Clock) -> Self {
        let mut controller = Self {
            config,
            clock,
            selected: None,
            selection: 0,
            phase: Phase::Idle,
            can_submit: false,
            in_flight: None,
            generation: 0,
            animating: false,
            stage_index: 0,
            completion: Completion::Pending,
            progress: ProgressView::reset(),
            console: Vec::new(),
            last_results: Vec::new(),
            results: None,
            error: None,
            panels: Panels::default(),
        };
        controller.reset();
        controller
    }

    // ------------------------------------------------------------
    // 操作
    // ------------------------------------------------------------

    /// 画面を初期状態に戻す
    pub fn reset(&mut self) {
        self.stop_animation();
        self.selected = None;
        self.can_submit = false;
        self.in_flight = None;
        self.stage_index = 0;
        self.completion = Completion::Pending;
        self.progress = ProgressView::reset();
        self.console.clear();
        self.results = None;
        self.error = None;
        self.panels = Panels::default();
        self.phase = Phase::Idle;
    }

    /// ファイル選択の変更
    ///
    /// `None`（選択解除）ならリセット。選択時は送信を有効にし、
    /// プレビュー読み込みと突き合わせるための[`SelectionId`]を返す。
    pub fn select_file(&mut self, name: Option<&str>) -> Option<SelectionId> {
        let Some(name) = name else {
            self.reset();
            return None;
        };

        self.stop_animation();
        self.in_flight = None;
        self.selection += 1;
        self.selected = Some(SelectedFile {
            name: name.to_string(),
            preview: None,
        });
        self.can_submit = true;
        self.phase = Phase::FileSelected;
        Some(SelectionId(self.selection))
    }

    /// プレビュー（Data URL）の読み込み完了
    ///
    /// 前回の結果・エラー・進捗を片付けてプレビューを表示する。
    /// 既に別のファイルが選ばれていれば何もしない。
    pub fn preview_loaded(&mut self, id: SelectionId, data_url: impl Into<String>) -> bool {
        if id.0 != self.selection {
            return false;
        }
        let Some(selected) = self.selected.as_mut() else {
            return false;
        };

        selected.preview = Some(data_url.into());
        self.panels.preview = true;
        self.panels.output = true;
        self.panels.results = false;
        self.results = None;
        self.panels.error = false;
        self.error = None;
        self.panels.progress = false;
        self.panels.console = false;
        true
    }

    /// 送信開始
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if self.in_flight.is_some() {
            return SubmitOutcome::Busy;
        }

        self.error = None;
        self.panels.error = false;
        self.results = None;
        self.panels.results = false;
        self.panels.output = true;

        if self.selected.is_none() {
            let generation = self.fail(SearchError::NoFileSelected);
            return SubmitOutcome::Rejected(generation);
        }

        self.panels.preview = true;
        self.start_animation();
        self.can_submit = false;
        let generation = self.current_generation();
        self.in_flight = Some(generation);
        self.phase = Phase::Submitting;
        SubmitOutcome::Started(generation)
    }

    /// 演出タイマーの1tick
    pub fn tick(&mut self, generation: Generation) -> TickOutcome {
        if !self.is_current(generation) || !self.animating {
            return TickOutcome::Stale;
        }

        if self.show_next_stage() {
            TickOutcome::Advanced
        } else {
            self.animating = false;
            self.progress.stage_text = EXHAUSTED_LABEL.to_string();
            TickOutcome::Finished
        }
    }

    /// レスポンス（または通信エラー）の受信
    ///
    /// 成否にかかわらず演出タイマーを止め、送信ボタンを戻す。選択ファイルは残す。
    pub fn finish_request(
        &mut self,
        ticket: Generation,
        outcome: Result<Vec<SearchHit>, SearchError>,
    ) -> Settlement {
        if self.in_flight != Some(ticket) {
            return Settlement::Discarded;
        }
        self.in_flight = None;
        self.can_submit = self.selected.is_some();

        match outcome {
            Ok(hits) => {
                self.stop_animation();
                self.last_results = hits;
                self.phase = Phase::Completing;
                Settlement::Succeeded(self.current_generation())
            }
            Err(error) => Settlement::Failed(self.fail(error)),
        }
    }

    /// 完了演出を1ステップ進める
    ///
    /// 未表示のステージを順に出し、99%「Compilando...」、最後に100%。
    pub fn flush_step(&mut self, generation: Generation) -> FlushStep {
        if !self.is_current(generation) || self.phase != Phase::Completing {
            return FlushStep::Stale;
        }

        match self.completion {
            Completion::Pending => {
                if self.show_next_stage() {
                    return FlushStep::Stage;
                }
                self.completion = Completion::Compiling;
                self.set_progress(COMPILING_PERCENT, COMPILING_LABEL);
                self.log(COMPILING_LOG);
                FlushStep::Compiling
            }
            Completion::Compiling => {
                self.completion = Completion::Complete;
                self.set_progress(100, COMPLETE_LABEL);
                self.log(COMPLETE_LOG);
                FlushStep::Complete
            }
            Completion::Complete => FlushStep::Complete,
        }
    }

    /// 完了演出の後、プログレスを隠して結果グリッドを出す
    pub fn show_results(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation)
            || self.phase != Phase::Completing
            || self.completion != Completion::Complete
        {
            return false;
        }

        self.panels.progress = false;
        self.panels.console = false;
        self.error = None;
        self.panels.error = false;
        self.results = Some(ResultsView::from_hits(&self.last_results));
        self.panels.results = true;
        self.phase = Phase::ResultsShown;
        true
    }

    /// エラー表示
    ///
    /// 演出を止め、プログレスをエラー状態にし、結果を隠してメッセージを出す。
    /// プレビューは残す。返した世代で[`Self::hide_progress`]を予約する。
    pub fn fail(&mut self, error: SearchError) -> Generation {
        self.stop_animation();
        self.progress = ProgressView::error();
        self.results = None;
        self.panels.results = false;
        self.error = Some(error.user_message());
        self.panels.error = true;
        self.panels.output = true;
        self.panels.preview = self.selected.is_some();
        self.phase = Phase::ErrorShown;
        self.current_generation()
    }

    /// エラー表示後の遅延非表示
    pub fn hide_progress(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.panels.progress = false;
        self.panels.console = false;
        true
    }

    // ------------------------------------------------------------
    // 参照
    // ------------------------------------------------------------

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn can_submit(&self) -> bool {
        self.can_submit
    }

    pub fn is_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn progress(&self) -> &ProgressView {
        &self.progress
    }

    /// コンソール行（`[HH:MM:SS] message`）
    pub fn console(&self) -> &[String] {
        &self.console
    }

    /// 表示中の結果（結果グリッドが出ているときのみ）
    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    /// 最後に成功したレスポンスの結果
    pub fn last_results(&self) -> &[SearchHit] {
        &self.last_results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn panels(&self) -> Panels {
        self.panels
    }

    pub fn current_generation(&self) -> Generation {
        Generation(self.generation)
    }

    // ------------------------------------------------------------
    // 内部処理
    // ------------------------------------------------------------

    fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.generation
    }

    fn start_animation(&mut self) {
        self.generation += 1;
        self.animating = true;
        self.stage_index = 0;
        self.completion = Completion::Pending;
        self.panels.progress = true;
        self.panels.console = true;
        self.console.clear();
        self.set_progress(0, START_LABEL);
        self.log(START_LOG);
    }

    fn stop_animation(&mut self) {
        self.generation += 1;
        self.animating = false;
    }

    /// 次のステージを表示。残りが無ければfalse
    fn show_next_stage(&mut self) -> bool {
        let Some(stage) = STAGES.get(self.stage_index) else {
            return false;
        };
        self.set_progress(stage.percent, stage.label);
        self.log(stage.log_line);
        self.stage_index += 1;
        true
    }

    fn set_progress(&mut self, percent: u8, label: &str) {
        self.progress = ProgressView::update(percent, label, false);
    }

    /// コンソールが表示されているときだけ追記
    fn log(&mut self, message: &str) {
        if self.panels.console {
            self.console.push(format!("[{}] {}", (self.clock)(), message));
        }
    }
}
