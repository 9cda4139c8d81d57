//! 演出タイマーと完了演出
//!
//! ステージ送りの`Interval`と送信は独立して動く。送信が終わった時点で
//! [`Ticker::cancel`]を呼び、コントローラ側は世代でそれ以降の書き込みを弾く。

use gloo::timers::callback::{Interval, Timeout};
use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cell::RefCell;
use std::rc::Rc;
use visual_search_common::{FlushStep, Generation, SearchController, TickOutcome};

/// ステージ送りタイマーのハンドル
///
/// `Interval`はdropで`clearInterval`される。
#[derive(Clone, Default)]
pub struct Ticker {
    handle: Rc<RefCell<Option<(Generation, Interval)>>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// タイマー開始（既存のタイマーは止める）
    pub fn start(&self, controller: RwSignal<SearchController>, generation: Generation, interval_ms: u32) {
        let ticker = self.clone();
        let interval = Interval::new(interval_ms, move || {
            let outcome = controller
                .try_update(|c| c.tick(generation))
                .unwrap_or(TickOutcome::Stale);
            if outcome != TickOutcome::Advanced {
                // コールバック実行中に自分自身をdropしないよう次のタスクで止める
                let ticker = ticker.clone();
                spawn_local(async move { ticker.cancel_generation(generation) });
            }
        });
        let previous = self.handle.borrow_mut().replace((generation, interval));
        drop(previous);
    }

    /// 実行中のタイマーを止める
    pub fn cancel(&self) {
        let previous = self.handle.borrow_mut().take();
        drop(previous);
    }

    /// 指定した世代のタイマーだけを止める
    pub fn cancel_generation(&self, generation: Generation) {
        let is_same = self
            .handle
            .borrow()
            .as_ref()
            .is_some_and(|(g, _)| *g == generation);
        if is_same {
            self.cancel();
        }
    }
}

/// 成功時の完了演出
///
/// 残りステージを`flush_step_ms`間隔で出し、99%で`compile_pause_ms`、
/// 100%表示から`settle_ms`後に結果グリッドを出す。途中で世代が変われば打ち切る。
pub async fn run_completion(controller: RwSignal<SearchController>, generation: Generation) {
    let Some(config) = controller.try_with_untracked(|c| c.config().clone()) else {
        return;
    };

    loop {
        let step = controller
            .try_update(|c| c.flush_step(generation))
            .unwrap_or(FlushStep::Stale);
        match step {
            FlushStep::Stage => TimeoutFuture::new(config.flush_step_ms).await,
            FlushStep::Compiling => TimeoutFuture::new(config.compile_pause_ms).await,
            FlushStep::Complete => {
                TimeoutFuture::new(config.settle_ms).await;
                controller.try_update(|c| c.show_results(generation));
                break;
            }
            FlushStep::Stale => break,
        }
    }
}

/// エラー表示後、一定時間でプログレスを隠す
pub fn schedule_hide(controller: RwSignal<SearchController>, generation: Generation) {
    let Some(delay) = controller.try_with_untracked(|c| c.config().error_hide_ms) else {
        return;
    };
    Timeout::new(delay, move || {
        controller.try_update(|c| c.hide_progress(generation));
    })
    .forget();
}
