//! 演出用の進捗ステージとプログレスバーの表示状態
//!
//! サーバーは進捗を返さないので、ステージは固定の順序で時間経過により進めるだけ。

use serde::Serialize;

/// 進捗ステージ（パーセント・表示ラベル・コンソール行）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageDescriptor {
    pub percent: u8,
    pub label: &'static str,
    pub log_line: &'static str,
}

/// 演出ステージ一覧（順序固定）
pub const STAGES: [StageDescriptor; 6] = [
    StageDescriptor {
        percent: 10,
        label: "Conectando con IA...",
        log_line: "CONNECTING TO AI ANALYSIS CORE (JETSON NANO)...",
    },
    StageDescriptor {
        percent: 20,
        label: "Validando imagen...",
        log_line: "IMAGE FORMAT VALIDATION: [OK]",
    },
    StageDescriptor {
        percent: 30,
        label: "Enviando a Jetson Nano...",
        log_line: "TRANSMITTING IMAGE TO JETSON AI ENGINE...",
    },
    StageDescriptor {
        percent: 50,
        label: "Pre-procesando (CUDA)...",
        log_line: "PRE-PROCESSING & NORMALIZATION (CUDA ACCELERATED)...",
    },
    StageDescriptor {
        percent: 70,
        label: "Extrayendo huella visual...",
        log_line: "DEEP FEATURE VECTOR EXTRACTION (ResNet50 ON GPU)...",
    },
    StageDescriptor {
        percent: 90,
        label: "Buscando en catálogo...",
        log_line: "CATALOG SIMILARITY SEARCH (OPTIMIZED)...",
    },
];

pub const RESET_LABEL: &str = "Iniciando...";
pub const START_LABEL: &str = "Iniciando análisis...";
pub const START_LOG: &str = "> BOOTING VISUAL ANALYSIS PIPELINE...";
pub const EXHAUSTED_LABEL: &str = "Finalizando y compilando resultados...";
pub const COMPILING_PERCENT: u8 = 99;
pub const COMPILING_LABEL: &str = "Compilando resultados finales...";
pub const COMPILING_LOG: &str = "COMPILING FINAL RESULTS...";
pub const COMPLETE_LABEL: &str = "¡Resultados Listos!";
pub const COMPLETE_LOG: &str = "VISUAL SEARCH COMPLETE. RESULTS DELIVERED.";
pub const ERROR_LABEL: &str = "Error Detectado";

/// プログレスバーの色調
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ProgressTone {
    #[default]
    Idle,
    Running,
    Success,
    Error,
}

impl ProgressTone {
    /// CSSクラス（Bootstrapのprogress-bar系）
    pub fn css_class(&self) -> &'static str {
        match self {
            ProgressTone::Idle => "progress-bar bg-primary",
            ProgressTone::Running => "progress-bar progress-bar-striped bg-primary progress-bar-animated",
            ProgressTone::Success => "progress-bar bg-success",
            ProgressTone::Error => "progress-bar bg-danger",
        }
    }
}

/// プログレスバーの表示状態
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProgressView {
    pub percent: u8,
    /// バー内のテキスト
    pub bar_text: String,
    /// バー上のステージ表示
    pub stage_text: String,
    pub tone: ProgressTone,
}

impl ProgressView {
    /// パーセントとラベルから表示状態を作る
    ///
    /// 進行中（0 < p < 100）はバーに「p%」、ステージ欄にラベル。
    /// 100%とエラーはバー・ステージ欄ともにラベル。0%はバーに「0%」。
    pub fn update(percent: u8, text: &str, is_error: bool) -> Self {
        let percent = percent.min(100);
        let (bar_text, stage_text) = if !text.is_empty() && percent < 100 && !is_error {
            (format!("{}%", percent), text.to_string())
        } else if !text.is_empty() {
            (text.to_string(), text.to_string())
        } else {
            (format!("{}%", percent), String::new())
        };

        let tone = if is_error {
            ProgressTone::Error
        } else if percent >= 100 {
            ProgressTone::Success
        } else if percent > 0 {
            ProgressTone::Running
        } else {
            ProgressTone::Idle
        };

        let bar_text = if tone == ProgressTone::Idle {
            "0%".to_string()
        } else {
            bar_text
        };

        Self {
            percent,
            bar_text,
            stage_text,
            tone,
        }
    }

    /// 初期状態（0%）
    pub fn reset() -> Self {
        Self::update(0, RESET_LABEL, false)
    }

    /// エラー状態（100%・赤）
    pub fn error() -> Self {
        Self::update(100, ERROR_LABEL, true)
    }

    /// CSSの`width`値
    pub fn width_style(&self) -> String {
        format!("width: {}%", self.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_stage_percent() -> u8 {
        STAGES.last().map(|s| s.percent).unwrap_or(0)
    }

    #[test]
    fn test_stages_are_monotonic() {
        for pair in STAGES.windows(2) {
            assert!(pair[0].percent < pair[1].percent);
        }
        assert!(last_stage_percent() < COMPILING_PERCENT);
    }

    #[test]
    fn test_update_running() {
        let view = ProgressView::update(30, "Enviando a Jetson Nano...", false);
        assert_eq!(view.bar_text, "30%");
        assert_eq!(view.stage_text, "Enviando a Jetson Nano...");
        assert_eq!(view.tone, ProgressTone::Running);
    }

    #[test]
    fn test_update_complete() {
        let view = ProgressView::update(100, COMPLETE_LABEL, false);
        assert_eq!(view.bar_text, COMPLETE_LABEL);
        assert_eq!(view.stage_text, COMPLETE_LABEL);
        assert_eq!(view.tone, ProgressTone::Success);
    }

    #[test]
    fn test_update_error() {
        let view = ProgressView::error();
        assert_eq!(view.percent, 100);
        assert_eq!(view.bar_text, ERROR_LABEL);
        assert_eq!(view.tone, ProgressTone::Error);
    }

    #[test]
    fn test_reset_shows_zero() {
        let view = ProgressView::reset();
        assert_eq!(view.percent, 0);
        assert_eq!(view.bar_text, "0%");
        assert_eq!(view.stage_text, RESET_LABEL);
        assert_eq!(view.tone, ProgressTone::Idle);
    }

    #[test]
    fn test_update_clamps_percent() {
        let view = ProgressView::update(250, "x", false);
        assert_eq!(view.percent, 100);
        assert_eq!(view.width_style(), "width: 100%");
    }

    #[test]
    fn test_tone_css_class() {
        assert!(ProgressTone::Error.css_class().contains("bg-danger"));
        assert!(ProgressTone::Success.css_class().contains("bg-success"));
        assert!(ProgressTone::Running.css_class().contains("progress-bar-animated"));
    }
}
