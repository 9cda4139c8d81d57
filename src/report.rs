//! 検索結果の端末出力

use crate::error::Result;
use visual_search_common::{ResultsView, SearchHit, EMPTY_RESULTS_MESSAGE};

/// 結果カードを1件1行に整形
pub fn format_results(view: &ResultsView) -> Vec<String> {
    match view {
        ResultsView::Empty => vec![EMPTY_RESULTS_MESSAGE.to_string()],
        ResultsView::Cards(cards) => cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                format!(
                    "{:>2}. {}  Similitud: {}  {}",
                    i + 1,
                    card.name,
                    card.similarity_label,
                    card.image_url
                )
            })
            .collect(),
    }
}

pub fn print_results(view: &ResultsView) {
    for line in format_results(view) {
        println!("{}", line);
    }
}

pub fn to_json(hits: &[SearchHit]) -> Result<String> {
    Ok(serde_json::to_string_pretty(hits)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cards() {
        let hits = vec![SearchHit {
            path: "catalog/a.jpg".to_string(),
            similarity: 0.873,
        }];
        let lines = format_results(&ResultsView::from_hits(&hits));
        assert_eq!(lines, vec![" 1. a.jpg  Similitud: 0.873  /catalog/a.jpg"]);
    }

    #[test]
    fn test_format_empty() {
        let lines = format_results(&ResultsView::Empty);
        assert_eq!(lines, vec![EMPTY_RESULTS_MESSAGE.to_string()]);
    }

    #[test]
    fn test_to_json() {
        let hits = vec![SearchHit {
            path: "catalog/b.png".to_string(),
            similarity: 0.25,
        }];
        let json = to_json(&hits).expect("シリアライズ失敗");
        assert!(json.contains("\"path\": \"catalog/b.png\""));
        assert!(json.contains("\"similarity\": 0.25"));
    }
}
