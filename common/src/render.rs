//! 検索結果の表示モデル

use crate::types::SearchHit;
use serde::Serialize;

/// 結果が空のときのプレースホルダ
pub const EMPTY_RESULTS_MESSAGE: &str =
    "No se encontraron productos suficientemente similares en el catálogo.";

/// 結果カード1枚分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    /// `/<path>` 形式の画像URL
    pub image_url: String,
    /// パス末尾のファイル名
    pub name: String,
    /// 小数点以下3桁の類似度
    pub similarity_label: String,
}

impl ResultCard {
    pub fn from_hit(hit: &SearchHit) -> Self {
        Self {
            image_url: image_url(&hit.path),
            name: display_name(&hit.path).to_string(),
            similarity_label: similarity_label(hit.similarity),
        }
    }

    /// 画像の代替テキスト
    pub fn alt_text(&self) -> String {
        format!("Producto similar {}", self.name)
    }
}

/// 結果グリッドの中身
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResultsView {
    Cards(Vec<ResultCard>),
    Empty,
}

impl ResultsView {
    pub fn from_hits(hits: &[SearchHit]) -> Self {
        if hits.is_empty() {
            ResultsView::Empty
        } else {
            ResultsView::Cards(hits.iter().map(ResultCard::from_hit).collect())
        }
    }

    pub fn cards(&self) -> &[ResultCard] {
        match self {
            ResultsView::Cards(cards) => cards,
            ResultsView::Empty => &[],
        }
    }
}

/// サーバーのパスをサイトルート相対のURLにする
pub fn image_url(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// パスの最後のセグメント
pub fn display_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn similarity_label(similarity: f64) -> String {
    format!("{:.3}", similarity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(path: &str, similarity: f64) -> SearchHit {
        SearchHit {
            path: path.to_string(),
            similarity,
        }
    }

    #[test]
    fn test_single_card() {
        let view = ResultsView::from_hits(&[hit("catalog/a.jpg", 0.873)]);
        let cards = view.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].image_url, "/catalog/a.jpg");
        assert_eq!(cards[0].name, "a.jpg");
        assert_eq!(cards[0].similarity_label, "0.873");
        assert_eq!(cards[0].alt_text(), "Producto similar a.jpg");
    }

    #[test]
    fn test_one_card_per_hit_in_order() {
        let hits = vec![
            hit("catalog/x.jpg", 0.9),
            hit("catalog/y.jpg", 0.81234),
            hit("catalog/z.jpg", 0.0),
        ];
        let view = ResultsView::from_hits(&hits);
        let labels: Vec<&str> = view.cards().iter().map(|c| c.similarity_label.as_str()).collect();
        assert_eq!(labels, vec!["0.900", "0.812", "0.000"]);
    }

    #[test]
    fn test_empty_results() {
        let view = ResultsView::from_hits(&[]);
        assert_eq!(view, ResultsView::Empty);
        assert!(view.cards().is_empty());
    }

    #[test]
    fn test_similarity_label_rounding() {
        assert_eq!(similarity_label(0.8735), "0.874");
        assert_eq!(similarity_label(1.0), "1.000");
    }

    #[test]
    fn test_image_url_with_leading_slash() {
        assert_eq!(image_url("/catalog/a.jpg"), "/catalog/a.jpg");
    }

    #[test]
    fn test_display_name_without_directory() {
        assert_eq!(display_name("a.jpg"), "a.jpg");
        assert_eq!(display_name("catalog_data/shoes/red.png"), "red.png");
    }
}
