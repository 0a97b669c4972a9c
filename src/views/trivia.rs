//! Trivia accuracy ring

use super::STAT_ERROR_TEXT;
use crate::backend::schema::TriviaStats;
use crate::backend::{fetch, Endpoint, FetchResult};
use crate::dashboard::Dashboard;
use crate::document::{ids, Document};

/// Accuracy limited to 0-100, NaN as 0
fn clamp_accuracy(accuracy: f64) -> f64 {
    if accuracy.is_nan() {
        return 0.0;
    }
    accuracy.clamp(0.0, 100.0)
}

/// Ring sweep in degrees; accuracy is clamped to 0-100 first
pub fn sweep_degrees(accuracy: f64) -> f64 {
    clamp_accuracy(accuracy) * 3.6
}

/// Inline style for the progress ring
pub fn circle_style(accuracy: f64) -> String {
    format!(
        "background: conic-gradient(var(--primary) {}deg, rgba(255,255,255,0.1) 0deg)",
        sweep_degrees(accuracy)
    )
}

/// Label in the middle of the ring, e.g. `73%`, clamped like the ring
pub fn accuracy_text(accuracy: f64) -> String {
    format!("{}%", clamp_accuracy(accuracy).round() as i64)
}

pub async fn load(dashboard: &Dashboard) -> FetchResult<()> {
    let stats: TriviaStats = fetch(dashboard.backend(), Endpoint::Trivia).await?;

    let mut doc = dashboard.document().write().await;
    doc.set_style(ids::TRIVIA_CIRCLE, circle_style(stats.accuracy));
    doc.set_text(ids::TRIVIA_VALUE, accuracy_text(stats.accuracy));

    Ok(())
}

/// Empty ring with the placeholder label
pub fn show_error(doc: &mut Document) {
    doc.set_style(ids::TRIVIA_CIRCLE, circle_style(0.0));
    doc.set_text(ids::TRIVIA_VALUE, STAT_ERROR_TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_maps_percent_to_degrees() {
        assert_eq!(sweep_degrees(0.0), 0.0);
        assert_eq!(sweep_degrees(50.0), 180.0);
        assert_eq!(sweep_degrees(100.0), 360.0);
        assert!((sweep_degrees(72.5) - 261.0).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_is_clamped() {
        assert_eq!(sweep_degrees(-5.0), 0.0);
        assert_eq!(sweep_degrees(140.0), 360.0);
        assert_eq!(sweep_degrees(f64::NAN), 0.0);
    }

    #[test]
    fn test_circle_style_and_label() {
        assert_eq!(
            circle_style(25.0),
            "background: conic-gradient(var(--primary) 90deg, rgba(255,255,255,0.1) 0deg)"
        );
        assert_eq!(accuracy_text(72.6), "73%");
        assert_eq!(accuracy_text(0.0), "0%");
    }

    #[test]
    fn test_label_is_clamped_like_the_ring() {
        assert_eq!(accuracy_text(140.0), "100%");
        assert_eq!(accuracy_text(-0.3), "0%");
        assert_eq!(accuracy_text(-0.0), "0%");
        assert_eq!(accuracy_text(f64::NAN), "0%");
    }

    #[test]
    fn test_error_empties_the_ring() {
        let mut doc = Document::dashboard();
        doc.set_style(ids::TRIVIA_CIRCLE, circle_style(80.0));
        doc.set_text(ids::TRIVIA_VALUE, accuracy_text(80.0));

        show_error(&mut doc);

        assert_eq!(doc.get(ids::TRIVIA_CIRCLE).unwrap().style, Some(circle_style(0.0)));
        assert_eq!(doc.inner_html(ids::TRIVIA_VALUE), "—");
    }
}
