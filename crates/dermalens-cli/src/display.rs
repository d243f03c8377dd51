//! Human-readable rendering of classification outcomes.

use dermalens_core::{ClassifyOutcome, Prediction};

const BAR_WIDTH: usize = 24;

pub fn print_outcome(outcome: &ClassifyOutcome) {
    match outcome {
        ClassifyOutcome::Success(resp) => {
            println!("{}", resp.filename);
            for (rank, p) in resp.predictions.iter().enumerate() {
                println!("  {}. {}", rank + 1, format_prediction(p));
            }
        }
        ClassifyOutcome::Failure(f) => {
            eprintln!("error: {}", f.error);
        }
    }
}

fn format_prediction(p: &Prediction) -> String {
    format!(
        "{:<55} {:>5.1}%  {}",
        p.label,
        p.confidence * 100.0,
        confidence_bar(p.confidence)
    )
}

/// Fixed-width bar proportional to confidence.
fn confidence_bar(confidence: f32) -> String {
    let filled = ((confidence.clamp(0.0, 1.0) * BAR_WIDTH as f32).round()) as usize;
    let mut bar = String::with_capacity(BAR_WIDTH);
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '.' });
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_fixed_width() {
        for c in [0.0, 0.25, 0.5, 0.99, 1.0] {
            assert_eq!(confidence_bar(c).len(), BAR_WIDTH);
        }
    }

    #[test]
    fn bar_scales_with_confidence() {
        assert_eq!(confidence_bar(0.0), ".".repeat(BAR_WIDTH));
        assert_eq!(confidence_bar(1.0), "#".repeat(BAR_WIDTH));
        let half = confidence_bar(0.5);
        assert_eq!(half.matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn out_of_range_confidence_is_clamped() {
        assert_eq!(confidence_bar(2.0), "#".repeat(BAR_WIDTH));
        assert_eq!(confidence_bar(-1.0), ".".repeat(BAR_WIDTH));
    }

    #[test]
    fn formatted_prediction_shows_percentage() {
        let p = Prediction {
            label: "Urticaria Hives".into(),
            confidence: 0.914,
        };
        let line = format_prediction(&p);
        assert!(line.contains("Urticaria Hives"));
        assert!(line.contains("91.4%"));
    }
}
