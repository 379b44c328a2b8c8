//! Display-only confidence heuristic
//!
//! The score grows with the distance of the normalized prediction from the
//! midpoint of the fitted range. It is **not** a statistical confidence
//! interval and says nothing about forecast accuracy; it exists so callers can
//! show a rough certainty hint next to each forecast price.
//!
//! `confidence(v) = round((0.7 + |v - 0.5| * 0.3) * 100)`
//!
//! Predictions outside `[0, 1]` are clamped first, so scores saturate at the
//! formula's natural bounds of 70 and 85.

/// Score given to a prediction sitting exactly on the midpoint
pub const BASE_CONFIDENCE: f64 = 0.7;

/// Weight of the distance from the midpoint
pub const DISTANCE_WEIGHT: f64 = 0.3;

/// Lowest score the heuristic produces
pub const MIN_CONFIDENCE: u8 = 70;

/// Highest score the heuristic produces
pub const MAX_CONFIDENCE: u8 = 85;

/// Confidence percentage for a normalized prediction
pub fn confidence_score(normalized_prediction: f64) -> u8 {
    let value = if normalized_prediction.is_nan() {
        0.5
    } else {
        normalized_prediction.clamp(0.0, 1.0)
    };

    let score = ((BASE_CONFIDENCE + (value - 0.5).abs() * DISTANCE_WEIGHT) * 100.0).round();
    score.clamp(MIN_CONFIDENCE as f64, MAX_CONFIDENCE as f64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_and_extremes() {
        assert_eq!(confidence_score(0.5), 70);
        assert_eq!(confidence_score(0.0), 85);
        assert_eq!(confidence_score(1.0), 85);
        assert_eq!(confidence_score(0.9), 82);
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(confidence_score(-3.0), 85);
        assert_eq!(confidence_score(7.5), 85);
        assert_eq!(confidence_score(f64::NAN), 70);
    }
}
