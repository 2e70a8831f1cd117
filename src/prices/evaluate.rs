use crate::config::Thresholds;

use super::types::{Decision, Reading};

/// 閾値未満（同値は含まない）なら low
pub fn evaluate(reading: &Reading, thresholds: &Thresholds) -> Decision {
    Decision {
        fuel_low: reading.fuel < thresholds.fuel,
        co2_low: reading.co2 < thresholds.co2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(fuel: i64, co2: i64) -> Reading {
        Reading {
            timestamp: "14:00".to_string(),
            fuel,
            co2,
        }
    }

    #[test]
    fn test_both_below() {
        let decision = evaluate(&reading(350, 90), &Thresholds::default());
        assert_eq!(decision, Decision { fuel_low: true, co2_low: true });
        assert!(decision.any());
    }

    #[test]
    fn test_both_above() {
        let decision = evaluate(&reading(450, 150), &Thresholds::default());
        assert_eq!(decision, Decision::default());
        assert!(!decision.any());
    }

    #[test]
    fn test_equal_is_not_low() {
        let decision = evaluate(&reading(400, 120), &Thresholds::default());
        assert_eq!(decision, Decision::default());
    }

    #[test]
    fn test_flags_are_independent() {
        let thresholds = Thresholds { fuel: 500, co2: 100 };
        assert_eq!(
            evaluate(&reading(499, 100), &thresholds),
            Decision { fuel_low: true, co2_low: false }
        );
        assert_eq!(
            evaluate(&reading(500, 99), &thresholds),
            Decision { fuel_low: false, co2_low: true }
        );
    }
}
