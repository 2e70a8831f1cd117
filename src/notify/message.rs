use crate::prices::{Decision, Reading};

/// 通知本文を組み立てる（燃料 → CO2 の順、1行ずつ）
///
/// どちらも low でなければ `None`。
pub fn compose(decision: &Decision, reading: &Reading) -> Option<String> {
    if !decision.any() {
        return None;
    }

    let mut message = String::new();
    if decision.fuel_low {
        message.push_str(&format!("Fuel price is low: {}\n", reading.fuel));
    }
    if decision.co2_low {
        message.push_str(&format!("CO2 price is low: {}\n", reading.co2));
    }
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> Reading {
        Reading {
            timestamp: "14:00".to_string(),
            fuel: 350,
            co2: 90,
        }
    }

    #[test]
    fn test_both_lines_fuel_first() {
        let decision = Decision {
            fuel_low: true,
            co2_low: true,
        };
        assert_eq!(
            compose(&decision, &reading()).unwrap(),
            "Fuel price is low: 350\nCO2 price is low: 90\n"
        );
    }

    #[test]
    fn test_co2_only() {
        let decision = Decision {
            fuel_low: false,
            co2_low: true,
        };
        assert_eq!(
            compose(&decision, &reading()).unwrap(),
            "CO2 price is low: 90\n"
        );
    }

    #[test]
    fn test_nothing_low() {
        assert!(compose(&Decision::default(), &reading()).is_none());
    }
}
