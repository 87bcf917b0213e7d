use crate::domain::DriveVariant;
use crate::drive::{SpeedInputs, SpeedRule, smallest_in_range};
use crate::error::SelectionError;

/// Synchronous speeds of 8/6/4/2-pole mains motors (rpm).
pub const STANDARD_SPEEDS_RPM: [f64; 4] = [740.0, 980.0, 1450.0, 2900.0];

/// Direct drive on a mains-fed motor.
///
/// Accepts the smallest listed speed in `[base, N_max]`. If none fits, the lower
/// bound is relaxed once to `base / sqrt(1 + down/100)`: running slower drops the
/// pressure by at most the allowed undershoot.
#[derive(Debug, Clone)]
pub struct FixedSpeed {
    speeds: Vec<f64>,
}

impl FixedSpeed {
    pub fn standard() -> Self {
        Self::new(STANDARD_SPEEDS_RPM.to_vec())
    }

    pub fn new(speeds: Vec<f64>) -> Self {
        Self { speeds }
    }
}

impl SpeedRule for FixedSpeed {
    fn variant(&self) -> DriveVariant {
        DriveVariant::FixedSpeed
    }

    fn choose_speed(&self, inputs: &SpeedInputs<'_>) -> Result<f64, SelectionError> {
        let relaxed = inputs.base_speed / (1.0 + inputs.fluctuation_down / 100.0).sqrt();
        smallest_in_range(&self.speeds, inputs.base_speed, inputs.rated_max)
            .or_else(|| smallest_in_range(&self.speeds, relaxed, inputs.rated_max))
            .ok_or_else(|| self.no_speed(inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(base_speed: f64, rated_max: f64, fluctuation_down: f64) -> SpeedInputs<'static> {
        SpeedInputs {
            model: "VR-80",
            rated_min: None,
            rated_max,
            base_speed,
            fluctuation_down,
        }
    }

    #[test]
    fn picks_smallest_speed_above_base() {
        let rule = FixedSpeed::standard();
        assert_eq!(rule.choose_speed(&inputs(1449.0, 1461.0, 10.0)), Ok(1450.0));
        assert_eq!(rule.choose_speed(&inputs(700.0, 3000.0, 0.0)), Ok(740.0));
    }

    #[test]
    fn relaxes_lower_bound_once() {
        let rule = FixedSpeed::standard();
        // 1500 / sqrt(1.1) ≈ 1430, so 1450 becomes admissible under N_max = 1460.
        assert_eq!(rule.choose_speed(&inputs(1500.0, 1460.0, 10.0)), Ok(1450.0));
        // Without undershoot allowance nothing fits.
        assert!(matches!(
            rule.choose_speed(&inputs(1500.0, 1460.0, 0.0)),
            Err(SelectionError::NoAdmissibleSpeed { .. })
        ));
    }
}
