use crate::catalog::BeltScheme;
use crate::domain::DriveVariant;
use crate::drive::{SpeedInputs, SpeedRule, smallest_in_range};
use crate::error::SelectionError;

/// Belt transmission: the smallest tabulated speed for the model in `[base, N_max]`.
/// No relaxed retry.
#[derive(Debug, Clone, Copy)]
pub struct BeltRatio<'a> {
    scheme: &'a BeltScheme,
}

impl<'a> BeltRatio<'a> {
    pub fn new(scheme: &'a BeltScheme) -> Self {
        Self { scheme }
    }
}

impl SpeedRule for BeltRatio<'_> {
    fn variant(&self) -> DriveVariant {
        DriveVariant::BeltRatio
    }

    fn choose_speed(&self, inputs: &SpeedInputs<'_>) -> Result<f64, SelectionError> {
        smallest_in_range(self.scheme.speeds_for(inputs.model), inputs.base_speed, inputs.rated_max)
            .ok_or_else(|| self.no_speed(inputs))
    }
}
