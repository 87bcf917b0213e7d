use crate::domain::DriveVariant;
use crate::drive::{SpeedInputs, SpeedRule};
use crate::error::SelectionError;

/// Frequency-converter drive: the base speed itself, if the fan is rated for it.
///
/// A record without a rated minimum speed has no lower limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableFrequency;

impl SpeedRule for VariableFrequency {
    fn variant(&self) -> DriveVariant {
        DriveVariant::VariableFrequency
    }

    fn choose_speed(&self, inputs: &SpeedInputs<'_>) -> Result<f64, SelectionError> {
        let min = inputs.rated_min.unwrap_or(0.0);
        let speed = inputs.base_speed;
        if speed > 0.0 && speed >= min && speed <= inputs.rated_max {
            Ok(speed)
        } else {
            Err(self.no_speed(inputs))
        }
    }
}
