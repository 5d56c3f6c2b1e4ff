use crate::forecast::slot::SlotKey;
use crate::repositories::energy::EnergyReading;

/// Statistics over all readings matching one slot key.
///
/// `sample_count == 0` is a valid result meaning "no history for this slot";
/// `min_kwh`/`max_kwh` are `None` in that case and callers must branch on
/// the count before reading them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotAggregate {
    pub average_kwh: f64,
    pub min_kwh: Option<f64>,
    pub max_kwh: Option<f64>,
    pub sample_count: usize,
}

impl SlotAggregate {
    pub fn empty() -> Self {
        Self {
            average_kwh: 0.0,
            min_kwh: None,
            max_kwh: None,
            sample_count: 0,
        }
    }
}

/// Scan `readings` for those bucketed into `target` and compute
/// count/mean/min/max of their kWh values.
///
/// Mean, min and max are selected over the raw values and only rounded to
/// four decimals afterwards, for display stability.
pub fn aggregate_slot(readings: &[EnergyReading], target: SlotKey) -> SlotAggregate {
    let values: Vec<f64> = readings
        .iter()
        .filter(|r| SlotKey::for_reading(r) == target)
        .map(|r| r.kwh)
        .collect();

    if values.is_empty() {
        return SlotAggregate::empty();
    }

    let sum: f64 = values.iter().sum();
    let average = sum / values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    SlotAggregate {
        average_kwh: round4(average),
        min_kwh: Some(round4(min)),
        max_kwh: Some(round4(max)),
        sample_count: values.len(),
    }
}

/// Round to 4 decimal places, half away from zero.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
