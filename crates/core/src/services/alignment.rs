use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::fx::ConversionFactors;

/// Align conversion factors onto `targets` (the price series' dates).
///
/// For each target date, in order of preference:
/// 1. the factor quoted on that exact date;
/// 2. forward fill: the latest factor quoted before it;
/// 3. backward fill: the earliest factor overall (leading gap only).
///
/// Returns one finite positive value per target date, in target order.
/// An empty factor series cannot be filled and is an error.
pub fn align_to_dates(
    factors: &ConversionFactors,
    targets: &[NaiveDate],
) -> Result<Vec<f64>, CoreError> {
    let earliest = factors.first().ok_or(CoreError::EmptyConversionSeries)?;

    Ok(targets
        .iter()
        .map(|date| factors.last_on_or_before(*date).unwrap_or(earliest))
        .collect())
}
