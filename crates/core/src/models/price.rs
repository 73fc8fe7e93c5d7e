use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single price data point (date → price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// A daily bar exactly as the market data provider returned it.
///
/// The timestamp keeps the provider's timezone; duplicates and
/// out-of-order bars are possible.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPriceBar {
    pub timestamp: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// A normalized daily bar, keyed by calendar day (no timezone).
/// Prices are in the instrument's local currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Strip the timezone: the bar's date is the calendar day in the
    /// timezone the provider reported it in.
    pub fn from_raw(raw: &RawPriceBar) -> Self {
        Self {
            date: raw.timestamp.date_naive(),
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
        }
    }
}

/// Normalize a raw provider history into one bar per calendar day.
///
/// - Timezones are stripped (see [`PriceBar::from_raw`]).
/// - Duplicate dates collapse to the FIRST occurrence in provider order.
/// - The result is sorted ascending by date.
pub fn normalize_history(raw: &[RawPriceBar]) -> Vec<PriceBar> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut bars: Vec<PriceBar> = raw
        .iter()
        .map(PriceBar::from_raw)
        .filter(|bar| seen.insert(bar.date))
        .collect();
    // Stable sort; dates are unique at this point anyway.
    bars.sort_by_key(|b| b.date);
    bars
}

/// Convert a FX pair history into (date, quote) points using the close.
/// Same normalization rules as [`normalize_history`].
pub fn closes(raw: &[RawPriceBar]) -> Vec<PricePoint> {
    normalize_history(raw)
        .into_iter()
        .map(|bar| PricePoint {
            date: bar.date,
            price: bar.close,
        })
        .collect()
}
