use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::company::currency_symbol;
use super::fx::RateSource;

/// A currency as shown on the chart: ISO-like code plus symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCurrency {
    pub code: String,
    pub symbol: String,
}

impl DisplayCurrency {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into().to_uppercase(),
            symbol: symbol.into(),
        }
    }

    /// Display currency with the default symbol for its code.
    pub fn from_code(code: &str) -> Self {
        Self::new(code, currency_symbol(code))
    }
}

/// Whether the display prices are in the requested display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConversionStatus {
    /// Prices were converted (or needed no conversion).
    Converted { via: RateSource },
    /// Conversion failed; prices are left in the local currency.
    Fallback { reason: String },
}

/// One chart point: the local close, the display price and the PBR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationPoint {
    pub date: NaiveDate,

    /// Close in the local currency.
    pub close: f64,

    /// Close in the effective display currency. `None` when not a finite number.
    pub display_price: Option<f64>,

    /// Price-to-book ratio, computed in the local currency before conversion.
    pub price_to_book: Option<f64>,
}

/// The pipeline's output: one point per trading day plus the currency the
/// display prices are actually expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSeries {
    pub points: Vec<ValuationPoint>,

    /// Effective currency of `display_price`. Equals the local currency
    /// when conversion fell back.
    pub currency: DisplayCurrency,

    pub conversion: ConversionStatus,
}

impl ValuationSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn is_converted(&self) -> bool {
        matches!(self.conversion, ConversionStatus::Converted { .. })
    }

    /// True if at least one point carries a ratio.
    pub fn has_price_to_book(&self) -> bool {
        self.points.iter().any(|p| p.price_to_book.is_some())
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize valuation series: {e}")))
    }
}
