use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Everything a renderer needs to draw the price line.
///
/// Labels and numbers are final; renderers only draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend: String,

    /// (date, display price) pairs, ascending by date.
    pub points: Vec<(NaiveDate, f64)>,
}

impl ChartSpec {
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize chart: {e}")))
    }
}

/// Hover tooltip content for a single trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub date: NaiveDate,
    pub display_price: Option<f64>,
    pub currency_symbol: String,
    pub price_to_book: Option<f64>,
}

impl std::fmt::Display for Tooltip {
    /// `YYYY年MM月DD日`, then `終値: ...`, then `PBR: x.xx倍` only when a ratio exists.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let price_text = match self.display_price {
            Some(price) if price.is_finite() => {
                format!("{}{}", self.currency_symbol, format_thousands(price, 2))
            }
            _ => "N/A".to_string(),
        };
        write!(f, "{}\n終値: {}", self.date.format("%Y年%m月%d日"), price_text)?;
        if let Some(pbr) = self.price_to_book.filter(|v| v.is_finite()) {
            write!(f, "\nPBR: {pbr:.2}倍")?;
        }
        Ok(())
    }
}

/// Fixed-point formatting with `,` thousands separators, e.g. `1,234.50`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }

    // "-0.00" is not a useful thing to show
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
