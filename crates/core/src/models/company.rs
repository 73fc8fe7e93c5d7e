use serde::{Deserialize, Serialize};

/// Raw company metadata as returned by the provider.
///
/// Every field is optional: providers are flaky about fundamentals and a
/// failed lookup is represented by `TickerMetadata::default()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerMetadata {
    pub short_name: Option<String>,
    pub currency: Option<String>,
    pub currency_symbol: Option<String>,
    /// Book value per share, in the local currency.
    pub book_value: Option<f64>,
}

/// Company snapshot with all defaults applied. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySnapshot {
    /// Display name (e.g., "Meta Platforms, Inc."), defaults to the ticker.
    pub name: String,

    /// Local (trading) currency code, uppercased (e.g., "JPY").
    pub currency: String,

    /// Local currency symbol (e.g., "¥").
    pub currency_symbol: String,

    /// Book value per share in the local currency, if the provider had one.
    pub book_value_per_share: Option<f64>,
}

impl CompanySnapshot {
    /// Build a snapshot from provider metadata.
    ///
    /// Missing name → the ticker itself. Missing currency → `default_currency`.
    /// Missing symbol → [`currency_symbol`] of the resolved currency.
    pub fn from_metadata(ticker: &str, metadata: &TickerMetadata, default_currency: &str) -> Self {
        let name = metadata
            .short_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(ticker)
            .to_string();

        let currency = metadata
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(default_currency)
            .to_uppercase();

        let currency_symbol = metadata
            .currency_symbol
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| currency_symbol(&currency));

        Self {
            name,
            currency,
            currency_symbol,
            book_value_per_share: metadata.book_value,
        }
    }
}

/// Symbol for a currency code. Unknown codes render as the uppercased code.
pub fn currency_symbol(code: &str) -> String {
    let upper = code.to_uppercase();
    match upper.as_str() {
        "USD" => "$".to_string(),
        "JPY" => "¥".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        _ => upper,
    }
}
