use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Program configuration. Fixed in source; there are no flags or config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Ticker in the provider's namespace, e.g. "META", "7203.T", "9107.T".
    pub ticker: String,

    /// The currency all prices are converted into for charting (e.g., "USD").
    pub display_currency: String,

    /// Lookback passed to the provider ("max" for everything available, "5y", ...).
    pub history_range: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ticker: "META".to_string(),
            display_currency: "USD".to_string(),
            history_range: "max".to_string(),
        }
    }
}

impl Settings {
    /// Check and normalize the settings. Currency codes are uppercased.
    pub fn validate(mut self) -> Result<Self, CoreError> {
        self.ticker = self.ticker.trim().to_string();
        if self.ticker.is_empty() {
            return Err(CoreError::ValidationError("Ticker must not be empty".into()));
        }

        self.display_currency = normalize_currency_code(&self.display_currency)?;

        self.history_range = self.history_range.trim().to_lowercase();
        if self.history_range.is_empty() {
            return Err(CoreError::ValidationError("History range must not be empty".into()));
        }
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()
    }
}

/// Currency code must be a 3-letter alphabetic string. Returns it uppercased.
pub fn normalize_currency_code(code: &str) -> Result<String, CoreError> {
    let trimmed = code.trim().to_uppercase();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::ValidationError(format!(
            "Invalid currency code '{code}': must be exactly 3 ASCII letters (e.g., USD, EUR, JPY)"
        )));
    }
    Ok(trimmed)
}
