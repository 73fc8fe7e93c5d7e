use thiserror::Error;

/// Unified error type for the entire pbr-chart-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    // ── Pipeline ────────────────────────────────────────────────────
    #[error("No price history available for {ticker}")]
    EmptyPriceHistory { ticker: String },

    #[error("Exchange rate unavailable: tried {direct} and {inverse}")]
    ExchangeRateUnavailable { direct: String, inverse: String },

    #[error("Conversion factor series is empty, nothing to align")]
    EmptyConversionSeries,

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Rendering ───────────────────────────────────────────────────
    #[error("Render error: {0}")]
    Render(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Render(e.to_string())
    }
}
