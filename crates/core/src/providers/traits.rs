use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::company::TickerMetadata;
use crate::models::price::RawPriceBar;

/// Which slice of history to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryPeriod {
    /// Provider lookback keyword, e.g. "max" or "5y".
    Lookback(String),
    /// Inclusive calendar range.
    Range { from: NaiveDate, to: NaiveDate },
}

/// Narrow boundary to the market data provider.
///
/// Two data operations only: company metadata and daily history. FX
/// quotes are requested through `fetch_history` with a synthetic pair
/// symbol (e.g. `USDJPY=X`), so swapping the provider swaps both.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Company metadata snapshot for a ticker.
    async fn fetch_metadata(&self, ticker: &str) -> Result<TickerMetadata, CoreError>;

    /// Daily bars for a ticker or FX pair symbol, in provider order.
    /// An empty Vec is a valid "no data" answer, distinct from an error.
    async fn fetch_history(
        &self,
        symbol: &str,
        period: &HistoryPeriod,
    ) -> Result<Vec<RawPriceBar>, CoreError>;
}
