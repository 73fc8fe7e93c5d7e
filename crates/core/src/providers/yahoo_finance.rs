use async_trait::async_trait;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};
use chrono_tz::Tz;
use log::debug;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use super::traits::{HistoryPeriod, MarketDataProvider};
use crate::errors::CoreError;
use crate::models::company::TickerMetadata;
use crate::models::price::RawPriceBar;

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance provider for equities and FX pairs.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities (`META`, `7203.T`, ...) and synthetic
///   FX pair symbols (`EURUSD=X`, `USDJPY=X`).
/// - **Data**: quote summary (name, book value per share) + daily OHLCV.
///
/// Prices are returned in the instrument's trading currency; conversion
/// is the resolver's job.
///
/// **Note**: Not WASM-compatible (uses native reqwest/tokio connectors).
pub struct YahooFinanceProvider {
    // Ticker info caches its crumb token inside the connector.
    connector: Mutex<yahoo_finance_api::YahooConnector>,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| api_error(format!(
            "Failed to create connector: {e}"
        )))?;
        Ok(Self {
            connector: Mutex::new(connector),
        })
    }

    /// Midnight UTC of `date` as `time::OffsetDateTime`.
    pub fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, CoreError> {
        let month = time::Month::try_from(date.month() as u8)
            .map_err(|e| api_error(format!("Invalid month in {date}: {e}")))?;
        let odt = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
            .map_err(|e| api_error(format!("Invalid date {date}: {e}")))?
            .with_hms(0, 0, 0)
            .map_err(|e| api_error(format!("Invalid time for {date}: {e}")))?
            .assume_utc();
        Ok(odt)
    }

    fn to_raw_bars(quotes: &[yahoo_finance_api::Quote], clock: ExchangeClock) -> Vec<RawPriceBar> {
        quotes
            .iter()
            .filter_map(|q| {
                Some(RawPriceBar {
                    timestamp: clock.localize(q.timestamp as i64)?,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: q.volume as u64,
                })
            })
            .collect()
    }
}

/// The clock an exchange stamps its daily bars with.
///
/// Yahoo stamps each daily bar at the session start in exchange time
/// (FX pairs at 00:00 Europe/London), so the bar's calendar day only
/// survives if the timestamp is read in that zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExchangeClock {
    /// IANA zone; daylight saving follows each bar's own date.
    Zone(Tz),
    /// Offset in effect when the data was requested.
    Fixed(FixedOffset),
}

impl ExchangeClock {
    /// Prefer the named zone, fall back to the response's `gmtoffset` (seconds).
    pub fn from_metadata(timezone_name: &str, gmtoffset: i32) -> Self {
        match timezone_name.parse::<Tz>() {
            Ok(tz) => Self::Zone(tz),
            Err(e) => {
                debug!("{PROVIDER}: unknown exchange timezone '{timezone_name}' ({e}), using offset {gmtoffset}s");
                Self::Fixed(FixedOffset::east_opt(gmtoffset).unwrap_or_else(|| Utc.fix()))
            }
        }
    }

    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Unix timestamp (seconds) in exchange time.
    pub fn localize(&self, ts: i64) -> Option<DateTime<FixedOffset>> {
        let instant = DateTime::<Utc>::from_timestamp(ts, 0)?;
        Some(match self {
            Self::Zone(tz) => {
                let local = instant.with_timezone(tz);
                local.with_timezone(&local.offset().fix())
            }
            Self::Fixed(offset) => instant.with_timezone(offset),
        })
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn fetch_metadata(&self, ticker: &str) -> Result<TickerMetadata, CoreError> {
        let mut connector = self.connector.lock().await;

        let summary = connector
            .get_ticker_info(ticker)
            .await
            .map_err(|e| api_error(format!("Failed to fetch ticker info for {ticker}: {e}")))?;

        let data = summary
            .quote_summary
            .and_then(|qs| qs.result)
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| api_error(format!("Empty ticker info for {ticker}")))?;

        let book_value = data
            .default_key_statistics
            .as_ref()
            .and_then(|ks| ks.book_value);
        let short_name = data
            .quote_type
            .as_ref()
            .and_then(|qt| qt.short_name.clone().or(qt.long_name.clone()));
        let financial_currency = data
            .financial_data
            .as_ref()
            .and_then(|fd| fd.financial_currency.clone());

        // The trading currency lives in the chart metadata, not in the
        // quote summary. Fall back to the reporting currency.
        let trading_currency = match connector.get_latest_quotes(ticker, "1d").await {
            Ok(resp) => resp.metadata().ok().and_then(|m| m.currency.clone()),
            Err(e) => {
                debug!("{PROVIDER}: no latest quote metadata for {ticker}: {e}");
                None
            }
        };

        Ok(TickerMetadata {
            short_name,
            currency: trading_currency.or(financial_currency),
            currency_symbol: None,
            book_value,
        })
    }

    async fn fetch_history(
        &self,
        symbol: &str,
        period: &HistoryPeriod,
    ) -> Result<Vec<RawPriceBar>, CoreError> {
        let connector = self.connector.lock().await;

        let resp = match period {
            HistoryPeriod::Lookback(range) => {
                debug!("{PROVIDER}: {symbol} daily history, range={range}");
                connector
                    .get_quote_range(symbol, "1d", range)
                    .await
                    .map_err(|e| api_error(format!("Failed to fetch history for {symbol}: {e}")))?
            }
            HistoryPeriod::Range { from, to } => {
                debug!("{PROVIDER}: {symbol} daily history, {from}..={to}");
                let start = Self::to_offset_datetime(*from)?;
                let end = Self::to_offset_datetime(*to + chrono::Duration::days(1))?; // inclusive end
                connector
                    .get_quote_history(symbol, start, end)
                    .await
                    .map_err(|e| {
                        api_error(format!("Failed to fetch history range for {symbol}: {e}"))
                    })?
            }
        };

        let quotes = resp
            .quotes()
            .map_err(|e| api_error(format!("Failed to parse quotes for {symbol}: {e}")))?;

        let clock = match resp.metadata() {
            Ok(meta) => ExchangeClock::from_metadata(&meta.exchange_timezone_name, meta.gmtoffset),
            Err(e) => {
                debug!("{PROVIDER}: no chart metadata for {symbol}, reading bars in UTC: {e}");
                ExchangeClock::utc()
            }
        };

        Ok(Self::to_raw_bars(&quotes, clock))
    }
}

fn api_error(message: String) -> CoreError {
    CoreError::Api {
        provider: PROVIDER.into(),
        message,
    }
}
