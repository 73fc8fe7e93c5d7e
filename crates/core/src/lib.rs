pub mod errors;
pub mod models;
pub mod providers;
pub mod render;
pub mod services;

use log::{info, warn};

use errors::CoreError;
use models::{
    chart::ChartSpec,
    company::{CompanySnapshot, TickerMetadata},
    price::{normalize_history, PriceBar},
    settings::Settings,
    valuation::{ConversionStatus, DisplayCurrency, ValuationSeries},
};
use providers::traits::{HistoryPeriod, MarketDataProvider};
use render::traits::{ChartRenderer, HoverHandler};
use services::{
    chart_service::ChartService, fx_service::ExchangeRateResolver,
    valuation_service::ValuationService,
};

/// Everything derived for one run: who, what currency, and the series.
#[derive(Debug, Clone)]
pub struct ValuationReport {
    pub ticker: String,
    pub snapshot: CompanySnapshot,
    pub series: ValuationSeries,

    /// One line per fallback taken (metadata, book value, FX).
    pub warnings: Vec<String>,
}

/// Main entry point for the pbr-chart core library.
/// Holds the provider, settings and all services needed for one run.
#[must_use]
pub struct ValuationChart {
    provider: Box<dyn MarketDataProvider>,
    settings: Settings,
    resolver: ExchangeRateResolver,
    valuation_service: ValuationService,
    chart_service: ChartService,
}

impl std::fmt::Debug for ValuationChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValuationChart")
            .field("provider", &self.provider.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl ValuationChart {
    /// Build with any provider. Settings are validated and normalized.
    pub fn new(provider: Box<dyn MarketDataProvider>, settings: Settings) -> Result<Self, CoreError> {
        let settings = settings.validate()?;
        Ok(Self {
            resolver: ExchangeRateResolver::new(&settings.display_currency),
            valuation_service: ValuationService::new(),
            chart_service: ChartService::new(),
            provider,
            settings,
        })
    }

    /// Build with the Yahoo Finance provider (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_yahoo(settings: Settings) -> Result<Self, CoreError> {
        let provider = providers::yahoo_finance::YahooFinanceProvider::new()?;
        Self::new(Box::new(provider), settings)
    }

    /// Replace the hover lookup policy (e.g. a tolerance window).
    pub fn with_chart_service(mut self, chart_service: ChartService) -> Self {
        self.chart_service = chart_service;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Pipeline ────────────────────────────────────────────────────

    /// Company snapshot. A failed metadata lookup is not fatal: defaults
    /// apply (name = ticker, currency = display currency).
    pub async fn fetch_snapshot(&self, warnings: &mut Vec<String>) -> CompanySnapshot {
        let ticker = &self.settings.ticker;
        info!("Fetching company metadata for {ticker}...");

        let metadata = match self.provider.fetch_metadata(ticker).await {
            Ok(metadata) => metadata,
            Err(e) => {
                let msg = format!("Company metadata unavailable for {ticker}, using defaults: {e}");
                warn!("{msg}");
                warnings.push(msg);
                TickerMetadata::default()
            }
        };

        CompanySnapshot::from_metadata(ticker, &metadata, &self.settings.display_currency)
    }

    /// Normalized daily bars. Empty history aborts the run.
    pub async fn fetch_price_bars(&self) -> Result<Vec<PriceBar>, CoreError> {
        let ticker = &self.settings.ticker;
        info!("Fetching price history for {ticker}...");

        let period = HistoryPeriod::Lookback(self.settings.history_range.clone());
        let raw = self.provider.fetch_history(ticker, &period).await?;
        let bars = normalize_history(&raw);
        if bars.is_empty() {
            return Err(CoreError::EmptyPriceHistory {
                ticker: ticker.clone(),
            });
        }
        info!(
            "{} daily bars for {ticker} ({} → {})",
            bars.len(),
            bars[0].date,
            bars[bars.len() - 1].date
        );
        Ok(bars)
    }

    /// Run the whole pipeline: fetch → normalize → ratio → resolve FX →
    /// align → convert. Only an empty price history is an error.
    pub async fn build_report(&self) -> Result<ValuationReport, CoreError> {
        let mut warnings = Vec::new();

        let snapshot = self.fetch_snapshot(&mut warnings).await;
        let bars = self.fetch_price_bars().await?;

        if ValuationService::usable_book_value(snapshot.book_value_per_share).is_none() {
            let msg = format!(
                "Book value per share unavailable for {} ({:?}), skipping PBR",
                self.settings.ticker, snapshot.book_value_per_share
            );
            warn!("{msg}");
            warnings.push(msg);
        }

        let from = bars[0].date;
        let to = bars[bars.len() - 1].date;
        let factors = self
            .resolver
            .resolve(self.provider.as_ref(), &snapshot.currency, from, to)
            .await;

        let target = DisplayCurrency::from_code(self.resolver.display_currency());
        let series = self
            .valuation_service
            .compute(&bars, &snapshot, &target, factors);

        if let ConversionStatus::Fallback { reason } = &series.conversion {
            warnings.push(format!(
                "Could not convert to {}, showing prices in {}: {reason}",
                target.code, series.currency.code
            ));
        }

        Ok(ValuationReport {
            ticker: self.settings.ticker.clone(),
            snapshot,
            series,
            warnings,
        })
    }

    // ── Chart ───────────────────────────────────────────────────────

    #[must_use]
    pub fn chart_spec(&self, report: &ValuationReport) -> ChartSpec {
        self.chart_service
            .chart_spec(&report.ticker, &report.snapshot, &report.series)
    }

    /// Hover handler owning a copy of the series; in-memory lookups only.
    pub fn hover_handler(&self, report: &ValuationReport) -> HoverHandler {
        let chart_service = self.chart_service;
        let series = report.series.clone();
        Box::new(move |cursor| chart_service.tooltip_text(&series, cursor))
    }

    /// Plot the report and wire up tooltips on `renderer`.
    pub fn attach(
        &self,
        report: &ValuationReport,
        renderer: &mut dyn ChartRenderer,
    ) -> Result<(), CoreError> {
        renderer.plot_series(&self.chart_spec(report))?;
        renderer.register_hover_handler(self.hover_handler(report));
        renderer.show()
    }
}
