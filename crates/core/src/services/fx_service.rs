use chrono::NaiveDate;
use log::{debug, info};

use crate::errors::CoreError;
use crate::models::fx::{ConversionFactors, CurrencyPair, RateSource};
use crate::models::price::{self, PricePoint};
use crate::providers::traits::{HistoryPeriod, MarketDataProvider};

/// Resolves daily conversion factors from a local currency into the
/// display currency.
///
/// Lookup order:
/// 1. Same currency → constant 1.0, no provider call.
/// 2. Direct quote `SRC DST=X` (already "DST per SRC").
/// 3. Inverse quote `DST SRC=X`, inverted point by point.
///
/// Both quotes empty (or failing) is an error naming both pairs.
pub struct ExchangeRateResolver {
    display_currency: String,
}

impl ExchangeRateResolver {
    pub fn new(display_currency: &str) -> Self {
        Self {
            display_currency: display_currency.to_uppercase(),
        }
    }

    pub fn display_currency(&self) -> &str {
        &self.display_currency
    }

    /// Conversion factors covering `from..=to`.
    pub async fn resolve(
        &self,
        provider: &dyn MarketDataProvider,
        source_currency: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ConversionFactors, CoreError> {
        let source = source_currency.to_uppercase();

        if source == self.display_currency {
            return Ok(ConversionFactors::constant(from, to, 1.0));
        }

        let direct = CurrencyPair::new(&source, &self.display_currency);
        let inverse = direct.inverse();

        let direct_points = self.fetch_pair(provider, &direct, from, to).await;
        let factors = ConversionFactors::from_points(
            RateSource::Direct(direct.clone()),
            &direct_points,
        );
        if !factors.is_empty() {
            info!("Using direct quote {direct} ({} points)", factors.len());
            return Ok(factors);
        }

        let inverse_points = self.fetch_pair(provider, &inverse, from, to).await;
        let factors = ConversionFactors::reciprocal(&inverse_points, inverse.clone());
        if !factors.is_empty() {
            info!("Using inverted quote {inverse} ({} points)", factors.len());
            return Ok(factors);
        }

        Err(CoreError::ExchangeRateUnavailable {
            direct: direct.yahoo_symbol(),
            inverse: inverse.yahoo_symbol(),
        })
    }

    /// Quote closes for a pair. Provider errors and empty answers both
    /// come back as an empty Vec: either way the pair is unavailable.
    async fn fetch_pair(
        &self,
        provider: &dyn MarketDataProvider,
        pair: &CurrencyPair,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<PricePoint> {
        let period = HistoryPeriod::Range { from, to };
        match provider.fetch_history(&pair.yahoo_symbol(), &period).await {
            Ok(bars) if bars.is_empty() => {
                debug!("{pair}: provider returned no data");
                Vec::new()
            }
            Ok(bars) => price::closes(&bars),
            Err(e) => {
                debug!("{pair}: provider error: {e}");
                Vec::new()
            }
        }
    }
}
