use log::{info, warn};

use crate::errors::CoreError;
use crate::models::company::CompanySnapshot;
use crate::models::fx::ConversionFactors;
use crate::models::price::PriceBar;
use crate::models::valuation::{
    ConversionStatus, DisplayCurrency, ValuationPoint, ValuationSeries,
};
use crate::services::alignment::align_to_dates;

/// Turns local-currency bars into the chart's valuation series.
///
/// - PBR = close ÷ book value per share, in the local currency, so the
///   ratio never depends on the display currency.
/// - Display price = close × aligned conversion factor.
/// - If resolution or alignment failed, display prices stay local and the
///   series reports the local currency instead of the requested one.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// The divisor for PBR, or `None` when book value is missing,
    /// non-finite or non-positive. Decided once per run.
    pub fn usable_book_value(book_value: Option<f64>) -> Option<f64> {
        book_value.filter(|bv| bv.is_finite() && *bv > 0.0)
    }

    pub fn compute(
        &self,
        bars: &[PriceBar],
        snapshot: &CompanySnapshot,
        target: &DisplayCurrency,
        factors: Result<ConversionFactors, CoreError>,
    ) -> ValuationSeries {
        let book_value = Self::usable_book_value(snapshot.book_value_per_share);
        let dates: Vec<_> = bars.iter().map(|b| b.date).collect();

        let aligned = factors.and_then(|f| {
            let values = align_to_dates(&f, &dates)?;
            Ok((f.source, values))
        });

        let (currency, conversion, multipliers) = match aligned {
            Ok((via, values)) => {
                info!(
                    "Converted {} → {} via {via}",
                    snapshot.currency, target.code
                );
                (target.clone(), ConversionStatus::Converted { via }, values)
            }
            Err(e) => {
                warn!(
                    "Conversion to {} failed, showing prices in {}: {e}",
                    target.code, snapshot.currency
                );
                (
                    DisplayCurrency::new(&snapshot.currency, &snapshot.currency_symbol),
                    ConversionStatus::Fallback {
                        reason: e.to_string(),
                    },
                    vec![1.0; bars.len()],
                )
            }
        };

        let points = bars
            .iter()
            .zip(multipliers)
            .map(|(bar, factor)| {
                let local_ok = bar.close.is_finite();
                let display_price = Some(bar.close * factor).filter(|p| local_ok && p.is_finite());
                let price_to_book = book_value
                    .map(|bv| bar.close / bv)
                    .filter(|r| r.is_finite());
                ValuationPoint {
                    date: bar.date,
                    close: bar.close,
                    display_price,
                    price_to_book,
                }
            })
            .collect();

        ValuationSeries {
            points,
            currency,
            conversion,
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
