use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::chart::{ChartSpec, Tooltip};
use crate::models::company::CompanySnapshot;
use crate::models::valuation::ValuationSeries;

/// Builds renderer input and answers hover lookups.
///
/// The renderer only draws; all numbers and labels are computed here.
#[derive(Debug, Clone, Copy)]
pub struct ChartService {
    /// Hovers farther than this from every trading day find nothing.
    /// `None` snaps to the nearest day no matter how far.
    tolerance: Option<Duration>,
}

impl ChartService {
    pub fn new() -> Self {
        Self { tolerance: None }
    }

    pub fn with_tolerance(tolerance: Duration) -> Self {
        Self {
            tolerance: Some(tolerance),
        }
    }

    /// Title, axis labels, legend and the plottable (date, price) points.
    /// Days without a display price are left out of the line.
    pub fn chart_spec(
        &self,
        ticker: &str,
        snapshot: &CompanySnapshot,
        series: &ValuationSeries,
    ) -> ChartSpec {
        let price_label = format!("終値 ({})", series.currency.code);
        ChartSpec {
            title: format!("{} ({ticker}) 株価 & PBR", snapshot.name),
            x_label: "日付".to_string(),
            y_label: price_label.clone(),
            legend: price_label,
            points: series
                .points
                .iter()
                .filter_map(|p| p.display_price.map(|price| (p.date, price)))
                .collect(),
        }
    }

    /// Tooltip for the trading day nearest to `cursor`, or `None` when
    /// the series is empty or the nearest day is beyond the tolerance.
    pub fn lookup(&self, series: &ValuationSeries, cursor: NaiveDateTime) -> Option<Tooltip> {
        let dates = series.dates();
        let idx = nearest_index(&dates, cursor)?;
        let point = series.points.get(idx)?;
        if let Some(tolerance) = self.tolerance {
            let distance = point.date.and_hms_opt(0, 0, 0)? - cursor;
            if distance > tolerance || -distance > tolerance {
                return None;
            }
        }
        Some(Tooltip {
            date: point.date,
            display_price: point.display_price,
            currency_symbol: series.currency.symbol.clone(),
            price_to_book: point.price_to_book,
        })
    }

    /// Rendered tooltip text for `cursor`.
    pub fn tooltip_text(&self, series: &ValuationSeries, cursor: NaiveDateTime) -> Option<String> {
        self.lookup(series, cursor).map(|t| t.to_string())
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the date nearest to `cursor` in an ascending `dates` slice.
///
/// Each date stands for its midnight; distance is absolute. Exact ties go
/// to the earlier date.
pub fn nearest_index(dates: &[NaiveDate], cursor: NaiveDateTime) -> Option<usize> {
    if dates.is_empty() {
        return None;
    }

    let at_midnight = |d: &NaiveDate| d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
    let target = cursor.and_utc().timestamp();

    // First date whose midnight is after the cursor.
    let after = dates.partition_point(|d| at_midnight(d).is_some_and(|ts| ts <= target));

    if after == 0 {
        return Some(0);
    }
    if after == dates.len() {
        return Some(dates.len() - 1);
    }

    let before = after - 1;
    let dist_before = target - at_midnight(&dates[before])?;
    let dist_after = at_midnight(&dates[after])? - target;
    if dist_after < dist_before {
        Some(after)
    } else {
        Some(before)
    }
}
