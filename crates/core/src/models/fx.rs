use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::price::PricePoint;

/// A currency pair quoted as "QUOTE units per one BASE unit".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
        }
    }

    /// Yahoo-style synthetic symbol, e.g. `JPYUSD=X`.
    pub fn yahoo_symbol(&self) -> String {
        format!("{}{}=X", self.base, self.quote)
    }

    /// The same pair quoted the other way round.
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.yahoo_symbol())
    }
}

/// How a conversion factor series was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateSource {
    /// Source currency equals the display currency; every factor is 1.0.
    Identity,
    /// Quoted directly as SOURCE→DISPLAY.
    Direct(CurrencyPair),
    /// Quoted as DISPLAY→SOURCE and inverted.
    Inverse(CurrencyPair),
}

impl std::fmt::Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateSource::Identity => write!(f, "identity"),
            RateSource::Direct(pair) => write!(f, "{pair}"),
            RateSource::Inverse(pair) => write!(f, "{pair} (inverted)"),
        }
    }
}

/// Daily conversion factors: destination-currency units per one
/// local-currency unit, keyed by date.
///
/// Only positive finite factors are ever stored; anything else is treated
/// as missing and left to the alignment fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionFactors {
    pub source: RateSource,
    factors: BTreeMap<NaiveDate, f64>,
}

impl ConversionFactors {
    /// Build from quote points. Duplicate dates keep the first occurrence;
    /// non-finite and non-positive values are dropped.
    pub fn from_points(source: RateSource, points: &[PricePoint]) -> Self {
        let mut factors = BTreeMap::new();
        for point in points {
            if is_valid_factor(point.price) {
                factors.entry(point.date).or_insert(point.price);
            }
        }
        Self { source, factors }
    }

    /// A constant series spanning `from..=to` at daily granularity.
    pub fn constant(from: NaiveDate, to: NaiveDate, value: f64) -> Self {
        let factors = from
            .iter_days()
            .take_while(|d| *d <= to)
            .map(|d| (d, value))
            .collect();
        Self {
            source: RateSource::Identity,
            factors,
        }
    }

    /// Reciprocal of every point. Zero or non-finite quotes are dropped
    /// instead of producing infinite entries.
    pub fn reciprocal(points: &[PricePoint], pair: CurrencyPair) -> Self {
        let inverted: Vec<PricePoint> = points
            .iter()
            .filter(|p| is_valid_factor(p.price))
            .map(|p| PricePoint {
                date: p.date,
                price: 1.0 / p.price,
            })
            .collect();
        Self::from_points(RateSource::Inverse(pair), &inverted)
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.factors.get(&date).copied()
    }

    /// Most recent factor on or before `date`.
    pub fn last_on_or_before(&self, date: NaiveDate) -> Option<f64> {
        self.factors.range(..=date).next_back().map(|(_, v)| *v)
    }

    /// Earliest known factor.
    pub fn first(&self) -> Option<f64> {
        self.factors.values().next().copied()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.factors.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.factors.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.factors.iter().map(|(d, v)| (*d, *v))
    }
}

fn is_valid_factor(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
