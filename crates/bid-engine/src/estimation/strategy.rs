use serde::{Deserialize, Serialize};

use super::classification::TenderClassification;
use super::domain::EstimationError;
use super::normalizer::PriceRange;
use super::rate_table::{LookupTier, RateTable};

/// Identifies the rate resolution strategy an engine runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    LookupTable,
    RangeMidpoint,
    FixedMargin,
}

impl StrategyKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "lookup" | "lookup_table" | "table" => Some(Self::LookupTable),
            "midpoint" | "range_midpoint" => Some(Self::RangeMidpoint),
            "fixed" | "fixed_margin" => Some(Self::FixedMargin),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LookupTable => "region/license/amount lookup table",
            Self::RangeMidpoint => "preliminary range midpoint",
            Self::FixedMargin => "fixed safety margins",
        }
    }
}

/// Everything a strategy may consult when picking an assessment rate.
#[derive(Debug, Clone, Copy)]
pub struct RateContext<'a> {
    pub basis_amount: f64,
    pub price_range: Option<PriceRange>,
    pub participation_regions: Option<&'a str>,
    pub permitted_industries: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateResolution {
    pub assessment_rate: f64,
    pub classification: Option<TenderClassification>,
    pub lookup_tier: Option<LookupTier>,
}

impl RateResolution {
    fn rate_only(assessment_rate: f64) -> Self {
        Self {
            assessment_rate,
            classification: None,
            lookup_tier: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePointLabel {
    Aggressive,
    Standard,
    Conservative,
}

impl PricePointLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aggressive => "Aggressive",
            Self::Standard => "Standard",
            Self::Conservative => "Conservative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledRate {
    pub label: PricePointLabel,
    pub assessment_rate: f64,
}

/// Picks the expected ratio (%) of the contract price to the basis amount.
pub trait RateStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn requires_price_range(&self) -> bool {
        false
    }

    fn resolve(&self, context: &RateContext<'_>) -> Result<RateResolution, EstimationError>;

    /// Additional rates to price alongside the main estimate.
    fn labeled_rates(&self) -> &[LabeledRate] {
        &[]
    }
}

pub struct FixedMarginStrategy {
    rates: [LabeledRate; 3],
}

impl FixedMarginStrategy {
    pub const AGGRESSIVE_RATE: f64 = 99.55;
    pub const STANDARD_RATE: f64 = 99.85;
    pub const CONSERVATIVE_RATE: f64 = 100.15;

    pub fn new() -> Self {
        Self {
            rates: [
                LabeledRate {
                    label: PricePointLabel::Aggressive,
                    assessment_rate: Self::AGGRESSIVE_RATE,
                },
                LabeledRate {
                    label: PricePointLabel::Standard,
                    assessment_rate: Self::STANDARD_RATE,
                },
                LabeledRate {
                    label: PricePointLabel::Conservative,
                    assessment_rate: Self::CONSERVATIVE_RATE,
                },
            ],
        }
    }
}

impl Default for FixedMarginStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl RateStrategy for FixedMarginStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FixedMargin
    }

    fn resolve(&self, _context: &RateContext<'_>) -> Result<RateResolution, EstimationError> {
        Ok(RateResolution::rate_only(Self::STANDARD_RATE))
    }

    fn labeled_rates(&self) -> &[LabeledRate] {
        &self.rates
    }
}

/// Expected value of the reservation-price draw: the middle of the range.
pub struct RangeMidpointStrategy {
    safety_fraction: f64,
}

impl RangeMidpointStrategy {
    pub fn new(safety_fraction: f64) -> Self {
        Self { safety_fraction }
    }
}

impl RateStrategy for RangeMidpointStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RangeMidpoint
    }

    fn requires_price_range(&self) -> bool {
        true
    }

    fn resolve(&self, context: &RateContext<'_>) -> Result<RateResolution, EstimationError> {
        let range = context
            .price_range
            .ok_or(EstimationError::PriceRangeUnknown)?;
        let rate = range.midpoint() + self.safety_fraction * range.width();
        Ok(RateResolution::rate_only(rate))
    }
}

pub struct LookupTableStrategy {
    table: RateTable,
}

impl LookupTableStrategy {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }
}

impl RateStrategy for LookupTableStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LookupTable
    }

    fn resolve(&self, context: &RateContext<'_>) -> Result<RateResolution, EstimationError> {
        let classification = TenderClassification::classify(
            context.participation_regions,
            context.permitted_industries,
            context.basis_amount,
        );
        let lookup = self.table.lookup(&classification);

        if lookup.tier != LookupTier::Exact {
            tracing::debug!(
                region_scope = classification.region_scope.label(),
                license_group = classification.license_group.label(),
                amount_range = classification.amount_range.label(),
                tier = ?lookup.tier,
                rate = lookup.rate,
                "rate table cell missing; using fallback"
            );
        }

        Ok(RateResolution {
            assessment_rate: lookup.rate,
            classification: Some(classification),
            lookup_tier: Some(lookup.tier),
        })
    }
}
