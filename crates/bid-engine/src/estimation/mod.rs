//! Bid price estimation: normalizes raw tender fields, resolves an assessment
//! rate with the configured strategy and derives the lower bound and the
//! recommended bid from it.

mod a_value;
pub mod classification;
mod config;
pub mod domain;
pub mod normalizer;
mod pricing;
pub mod rate_table;
pub mod router;
pub mod strategy;
pub mod summary;

#[cfg(test)]
mod tests;

pub use a_value::{aggregate, AValueComponent, AValueLine, APPLICABLE_MARKER};
pub use classification::{AmountRange, LicenseGroup, RegionScope, TenderClassification};
pub use config::{EngineConfig, ZeroBasisPolicy, DEFAULT_LOWER_LIMIT_RATE, DEFAULT_MARGIN_FACTOR};
pub use domain::{
    BidEstimate, CalculationOutcome, CalculationResult, ConfidenceRange, CostBreakdown,
    EstimationError, PricePoint, RawNumber, TenderPricingInput,
};
pub use normalizer::{safe_num, PriceRange};
pub use rate_table::{LookupTier, RateTable, DEFAULT_ASSESSMENT_RATE};
pub use router::estimation_router;
pub use strategy::{
    FixedMarginStrategy, LookupTableStrategy, PricePointLabel, RangeMidpointStrategy,
    RateStrategy, StrategyKind,
};

use normalizer::{resolve_basis_amount, resolve_price_range};
use pricing::{PriceBounds, PricingInputs};
use strategy::RateContext;
use tracing::debug;

/// Stateless engine applying one rate strategy to tender inputs.
pub struct EstimationEngine {
    config: EngineConfig,
    strategy: Box<dyn RateStrategy>,
}

impl EstimationEngine {
    pub fn new(config: EngineConfig) -> Self {
        let strategy: Box<dyn RateStrategy> = match config.strategy {
            StrategyKind::LookupTable => {
                Box::new(LookupTableStrategy::new(config.rate_table.clone()))
            }
            StrategyKind::RangeMidpoint => {
                Box::new(RangeMidpointStrategy::new(config.range_safety_fraction))
            }
            StrategyKind::FixedMargin => Box::new(FixedMarginStrategy::new()),
        };

        Self { config, strategy }
    }

    pub fn with_strategy(config: EngineConfig, strategy: Box<dyn RateStrategy>) -> Self {
        Self { config, strategy }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn estimate(&self, input: &TenderPricingInput) -> CalculationResult {
        let basis = resolve_basis_amount(
            input.basis_amount.as_ref(),
            input.fallback_basis_amount.as_ref(),
            self.config.zero_basis_policy,
        )
        .map_err(|error| {
            debug!(%error, "tender rejected");
            error
        })?;

        let price_range =
            resolve_price_range(input.range_begin_rate.as_ref(), input.range_end_rate.as_ref());
        if price_range.is_none() && self.strategy.requires_price_range() {
            let error = EstimationError::PriceRangeUnknown;
            debug!(%error, strategy = ?self.strategy.kind(), "tender rejected");
            return Err(error);
        }

        let a_value = aggregate(input.cost_breakdown.as_ref());
        let lower_limit_rate = safe_num(input.lower_limit_rate.as_ref())
            .unwrap_or(self.config.default_lower_limit_rate);

        let resolution = self.strategy.resolve(&RateContext {
            basis_amount: basis.amount,
            price_range,
            participation_regions: input.participation_regions.as_deref(),
            permitted_industries: input.permitted_industries.as_deref(),
        })?;

        let inputs = PricingInputs {
            basis_amount: basis.amount,
            a_value,
            lower_limit_rate,
            margin_factor: self.config.margin_factor,
        };

        let (bounds, price_points) = if basis.amount == 0.0 {
            (PriceBounds::ZERO, Vec::new())
        } else {
            let priced = pricing::price_bounds(&inputs, resolution.assessment_rate, price_range)
                .zip(pricing::price_points(&inputs, self.strategy.labeled_rates()));
            priced.ok_or_else(|| {
                let error = EstimationError::AmountOutOfRange;
                debug!(%error, basis_amount = basis.amount, "tender rejected");
                error
            })?
        };

        debug!(
            strategy = ?self.strategy.kind(),
            basis_amount = basis.amount,
            used_fallback = basis.used_fallback,
            assessment_rate = resolution.assessment_rate,
            a_value,
            lower_limit_rate,
            optimal_bid_price = bounds.optimal_bid_price,
            "bid estimate computed"
        );

        Ok(BidEstimate {
            strategy: self.strategy.kind(),
            assessment_rate: resolution.assessment_rate,
            estimated_price: bounds.estimated_price,
            estimated_lower_bound: bounds.estimated_lower_bound,
            optimal_bid_price: bounds.optimal_bid_price,
            confidence_range: bounds.confidence_range,
            basis_amount: basis.amount,
            a_value,
            lower_limit_rate,
            used_fallback: basis.used_fallback,
            price_range,
            classification: resolution.classification,
            lookup_tier: resolution.lookup_tier,
            price_points,
        })
    }

    pub fn estimate_batch(&self, inputs: &[TenderPricingInput]) -> Vec<CalculationOutcome> {
        inputs
            .iter()
            .map(|input| CalculationOutcome::from(self.estimate(input)))
            .collect()
    }

    /// Estimates a tender and renders the derivation as text.
    pub fn explain(&self, input: &TenderPricingInput) -> Result<String, EstimationError> {
        let estimate = self.estimate(input)?;
        let a_value_lines = input
            .cost_breakdown
            .as_ref()
            .map(CostBreakdown::itemize)
            .unwrap_or_default();
        Ok(summary::explain(&estimate, &a_value_lines))
    }
}

impl Default for EstimationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
