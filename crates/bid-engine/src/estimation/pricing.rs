//! Price and bound arithmetic.
//!
//! Prices round half away from zero; bounds and bids always round up so the
//! lower bound is never understated. Results that do not fit a whole-won
//! `i64` are reported as `None` instead of saturating.

use super::domain::{ConfidenceRange, PricePoint};
use super::normalizer::PriceRange;
use super::strategy::LabeledRate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PricingInputs {
    pub basis_amount: f64,
    pub a_value: f64,
    pub lower_limit_rate: f64,
    pub margin_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PriceBounds {
    pub estimated_price: i64,
    pub estimated_lower_bound: i64,
    pub optimal_bid_price: i64,
    pub confidence_range: ConfidenceRange,
}

impl PriceBounds {
    pub(crate) const ZERO: Self = Self {
        estimated_price: 0,
        estimated_lower_bound: 0,
        optimal_bid_price: 0,
        confidence_range: ConfidenceRange { low: 0, high: 0 },
    };
}

/// Exclusive upper limit of a whole-won amount (`2^63`).
const WHOLE_WON_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn whole_won(value: f64) -> Option<i64> {
    (value.is_finite() && value.abs() < WHOLE_WON_LIMIT).then_some(value as i64)
}

pub(crate) fn estimated_price(basis_amount: f64, assessment_rate: f64) -> Option<i64> {
    whole_won((basis_amount * assessment_rate / 100.0).round())
}

/// `ceil(((price - A) * L / 100) + A)`
pub(crate) fn lower_bound(price: f64, a_value: f64, lower_limit_rate: f64) -> Option<i64> {
    whole_won((((price - a_value) * lower_limit_rate / 100.0) + a_value).ceil())
}

pub(crate) fn optimal_bid(lower_bound: i64, margin_factor: f64) -> Option<i64> {
    whole_won((lower_bound as f64 * margin_factor).ceil())
}

pub(crate) fn price_bounds(
    inputs: &PricingInputs,
    assessment_rate: f64,
    range: Option<PriceRange>,
) -> Option<PriceBounds> {
    let estimated_price = estimated_price(inputs.basis_amount, assessment_rate)?;
    let estimated_lower_bound = lower_bound(
        estimated_price as f64,
        inputs.a_value,
        inputs.lower_limit_rate,
    )?;
    let optimal_bid_price = optimal_bid(estimated_lower_bound, inputs.margin_factor)?;

    let confidence_range = match range {
        Some(range) => {
            let at_rate = |rate: f64| {
                lower_bound(
                    inputs.basis_amount * rate / 100.0,
                    inputs.a_value,
                    inputs.lower_limit_rate,
                )
            };
            ConfidenceRange {
                low: at_rate(range.begin_rate)?.min(estimated_lower_bound),
                high: at_rate(range.end_rate)?.max(estimated_lower_bound),
            }
        }
        None => ConfidenceRange {
            low: estimated_lower_bound,
            high: estimated_lower_bound,
        },
    };

    Some(PriceBounds {
        estimated_price,
        estimated_lower_bound,
        optimal_bid_price,
        confidence_range,
    })
}

/// Prices each labelled rate as the lower bound it implies.
pub(crate) fn price_points(
    inputs: &PricingInputs,
    rates: &[LabeledRate],
) -> Option<Vec<PricePoint>> {
    rates
        .iter()
        .map(|rate| {
            let price = lower_bound(
                inputs.basis_amount * rate.assessment_rate / 100.0,
                inputs.a_value,
                inputs.lower_limit_rate,
            )?;
            let bid_rate = if inputs.basis_amount > 0.0 {
                (price as f64 / inputs.basis_amount * 10_000.0).round() / 100.0
            } else {
                0.0
            };
            Some(PricePoint {
                label: rate.label,
                assessment_rate: rate.assessment_rate,
                price,
                bid_rate,
            })
        })
        .collect()
}
