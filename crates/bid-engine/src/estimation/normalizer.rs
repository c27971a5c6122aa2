use serde::{Deserialize, Serialize};

use super::config::ZeroBasisPolicy;
use super::domain::{EstimationError, RawNumber};

/// Bounds with an absolute value at or below this are relative offsets from 100%.
const RELATIVE_RATE_LIMIT: f64 = 50.0;

/// Converts a registry value into a finite number, or `None` when unusable.
pub fn safe_num(value: Option<&RawNumber>) -> Option<f64> {
    let parsed = match value? {
        RawNumber::Number(number) => *number,
        RawNumber::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        RawNumber::Unusable(_) => return None,
    };

    parsed.is_finite().then_some(parsed)
}

/// Basis amount chosen for a calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBasis {
    pub amount: f64,
    pub used_fallback: bool,
}

pub fn resolve_basis_amount(
    primary: Option<&RawNumber>,
    fallback: Option<&RawNumber>,
    policy: ZeroBasisPolicy,
) -> Result<ResolvedBasis, EstimationError> {
    let primary = safe_num(primary);
    let fallback = safe_num(fallback);

    if let Some(amount) = primary.filter(|amount| *amount > 0.0) {
        return Ok(ResolvedBasis {
            amount,
            used_fallback: false,
        });
    }

    if let Some(amount) = fallback.filter(|amount| *amount > 0.0) {
        return Ok(ResolvedBasis {
            amount,
            used_fallback: true,
        });
    }

    match policy {
        ZeroBasisPolicy::ZeroResult if primary == Some(0.0) => Ok(ResolvedBasis {
            amount: 0.0,
            used_fallback: false,
        }),
        ZeroBasisPolicy::ZeroResult if primary.is_none() && fallback == Some(0.0) => {
            Ok(ResolvedBasis {
                amount: 0.0,
                used_fallback: true,
            })
        }
        _ => Err(EstimationError::BasisAmountUnknown),
    }
}

/// Maps a relative offset (e.g. `-3`) onto an absolute percentage (`97`).
pub fn to_absolute_rate(rate: f64) -> f64 {
    if rate.abs() <= RELATIVE_RATE_LIMIT {
        rate + 100.0
    } else {
        rate
    }
}

/// Preliminary price range expressed as absolute percentages, `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub begin_rate: f64,
    pub end_rate: f64,
}

impl PriceRange {
    pub fn midpoint(&self) -> f64 {
        (self.begin_rate + self.end_rate) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end_rate - self.begin_rate
    }
}

pub fn resolve_price_range(
    begin: Option<&RawNumber>,
    end: Option<&RawNumber>,
) -> Option<PriceRange> {
    let begin = to_absolute_rate(safe_num(begin)?);
    let end = to_absolute_rate(safe_num(end)?);

    if begin <= 0.0 || end <= 0.0 {
        return None;
    }

    Some(PriceRange {
        begin_rate: begin.min(end),
        end_rate: begin.max(end),
    })
}
