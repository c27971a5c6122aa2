use serde::{Deserialize, Serialize};

use super::rate_table::RateTable;
use super::strategy::StrategyKind;

/// Statutory minimum-success rate applied when a tender omits it.
pub const DEFAULT_LOWER_LIMIT_RATE: f64 = 87.745;

/// Margin added on top of the estimated lower bound.
pub const DEFAULT_MARGIN_FACTOR: f64 = 1.001;

/// How a resolved basis amount of exactly zero is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroBasisPolicy {
    #[default]
    Reject,
    /// Accept zero and report every price as zero.
    ZeroResult,
}

impl ZeroBasisPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Some(Self::Reject),
            "zero" | "zero_result" => Some(Self::ZeroResult),
            _ => None,
        }
    }
}

/// Tunables for the estimation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub strategy: StrategyKind,
    pub default_lower_limit_rate: f64,
    pub margin_factor: f64,
    pub zero_basis_policy: ZeroBasisPolicy,
    /// Share of the range width added to the midpoint rate.
    pub range_safety_fraction: f64,
    pub rate_table: RateTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::LookupTable,
            default_lower_limit_rate: DEFAULT_LOWER_LIMIT_RATE,
            margin_factor: DEFAULT_MARGIN_FACTOR,
            zero_basis_policy: ZeroBasisPolicy::Reject,
            range_safety_fraction: 0.0,
            rate_table: RateTable::standard(),
        }
    }
}
