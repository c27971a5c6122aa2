use serde::{Deserialize, Deserializer, Serialize};

use super::classification::TenderClassification;
use super::normalizer::PriceRange;
use super::rate_table::LookupTier;
use super::strategy::{PricePointLabel, StrategyKind};

/// Numeric field as delivered by the tender registry: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    /// Any other JSON value; normalizes to absent.
    Unusable(serde_json::Value),
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for RawNumber {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Raw tender fields supplied by the caller for a single calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenderPricingInput {
    #[serde(alias = "bssamt")]
    pub basis_amount: Option<RawNumber>,
    /// Used only when the primary basis amount is absent or not positive.
    #[serde(alias = "bdgtAmt")]
    pub fallback_basis_amount: Option<RawNumber>,
    #[serde(alias = "rsrvtnPrceRngBgnRate")]
    pub range_begin_rate: Option<RawNumber>,
    #[serde(alias = "rsrvtnPrceRngEndRate")]
    pub range_end_rate: Option<RawNumber>,
    #[serde(alias = "sucsfbidLwltRate")]
    pub lower_limit_rate: Option<RawNumber>,
    #[serde(deserialize_with = "lenient_breakdown")]
    pub cost_breakdown: Option<CostBreakdown>,
    #[serde(alias = "prtcptPsblRgnNms", deserialize_with = "lenient_text")]
    pub participation_regions: Option<String>,
    #[serde(alias = "permsnIndstrytyListNms", deserialize_with = "lenient_text")]
    pub permitted_industries: Option<String>,
}

/// Statutory cost items that make up the A-value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostBreakdown {
    #[serde(alias = "sftyMngcst")]
    pub safety_management_cost: Option<RawNumber>,
    #[serde(alias = "sftyChckMngcst")]
    pub safety_inspection_cost: Option<RawNumber>,
    #[serde(alias = "rtrfundNon")]
    pub retirement_fund_levy: Option<RawNumber>,
    #[serde(alias = "mrfnHealthInsrprm")]
    pub health_insurance_premium: Option<RawNumber>,
    #[serde(alias = "npnInsrprm")]
    pub pension_premium: Option<RawNumber>,
    #[serde(alias = "odsnLngtrmrcprInsrprm")]
    pub long_term_care_premium: Option<RawNumber>,
    #[serde(alias = "envCnsrvcst")]
    pub environmental_preservation_cost: Option<RawNumber>,
    #[serde(alias = "qltyMngcst")]
    pub quality_management_cost: Option<RawNumber>,
    #[serde(alias = "qltyMngcstAObjYn", deserialize_with = "lenient_text")]
    pub quality_management_applicable: Option<String>,
    #[serde(alias = "smkpAmt")]
    pub market_unit_price_amount: Option<RawNumber>,
    #[serde(alias = "smkpAmtYn", deserialize_with = "lenient_text")]
    pub market_unit_price_applicable: Option<String>,
}

/// Non-string values are treated as absent rather than failing the payload.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn lenient_breakdown<'de, D>(deserializer: D) -> Result<Option<CostBreakdown>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// Lower-bound values implied by the two extremes of the preliminary range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceRange {
    pub low: i64,
    pub high: i64,
}

/// Labelled price point reported by the fixed-margin strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub label: PricePointLabel,
    pub assessment_rate: f64,
    pub price: i64,
    /// Price as a percentage of the basis amount, two decimals.
    pub bid_rate: f64,
}

/// Successful estimation for one tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidEstimate {
    pub strategy: StrategyKind,
    pub assessment_rate: f64,
    pub estimated_price: i64,
    pub estimated_lower_bound: i64,
    pub optimal_bid_price: i64,
    pub confidence_range: ConfidenceRange,
    pub basis_amount: f64,
    pub a_value: f64,
    pub lower_limit_rate: f64,
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<TenderClassification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_tier: Option<LookupTier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_points: Vec<PricePoint>,
}

impl BidEstimate {
    pub fn summary(&self) -> String {
        format!(
            "bid {} KRW (lower bound {}, assessment rate {:.3}%)",
            super::summary::group_thousands(self.optimal_bid_price),
            super::summary::group_thousands(self.estimated_lower_bound),
            self.assessment_rate
        )
    }
}

/// Reasons a tender cannot be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EstimationError {
    #[error("basis amount could not be determined")]
    BasisAmountUnknown,
    #[error("preliminary price range could not be determined")]
    PriceRangeUnknown,
    #[error("calculated amount exceeds the supported range")]
    AmountOutOfRange,
}

pub type CalculationResult = Result<BidEstimate, EstimationError>;

/// Wire form of a [`CalculationResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CalculationOutcome {
    Success(BidEstimate),
    Failure { reason: String },
}

impl From<CalculationResult> for CalculationOutcome {
    fn from(result: CalculationResult) -> Self {
        match result {
            Ok(estimate) => Self::Success(estimate),
            Err(error) => Self::Failure {
                reason: error.to_string(),
            },
        }
    }
}
