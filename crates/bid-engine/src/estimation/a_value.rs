use serde::Serialize;

use super::domain::{CostBreakdown, RawNumber};
use super::normalizer::safe_num;

/// Flag value marking a conditional cost item as part of the A-value.
pub const APPLICABLE_MARKER: &str = "Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AValueComponent {
    SafetyManagement,
    SafetyInspection,
    RetirementFund,
    HealthInsurance,
    NationalPension,
    LongTermCare,
    EnvironmentalPreservation,
    QualityManagement,
    MarketUnitPrice,
}

impl AValueComponent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SafetyManagement => "Safety management cost",
            Self::SafetyInspection => "Safety inspection cost",
            Self::RetirementFund => "Retirement fund levy",
            Self::HealthInsurance => "Health insurance premium",
            Self::NationalPension => "National pension premium",
            Self::LongTermCare => "Long-term care insurance premium",
            Self::EnvironmentalPreservation => "Environmental preservation cost",
            Self::QualityManagement => "Quality management cost",
            Self::MarketUnitPrice => "Standard market unit price amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AValueLine {
    pub component: AValueComponent,
    pub amount: f64,
    pub included: bool,
}

impl CostBreakdown {
    /// Every cost item with its normalized amount and whether it counts.
    pub fn itemize(&self) -> Vec<AValueLine> {
        let mandatory = [
            (AValueComponent::SafetyManagement, &self.safety_management_cost),
            (AValueComponent::SafetyInspection, &self.safety_inspection_cost),
            (AValueComponent::RetirementFund, &self.retirement_fund_levy),
            (AValueComponent::HealthInsurance, &self.health_insurance_premium),
            (AValueComponent::NationalPension, &self.pension_premium),
            (AValueComponent::LongTermCare, &self.long_term_care_premium),
            (
                AValueComponent::EnvironmentalPreservation,
                &self.environmental_preservation_cost,
            ),
        ];

        let mut lines: Vec<AValueLine> = mandatory
            .into_iter()
            .map(|(component, value)| AValueLine {
                component,
                amount: amount_or_zero(value),
                included: true,
            })
            .collect();

        lines.push(AValueLine {
            component: AValueComponent::QualityManagement,
            amount: amount_or_zero(&self.quality_management_cost),
            included: is_applicable(&self.quality_management_applicable),
        });
        lines.push(AValueLine {
            component: AValueComponent::MarketUnitPrice,
            amount: amount_or_zero(&self.market_unit_price_amount),
            included: is_applicable(&self.market_unit_price_applicable),
        });

        lines
    }
}

/// Sums the A-value of a tender; a missing breakdown contributes nothing.
pub fn aggregate(breakdown: Option<&CostBreakdown>) -> f64 {
    breakdown
        .map(|breakdown| {
            breakdown
                .itemize()
                .iter()
                .filter(|line| line.included)
                .map(|line| line.amount)
                .sum()
        })
        .unwrap_or(0.0)
}

fn amount_or_zero(value: &Option<RawNumber>) -> f64 {
    safe_num(value.as_ref()).unwrap_or(0.0)
}

fn is_applicable(flag: &Option<String>) -> bool {
    flag.as_deref() == Some(APPLICABLE_MARKER)
}
