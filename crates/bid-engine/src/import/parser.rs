use super::TenderRow;
use crate::estimation::{CostBreakdown, RawNumber, TenderPricingInput};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct TenderRecord {
    #[serde(rename = "bidNtceNo", deserialize_with = "empty_string_as_none")]
    notice_number: Option<String>,
    #[serde(rename = "bidNtceOrd", deserialize_with = "empty_string_as_none")]
    notice_order: Option<String>,
    #[serde(rename = "bssamt", deserialize_with = "empty_string_as_none")]
    basis_amount: Option<String>,
    #[serde(rename = "bdgtAmt", deserialize_with = "empty_string_as_none")]
    budget_amount: Option<String>,
    #[serde(rename = "rsrvtnPrceRngBgnRate", deserialize_with = "empty_string_as_none")]
    range_begin_rate: Option<String>,
    #[serde(rename = "rsrvtnPrceRngEndRate", deserialize_with = "empty_string_as_none")]
    range_end_rate: Option<String>,
    #[serde(rename = "sucsfbidLwltRate", deserialize_with = "empty_string_as_none")]
    lower_limit_rate: Option<String>,
    #[serde(rename = "prtcptPsblRgnNms", deserialize_with = "empty_string_as_none")]
    participation_regions: Option<String>,
    #[serde(rename = "permsnIndstrytyListNms", deserialize_with = "empty_string_as_none")]
    permitted_industries: Option<String>,
    #[serde(rename = "sftyMngcst", deserialize_with = "empty_string_as_none")]
    safety_management_cost: Option<String>,
    #[serde(rename = "sftyChckMngcst", deserialize_with = "empty_string_as_none")]
    safety_inspection_cost: Option<String>,
    #[serde(rename = "rtrfundNon", deserialize_with = "empty_string_as_none")]
    retirement_fund_levy: Option<String>,
    #[serde(rename = "mrfnHealthInsrprm", deserialize_with = "empty_string_as_none")]
    health_insurance_premium: Option<String>,
    #[serde(rename = "npnInsrprm", deserialize_with = "empty_string_as_none")]
    pension_premium: Option<String>,
    #[serde(rename = "odsnLngtrmrcprInsrprm", deserialize_with = "empty_string_as_none")]
    long_term_care_premium: Option<String>,
    #[serde(rename = "envCnsrvcst", deserialize_with = "empty_string_as_none")]
    environmental_preservation_cost: Option<String>,
    #[serde(rename = "qltyMngcst", deserialize_with = "empty_string_as_none")]
    quality_management_cost: Option<String>,
    #[serde(rename = "qltyMngcstAObjYn", deserialize_with = "empty_string_as_none")]
    quality_management_applicable: Option<String>,
    #[serde(rename = "smkpAmt", deserialize_with = "empty_string_as_none")]
    market_unit_price_amount: Option<String>,
    #[serde(rename = "smkpAmtYn", deserialize_with = "empty_string_as_none")]
    market_unit_price_applicable: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn raw(value: Option<String>) -> Option<RawNumber> {
    value.map(RawNumber::Text)
}

impl TenderRecord {
    pub(super) fn into_row(self, line: usize) -> TenderRow {
        let tender_id = match (self.notice_number.as_deref(), self.notice_order.as_deref()) {
            (Some(number), Some(order)) => format!("{number}-{order}"),
            (Some(number), None) => number.to_string(),
            (None, _) => format!("row-{line}"),
        };

        let cost_breakdown = CostBreakdown {
            safety_management_cost: raw(self.safety_management_cost),
            safety_inspection_cost: raw(self.safety_inspection_cost),
            retirement_fund_levy: raw(self.retirement_fund_levy),
            health_insurance_premium: raw(self.health_insurance_premium),
            pension_premium: raw(self.pension_premium),
            long_term_care_premium: raw(self.long_term_care_premium),
            environmental_preservation_cost: raw(self.environmental_preservation_cost),
            quality_management_cost: raw(self.quality_management_cost),
            quality_management_applicable: self.quality_management_applicable,
            market_unit_price_amount: raw(self.market_unit_price_amount),
            market_unit_price_applicable: self.market_unit_price_applicable,
        };
        let cost_breakdown = (cost_breakdown != CostBreakdown::default()).then_some(cost_breakdown);

        TenderRow {
            tender_id,
            input: TenderPricingInput {
                basis_amount: raw(self.basis_amount),
                fallback_basis_amount: raw(self.budget_amount),
                range_begin_rate: raw(self.range_begin_rate),
                range_end_rate: raw(self.range_end_rate),
                lower_limit_rate: raw(self.lower_limit_rate),
                cost_breakdown,
                participation_regions: self.participation_regions,
                permitted_industries: self.permitted_industries,
            },
        }
    }
}
