use axum::response::Response;
use serde_json::Value;

use crate::estimation::{
    CostBreakdown, EngineConfig, EstimationEngine, RawNumber, StrategyKind, TenderPricingInput,
};

pub(super) fn cost_breakdown() -> CostBreakdown {
    CostBreakdown {
        safety_management_cost: Some("10000000".into()),
        safety_inspection_cost: Some("5000000".into()),
        retirement_fund_levy: Some("3000000".into()),
        health_insurance_premium: Some("2000000".into()),
        pension_premium: Some("1500000".into()),
        long_term_care_premium: Some("500000".into()),
        environmental_preservation_cost: Some("1000000".into()),
        quality_management_cost: Some("0".into()),
        quality_management_applicable: Some("N".to_string()),
        market_unit_price_amount: Some("0".into()),
        market_unit_price_applicable: Some("N".to_string()),
    }
}

/// Province-wide earthwork tender worth one billion won with a +/-3% range.
pub(super) fn tender() -> TenderPricingInput {
    TenderPricingInput {
        basis_amount: Some("1000000000".into()),
        fallback_basis_amount: None,
        range_begin_rate: Some("-3".into()),
        range_end_rate: Some("+3".into()),
        lower_limit_rate: Some("87.745".into()),
        cost_breakdown: Some(cost_breakdown()),
        participation_regions: Some("경기도".to_string()),
        permitted_industries: Some("토공사업".to_string()),
    }
}

pub(super) fn tender_with_basis(amount: &str) -> TenderPricingInput {
    TenderPricingInput {
        basis_amount: Some(RawNumber::from(amount)),
        ..tender()
    }
}

pub(super) fn engine_with(strategy: StrategyKind) -> EstimationEngine {
    EstimationEngine::new(EngineConfig {
        strategy,
        ..EngineConfig::default()
    })
}

pub(super) fn lookup_engine() -> EstimationEngine {
    engine_with(StrategyKind::LookupTable)
}

pub(super) fn midpoint_engine() -> EstimationEngine {
    engine_with(StrategyKind::RangeMidpoint)
}

pub(super) fn lower_bound_at(price: f64, a_value: f64, lower_limit_rate: f64) -> i64 {
    (((price - a_value) * lower_limit_rate / 100.0) + a_value).ceil() as i64
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("valid json body")
}
