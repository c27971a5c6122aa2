use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::estimation::router::estimate_handler;
use crate::estimation::{estimation_router, TenderPricingInput};

#[tokio::test]
async fn estimate_handler_returns_unprocessable_for_missing_basis() {
    let input = TenderPricingInput {
        basis_amount: None,
        ..tender()
    };

    let response = estimate_handler(State(Arc::new(lookup_engine())), axum::Json(input)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "basis amount could not be determined");
}

#[tokio::test]
async fn estimate_route_accepts_registry_field_names() {
    let router = estimation_router(Arc::new(lookup_engine()));
    let payload = json!({
        "bssamt": "1000000000",
        "rsrvtnPrceRngBgnRate": "-3",
        "rsrvtnPrceRngEndRate": "+3",
        "sucsfbidLwltRate": "87.745",
        "prtcptPsblRgnNms": "경기도",
        "permsnIndstrytyListNms": "토공사업",
        "cost_breakdown": {
            "sftyMngcst": "10000000",
            "sftyChckMngcst": "5000000",
            "rtrfundNon": "3000000",
            "mrfnHealthInsrprm": "2000000",
            "npnInsrprm": "1500000",
            "odsnLngtrmrcprInsrprm": "500000",
            "envCnsrvcst": "1000000",
            "qltyMngcstAObjYn": "N",
            "smkpAmtYn": "N"
        }
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/bids/estimate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["assessment_rate"], 100.14);
    assert_eq!(body["a_value"], 23_000_000.0);
    assert_eq!(body["used_fallback"], false);
    assert_eq!(body["classification"]["region_scope"], "province");
    assert_eq!(body["classification"]["amount_range"], "over3");
}

#[tokio::test]
async fn batch_route_returns_tagged_outcomes() {
    let router = estimation_router(Arc::new(lookup_engine()));
    let payload = json!([
        { "basis_amount": 250000000 },
        { "basis_amount": "" }
    ]);

    let response = router
        .oneshot(
            Request::post("/api/v1/bids/estimate/batch")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let outcomes = body.as_array().expect("array body");
    assert_eq!(outcomes[0]["outcome"], "success");
    assert_eq!(outcomes[0]["assessment_rate"], 100.092);
    assert_eq!(outcomes[1]["outcome"], "failure");
    assert_eq!(outcomes[1]["reason"], "basis amount could not be determined");
}

#[tokio::test]
async fn rate_table_route_exposes_active_table() {
    let router = estimation_router(Arc::new(lookup_engine()));

    let response = router
        .oneshot(
            Request::get("/api/v1/bids/rate-table")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["strategy"], "lookup_table");
    assert_eq!(body["rate_table"]["province"]["general"]["over3"], 100.14);
    assert_eq!(body["default_lower_limit_rate"], 87.745);
}

#[tokio::test]
async fn malformed_cost_fields_count_as_zero() {
    let router = estimation_router(Arc::new(lookup_engine()));
    let payload = json!({
        "bssamt": "1000000000",
        "prtcptPsblRgnNms": 42,
        "cost_breakdown": {
            "sftyMngcst": true,
            "sftyChckMngcst": { "v": 1 },
            "rtrfundNon": [3000000],
            "envCnsrvcst": "1000000",
            "qltyMngcst": "4000000",
            "qltyMngcstAObjYn": true
        }
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/bids/estimate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["a_value"], 1_000_000.0);
    assert_eq!(body["classification"]["region_scope"], "province");
}

#[tokio::test]
async fn batch_route_survives_malformed_breakdowns() {
    let router = estimation_router(Arc::new(lookup_engine()));
    let payload = json!([
        { "bssamt": "1000000000", "cost_breakdown": { "sftyMngcst": false } },
        { "bssamt": "500000000", "cost_breakdown": "not an object" },
        { "bssamt": "250000000", "cost_breakdown": { "smkpAmt": "2000000", "smkpAmtYn": "Y" } }
    ]);

    let response = router
        .oneshot(
            Request::post("/api/v1/bids/estimate/batch")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let outcomes = body.as_array().expect("array body");
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|outcome| outcome["outcome"] == "success"));
    assert_eq!(outcomes[0]["a_value"], 0.0);
    assert_eq!(outcomes[1]["a_value"], 0.0);
    assert_eq!(outcomes[2]["a_value"], 2_000_000.0);
}
