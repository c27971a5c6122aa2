use bid_engine::estimation::{
    CalculationOutcome, EstimationEngine, LicenseGroup, LookupTier, RegionScope,
};
use bid_engine::import::TenderCsvImporter;

#[test]
fn importer_reads_registry_export() {
    let data = include_bytes!("fixtures/tenders.csv");
    let rows = TenderCsvImporter::from_reader(&data[..]).expect("tender export imports");

    let ids: Vec<_> = rows.iter().map(|row| row.tender_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["20250101234-00", "20250101235-00", "20250101236-01"]
    );

    let first = &rows[0].input;
    let breakdown = first.cost_breakdown.as_ref().expect("cost columns present");
    assert_eq!(breakdown.quality_management_applicable.as_deref(), Some("Y"));
    assert!(rows[1].input.cost_breakdown.is_none());
    assert!(rows[1].input.basis_amount.is_none());
}

#[test]
fn imported_tenders_price_through_the_default_engine() {
    let data = include_bytes!("fixtures/tenders.csv");
    let rows = TenderCsvImporter::from_reader(&data[..]).expect("tender export imports");
    let inputs: Vec<_> = rows.into_iter().map(|row| row.input).collect();

    let outcomes = EstimationEngine::default().estimate_batch(&inputs);
    assert_eq!(outcomes.len(), 3);

    match &outcomes[0] {
        CalculationOutcome::Success(estimate) => {
            assert_eq!(estimate.assessment_rate, 100.140);
            assert_eq!(estimate.a_value, 28_000_000.0);
            assert_eq!(estimate.lookup_tier, Some(LookupTier::Exact));
        }
        other => panic!("expected success, got {other:?}"),
    }

    match &outcomes[1] {
        CalculationOutcome::Success(estimate) => {
            assert!(estimate.used_fallback);
            assert_eq!(estimate.basis_amount, 200_000_000.0);
            assert_eq!(estimate.lower_limit_rate, 87.745);
            let classification = estimate.classification.expect("classified");
            assert_eq!(classification.region_scope, RegionScope::City);
            assert_eq!(classification.license_group, LicenseGroup::Landscaping);
            assert_eq!(estimate.lookup_tier, Some(LookupTier::ProvinceScope));
            assert_eq!(estimate.assessment_rate, 99.822);
        }
        other => panic!("expected success, got {other:?}"),
    }

    assert_eq!(
        outcomes[2],
        CalculationOutcome::Failure {
            reason: "basis amount could not be determined".to_string()
        }
    );
}
