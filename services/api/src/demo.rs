use crate::infra::{configured_engine, parse_strategy, with_strategy};
use bid_engine::config::AppConfig;
use bid_engine::error::AppError;
use bid_engine::estimation::{
    CalculationOutcome, CostBreakdown, EstimationEngine, RawNumber, StrategyKind,
    TenderPricingInput,
};
use bid_engine::import::TenderCsvImporter;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct EstimateArgs {
    /// Basis amount in won (bssamt)
    #[arg(long)]
    pub(crate) basis_amount: Option<String>,
    /// Budget amount used when the basis amount is missing (bdgtAmt)
    #[arg(long)]
    pub(crate) fallback_amount: Option<String>,
    /// Lower end of the preliminary price range, e.g. -3 or 97
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) range_begin: Option<String>,
    /// Upper end of the preliminary price range, e.g. 3 or 103
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) range_end: Option<String>,
    /// Statutory lower-limit rate in percent (defaults to the configured rate)
    #[arg(long)]
    pub(crate) lower_limit_rate: Option<String>,
    /// Participation-eligible region names
    #[arg(long)]
    pub(crate) regions: Option<String>,
    /// Permitted industry names
    #[arg(long)]
    pub(crate) industries: Option<String>,
    /// JSON file holding the cost breakdown used for the A-value
    #[arg(long)]
    pub(crate) cost_breakdown: Option<PathBuf>,
    /// Override the configured rate strategy
    #[arg(long, value_parser = parse_strategy)]
    pub(crate) strategy: Option<StrategyKind>,
    /// Print the estimate as JSON instead of an explanation
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Tender registry CSV export
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Override the configured rate strategy
    #[arg(long, value_parser = parse_strategy)]
    pub(crate) strategy: Option<StrategyKind>,
    /// Print outcomes as a JSON array
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct BatchLine {
    tender_id: String,
    #[serde(flatten)]
    outcome: CalculationOutcome,
}

impl EstimateArgs {
    fn into_input(self) -> Result<TenderPricingInput, AppError> {
        let cost_breakdown = match self.cost_breakdown {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let breakdown: CostBreakdown =
                    serde_json::from_str(&raw).map_err(std::io::Error::from)?;
                Some(breakdown)
            }
            None => None,
        };

        Ok(TenderPricingInput {
            basis_amount: self.basis_amount.map(RawNumber::Text),
            fallback_basis_amount: self.fallback_amount.map(RawNumber::Text),
            range_begin_rate: self.range_begin.map(RawNumber::Text),
            range_end_rate: self.range_end.map(RawNumber::Text),
            lower_limit_rate: self.lower_limit_rate.map(RawNumber::Text),
            cost_breakdown,
            participation_regions: self.regions,
            permitted_industries: self.industries,
        })
    }
}

pub(crate) fn run_estimate(config: &AppConfig, args: EstimateArgs) -> Result<(), AppError> {
    let engine = configured_engine(config, args.strategy);
    let json = args.json;
    let input = args.into_input()?;

    if json {
        let estimate = engine.estimate(&input)?;
        match serde_json::to_string_pretty(&estimate) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Estimate payload unavailable: {err}"),
        }
    } else {
        println!("{}", engine.explain(&input)?);
    }
    Ok(())
}

pub(crate) fn run_batch(config: &AppConfig, args: BatchArgs) -> Result<(), AppError> {
    let engine = configured_engine(config, args.strategy);
    let rows = TenderCsvImporter::from_path(&args.csv)?;

    let lines: Vec<BatchLine> = rows
        .into_iter()
        .map(|row| BatchLine {
            outcome: CalculationOutcome::from(engine.estimate(&row.input)),
            tender_id: row.tender_id,
        })
        .collect();

    if args.json {
        match serde_json::to_string_pretty(&lines) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Batch payload unavailable: {err}"),
        }
        return Ok(());
    }

    let priced = lines
        .iter()
        .filter(|line| matches!(line.outcome, CalculationOutcome::Success(_)))
        .count();
    println!(
        "Priced {priced} of {} tenders from {}",
        lines.len(),
        args.csv.display()
    );
    for line in &lines {
        match &line.outcome {
            CalculationOutcome::Success(estimate) => {
                println!("  {}: {}", line.tender_id, estimate.summary())
            }
            CalculationOutcome::Failure { reason } => {
                println!("  {}: skipped ({reason})", line.tender_id)
            }
        }
    }
    Ok(())
}

/// Province-wide earthwork tender used by the demo command.
pub(crate) fn sample_tender() -> TenderPricingInput {
    TenderPricingInput {
        basis_amount: Some(RawNumber::from("1000000000")),
        range_begin_rate: Some(RawNumber::from("-3")),
        range_end_rate: Some(RawNumber::from("+3")),
        lower_limit_rate: Some(RawNumber::from("87.745")),
        cost_breakdown: Some(CostBreakdown {
            safety_management_cost: Some(RawNumber::from("10000000")),
            safety_inspection_cost: Some(RawNumber::from("5000000")),
            retirement_fund_levy: Some(RawNumber::from("3000000")),
            health_insurance_premium: Some(RawNumber::from("2000000")),
            pension_premium: Some(RawNumber::from("1500000")),
            long_term_care_premium: Some(RawNumber::from("500000")),
            environmental_preservation_cost: Some(RawNumber::from("1000000")),
            ..CostBreakdown::default()
        }),
        participation_regions: Some("경기도".to_string()),
        permitted_industries: Some("토공사업".to_string()),
        ..TenderPricingInput::default()
    }
}

pub(crate) fn run_demo(config: &AppConfig) -> Result<(), AppError> {
    let tender = sample_tender();
    println!("Bid price estimation demo");
    println!("Sample tender: 1,000,000,000 KRW earthwork, Gyeonggi-do, range -3% ~ +3%");

    for strategy in [
        StrategyKind::LookupTable,
        StrategyKind::RangeMidpoint,
        StrategyKind::FixedMargin,
    ] {
        let engine = EstimationEngine::new(with_strategy(config.engine.clone(), Some(strategy)));
        println!("\n[{}]", strategy.label());
        println!("{}", engine.explain(&tender)?);
    }
    Ok(())
}
