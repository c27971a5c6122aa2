use bid_engine::config::AppConfig;
use bid_engine::error::AppError;
use bid_engine::estimation::{EngineConfig, EstimationEngine, StrategyKind};
use bid_engine::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_strategy(raw: &str) -> Result<StrategyKind, String> {
    StrategyKind::parse(raw).ok_or_else(|| {
        format!("unknown strategy '{raw}' (expected lookup_table, range_midpoint or fixed_margin)")
    })
}

/// Loads configuration and installs stderr logging for one-shot commands.
pub(crate) fn command_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;
    Ok(config)
}

/// Engine for one-shot commands with an optional strategy override.
pub(crate) fn configured_engine(
    config: &AppConfig,
    strategy: Option<StrategyKind>,
) -> EstimationEngine {
    EstimationEngine::new(with_strategy(config.engine.clone(), strategy))
}

pub(crate) fn with_strategy(
    mut config: EngineConfig,
    strategy: Option<StrategyKind>,
) -> EngineConfig {
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }
    config
}
