use build_cost::config::CatalogConfig;
use build_cost::estimator::{CatalogError, CostTables};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Loads the cost tables, letting a command-line path win over the configured one.
pub(crate) fn load_tables(
    config: &CatalogConfig,
    override_csv: Option<PathBuf>,
) -> Result<Arc<CostTables>, CatalogError> {
    let config = match override_csv {
        Some(path) => CatalogConfig {
            unit_cost_csv: Some(path),
        },
        None => config.clone(),
    };
    CostTables::load(&config).map(Arc::new)
}
