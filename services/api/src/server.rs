use crate::cli::ServeArgs;
use crate::infra::{load_tables, AppState};
use crate::routes::with_quote_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use build_cost::config::AppConfig;
use build_cost::error::AppError;
use build_cost::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let tables = load_tables(&config.catalog, None)?;
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let regions = tables.regions.len();
    let app = with_quote_routes(tables)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, regions, "construction cost estimator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
