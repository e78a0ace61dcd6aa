use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{prepare_quote, CatalogView, ContactDetails, Quote, QuoteRequest};
use crate::error::AppError;
use crate::estimator::{BreakdownLine, CostTables, ProjectParameters};
use crate::payment::{PaymentPlan, ScheduledPayment};

/// Body of `POST /api/v1/estimates`.
///
/// `project.amenities` is taken literally when present: `{ "pool": true }` prices a
/// pool and no garage. Leaving `amenities` out selects the garage only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub contact: ContactDetails,
    #[serde(default)]
    pub project: ProjectParameters,
    #[serde(default)]
    pub plan: PaymentPlan,
    #[serde(default)]
    pub include_schedule: bool,
    /// First payment date; defaults to today.
    #[serde(default)]
    pub first_due: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateResponse {
    #[serde(flatten)]
    pub quote: Quote,
    pub line_items: Vec<BreakdownLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduledPayment>>,
}

/// Router builder exposing the catalog and estimate endpoints over shared tables.
pub fn quote_router(tables: Arc<CostTables>) -> Router {
    Router::new()
        .route("/api/v1/catalog", get(catalog_handler))
        .route("/api/v1/estimates", post(estimate_handler))
        .with_state(tables)
}

pub(crate) async fn catalog_handler(State(tables): State<Arc<CostTables>>) -> Json<CatalogView> {
    Json(CatalogView::from_tables(&tables))
}

pub(crate) async fn estimate_handler(
    State(tables): State<Arc<CostTables>>,
    Json(payload): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    let EstimateRequest {
        contact,
        project,
        plan,
        include_schedule,
        first_due,
    } = payload;

    let quote = prepare_quote(
        QuoteRequest {
            contact,
            project,
            plan,
        },
        &tables,
    )?;

    let schedule = if include_schedule {
        let first_due = first_due.unwrap_or_else(|| Local::now().date_naive());
        Some(quote.payment.schedule(first_due)?)
    } else {
        None
    };
    let line_items = quote.breakdown.line_items();

    Ok(Json(EstimateResponse {
        quote,
        line_items,
        schedule,
    }))
}
