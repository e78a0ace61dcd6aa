//! Intake contract shared by the CLI and HTTP callers: contact details, the fields a
//! quote cannot start without, and the estimate → plan composition.

mod catalog;
mod router;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::estimator::{estimate, CostBreakdown, CostTables, EstimateError, ProjectParameters};
use crate::payment::{plan, PaymentError, PaymentPlan, PaymentResult};

pub use catalog::{
    AmenityOption, CatalogView, FactorOption, PaymentOptions, PercentRange, RegionOption,
};
pub use router::{quote_router, EstimateRequest, EstimateResponse};

/// Contingency band recommended to cover fees, permits, and surprises.
pub const RECOMMENDED_CONTINGENCY_PERCENT: (f64, f64) = (10.0, 15.0);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub contact: ContactDetails,
    #[serde(default)]
    pub project: ProjectParameters,
    #[serde(default)]
    pub plan: PaymentPlan,
}

/// Inputs a quote is blocked on until they are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Email,
    Region,
    Area,
}

impl RequiredField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Region => "region",
            Self::Area => "area",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl QuoteRequest {
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.contact.name.trim().is_empty() {
            missing.push(RequiredField::Name);
        }
        if self.contact.email.trim().is_empty() {
            missing.push(RequiredField::Email);
        }
        if self.project.region.is_blank() {
            missing.push(RequiredField::Region);
        }
        if !self.project.area.is_finite() || self.project.area <= 0.0 {
            missing.push(RequiredField::Area);
        }
        missing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContingencyGuidance {
    BelowRecommended,
    Recommended,
    AboveRecommended,
}

impl ContingencyGuidance {
    pub fn for_percent(percent: f64) -> Self {
        let (low, high) = RECOMMENDED_CONTINGENCY_PERCENT;
        if percent < low {
            Self::BelowRecommended
        } else if percent > high {
            Self::AboveRecommended
        } else {
            Self::Recommended
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BelowRecommended => "below the recommended 10-15%",
            Self::Recommended => "within the recommended 10-15%",
            Self::AboveRecommended => "above the recommended 10-15%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub contact: ContactDetails,
    pub project: ProjectParameters,
    pub breakdown: CostBreakdown,
    pub payment: PaymentResult,
    pub contingency_guidance: ContingencyGuidance,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error("missing required fields: {}", join_fields(.0))]
    Incomplete(Vec<RequiredField>),
    #[error(transparent)]
    Estimate(#[from] EstimateError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.key())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Refuses incomplete requests, then prices the project and plans its payment.
pub fn prepare_quote(request: QuoteRequest, tables: &CostTables) -> Result<Quote, QuoteError> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(QuoteError::Incomplete(missing));
    }

    let QuoteRequest {
        contact,
        project,
        plan: choice,
    } = request;

    let breakdown = estimate(&project, tables)?;
    let payment = plan(breakdown.total, &choice)?;
    let contingency_guidance = ContingencyGuidance::for_percent(project.contingency_percent);

    info!(
        region = %project.region,
        mode = ?payment.mode(),
        total = breakdown.total,
        "prepared construction quote"
    );

    Ok(Quote {
        contact,
        project,
        breakdown,
        payment,
        contingency_guidance,
    })
}
