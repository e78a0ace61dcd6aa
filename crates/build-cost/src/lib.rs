//! Construction cost estimation and payment planning.
//!
//! The [`estimator`] turns project parameters into an itemized [`CostBreakdown`], the
//! [`payment`] planner turns the resulting total into plan-specific figures, and
//! [`quote`] composes both behind the required-field gating used by the CLI and HTTP
//! callers.

pub mod config;
pub mod error;
pub mod estimator;
pub mod payment;
pub mod quote;
pub mod telemetry;

pub use estimator::{estimate, CostBreakdown, CostTables, ProjectParameters};
pub use payment::{plan, PaymentPlan, PaymentResult};
pub use quote::{prepare_quote, Quote, QuoteRequest};
