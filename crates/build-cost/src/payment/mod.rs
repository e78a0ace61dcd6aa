//! Cash, interest-free installment, and financed payment plans.

pub mod domain;
mod planner;
mod schedule;

pub use domain::{
    CashResult, FinancedResult, InstallmentResult, PaymentError, PaymentMode, PaymentPlan,
    PaymentResult, DEFAULT_DOWN_PAYMENT_PERCENT, DEFAULT_INSTALLMENT_COUNT,
    DEFAULT_MONTHLY_RATE_PERCENT, MAX_INSTALLMENT_COUNT,
};
pub use planner::{annuity_payment, plan};
pub use schedule::ScheduledPayment;
