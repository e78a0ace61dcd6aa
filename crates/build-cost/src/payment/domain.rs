use serde::{Deserialize, Serialize};

pub const CASH_DISCOUNT_RATE: f64 = 0.05;
pub const CASH_FINAL_RATE: f64 = 0.95;
pub const DEFAULT_DOWN_PAYMENT_PERCENT: f64 = 30.0;
pub const DEFAULT_INSTALLMENT_COUNT: u32 = 12;
pub const DEFAULT_MONTHLY_RATE_PERCENT: f64 = 1.5;
/// Longest plan accepted, one hundred years of monthly payments.
pub const MAX_INSTALLMENT_COUNT: u32 = 1200;

/// How the buyer intends to pay. Only the selected mode's parameters exist, and unset
/// parameters take the documented defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PaymentPlan {
    #[default]
    Cash,
    Installment {
        #[serde(default)]
        down_payment_percent: Option<f64>,
        #[serde(default)]
        installment_count: Option<u32>,
    },
    Financed {
        #[serde(default)]
        down_payment_percent: Option<f64>,
        #[serde(default)]
        installment_count: Option<u32>,
        #[serde(default)]
        monthly_rate_percent: Option<f64>,
    },
}

impl PaymentPlan {
    pub const fn mode(&self) -> PaymentMode {
        match self {
            Self::Cash => PaymentMode::Cash,
            Self::Installment { .. } => PaymentMode::Installment,
            Self::Financed { .. } => PaymentMode::Financed,
        }
    }

    /// Installment plan with every parameter left at its default.
    pub const fn installment() -> Self {
        Self::Installment {
            down_payment_percent: None,
            installment_count: None,
        }
    }

    /// Financing with every parameter left at its default.
    pub const fn financed() -> Self {
        Self::Financed {
            down_payment_percent: None,
            installment_count: None,
            monthly_rate_percent: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    Cash,
    Installment,
    Financed,
}

impl PaymentMode {
    pub const fn ordered() -> [Self; 3] {
        [Self::Cash, Self::Installment, Self::Financed]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Installment => "Interest-free installments",
            Self::Financed => "Financing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashResult {
    pub total: f64,
    pub discount: f64,
    pub final_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstallmentResult {
    pub total: f64,
    pub down_payment_percent: f64,
    pub down_payment: f64,
    pub remaining: f64,
    pub installment_count: u32,
    pub installment_value: f64,
    pub total_paid: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancedResult {
    pub total: f64,
    pub down_payment_percent: f64,
    pub down_payment: f64,
    pub financed_amount: f64,
    pub monthly_rate_percent: f64,
    pub nominal_annual_rate_percent: f64,
    pub installment_count: u32,
    pub installment_value: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Plan figures, tagged with the same mode as the [`PaymentPlan`] that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PaymentResult {
    Cash(CashResult),
    Installment(InstallmentResult),
    Financed(FinancedResult),
}

impl PaymentResult {
    pub const fn mode(&self) -> PaymentMode {
        match self {
            Self::Cash(_) => PaymentMode::Cash,
            Self::Installment(_) => PaymentMode::Installment,
            Self::Financed(_) => PaymentMode::Financed,
        }
    }

    /// What the buyer hands over in total under this plan.
    pub fn total_paid(&self) -> f64 {
        match self {
            Self::Cash(result) => result.final_value,
            Self::Installment(result) => result.total_paid,
            Self::Financed(result) => result.total_paid,
        }
    }
}

/// Planner failures. Raised instead of letting a division produce infinity or NaN.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

impl PaymentError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}
