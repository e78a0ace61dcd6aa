use chrono::{Months, NaiveDate};
use serde::Serialize;

use super::domain::{FinancedResult, InstallmentResult, PaymentError, PaymentResult};
use super::planner::validate_installment_count;

/// One dated payment. Number 0 is the down payment; installments count from 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduledPayment {
    pub number: u32,
    pub due_on: NaiveDate,
    pub amount: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

impl PaymentResult {
    /// Expands the plan into dated payments, one month apart, starting at `first_due`.
    pub fn schedule(&self, first_due: NaiveDate) -> Result<Vec<ScheduledPayment>, PaymentError> {
        match self {
            PaymentResult::Cash(result) => Ok(vec![ScheduledPayment {
                number: 1,
                due_on: first_due,
                amount: result.final_value,
                interest: 0.0,
                principal: result.final_value,
                balance: 0.0,
            }]),
            PaymentResult::Installment(result) => installment_schedule(result, first_due),
            PaymentResult::Financed(result) => financed_schedule(result, first_due),
        }
    }
}

fn due_date(first_due: NaiveDate, offset: u32) -> Result<NaiveDate, PaymentError> {
    first_due
        .checked_add_months(Months::new(offset))
        .ok_or_else(|| {
            PaymentError::invalid(
                "first_due",
                format!("installment {offset} falls outside the supported calendar"),
            )
        })
}

/// Rejects terms the planner would refuse and terms ending past the calendar, before
/// any row is built.
fn check_term(installment_count: u32, first_due: NaiveDate) -> Result<(), PaymentError> {
    validate_installment_count(installment_count)?;
    due_date(first_due, installment_count).map(|_| ())
}

fn down_payment_row(
    amount: f64,
    balance: f64,
    first_due: NaiveDate,
) -> Option<ScheduledPayment> {
    (amount > 0.0).then_some(ScheduledPayment {
        number: 0,
        due_on: first_due,
        amount,
        interest: 0.0,
        principal: amount,
        balance,
    })
}

fn installment_schedule(
    result: &InstallmentResult,
    first_due: NaiveDate,
) -> Result<Vec<ScheduledPayment>, PaymentError> {
    check_term(result.installment_count, first_due)?;
    let mut rows = Vec::with_capacity(result.installment_count as usize + 1);
    rows.extend(down_payment_row(
        result.down_payment,
        result.remaining,
        first_due,
    ));

    let mut balance = result.remaining;
    for number in 1..=result.installment_count {
        let last = number == result.installment_count;
        let principal = if last {
            balance
        } else {
            result.installment_value
        };
        balance = if last { 0.0 } else { balance - principal };
        rows.push(ScheduledPayment {
            number,
            due_on: due_date(first_due, number)?,
            amount: principal,
            interest: 0.0,
            principal,
            balance,
        });
    }

    Ok(rows)
}

/// Price table: constant payment, interest on the outstanding balance, the rest
/// amortizes principal. The last row settles whatever rounding left behind.
fn financed_schedule(
    result: &FinancedResult,
    first_due: NaiveDate,
) -> Result<Vec<ScheduledPayment>, PaymentError> {
    let rate = result.monthly_rate_percent / 100.0;
    check_term(result.installment_count, first_due)?;
    let mut rows = Vec::with_capacity(result.installment_count as usize + 1);
    rows.extend(down_payment_row(
        result.down_payment,
        result.financed_amount,
        first_due,
    ));

    let mut balance = result.financed_amount;
    for number in 1..=result.installment_count {
        let interest = balance * rate;
        let last = number == result.installment_count;
        let principal = if last {
            balance
        } else {
            result.installment_value - interest
        };
        balance = if last { 0.0 } else { balance - principal };
        rows.push(ScheduledPayment {
            number,
            due_on: due_date(first_due, number)?,
            amount: principal + interest,
            interest,
            principal,
            balance,
        });
    }

    Ok(rows)
}
