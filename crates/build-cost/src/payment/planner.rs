use tracing::debug;

use super::domain::{
    CashResult, FinancedResult, InstallmentResult, PaymentError, PaymentPlan, PaymentResult,
    CASH_DISCOUNT_RATE, CASH_FINAL_RATE, DEFAULT_DOWN_PAYMENT_PERCENT, DEFAULT_INSTALLMENT_COUNT,
    DEFAULT_MONTHLY_RATE_PERCENT, MAX_INSTALLMENT_COUNT,
};

/// Turns an estimated total into the figures of the chosen payment plan.
pub fn plan(total: f64, choice: &PaymentPlan) -> Result<PaymentResult, PaymentError> {
    if !total.is_finite() || total < 0.0 {
        return Err(PaymentError::invalid(
            "total",
            format!("must be a non-negative amount (found {total})"),
        ));
    }

    let result = match *choice {
        PaymentPlan::Cash => PaymentResult::Cash(cash(total)),
        PaymentPlan::Installment {
            down_payment_percent,
            installment_count,
        } => PaymentResult::Installment(installment(
            total,
            down_payment_percent.unwrap_or(DEFAULT_DOWN_PAYMENT_PERCENT),
            installment_count.unwrap_or(DEFAULT_INSTALLMENT_COUNT),
        )?),
        PaymentPlan::Financed {
            down_payment_percent,
            installment_count,
            monthly_rate_percent,
        } => PaymentResult::Financed(financed(
            total,
            down_payment_percent.unwrap_or(DEFAULT_DOWN_PAYMENT_PERCENT),
            installment_count.unwrap_or(DEFAULT_INSTALLMENT_COUNT),
            monthly_rate_percent.unwrap_or(DEFAULT_MONTHLY_RATE_PERCENT),
        )?),
    };

    debug!(
        mode = ?result.mode(),
        total,
        total_paid = result.total_paid(),
        "planned payment"
    );

    Ok(result)
}

fn cash(total: f64) -> CashResult {
    CashResult {
        total,
        discount: total * CASH_DISCOUNT_RATE,
        final_value: total * CASH_FINAL_RATE,
    }
}

fn installment(
    total: f64,
    down_payment_percent: f64,
    installment_count: u32,
) -> Result<InstallmentResult, PaymentError> {
    validate_down_payment(down_payment_percent)?;
    validate_installment_count(installment_count)?;

    let down_payment = total * (down_payment_percent / 100.0);
    let remaining = total - down_payment;
    let installment_value = remaining / f64::from(installment_count);

    Ok(InstallmentResult {
        total,
        down_payment_percent,
        down_payment,
        remaining,
        installment_count,
        installment_value,
        total_paid: total,
    })
}

fn financed(
    total: f64,
    down_payment_percent: f64,
    installment_count: u32,
    monthly_rate_percent: f64,
) -> Result<FinancedResult, PaymentError> {
    validate_down_payment(down_payment_percent)?;
    validate_installment_count(installment_count)?;
    if !monthly_rate_percent.is_finite() || monthly_rate_percent < 0.0 {
        return Err(PaymentError::invalid(
            "monthly_rate_percent",
            format!("must not be negative (found {monthly_rate_percent})"),
        ));
    }

    let down_payment = total * (down_payment_percent / 100.0);
    let financed_amount = total - down_payment;
    let rate = monthly_rate_percent / 100.0;
    let installment_value = annuity_payment(financed_amount, rate, installment_count)?;
    let total_paid = down_payment + installment_value * f64::from(installment_count);
    let nominal_annual_rate_percent = monthly_rate_percent * 12.0;
    if !total_paid.is_finite() || !nominal_annual_rate_percent.is_finite() {
        return Err(PaymentError::invalid(
            "monthly_rate_percent",
            format!("{monthly_rate_percent}% a month does not yield a finite total"),
        ));
    }

    Ok(FinancedResult {
        total,
        down_payment_percent,
        down_payment,
        financed_amount,
        monthly_rate_percent,
        nominal_annual_rate_percent,
        installment_count,
        installment_value,
        total_paid,
        total_interest: total_paid - total,
    })
}

/// Fixed payment that amortizes `principal` over `periods` at periodic `rate` (Price
/// formula). A zero rate degenerates to a straight split.
pub fn annuity_payment(principal: f64, rate: f64, periods: u32) -> Result<f64, PaymentError> {
    validate_installment_count(periods)?;
    if rate == 0.0 {
        return Ok(principal / f64::from(periods));
    }

    // r / (1 - (1 + r)^-n) evaluated in log space: stays exact for tiny rates and
    // never forms the overflowing (1 + r)^n.
    let discount = -(-f64::from(periods) * rate.ln_1p()).exp_m1();
    let payment = principal * rate / discount;
    if !payment.is_finite() {
        return Err(PaymentError::invalid(
            "monthly_rate_percent",
            format!("no finite installment at rate {rate} over {periods} periods"),
        ));
    }
    Ok(payment)
}

fn validate_down_payment(percent: f64) -> Result<(), PaymentError> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(PaymentError::invalid(
            "down_payment_percent",
            format!("must be between 0 and 100 (found {percent})"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_installment_count(count: u32) -> Result<(), PaymentError> {
    if count == 0 {
        return Err(PaymentError::invalid(
            "installment_count",
            "must be at least one installment",
        ));
    }
    if count > MAX_INSTALLMENT_COUNT {
        return Err(PaymentError::invalid(
            "installment_count",
            format!("must be at most {MAX_INSTALLMENT_COUNT} (found {count})"),
        ));
    }
    Ok(())
}
