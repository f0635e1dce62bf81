//! Single-formula pricing calculators.
//!
//! Results that would divide by zero are `None` rather than an error: the
//! panel simply hides that row. Non-finite inputs are rejected outright.

use serde::Serialize;

/// Shortcut percentages offered next to the percentage input.
pub const QUICK_PERCENTAGES: [f64; 7] = [5.0, 10.0, 15.0, 20.0, 25.0, 50.0, 75.0];

/// Unit labels offered by the unit-price calculator.
pub const UNIT_PRICE_UNITS: [&str; 8] = ["items", "kg", "lb", "oz", "L", "gal", "m", "ft"];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculatorError {
    #[error("{field} must be a finite number (got {value})")]
    InvalidInput { field: &'static str, value: f64 },
}

fn finite(field: &'static str, value: f64) -> Result<f64, CalculatorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculatorError::InvalidInput { field, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentageResult {
    /// `percent`% of `value`.
    pub of: f64,
    pub increase: f64,
    pub decrease: f64,
    /// `percent` expressed as a percentage of `value`.
    pub what_percent: Option<f64>,
}

pub fn percentage(value: f64, percent: f64) -> Result<PercentageResult, CalculatorError> {
    let value = finite("value", value)?;
    let percent = finite("percent", percent)?;
    let of = value * percent / 100.0;
    Ok(PercentageResult {
        of,
        increase: value + of,
        decrease: value - of,
        what_percent: (value != 0.0).then(|| percent / value * 100.0),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkupResult {
    pub profit: f64,
    /// Profit as a percentage of cost.
    pub markup: Option<f64>,
    /// Profit as a percentage of price.
    pub margin: Option<f64>,
}

pub fn markup_margin(cost: f64, price: f64) -> Result<MarkupResult, CalculatorError> {
    let cost = finite("cost", cost)?;
    let price = finite("price", price)?;
    let profit = price - cost;
    Ok(MarkupResult {
        profit,
        markup: (cost != 0.0).then(|| profit / cost * 100.0),
        margin: (price != 0.0).then(|| profit / price * 100.0),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxResult {
    /// Tax added on top of `amount`.
    pub tax: f64,
    /// `amount` plus tax.
    pub total: f64,
    /// `amount` read as a gross figure with the tax removed.
    pub pre_tax: Option<f64>,
    /// The tax contained in a gross `amount`.
    pub tax_portion: Option<f64>,
}

/// Forward and reverse tax on the same input.
///
/// `pre_tax` is absent for a rate of -100%, where no net amount exists.
pub fn tax(amount: f64, rate_percent: f64) -> Result<TaxResult, CalculatorError> {
    let amount = finite("amount", amount)?;
    let rate_percent = finite("rate", rate_percent)?;
    let tax = amount * rate_percent / 100.0;
    let divisor = 1.0 + rate_percent / 100.0;
    let pre_tax = (divisor != 0.0).then(|| amount / divisor);
    Ok(TaxResult {
        tax,
        total: amount + tax,
        pre_tax,
        tax_portion: pre_tax.map(|net| amount - net),
    })
}

/// Price per unit, `None` when the quantity is zero.
pub fn unit_price(total: f64, quantity: f64) -> Result<Option<f64>, CalculatorError> {
    let total = finite("price", total)?;
    let quantity = finite("quantity", quantity)?;
    Ok((quantity != 0.0).then(|| total / quantity))
}
