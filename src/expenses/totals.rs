use std::str::FromStr;

use anyhow::{Context, Result};
use bigdecimal::BigDecimal;

/// Converts an amount to a decimal through its shortest decimal rendering, so
/// `0.1` becomes exactly `0.1` rather than the nearest binary fraction.
pub fn amount_to_decimal(amount: f64) -> Result<BigDecimal> {
    BigDecimal::from_str(&amount.to_string())
        .with_context(|| format!("amount {amount} is not a finite decimal"))
}

pub fn amount_from_decimal(amount: &BigDecimal) -> Result<f64> {
    amount
        .to_string()
        .parse::<f64>()
        .with_context(|| format!("amount {amount} cannot be represented as a number"))
}

/// Sums amounts in decimal arithmetic. An empty input sums to zero.
pub fn sum_amounts<I>(amounts: I) -> Result<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut total = BigDecimal::from(0);
    for amount in amounts {
        total += amount_to_decimal(amount)?;
    }

    amount_from_decimal(&total)
}
