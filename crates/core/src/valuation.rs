//! Portfolio cost and valuation engine.
//!
//! Pure arithmetic over canonical units (milligram weights, per-gram rates).
//! No I/O and no rounding: currency amounts keep full decimal precision so
//! aggregation over many records does not compound rounding error. Rounding
//! to whole currency units is a presentation concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{GRAMS_PER_TOLA, MILLIGRAMS_PER_GRAM};
use crate::errors::{Result, ValuationError};
use crate::investments::Investment;

/// Profit or loss of a portfolio against its cost basis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLoss {
    pub amount: Decimal,
    /// Undefined (not zero, not NaN) when the cost basis is zero.
    pub percent: Option<Decimal>,
}

/// Aggregate valuation of one commodity's holdings.
///
/// `current_value` and `profit_loss` are `None` when no current rate is
/// known; a missing rate must read as "unknown", never as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_weight_grams: Decimal,
    pub total_weight_tola: Decimal,
    pub total_cost: Decimal,
    pub current_rate_per_gram: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub profit_loss: Option<ProfitLoss>,
}

/// Cost in currency units of a single investment line.
pub fn line_cost(weight_milligrams: i64, buy_rate_per_gram: Decimal) -> Result<Decimal> {
    if weight_milligrams <= 0 {
        return Err(ValuationError::InvalidQuantity(format!(
            "line weight must be positive, got {}mg",
            weight_milligrams
        ))
        .into());
    }
    if buy_rate_per_gram <= Decimal::ZERO {
        return Err(ValuationError::InvalidQuantity(format!(
            "buy rate must be positive, got {}",
            buy_rate_per_gram
        ))
        .into());
    }
    let grams = Decimal::from(weight_milligrams) / Decimal::from(MILLIGRAMS_PER_GRAM);
    Ok(grams * buy_rate_per_gram)
}

/// Sum of line costs over a portfolio; an empty portfolio costs zero.
pub fn portfolio_cost(investments: &[Investment]) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for inv in investments {
        total += line_cost(inv.weight_milligrams, inv.buy_rate_per_gram)?;
    }
    Ok(total)
}

/// Total held weight in grams.
pub fn portfolio_weight_grams(investments: &[Investment]) -> Decimal {
    investments
        .iter()
        .map(|inv| Decimal::from(inv.weight_milligrams) / Decimal::from(MILLIGRAMS_PER_GRAM))
        .sum()
}

/// Market value of a holding at the given rate.
pub fn current_value(total_weight_grams: Decimal, current_rate_per_gram: Decimal) -> Decimal {
    total_weight_grams * current_rate_per_gram
}

/// Profit/loss amount and percentage against cost.
///
/// The percentage is defined only for a positive cost basis.
pub fn profit_loss(current_value: Decimal, total_cost: Decimal) -> ProfitLoss {
    let amount = current_value - total_cost;
    let percent = if total_cost > Decimal::ZERO {
        Some(amount / total_cost * Decimal::from(100))
    } else {
        None
    };
    ProfitLoss { amount, percent }
}

/// Computes the full dashboard aggregate for one commodity's holdings.
///
/// The caller fetches the investments and the latest closing rate; this
/// function only does the arithmetic.
pub fn summarize(
    investments: &[Investment],
    current_rate_per_gram: Option<Decimal>,
) -> Result<PortfolioSummary> {
    let total_weight_grams = portfolio_weight_grams(investments);
    let total_cost = portfolio_cost(investments)?;

    let value = current_rate_per_gram.map(|rate| current_value(total_weight_grams, rate));
    let pl = value.map(|v| profit_loss(v, total_cost));

    Ok(PortfolioSummary {
        total_weight_grams,
        total_weight_tola: total_weight_grams / GRAMS_PER_TOLA,
        total_cost,
        current_rate_per_gram,
        current_value: value,
        profit_loss: pl,
    })
}
