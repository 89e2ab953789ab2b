//! Weight and rate unit conversions.
//!
//! All weights are stored internally in milligrams and all rates per gram;
//! these helpers convert user-facing units (grams, tola, per-tola rates) to
//! and from the canonical forms. Conversion happens at the input boundary,
//! never in storage or downstream arithmetic.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::{GRAMS_PER_TOLA, MILLIGRAMS_PER_GRAM};
use crate::errors::{Result, ValuationError};

/// Unit in which a submitted weight is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum WeightUnit {
    #[default]
    Grams,
    Tola,
}

/// Denomination of a submitted rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RateBasis {
    #[default]
    PerGram,
    PerTola,
}

impl WeightUnit {
    /// Converts a weight in this unit to whole milligrams.
    pub fn to_milligrams(&self, weight: Decimal) -> Result<i64> {
        match self {
            WeightUnit::Grams => grams_to_milligrams(weight),
            WeightUnit::Tola => grams_to_milligrams(tola_to_grams(weight)?),
        }
    }
}

impl RateBasis {
    /// Converts a rate in this denomination to the canonical per-gram form.
    pub fn to_per_gram(&self, rate: Decimal) -> Result<Decimal> {
        match self {
            RateBasis::PerGram => {
                ensure_positive(rate, "rate per gram")?;
                Ok(rate)
            }
            RateBasis::PerTola => rate_per_tola_to_per_gram(rate),
        }
    }
}

fn ensure_positive(value: Decimal, what: &str) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(ValuationError::InvalidQuantity(format!(
            "{} must be positive, got {}",
            what, value
        ))
        .into());
    }
    Ok(())
}

/// Converts a weight in grams to whole milligrams, rounding to the nearest.
pub fn grams_to_milligrams(grams: Decimal) -> Result<i64> {
    ensure_positive(grams, "weight in grams")?;
    let mg = (grams * Decimal::from(MILLIGRAMS_PER_GRAM))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    mg.to_i64().ok_or_else(|| {
        ValuationError::InvalidQuantity(format!("weight {}g overflows milligrams", grams)).into()
    })
}

/// Converts a whole-milligram weight back to grams.
pub fn milligrams_to_grams(milligrams: i64) -> Result<Decimal> {
    if milligrams <= 0 {
        return Err(ValuationError::InvalidQuantity(format!(
            "weight in milligrams must be positive, got {}",
            milligrams
        ))
        .into());
    }
    Ok(Decimal::from(milligrams) / Decimal::from(MILLIGRAMS_PER_GRAM))
}

/// Converts a weight in tola to grams.
pub fn tola_to_grams(tola: Decimal) -> Result<Decimal> {
    ensure_positive(tola, "weight in tola")?;
    Ok(tola * GRAMS_PER_TOLA)
}

/// Converts a weight in grams to tola.
pub fn grams_to_tola(grams: Decimal) -> Result<Decimal> {
    ensure_positive(grams, "weight in grams")?;
    Ok(grams / GRAMS_PER_TOLA)
}

/// Converts a per-tola rate to the canonical per-gram rate.
pub fn rate_per_tola_to_per_gram(rate: Decimal) -> Result<Decimal> {
    ensure_positive(rate, "rate per tola")?;
    Ok(rate / GRAMS_PER_TOLA)
}

/// Converts a canonical per-gram rate to a per-tola rate.
pub fn rate_per_gram_to_per_tola(rate: Decimal) -> Result<Decimal> {
    ensure_positive(rate, "rate per gram")?;
    Ok(rate * GRAMS_PER_TOLA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::prelude::FromPrimitive;
    use rust_decimal_macros::dec;

    #[test]
    fn grams_to_milligrams_rounds_to_nearest() {
        assert_eq!(grams_to_milligrams(dec!(10.5)).unwrap(), 10500);
        assert_eq!(grams_to_milligrams(dec!(0.0004)).unwrap(), 0);
        assert_eq!(grams_to_milligrams(dec!(0.0005)).unwrap(), 1);
        assert_eq!(grams_to_milligrams(dec!(1.2344)).unwrap(), 1234);
    }

    #[test]
    fn milligrams_to_grams_divides() {
        assert_eq!(milligrams_to_grams(10500).unwrap(), dec!(10.5));
        assert_eq!(milligrams_to_grams(1).unwrap(), dec!(0.001));
    }

    #[test]
    fn tola_conversions_use_the_standard_factor() {
        assert_eq!(tola_to_grams(dec!(1)).unwrap(), dec!(11.664));
        assert_eq!(tola_to_grams(dec!(4)).unwrap(), dec!(46.656));
        assert_eq!(rate_per_gram_to_per_tola(dec!(1000)).unwrap(), dec!(11664));
    }

    #[test]
    fn non_positive_inputs_are_rejected() {
        assert!(grams_to_milligrams(Decimal::ZERO).is_err());
        assert!(grams_to_milligrams(dec!(-1)).is_err());
        assert!(milligrams_to_grams(0).is_err());
        assert!(milligrams_to_grams(-5).is_err());
        assert!(tola_to_grams(dec!(-0.1)).is_err());
        assert!(grams_to_tola(Decimal::ZERO).is_err());
        assert!(rate_per_tola_to_per_gram(Decimal::ZERO).is_err());
        assert!(rate_per_gram_to_per_tola(dec!(-7500)).is_err());
    }

    proptest! {
        #[test]
        fn weight_round_trip_within_milligram(g in 0.001f64..1_000_000.0) {
            let grams = Decimal::from_f64(g).unwrap();
            let mg = grams_to_milligrams(grams).unwrap();
            if mg > 0 {
                let back = milligrams_to_grams(mg).unwrap();
                // Integer milligram rounding loses at most half a milligram.
                prop_assert!((back - grams).abs() <= dec!(0.0005));
            }
        }

        #[test]
        fn tola_round_trip_is_exact_to_tolerance(t in 0.001f64..100_000.0) {
            let tola = Decimal::from_f64(t).unwrap();
            let back = grams_to_tola(tola_to_grams(tola).unwrap()).unwrap();
            let rel = ((back - tola) / tola).abs();
            prop_assert!(rel < dec!(0.000000001));
        }

        #[test]
        fn rate_round_trip_is_exact_to_tolerance(r in 0.01f64..10_000_000.0) {
            let rate = Decimal::from_f64(r).unwrap();
            let back = rate_per_gram_to_per_tola(rate_per_tola_to_per_gram(rate).unwrap()).unwrap();
            let rel = ((back - rate) / rate).abs();
            prop_assert!(rel < dec!(0.000000001));
        }
    }
}
