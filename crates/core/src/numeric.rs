//! Numeric model using `rust_decimal`.
//!
//! Every amount and percentage is a `Decimal`. Fixed shares are exact
//! rationals applied with checked arithmetic, and residuary splits hand
//! the division remainder to the last share so a stage never creates or
//! loses value. No `f64` anywhere in the distribution path.

use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::error::DistributionError;

/// Scale used when rendering amounts and percentages for display.
pub const DISPLAY_SCALE: u32 = 2;

/// An exact fraction of the estate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    pub num: u32,
    pub den: u32,
}

impl Fraction {
    pub const HALF: Fraction = Fraction::new(1, 2);
    pub const THIRD: Fraction = Fraction::new(1, 3);
    pub const QUARTER: Fraction = Fraction::new(1, 4);
    pub const SIXTH: Fraction = Fraction::new(1, 6);
    pub const EIGHTH: Fraction = Fraction::new(1, 8);
    pub const TWO_THIRDS: Fraction = Fraction::new(2, 3);

    pub const fn new(num: u32, den: u32) -> Self {
        Fraction { num, den }
    }

    /// `amount * num / den`, multiplying first so exact fractions of
    /// round estates stay exact.
    pub fn of(self, amount: Decimal) -> Result<Decimal, DistributionError> {
        scale(amount, Decimal::from(self.num), Decimal::from(self.den)).ok_or_else(|| {
            DistributionError::Overflow {
                message: format!("{} of {}", self, amount),
            }
        })
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Percentage (0-100) of `estate` that `amount` represents.
pub fn percentage_of(amount: Decimal, estate: Decimal) -> Result<Decimal, DistributionError> {
    scale(amount, Decimal::ONE_HUNDRED, estate).ok_or_else(|| DistributionError::Overflow {
        message: format!("percentage of {} in {}", amount, estate),
    })
}

/// `value * mul / div`. Near `Decimal::MAX` the product no longer fits,
/// so the division is taken first at the cost of the last digit.
fn scale(value: Decimal, mul: Decimal, div: Decimal) -> Option<Decimal> {
    value
        .checked_mul(mul)
        .and_then(|p| p.checked_div(div))
        .or_else(|| value.checked_div(div).and_then(|q| q.checked_mul(mul)))
}

/// Split `residue` proportionally to `weights`.
///
/// All shares but the last are `residue / sum(weights) * weight`; the last
/// receives whatever is left, so the shares always sum to `residue`.
/// Returns an empty vector when there is nothing to weigh.
pub fn split_weighted(residue: Decimal, weights: &[u64]) -> Result<Vec<Decimal>, DistributionError> {
    let total: u64 = weights.iter().sum();
    if total == 0 {
        return Ok(Vec::new());
    }
    let overflow = || DistributionError::Overflow {
        message: format!("splitting {} into {} shares", residue, total),
    };
    let per_unit = residue
        .checked_div(Decimal::from(total))
        .ok_or_else(overflow)?;

    let mut shares = Vec::with_capacity(weights.len());
    let mut assigned = Decimal::ZERO;
    for (i, weight) in weights.iter().enumerate() {
        let share = if i + 1 == weights.len() {
            residue - assigned
        } else {
            per_unit
                .checked_mul(Decimal::from(*weight))
                .ok_or_else(overflow)?
        };
        assigned += share;
        shares.push(share);
    }
    Ok(shares)
}

/// Convert a floating-point estate value, rejecting NaN, infinities and
/// non-positive amounts.
pub fn estate_from_f64(value: f64) -> Result<Decimal, DistributionError> {
    let invalid = || DistributionError::InvalidEstateValue {
        value: value.to_string(),
    };
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    Decimal::from_f64(value).ok_or_else(invalid)
}

/// Round for display with banker's rounding.
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Format an amount with thousands grouping and two decimals,
/// e.g. `1,050,000.00`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_display(value);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn fraction_of_round_estate_is_exact() {
        assert_eq!(Fraction::EIGHTH.of(dec("1200000")).unwrap(), dec("150000"));
        assert_eq!(Fraction::SIXTH.of(dec("900000")).unwrap(), dec("150000"));
        assert_eq!(Fraction::TWO_THIRDS.of(dec("900")).unwrap(), dec("600"));
    }

    #[test]
    fn fraction_of_huge_estate_divides_first() {
        let estate = dec("60000000000000000000000000000");
        let share = Fraction::TWO_THIRDS.of(estate).unwrap();
        assert!((share - dec("40000000000000000000000000000")).abs() <= Decimal::ONE);
        assert!(Fraction::TWO_THIRDS.of(Decimal::MAX).is_ok());
    }

    #[test]
    fn percentage_of_huge_estate() {
        let estate = dec("1000000000000000000000000000");
        assert_eq!(percentage_of(estate, estate).unwrap(), dec("100"));
    }

    #[test]
    fn percentage_overflow_is_reported() {
        let err = percentage_of(Decimal::MAX, dec("0.0000000001")).unwrap_err();
        assert!(matches!(err, DistributionError::Overflow { .. }));
    }

    #[test]
    fn fraction_display() {
        assert_eq!(Fraction::TWO_THIRDS.to_string(), "2/3");
    }

    #[test]
    fn percentage_of_whole_is_hundred() {
        assert_eq!(percentage_of(dec("600000"), dec("600000")).unwrap(), dec("100"));
        assert_eq!(percentage_of(dec("150000"), dec("1200000")).unwrap(), dec("12.5"));
    }

    #[test]
    fn split_weighted_two_to_one() {
        let shares = split_weighted(dec("1050000"), &[2, 1]).unwrap();
        assert_eq!(shares, vec![dec("700000"), dec("350000")]);
    }

    #[test]
    fn split_weighted_never_loses_value() {
        let residue = dec("100");
        let shares = split_weighted(residue, &[1, 1, 1]).unwrap();
        assert_eq!(shares.len(), 3);
        assert_eq!(shares.iter().copied().sum::<Decimal>(), residue);
    }

    #[test]
    fn split_weighted_with_no_weight_is_empty() {
        assert!(split_weighted(dec("10"), &[]).unwrap().is_empty());
        assert!(split_weighted(dec("10"), &[0, 0]).unwrap().is_empty());
    }

    #[test]
    fn estate_from_f64_rejects_non_finite_and_non_positive() {
        assert!(estate_from_f64(f64::NAN).is_err());
        assert!(estate_from_f64(f64::INFINITY).is_err());
        assert!(estate_from_f64(0.0).is_err());
        assert!(estate_from_f64(-5.0).is_err());
        assert_eq!(estate_from_f64(1200000.0).unwrap(), dec("1200000"));
    }

    #[test]
    fn display_rounding_is_bankers() {
        assert_eq!(round_display(dec("0.125")), dec("0.12"));
        assert_eq!(round_display(dec("0.135")), dec("0.14"));
    }

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(format_amount(dec("1050000")), "1,050,000.00");
        assert_eq!(format_amount(dec("999.5")), "999.50");
        assert_eq!(format_amount(dec("33.333333")), "33.33");
        assert_eq!(format_amount(dec("-1234")), "-1,234.00");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }
}
