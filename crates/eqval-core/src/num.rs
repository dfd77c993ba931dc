//! Null-propagating arithmetic shared by every model.
//!
//! A value of `None` means "unknown": the upstream data never provided it and
//! no derivation rule could produce it. Unknown operands yield unknown
//! results. Falling back to zero is reserved for *assumption* defaults
//! (see [`crate::assumptions`]), never for missing statement data.

use rust_decimal::Decimal;

/// Division that returns `None` when either operand is unknown or the
/// denominator is zero. Never panics, never produces infinity.
pub fn safe_div(num: Option<Decimal>, den: Option<Decimal>) -> Option<Decimal> {
    match (num, den) {
        (Some(n), Some(d)) if !d.is_zero() => Some(n / d),
        _ => None,
    }
}

/// Sum of two values that is known only when both operands are known.
pub fn opt_add(a: Option<Decimal>, b: Option<Decimal>) -> Option<Decimal> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        _ => None,
    }
}

/// Difference of two values that is known only when both operands are known.
pub fn opt_sub(a: Option<Decimal>, b: Option<Decimal>) -> Option<Decimal> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a - b),
        _ => None,
    }
}

/// Sum across operands, ignoring unknowns. `None` only when every operand is
/// unknown (summing nothing is not a derivation).
pub fn sum_known(values: &[Option<Decimal>]) -> Option<Decimal> {
    if values.iter().all(Option::is_none) {
        return None;
    }
    Some(values.iter().flatten().sum())
}

/// Treat an unknown value as zero. For aggregate lines where the original
/// model folds absent components into the total (e.g. pro-forma net debt).
pub fn or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_safe_div_basic() {
        assert_eq!(safe_div(Some(dec!(10)), Some(dec!(4))), Some(dec!(2.5)));
    }

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(Some(dec!(10)), Some(Decimal::ZERO)), None);
    }

    #[test]
    fn test_safe_div_unknown_operands() {
        assert_eq!(safe_div(None, Some(dec!(4))), None);
        assert_eq!(safe_div(Some(dec!(10)), None), None);
        assert_eq!(safe_div(None, None), None);
    }

    #[test]
    fn test_opt_add_requires_both() {
        assert_eq!(opt_add(Some(dec!(1)), Some(dec!(2))), Some(dec!(3)));
        assert_eq!(opt_add(Some(dec!(1)), None), None);
        assert_eq!(opt_add(None, None), None);
    }

    #[test]
    fn test_opt_sub_requires_both() {
        assert_eq!(opt_sub(Some(dec!(5)), Some(dec!(2))), Some(dec!(3)));
        assert_eq!(opt_sub(None, Some(dec!(2))), None);
        assert_eq!(opt_sub(Some(dec!(5)), None), None);
    }

    #[test]
    fn test_sum_known_ignores_unknowns() {
        assert_eq!(
            sum_known(&[Some(dec!(10)), None, Some(dec!(20))]),
            Some(dec!(30))
        );
        assert_eq!(sum_known(&[Some(dec!(10))]), Some(dec!(10)));
    }

    #[test]
    fn test_sum_known_all_unknown() {
        assert_eq!(sum_known(&[None, None]), None);
    }

    #[test]
    fn test_or_zero() {
        assert_eq!(or_zero(None), Decimal::ZERO);
        assert_eq!(or_zero(Some(dec!(5))), dec!(5));
    }
}
