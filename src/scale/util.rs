use fastnum::decimal::D128;
use num_traits::{Float, Num, ToPrimitive};

/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Tolerance used when deciding whether a break sits on a domain edge.
/// Returns `step / 1000`.
pub fn epsilon_from_step(step: &D128) -> D128 {
    *step / D128::from(1000)
}

/// Converts a float into a decimal through its shortest round-trip text so that
/// `0.1` becomes exactly `0.1`. Non-finite input has no decimal representation.
pub fn dec(value: f64) -> Option<D128> {
    if !value.is_finite() {
        return None;
    }
    parse_decimal(&value.to_string()).or_else(|| Some(D128::from(value)))
}

pub fn dec_int(value: i64) -> D128 {
    D128::from(value)
}

pub fn parse_decimal(text: &str) -> Option<D128> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    <D128 as Num>::from_str_radix(text, 10).ok()
}

pub fn to_f64(value: &D128) -> f64 {
    ToPrimitive::to_f64(value).unwrap_or(f64::NAN)
}

/// Truncating conversion; `None` when out of `i64` range.
pub fn to_i64(value: &D128) -> Option<i64> {
    ToPrimitive::to_i64(value)
}

pub fn floor(value: D128) -> D128 {
    Float::floor(value)
}

pub fn ceil(value: D128) -> D128 {
    Float::ceil(value)
}

pub fn abs(value: D128) -> D128 {
    if value < D128::from(0) { -value } else { value }
}

/// `10^exp` computed by repeated multiplication so the result is exact.
pub fn pow10(exp: i32) -> D128 {
    let ten = D128::from(10);
    let mut value = D128::from(1);
    if exp >= 0 {
        for _ in 0..exp {
            value = value * ten;
        }
    } else {
        for _ in 0..(-exp) {
            value = value / ten;
        }
    }
    value
}

/// Midpoint of a pair, the neutral position for degenerate mappings.
pub fn midpoint(a: D128, b: D128) -> D128 {
    (a + b) / D128::from(2)
}

/// Linear map of `value` from `from` onto `to`. Returns the midpoint of `to`
/// when `from` is degenerate.
pub fn rescale(value: D128, from: (D128, D128), to: (D128, D128)) -> D128 {
    let span = from.1 - from.0;
    if span == D128::from(0) {
        return midpoint(to.0, to.1);
    }
    // Multiply before dividing so exact ratios stay exact.
    to.0 + (value - from.0) * (to.1 - to.0) / span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dec_is_exact_for_short_floats() {
        assert_eq!(dec(0.1), parse_decimal("0.1"));
        assert_eq!(dec(f64::NAN), None);
        assert_eq!(dec(f64::INFINITY), None);
    }

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), D128::from(1));
        assert_eq!(pow10(3), D128::from(1000));
        assert_eq!(pow10(-2), parse_decimal("0.01").unwrap());
    }

    #[test]
    fn test_rescale_degenerate_domain() {
        let to = (D128::from(0), D128::from(100));
        assert_eq!(rescale(D128::from(5), (D128::from(5), D128::from(5)), to), D128::from(50));
        assert_eq!(rescale(D128::from(5), (D128::from(0), D128::from(10)), to), D128::from(50));
    }

    #[test]
    fn test_sorted_pair() {
        assert_eq!(sorted_pair(3, 1), (1, 3));
        assert_eq!(sorted_pair(1, 3), (1, 3));
    }
}
