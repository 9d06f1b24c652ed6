//! Break label formatting.

use fastnum::decimal::D128;

use crate::scale::util;

/// Formats a break value for display: integral values print without a
/// fractional part, others with the shortest text that round-trips.
///
/// # Examples
///
/// ```
/// use ggscale::label::format_number;
///
/// assert_eq!(format_number(20.0), "20");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "NA".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    value.to_string()
}

pub fn format_decimal(value: &D128) -> String {
    format_number(util::to_f64(value))
}

/// Labels for a run of breaks, one per break.
pub fn format_breaks(breaks: &[D128]) -> Vec<String> {
    breaks.iter().map(format_decimal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-20.0), "-20");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(f64::NAN), "NA");
    }

    #[test]
    fn test_format_decimal_has_no_float_noise() {
        let sum = util::dec(0.1).unwrap() + util::dec(0.2).unwrap();
        assert_eq!(format_decimal(&sum), "0.3");
        assert_eq!(format_breaks(&[D128::from(0), util::dec(2.5).unwrap()]), ["0", "2.5"]);
    }
}
