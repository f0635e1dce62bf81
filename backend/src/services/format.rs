//! Display formatting for numeric results.

/// Fixed-point rendering with trailing zeros (and a dangling point) removed.
///
/// `format_trimmed(2.50, 6)` is `"2.5"`, `format_trimmed(3.0, 4)` is `"3"`.
/// Negative zero renders as `"0"`.
pub fn format_trimmed(value: f64, places: usize) -> String {
    let fixed = format!("{:.*}", places, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Fixed two-decimal rendering used for money and temperatures.
pub fn format_fixed2(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    if fixed == "-0.00" {
        "0.00".to_string()
    } else {
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(format_trimmed(2.5, 6), "2.5");
        assert_eq!(format_trimmed(3.0, 4), "3");
        assert_eq!(format_trimmed(100.0, 6), "100");
        assert_eq!(format_trimmed(0.1234567, 6), "0.123457");
        assert_eq!(format_trimmed(1609.344, 0), "1609");
    }

    #[test]
    fn negative_zero_is_plain_zero() {
        assert_eq!(format_trimmed(-0.0000001, 6), "0");
        assert_eq!(format_fixed2(-0.001), "0.00");
        assert_eq!(format_fixed2(12.345), "12.35");
    }
}
