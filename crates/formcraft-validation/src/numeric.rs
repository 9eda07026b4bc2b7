//! Numeric input parsing

/// Parses user input into a finite number.
///
/// Surrounding whitespace is ignored. `NaN`, infinities and anything that is
/// not a plain decimal literal return `None`.
pub fn parse_finite(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // f64::from_str accepts "inf" and "nan" spellings; inputs never should.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_finite() {
        assert_eq!(parse_finite("42"), Some(42.0));
        assert_eq!(parse_finite(" 0 "), Some(0.0));
        assert_eq!(parse_finite("-3.5"), Some(-3.5));
        assert_eq!(parse_finite("1e3"), Some(1000.0));
    }

    #[test]
    fn test_rejects_non_numbers() {
        assert_eq!(parse_finite(""), None);
        assert_eq!(parse_finite("   "), None);
        assert_eq!(parse_finite("abc"), None);
        assert_eq!(parse_finite("NaN"), None);
        assert_eq!(parse_finite("inf"), None);
        assert_eq!(parse_finite("12abc"), None);
        assert_eq!(parse_finite("1e400"), None);
    }
}
