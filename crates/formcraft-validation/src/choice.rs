//! Closed-choice validation

/// Returns true when `value` is one of `options`.
///
/// An empty option list places no constraint on the value.
pub fn is_one_of<S: AsRef<str>>(value: &str, options: &[S]) -> bool {
    options.is_empty() || options.iter().any(|o| o.as_ref() == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of() {
        let options = ["A", "B"];
        assert!(is_one_of("A", &options));
        assert!(is_one_of("B", &options));
        assert!(!is_one_of("C", &options));
        assert!(!is_one_of("a", &options));
    }

    #[test]
    fn test_empty_options_accept_anything() {
        let options: [&str; 0] = [];
        assert!(is_one_of("anything", &options));
    }
}
