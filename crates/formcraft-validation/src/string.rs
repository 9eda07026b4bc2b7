//! String presence checks

/// True when the string has no visible content.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t\n"));
        assert!(!is_blank("Jane"));
        assert!(!is_blank(" 0 "));
    }
}
