//! Dimension string parsing - "12.5mm", "-3 in", "42"

use regex::Regex;
use std::sync::OnceLock;

fn get_dimension_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?P<value>-?[0-9]*\.?[0-9]+)\s*(?P<unit>[^\s0-9]+)\s*$")
            .expect("dimension pattern is valid")
    })
}

fn get_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[0-9]*\.?[0-9]+$").expect("number pattern is valid"))
}

/// Split a dimension string into value and (not yet unaliased) unit
///
/// A bare number gets `default_unit`. Anything else, including exponents,
/// a leading `+` or an empty string, is `None`.
pub fn parse_dimension_str(s: &str, default_unit: &str) -> Option<(f64, String)> {
    if let Some(caps) = get_dimension_regex().captures(s) {
        let value = caps["value"].parse::<f64>().ok()?;
        return Some((value, caps["unit"].to_string()));
    }

    if get_number_regex().is_match(s) {
        let value = s.parse::<f64>().ok()?;
        return Some((value, default_unit.to_string()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<(f64, String)> {
        parse_dimension_str(s, "mm")
    }

    #[test]
    fn test_value_and_unit() {
        assert_eq!(parse("1m"), Some((1.0, "m".to_string())));
        assert_eq!(parse("2.3333333in"), Some((2.3333333, "in".to_string())));
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(parse("  -3.5 in  "), Some((-3.5, "in".to_string())));
    }

    #[test]
    fn test_leading_dot() {
        assert_eq!(parse(".5pt"), Some((0.5, "pt".to_string())));
        assert_eq!(parse("-.25deg"), Some((-0.25, "deg".to_string())));
    }

    #[test]
    fn test_non_ascii_unit() {
        assert_eq!(parse("5µ"), Some((5.0, "µ".to_string())));
        assert_eq!(parse("90°"), Some((90.0, "°".to_string())));
    }

    #[test]
    fn test_bare_number_uses_default_unit() {
        assert_eq!(parse("42"), Some((42.0, "mm".to_string())));
        assert_eq!(parse_dimension_str("-1.5", "in"), Some((-1.5, "in".to_string())));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("mm"), None);
        assert_eq!(parse("1e3mm"), None);
        assert_eq!(parse("+1mm"), None);
        assert_eq!(parse("1 m m"), None);
        assert_eq!(parse(" 42 "), None);
    }
}
