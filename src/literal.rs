//! Literal decoding with graceful degradation.
//!
//! Each decoder turns the raw text of one terminal literal into a typed
//! value. Decoders never fail the surrounding parse: on any malformed input
//! they return `None`, the caller records a `MalformedLiteral` diagnostic,
//! and the node keeps its raw text with an absent decoded value.

use serde::{Deserialize, Serialize};

/// A decoded literal value. The raw text is always kept alongside on the
/// owning node; this is only the semantic half.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    Regex(RegexLiteral),
}

/// Pattern and flags of a regular-expression literal, split out of the
/// `/pattern/flags` surface form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexLiteral {
    pub pattern: String,
    pub flags: String,
}

/// Tolerant floating-point decode. Accepts anything `f64::from_str` does;
/// anything else is absent.
pub fn decode_number(raw: &str) -> Option<LiteralValue> {
    raw.trim().parse::<f64>().ok().map(LiteralValue::Number)
}

/// Strip exactly one delimiter code unit from each end of a string literal.
///
/// Escape sequences are deliberately left as-is: the decoded value is
/// raw-minus-quotes. Mismatched or missing delimiters yield `None`.
pub fn decode_string(raw: &str) -> Option<LiteralValue> {
    let mut chars = raw.chars();
    let open = chars.next()?;
    if open != '"' && open != '\'' {
        return None;
    }
    let close = chars.next_back()?;
    if close != open {
        return None;
    }
    Some(LiteralValue::String(chars.as_str().to_string()))
}

pub fn decode_boolean(raw: &str) -> Option<LiteralValue> {
    match raw {
        "true" => Some(LiteralValue::Boolean(true)),
        "false" => Some(LiteralValue::Boolean(false)),
        _ => None,
    }
}

pub fn decode_null(raw: &str) -> Option<LiteralValue> {
    (raw == "null").then_some(LiteralValue::Null)
}

/// Split `/pattern/flags` and validate the pattern by compiling it.
///
/// Structural mismatch (no delimiters, empty body) or a pattern the engine
/// rejects both degrade to `None`.
pub fn decode_regex(raw: &str) -> Option<LiteralValue> {
    let body = raw.strip_prefix('/')?;
    let slash = body.rfind('/')?;
    let (pattern, flags) = body.split_at(slash);
    let flags = &flags[1..];
    if pattern.is_empty() || !flags.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    regex::Regex::new(pattern).ok()?;
    Some(LiteralValue::Regex(RegexLiteral {
        pattern: pattern.to_string(),
        flags: flags.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_decode_tolerantly() {
        assert_eq!(decode_number("1"), Some(LiteralValue::Number(1.0)));
        assert_eq!(decode_number("3.25"), Some(LiteralValue::Number(3.25)));
        assert_eq!(decode_number("1e3"), Some(LiteralValue::Number(1000.0)));
        assert_eq!(decode_number("1e"), None);
        assert_eq!(decode_number("abc"), None);
    }

    #[test]
    fn strings_lose_exactly_one_delimiter_per_end() {
        assert_eq!(
            decode_string("\"hello\""),
            Some(LiteralValue::String("hello".into()))
        );
        assert_eq!(
            decode_string("'it'"),
            Some(LiteralValue::String("it".into()))
        );
        // Escapes are kept raw, not interpreted.
        assert_eq!(
            decode_string(r#""a\nb""#),
            Some(LiteralValue::String(r"a\nb".into()))
        );
        assert_eq!(decode_string("\"\""), Some(LiteralValue::String("".into())));
        assert_eq!(decode_string("\"unterminated"), None);
        assert_eq!(decode_string("\"mixed'"), None);
        assert_eq!(decode_string("x"), None);
    }

    #[test]
    fn regex_splits_pattern_and_flags() {
        let decoded = decode_regex("/a+b/gi").unwrap();
        assert_eq!(
            decoded,
            LiteralValue::Regex(RegexLiteral {
                pattern: "a+b".into(),
                flags: "gi".into(),
            })
        );
    }

    #[test]
    fn regex_degrades_on_bad_structure_or_pattern() {
        assert_eq!(decode_regex("no-delimiters"), None);
        assert_eq!(decode_regex("//"), None);
        // Unbalanced group fails compilation.
        assert_eq!(decode_regex("/(a/"), None);
    }

    #[test]
    fn keywords_decode_exactly() {
        assert_eq!(decode_boolean("true"), Some(LiteralValue::Boolean(true)));
        assert_eq!(decode_boolean("False"), None);
        assert_eq!(decode_null("null"), Some(LiteralValue::Null));
        assert_eq!(decode_null("nil"), None);
    }
}
