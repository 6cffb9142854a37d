//! Field description annotations.
//!
//! Proto comments may end in a structured segment such as
//! `@gotags: json:"id" validate:"required"`. The text before the segment is
//! the visible description; the segment only decides whether the field is
//! required.

use crate::error::{DocError, DocResult};
use regex::Regex;
use std::sync::LazyLock;

// `@` at the start or after whitespace, or a glued `@name:` (`用户ID@gotags:`).
// `user@example.com` is not a segment.
static RE_SEGMENT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)@|@[A-Za-z_][A-Za-z0-9_]*:").unwrap());

static RE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^@([A-Za-z_][A-Za-z0-9_]*):?\s*(.*)$").unwrap());

static RE_TAG_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*):"([^"]*)""#).unwrap());

const REQUIRED_MARKER: &str = "required";

/// A description split into its visible text and required flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub required: bool,
}

/// Split a raw description. Fails with `MalformedAnnotation` when a segment
/// is present but does not parse.
pub fn parse(raw: &str) -> DocResult<Description> {
    let Some(start) = RE_SEGMENT_START.find(raw) else {
        return Ok(Description {
            text: raw.trim().to_string(),
            required: false,
        });
    };
    // The match may include the leading whitespace character
    let at = start.start() + start.as_str().find('@').unwrap_or_default();
    let segment = raw[at..].trim();

    let malformed = || DocError::MalformedAnnotation {
        text: segment.to_string(),
    };
    let caps = RE_SEGMENT.captures(segment).ok_or_else(malformed)?;
    let body = &caps[2];
    if body.matches('"').count() % 2 != 0 {
        return Err(malformed());
    }

    Ok(Description {
        text: raw[..at].trim().to_string(),
        required: &caps[1] == REQUIRED_MARKER || body_requires(body),
    })
}

impl Description {
    /// The whole raw text, not required; used when a segment is malformed.
    pub fn plain(raw: &str) -> Self {
        Description {
            text: raw.trim().to_string(),
            required: false,
        }
    }
}

/// `key:"a,b"` pairs are checked value by value; a body without pairs is
/// checked as a whole. A `required:"true"` pair also counts.
fn body_requires(body: &str) -> bool {
    let pairs: Vec<(&str, &str)> = RE_TAG_PAIR
        .captures_iter(body)
        .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
        .collect();

    if pairs.is_empty() {
        return has_marker(body);
    }
    pairs
        .iter()
        .any(|(key, value)| has_marker(value) || (*key == REQUIRED_MARKER && *value == "true"))
}

fn has_marker(text: &str) -> bool {
    text.split(|c: char| c == ',' || c == ';' || c == '|' || c.is_whitespace())
        .any(|token| token == REQUIRED_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_description() {
        let desc = parse("  user id ").unwrap();
        assert_eq!(desc.text, "user id");
        assert!(!desc.required);
    }

    #[test]
    fn gotags_required() {
        let desc = parse(r#"user id @gotags: validate:"required""#).unwrap();
        assert_eq!(desc.text, "user id");
        assert!(desc.required);
    }

    #[test]
    fn required_among_other_rules() {
        let desc = parse(r#"page size @gotags: json:"size" binding:"min=1,required""#).unwrap();
        assert_eq!(desc.text, "page size");
        assert!(desc.required);
    }

    #[test]
    fn annotation_without_required() {
        let desc = parse(r#"name @gotags: json:"name,omitempty""#).unwrap();
        assert_eq!(desc.text, "name");
        assert!(!desc.required);
    }

    #[test]
    fn not_required_is_not_required() {
        let desc = parse(r#"name @gotags: validate:"not_required""#).unwrap();
        assert!(!desc.required);
    }

    #[test]
    fn bare_required_segment() {
        let desc = parse("token\n@required").unwrap();
        assert_eq!(desc.text, "token");
        assert!(desc.required);
    }

    #[test]
    fn email_is_not_a_segment() {
        let desc = parse("contact admin@example.com").unwrap();
        assert_eq!(desc.text, "contact admin@example.com");
        assert!(!desc.required);
    }

    #[test]
    fn glued_segment_after_text() {
        let desc = parse(r#"用户ID@gotags: validate:"required""#).unwrap();
        assert_eq!(desc.text, "用户ID");
        assert!(desc.required);
    }

    #[test]
    fn glued_segment_without_required() {
        let desc = parse(r#"昵称@gotags: json:"nick""#).unwrap();
        assert_eq!(desc.text, "昵称");
        assert!(!desc.required);
    }

    #[test]
    fn malformed_segment_is_rejected() {
        let err = parse("weird @ required").unwrap_err();
        assert!(matches!(err, DocError::MalformedAnnotation { .. }));
        let err = parse(r#"bad @gotags: validate:"required"#).unwrap_err();
        assert!(matches!(err, DocError::MalformedAnnotation { .. }));
    }

    #[test]
    fn plain_keeps_whole_text() {
        let desc = Description::plain("  weird @ required ");
        assert_eq!(desc.text, "weird @ required");
        assert!(!desc.required);
    }
}
