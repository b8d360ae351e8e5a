//! Parser turning filter strings into [`Filter`]s.

use std::borrow::Cow;

use tracing::debug;

use super::ast::{Field, Filter, FilterTag};
use super::lexer::{Lexer, REGEX_FLAGS};

/// Parser for tag-based filter expressions.
///
/// # Grammar
///
/// ```text
/// filter        ::= token (whitespace token)*
/// token         ::= "-"? (quoted | field_term | bare_term)
/// quoted        ::= '"' text '"' | "'" text "'"
/// field_term    ::= field ":" value
/// field         ::= "title" | "url" | "domain" | "dir"   (case-insensitive)
/// value         ::= quoted | regex_literal | text
/// bare_term     ::= regex_literal | text
/// regex_literal ::= "/" pattern "/" flags?
/// ```
///
/// Tags on the same field are OR'd, different fields are AND'd, and a
/// leading `-` excludes. Parsing never fails: a regex that does not compile
/// is matched as plain text, and anything that is not a known field prefix
/// is bare text.
///
/// # Example
///
/// ```
/// use tabdeck_filter::filter::{Field, FilterParser};
///
/// let filter = FilterParser::parse("title:rust -url:/\\.cn$/");
/// assert_eq!(filter.tags().len(), 2);
/// assert_eq!(filter.tags()[0].field(), Field::Title);
/// assert!(filter.tags()[1].is_negative());
/// assert!(filter.tags()[1].is_regex());
/// ```
pub struct FilterParser;

impl FilterParser {
    /// Parses a filter expression. Empty or blank input yields an empty
    /// filter, which matches everything.
    pub fn parse(input: &str) -> Filter {
        let trimmed = input.trim();
        let tags: Vec<FilterTag> = Lexer::new(trimmed)
            .tokenize()
            .iter()
            .filter_map(|token| parse_tag(&token.text))
            .collect();

        debug!(
            filter = trimmed,
            tags = tags.len(),
            "parsed filter expression"
        );
        Filter::from_tags(trimmed, tags)
    }
}

/// Parses a filter expression. Shorthand for [`FilterParser::parse`].
pub fn parse_filter(input: &str) -> Filter {
    FilterParser::parse(input)
}

/// Parses one token into a tag. Returns `None` only for an empty token.
pub fn parse_tag(token: &str) -> Option<FilterTag> {
    if token.is_empty() {
        return None;
    }

    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) if !rest.is_empty() => (true, rest),
        _ => (false, token),
    };
    let rest = strip_quotes(rest);
    let rest = rest.as_ref();

    if let Some((prefix, value)) = rest.split_once(':') {
        if let Some(field) = Field::from_prefix(prefix) {
            return Some(build_tag(field, unquote(value), negative));
        }
        if looks_like_field(prefix, value) {
            let tag = build_tag(Field::Bare, rest, negative);
            return Some(tag.with_unknown_field(prefix.to_lowercase()));
        }
    }

    Some(build_tag(Field::Bare, rest, negative))
}

fn build_tag(field: Field, value: &str, negative: bool) -> FilterTag {
    match split_regex_literal(value) {
        Some(source) => FilterTag::regex(field, source, value, negative),
        None => FilterTag::literal(field, value, negative),
    }
}

/// Returns the pattern of a `/pattern/flags` literal.
///
/// The pattern runs to the last slash and must not be empty; anything
/// after that slash must be flag letters.
fn split_regex_literal(value: &str) -> Option<&str> {
    let body = value.strip_prefix('/')?;
    let end = body.rfind('/')?;
    let (pattern, flags) = (&body[..end], &body[end + 1..]);
    if pattern.is_empty() || !flags.chars().all(|c| REGEX_FLAGS.contains(c)) {
        return None;
    }
    Some(pattern)
}

/// Removes the quotes around each quoted run, keeping what they enclose.
///
/// A quote with no matching close stays as text. A regex literal, which
/// starts the token or follows a `:`, is copied as-is from its slash on.
fn strip_quotes(text: &str) -> Cow<'_, str> {
    if !text.contains(['"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut previous: Option<char> = None;

    while let Some(c) = rest.chars().next() {
        if c == '/' && matches!(previous, None | Some(':')) {
            out.push_str(rest);
            break;
        }
        if c == '"' || c == '\'' {
            if let Some(end) = rest[1..].find(c) {
                out.push_str(&rest[1..=end]);
                rest = &rest[end + 2..];
                previous = Some(c);
                continue;
            }
        }
        out.push(c);
        previous = Some(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}

/// Strips one pair of matching surrounding quotes.
fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// URI schemes written without `//`, so `mailto:bob` is text, not a field.
const OPAQUE_SCHEMES: &[&str] = &[
    "about", "blob", "data", "javascript", "magnet", "mailto", "sms", "tel", "urn",
];

/// A prefix looks like a field name when it is a word and the value does
/// not start like a URL's `//`, a port or time's digit, or a sentence's space.
fn looks_like_field(prefix: &str, value: &str) -> bool {
    let mut chars = prefix.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_alpha
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !value.starts_with("//")
        && !value.starts_with(|c: char| c.is_whitespace() || c.is_ascii_digit())
        && !OPAQUE_SCHEMES
            .iter()
            .any(|scheme| scheme.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_regex_literal() {
        assert_eq!(split_regex_literal("/abc/"), Some("abc"));
        assert_eq!(split_regex_literal("/abc/gi"), Some("abc"));
        assert_eq!(split_regex_literal("/a/b/"), Some("a/b"));
        assert_eq!(split_regex_literal("/abc/x"), None);
        assert_eq!(split_regex_literal("//"), None);
        assert_eq!(split_regex_literal("/"), None);
        assert_eq!(split_regex_literal("abc"), None);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(r#""a b""#), "a b");
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote(r#""a'"#), r#""a'"#);
        assert_eq!(unquote(r#"""#), r#"""#);
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes(r#""foo"bar"#), "foobar");
        assert_eq!(strip_quotes(r#"foo"bar""#), "foobar");
        assert_eq!(strip_quotes(r#"title:"a b""#), "title:a b");
        assert_eq!(strip_quotes(r#""it's here""#), "it's here");
        assert_eq!(strip_quotes("don't"), "don't");
        assert_eq!(strip_quotes(r#""half open"#), r#""half open"#);
        assert_eq!(strip_quotes(r#"title:/"x"/"#), r#"title:/"x"/"#);
        assert_eq!(strip_quotes("plain"), "plain");
    }

    #[test]
    fn test_looks_like_field() {
        assert!(looks_like_field("titel", "foo"));
        assert!(looks_like_field("tag_2", ""));
        assert!(!looks_like_field("http", "//example.com"));
        assert!(!looks_like_field("10", "30"));
        assert!(!looks_like_field("Re", " hello"));
        assert!(!looks_like_field("", "x"));
        assert!(!looks_like_field("localhost", "3000"));
        assert!(!looks_like_field("mailto", "bob@example.com"));
        assert!(!looks_like_field("TEL", "+15550100"));
    }

    #[test]
    fn test_parse_tag_empty() {
        assert!(parse_tag("").is_none());
    }

    #[test]
    fn test_parse_tag_lone_dash_is_text() {
        let tag = parse_tag("-").unwrap();
        assert!(!tag.is_negative());
        assert_eq!(tag.value(), "-");
    }
}
