//! Parsed representation of filter expressions.

use std::fmt;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use super::glob;

/// Upper bound on the compiled size of a user-supplied regex.
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// The item attribute a tag is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Unscoped text, matched against title or URL.
    Bare,
    /// `title:` - the page title.
    Title,
    /// `url:` - the full URL.
    Url,
    /// `domain:` - the URL's host name, glob-matched.
    Domain,
    /// `dir:` - the bookmark folder path, glob-matched.
    Dir,
}

/// Field prefixes accepted before a `:`.
pub const SUPPORTED_FIELDS: [&str; 4] = ["title", "url", "domain", "dir"];

impl Field {
    /// Resolves a prefix (without the colon), ignoring case.
    pub fn from_prefix(prefix: &str) -> Option<Field> {
        match prefix.to_ascii_lowercase().as_str() {
            "title" => Some(Field::Title),
            "url" => Some(Field::Url),
            "domain" => Some(Field::Domain),
            "dir" => Some(Field::Dir),
            _ => None,
        }
    }

    /// The prefix name, or an empty string for bare text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Bare => "",
            Field::Title => "title",
            Field::Url => "url",
            Field::Domain => "domain",
            Field::Dir => "dir",
        }
    }

    /// Human-readable name used in filter descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Bare => "title or url",
            Field::Title => "title",
            Field::Url => "url",
            Field::Domain => "domain",
            Field::Dir => "folder",
        }
    }

    /// Returns true for field-scoped tags.
    pub fn is_scoped(&self) -> bool {
        !matches!(self, Field::Bare)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a tag matches against, decided once when the tag is built.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Case-insensitive substring (or glob, for `domain:` and `dir:`).
    Literal(String),
    /// Compiled `/pattern/`, always case-insensitive.
    Regex(Regex),
}

impl Pattern {
    /// The literal text, or the regex source without slashes.
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Literal(text) => text,
            Pattern::Regex(re) => re.as_str(),
        }
    }

    /// Returns true for a compiled regex.
    pub fn is_regex(&self) -> bool {
        matches!(self, Pattern::Regex(_))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Pattern::Literal(a), Pattern::Literal(b)) => a == b,
            (Pattern::Regex(a), Pattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for Pattern {}

/// Records a `/pattern/` that failed to compile and fell back to literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexFallback {
    /// The pattern source between the slashes.
    pub pattern: String,
    /// Why compilation failed.
    pub message: String,
}

/// A single filter clause: an optional field, a pattern, and a negation flag.
///
/// Tags are immutable once built. Anything derived from the pattern (the
/// compiled regex, the folded needle, the compiled glob) is computed here
/// and reused for every evaluation.
#[derive(Debug, Clone)]
pub struct FilterTag {
    field: Field,
    pattern: Pattern,
    negative: bool,
    /// Lowercased literal for substring tests.
    needle: String,
    /// Compiled glob for `domain:`/`dir:` literals.
    glob: Option<Regex>,
    /// Field-looking prefix that is not a supported field.
    unknown_field: Option<String>,
    regex_fallback: Option<RegexFallback>,
}

impl FilterTag {
    /// Builds a tag that matches `value` as literal text.
    ///
    /// For `domain:` and `dir:` the text is a glob: `*` matches within one
    /// label or folder, `**` matches across any number of them.
    pub fn literal(field: Field, value: impl Into<String>, negative: bool) -> Self {
        let value = value.into();
        let glob = match field {
            Field::Domain if !value.is_empty() => glob::compile_domain_glob(&value),
            Field::Dir if !value.is_empty() => glob::compile_path_glob(&value),
            _ => None,
        };
        Self {
            field,
            needle: value.to_lowercase(),
            pattern: Pattern::Literal(value),
            negative,
            glob,
            unknown_field: None,
            regex_fallback: None,
        }
    }

    /// Builds a tag from a regex source (the text between the slashes).
    ///
    /// If the source does not compile, the tag falls back to matching the
    /// raw `/pattern/flags` text literally and remembers why.
    pub fn regex(field: Field, source: &str, raw: &str, negative: bool) -> Self {
        match RegexBuilder::new(source)
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
        {
            Ok(re) => Self {
                field,
                pattern: Pattern::Regex(re),
                negative,
                needle: String::new(),
                glob: None,
                unknown_field: None,
                regex_fallback: None,
            },
            Err(e) => {
                warn!(pattern = source, error = %e, "invalid regex in filter, matching as text");
                let mut tag = Self::literal(field, raw, negative);
                tag.regex_fallback = Some(RegexFallback {
                    pattern: source.to_string(),
                    message: e.to_string(),
                });
                tag
            }
        }
    }

    /// Marks the tag as carrying an unsupported field prefix.
    pub(crate) fn with_unknown_field(mut self, name: String) -> Self {
        self.unknown_field = Some(name);
        self
    }

    /// The field this tag is scoped to.
    pub fn field(&self) -> Field {
        self.field
    }

    /// The pattern this tag matches with.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The literal text or regex source.
    pub fn value(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns true if the tag was written with a leading `-`.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns true if the tag holds a compiled regex.
    pub fn is_regex(&self) -> bool {
        self.pattern.is_regex()
    }

    /// The unsupported field prefix this bare tag was written with, if any.
    pub fn unknown_field(&self) -> Option<&str> {
        self.unknown_field.as_deref()
    }

    /// Details of a regex that failed to compile, if this tag fell back.
    pub fn regex_fallback(&self) -> Option<&RegexFallback> {
        self.regex_fallback.as_ref()
    }

    pub(crate) fn needle(&self) -> &str {
        &self.needle
    }

    pub(crate) fn glob(&self) -> Option<&Regex> {
        self.glob.as_ref()
    }
}

impl PartialEq for FilterTag {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.pattern == other.pattern
            && self.negative == other.negative
            && self.unknown_field == other.unknown_field
            && self.regex_fallback == other.regex_fallback
    }
}

impl Eq for FilterTag {}

/// Tags sharing one field. Positive members are OR'd, negative members
/// must all exclude.
#[derive(Debug, Clone, Copy)]
pub struct FieldGroup<'a> {
    filter: &'a Filter,
    field: Field,
    members: &'a [usize],
}

impl<'a> FieldGroup<'a> {
    /// The shared field.
    pub fn field(&self) -> Field {
        self.field
    }

    /// The group's tags, in input order.
    pub fn tags(&self) -> impl Iterator<Item = &'a FilterTag> + 'a {
        let filter: &'a Filter = self.filter;
        let members: &'a [usize] = self.members;
        members.iter().map(move |&i| &filter.tags[i])
    }

    /// Tags without a leading `-`.
    pub fn positive(&self) -> impl Iterator<Item = &'a FilterTag> + 'a {
        self.tags().filter(|t| !t.is_negative())
    }

    /// Tags with a leading `-`.
    pub fn negative(&self) -> impl Iterator<Item = &'a FilterTag> + 'a {
        self.tags().filter(|t| t.is_negative())
    }
}

/// A parsed filter expression.
///
/// Built fresh from the source string with
/// [`FilterParser::parse`](super::FilterParser::parse); never mutated after.
/// Once any tag is field-scoped, bare text tags become inert: they are kept
/// (so validation can report them) but take no part in matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    source: String,
    tags: Vec<FilterTag>,
    has_field_tag: bool,
    /// Effective tags grouped by field, in order of first appearance.
    groups: Vec<(Field, Vec<usize>)>,
}

impl Filter {
    /// Assembles a filter from already-parsed tags.
    pub fn from_tags(source: impl Into<String>, tags: Vec<FilterTag>) -> Self {
        let has_field_tag = tags.iter().any(|t| t.field().is_scoped());

        let mut groups: Vec<(Field, Vec<usize>)> = Vec::new();
        for (index, tag) in tags.iter().enumerate() {
            if has_field_tag && !tag.field().is_scoped() {
                continue;
            }
            match groups.iter_mut().find(|(field, _)| *field == tag.field()) {
                Some((_, members)) => members.push(index),
                None => groups.push((tag.field(), vec![index])),
            }
        }

        Self {
            source: source.into(),
            tags,
            has_field_tag,
            groups,
        }
    }

    /// The trimmed source text this filter was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All parsed tags, in input order, including inert ones.
    pub fn tags(&self) -> &[FilterTag] {
        &self.tags
    }

    /// Returns true if any tag is field-scoped.
    pub fn has_field_tag(&self) -> bool {
        self.has_field_tag
    }

    /// Returns true if the filter has no tags at all.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns true if the tag takes no part in matching.
    pub fn is_inert(&self, tag: &FilterTag) -> bool {
        self.has_field_tag && !tag.field().is_scoped()
    }

    /// Tags that take part in matching.
    pub fn effective_tags(&self) -> impl Iterator<Item = &FilterTag> {
        self.tags.iter().filter(move |t| !self.is_inert(t))
    }

    /// Effective tags grouped by field, in order of first appearance.
    pub fn groups(&self) -> impl Iterator<Item = FieldGroup<'_>> {
        self.groups.iter().map(move |(field, members)| FieldGroup {
            filter: self,
            field: *field,
            members,
        })
    }
}
