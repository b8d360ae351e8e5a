//! Glob patterns for `domain:` and `dir:` tags.
//!
//! Both fields use the same two wildcards:
//!
//! - `*` matches within one segment (a domain label, or one folder)
//! - `**` matches across any number of segments
//!
//! Patterns are anchored at both ends and matched case-insensitively.
//! Folder paths may use either `/` or ` > ` between folders.

use regex::{Regex, RegexBuilder};

/// Compiles a domain glob such as `*.example.com` or `**.example.*`.
pub fn compile_domain_glob(pattern: &str) -> Option<Regex> {
    compile_glob(&pattern.to_lowercase(), "[^.]*")
}

/// Compiles a folder glob such as `Work/*` or `Bookmarks Bar > **`.
pub fn compile_path_glob(pattern: &str) -> Option<Regex> {
    compile_glob(&normalize_folder_path(pattern), "[^/]*")
}

/// Rewrites ` > ` separators (with any surrounding whitespace) to `/`.
///
/// ```
/// use tabdeck_filter::filter::normalize_folder_path;
///
/// assert_eq!(normalize_folder_path("Bookmarks Bar > Work"), "Bookmarks Bar/Work");
/// assert_eq!(normalize_folder_path("a>b  >c"), "a/b/c");
/// ```
pub fn normalize_folder_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('>').collect();
    let last = segments.len() - 1;
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let segment = if i > 0 { segment.trim_start() } else { segment };
            if i < last {
                segment.trim_end()
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns true if `domain` matches the domain glob `pattern`.
///
/// An empty pattern matches every domain.
///
/// ```
/// use tabdeck_filter::filter::match_domain_pattern;
///
/// assert!(match_domain_pattern("www.example.com", "*.example.com"));
/// assert!(!match_domain_pattern("a.b.example.com", "*.example.com"));
/// assert!(match_domain_pattern("a.b.example.com", "**.example.com"));
/// ```
pub fn match_domain_pattern(domain: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }
    match compile_domain_glob(pattern) {
        Some(re) => re.is_match(domain),
        None => domain.to_lowercase().contains(&pattern.to_lowercase()),
    }
}

/// Returns true if the folder `path` matches the folder glob `pattern`.
///
/// An empty pattern matches every folder.
pub fn match_glob_pattern(path: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }
    let path = normalize_folder_path(path);
    match compile_path_glob(pattern) {
        Some(re) => re.is_match(&path),
        None => path
            .to_lowercase()
            .contains(&normalize_folder_path(pattern).to_lowercase()),
    }
}

/// Translates a glob into an anchored, case-insensitive regex.
fn compile_glob(pattern: &str, single_segment: &str) -> Option<Regex> {
    let mut source = String::from("^");
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '*' {
            literal.push(c);
            continue;
        }
        source.push_str(&regex::escape(&literal));
        literal.clear();
        if chars.peek() == Some(&'*') {
            chars.next();
            source.push_str(".*");
        } else {
            source.push_str(single_segment);
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push('$');

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .ok()
}
