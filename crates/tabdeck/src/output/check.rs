//! Filter check output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use tabdeck_filter::filter::{describe_filter, Filter, FilterTag, Validation};

use super::helpers::{format_header, truncate_str};

/// JSON output structure for the check command.
#[derive(Serialize)]
pub struct CheckOutput<'a> {
    #[serde(flatten)]
    pub validation: Validation,
    pub filter: &'a str,
    pub description: String,
    pub tags: Vec<TagOutput<'a>>,
}

/// JSON output structure for a single parsed tag.
#[derive(Serialize)]
pub struct TagOutput<'a> {
    pub field: &'static str,
    pub negated: bool,
    pub regex: bool,
    pub value: &'a str,
}

impl<'a> From<&'a FilterTag> for TagOutput<'a> {
    fn from(tag: &'a FilterTag) -> Self {
        Self {
            field: tag.field().label(),
            negated: tag.is_negative(),
            regex: tag.is_regex(),
            value: tag.value(),
        }
    }
}

/// Formats a successful check as JSON.
pub fn format_check_json(filter: &Filter) -> Result<String, serde_json::Error> {
    let output = CheckOutput {
        validation: Validation::from(Ok(())),
        filter: filter.source(),
        description: describe_filter(filter),
        tags: filter.effective_tags().map(TagOutput::from).collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a successful check, optionally listing the parsed tags.
pub fn format_check_table(filter: &Filter, explain: bool, use_colors: bool) -> String {
    let mut output = String::new();

    let mark = if use_colors {
        "✓".green().to_string()
    } else {
        "✓".to_string()
    };
    output.push_str(&format!("{} {}\n", mark, describe_filter(filter)));

    if !explain || filter.is_empty() {
        return output;
    }

    output.push('\n');
    let header = format!("{:<14} {:<8} {:<6} {}", "Field", "Negated", "Regex", "Value");
    output.push_str(&format_header(&header, use_colors));
    output.push('\n');

    for tag in filter.effective_tags() {
        let row = TagOutput::from(tag);
        output.push_str(&format!(
            "{:<14} {:<8} {:<6} {}\n",
            row.field,
            yes_no(row.negated),
            yes_no(row.regex),
            truncate_str(row.value, 60)
        ));
    }

    output
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabdeck_filter::filter::FilterParser;

    #[test]
    fn test_check_table_summary_only() {
        let filter = FilterParser::parse("title:foo -url:bar");
        assert_eq!(
            format_check_table(&filter, false, false),
            "✓ title contains foo url does not contain bar\n"
        );
    }

    #[test]
    fn test_check_table_empty_filter() {
        let filter = FilterParser::parse("");
        assert_eq!(format_check_table(&filter, true, false), "✓ no filter\n");
    }

    #[test]
    fn test_check_table_explain() {
        let filter = FilterParser::parse(r"dir:Work -url:/\.cn$/");
        let table = format_check_table(&filter, true, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("Field"));
        assert!(lines[3].starts_with("folder"));
        assert!(lines[3].ends_with("Work"));
        assert!(lines[4].starts_with("url"));
        assert!(lines[4].contains("yes      yes"));
        assert!(lines[4].ends_with(r"\.cn$"));
    }

    #[test]
    fn test_check_json() {
        let filter = FilterParser::parse("domain:*.rs title:/^x/");
        let json: serde_json::Value =
            serde_json::from_str(&format_check_json(&filter).unwrap()).unwrap();

        assert_eq!(json["valid"], true);
        assert_eq!(json["error"], "");
        assert_eq!(json["filter"], "domain:*.rs title:/^x/");
        assert_eq!(json["description"], "domain contains *.rs title matches ^x");
        assert_eq!(json["tags"][0]["field"], "domain");
        assert_eq!(json["tags"][1]["regex"], true);
    }
}
