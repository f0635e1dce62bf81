//! Clean-ups for text pasted from emails and web pages.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));
static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("line break pattern compiles"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));
static SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("special pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanOp {
    /// Strip leading and trailing whitespace.
    Trim,
    /// Collapse whitespace runs into single spaces, then trim.
    CollapseSpaces,
    /// Replace line breaks with spaces, then trim.
    RemoveLineBreaks,
    /// Drop anything that looks like an HTML tag.
    StripHtml,
    /// Keep only ASCII word characters and whitespace.
    RemoveSpecialChars,
}

impl FromStr for CleanOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "trim" => Ok(CleanOp::Trim),
            "collapse_spaces" | "remove_extra_spaces" => Ok(CleanOp::CollapseSpaces),
            "remove_line_breaks" => Ok(CleanOp::RemoveLineBreaks),
            "strip_html" | "remove_html" => Ok(CleanOp::StripHtml),
            "remove_special_chars" => Ok(CleanOp::RemoveSpecialChars),
            _ => Err(format!("Unknown clean operation: {}", s)),
        }
    }
}

pub fn clean(text: &str, op: CleanOp) -> String {
    match op {
        CleanOp::Trim => text.trim().to_string(),
        CleanOp::CollapseSpaces => WHITESPACE.replace_all(text, " ").trim().to_string(),
        CleanOp::RemoveLineBreaks => LINE_BREAKS.replace_all(text, " ").trim().to_string(),
        CleanOp::StripHtml => HTML_TAG.replace_all(text, "").into_owned(),
        CleanOp::RemoveSpecialChars => SPECIAL.replace_all(text, "").into_owned(),
    }
}
