//! Letter-case conversion.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A word starts at a word character and runs to the next whitespace.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]\S*").expect("word pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCase {
    Upper,
    Lower,
    Title,
    Sentence,
}

impl FromStr for TextCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "upper" | "uppercase" => Ok(TextCase::Upper),
            "lower" | "lowercase" => Ok(TextCase::Lower),
            "title" => Ok(TextCase::Title),
            "sentence" => Ok(TextCase::Sentence),
            _ => Err(format!("Unknown text case: {}", s)),
        }
    }
}

pub fn convert_case(text: &str, case: TextCase) -> String {
    match case {
        TextCase::Upper => text.to_uppercase(),
        TextCase::Lower => text.to_lowercase(),
        TextCase::Title => title_case(text),
        TextCase::Sentence => sentence_case(text),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Capitalise every word, lower-casing the rest of it.
pub fn title_case(text: &str) -> String {
    WORD.replace_all(text, |caps: &regex::Captures| capitalize(&caps[0]))
        .into_owned()
}

/// Upper-case the first character and lower-case everything after it.
pub fn sentence_case(text: &str) -> String {
    capitalize(text)
}
