//! JSON pretty-printing, minifying and validation.
//!
//! Object keys keep their input order.

use serde_json::Value;

use super::TextError;

fn parse(text: &str) -> Result<Value, TextError> {
    serde_json::from_str(text).map_err(|e| TextError::InvalidJson {
        message: e.to_string(),
        line: e.line(),
        column: e.column(),
    })
}

/// Re-indent with two spaces.
pub fn format_json(text: &str) -> Result<String, TextError> {
    let value = parse(text)?;
    serde_json::to_string_pretty(&value).map_err(|e| TextError::InvalidJson {
        message: e.to_string(),
        line: 0,
        column: 0,
    })
}

/// Strip all insignificant whitespace.
pub fn minify_json(text: &str) -> Result<String, TextError> {
    let value = parse(text)?;
    Ok(value.to_string())
}

pub fn validate_json(text: &str) -> Result<(), TextError> {
    parse(text).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_two_spaces_preserving_order() {
        let formatted = format_json(r#"{"z":1,"a":[true,null]}"#).unwrap();
        assert_eq!(
            formatted,
            "{\n  \"z\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn minifies() {
        let minified = minify_json("{\n  \"b\" : 2,\n  \"a\" : \"x y\"\n}").unwrap();
        assert_eq!(minified, r#"{"b":2,"a":"x y"}"#);
    }

    #[test]
    fn reports_error_position() {
        let err = validate_json("{\n  \"a\": 1,\n}").unwrap_err();
        match err {
            TextError::InvalidJson { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("trailing comma"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(validate_json("[1, 2]").is_ok());
    }
}
