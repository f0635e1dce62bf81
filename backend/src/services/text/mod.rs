//! Text utilities: case conversion, cleaning, Base64, URL handling, JSON
//! formatting and colour codes.

pub mod case;
pub mod cleaner;
pub mod color;
pub mod encoding;
pub mod json;
pub mod url;

pub use case::{convert_case, TextCase};
pub use cleaner::{clean, CleanOp};
pub use color::Rgb;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    #[error("invalid Base64 input: {0}")]
    InvalidBase64(String),

    #[error("decoded Base64 is not valid UTF-8")]
    InvalidUtf8,

    #[error("{message}")]
    InvalidJson {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("invalid hex colour '{0}' (expected #rrggbb)")]
    InvalidColor(String),

    #[error("malformed percent-encoding in '{0}'")]
    InvalidPercentEncoding(String),

    #[error("Input does not appear to be a URL")]
    NotAUrl,

    #[error("Invalid URL")]
    InvalidUrl,
}
