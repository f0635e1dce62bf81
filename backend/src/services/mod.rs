//! Tool implementations.
//!
//! Every tool is a pure function or a small state machine over plain values.
//! Nothing in here touches storage; the HTTP layer and the preference
//! services in [`crate::db`] are the only callers that do.

pub mod calculator;
pub mod calculators;
pub mod converters;
pub mod deadline;
pub mod format;
pub mod support;
pub mod text;
pub mod timezone;

pub use calculator::{Calculator, Key};
pub use calculators::CalculatorError;
pub use converters::ConversionError;
pub use deadline::{compute_deadline, compute_deadline_str, DeadlineError};
pub use support::{eta, response_time, EtaUnit, SnippetDeck, SupportError};
pub use text::TextError;
pub use timezone::{convert_time_of_day, TimeZoneError};
