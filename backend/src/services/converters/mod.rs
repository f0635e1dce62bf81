//! Unit, temperature and currency converters.

pub mod currency;
pub mod temperature;
pub mod units;

pub use currency::{CurrencyConversion, RateTable, POPULAR_CURRENCIES};
pub use temperature::{convert_temperature, TemperatureUnit};
pub use units::{convert_all, convert_value, units_of, Conversion, Dimension, UnitId, UnitMeta};

/// Errors shared by all converters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("value must be a finite number (got {0})")]
    NonFiniteValue(f64),

    #[error("unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("cannot convert {from} ({from_dimension}) to {to} ({to_dimension})")]
    IncompatibleUnits {
        from: UnitId,
        from_dimension: Dimension,
        to: UnitId,
        to_dimension: Dimension,
    },

    #[error("no exchange rate for currency '{0}'")]
    UnknownCurrency(String),

    #[error("invalid exchange-rate payload: {0}")]
    InvalidRates(String),
}

pub(crate) fn ensure_finite(value: f64) -> Result<f64, ConversionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConversionError::NonFiniteValue(value))
    }
}
