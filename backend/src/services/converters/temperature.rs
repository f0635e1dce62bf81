//! Celsius, Fahrenheit and Kelvin conversion.
//!
//! Temperature scales are affine, not linear, so they live outside the
//! unit registry. Everything goes through Celsius.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ensure_finite, ConversionError};
use crate::services::format::format_fixed2;

const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "C", alias = "celsius")]
    Celsius,
    #[serde(rename = "F", alias = "fahrenheit")]
    Fahrenheit,
    #[serde(rename = "K", alias = "kelvin")]
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value - KELVIN_OFFSET,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius + KELVIN_OFFSET,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('°').to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

/// Convert a temperature reading between scales.
pub fn convert_temperature(
    value: f64,
    from: TemperatureUnit,
    to: TemperatureUnit,
) -> Result<f64, ConversionError> {
    let value = ensure_finite(value)?;
    if from == to {
        return Ok(value);
    }
    Ok(to.from_celsius(from.to_celsius(value)))
}

/// `value` rendered with two decimals and the unit symbol, e.g. `98.60°F`.
pub fn display_temperature(value: f64, unit: TemperatureUnit) -> String {
    format!("{}{}", format_fixed2(value), unit.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn celsius_fahrenheit_fixed_points() {
        assert_relative_eq!(
            convert_temperature(100.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit)
                .unwrap(),
            212.0
        );
        assert_relative_eq!(
            convert_temperature(-40.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius)
                .unwrap(),
            -40.0
        );
    }

    #[test]
    fn kelvin_goes_through_celsius() {
        assert_relative_eq!(
            convert_temperature(0.0, TemperatureUnit::Kelvin, TemperatureUnit::Fahrenheit)
                .unwrap(),
            -459.67,
            max_relative = 1e-12
        );
    }

    #[test]
    fn display_uses_two_decimals() {
        let f = convert_temperature(37.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit)
            .unwrap();
        assert_eq!(display_temperature(f, TemperatureUnit::Fahrenheit), "98.60°F");
    }

    #[test]
    fn parses_unit_names() {
        assert_eq!("°C".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Celsius);
        assert_eq!("kelvin".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Kelvin);
        assert!("rankine".parse::<TemperatureUnit>().is_err());
        assert!(
            convert_temperature(f64::INFINITY, TemperatureUnit::Celsius, TemperatureUnit::Kelvin)
                .is_err()
        );
    }
}
