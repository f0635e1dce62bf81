//! Runtime unit registry for the linear converters.
//!
//! Each [`UnitId`] maps to a [`UnitMeta`] holding its dimension and a scale
//! factor to that dimension's canonical unit. Converting between two units of
//! the same dimension is then a two-step scale:
//!
//! ```text
//! value_dst = value_src * scale_src / scale_dst
//! ```
//!
//! Length, mass and speed factors come straight from `qtty`'s compile-time
//! unit ratios. Area is derived from squared length ratios and volume from
//! the US customary gallon (231 cubic inches).

use std::fmt;
use std::str::FromStr;

use qtty::{Per, Unit};
use serde::{Deserialize, Serialize};

use super::{ensure_finite, ConversionError};
use crate::services::format::format_trimmed;

/// Physical quantity a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Length,
    Mass,
    Volume,
    Area,
    Speed,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Length,
        Dimension::Mass,
        Dimension::Volume,
        Dimension::Area,
        Dimension::Speed,
    ];

    /// Decimal places shown for results in this dimension.
    pub fn display_places(&self) -> usize {
        match self {
            Dimension::Speed => 4,
            _ => 6,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Length => "length",
            Dimension::Mass => "mass",
            Dimension::Volume => "volume",
            Dimension::Area => "area",
            Dimension::Speed => "speed",
        };
        f.write_str(name)
    }
}

impl FromStr for Dimension {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "length" | "distance" => Ok(Dimension::Length),
            "mass" | "weight" => Ok(Dimension::Mass),
            "volume" => Ok(Dimension::Volume),
            "area" => Ok(Dimension::Area),
            "speed" | "velocity" => Ok(Dimension::Speed),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

/// Every unit the converters know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UnitId {
    // length
    Millimeter,
    Centimeter,
    Meter,
    Kilometer,
    Inch,
    Foot,
    Yard,
    Mile,
    // mass
    Milligram,
    Gram,
    Kilogram,
    Ounce,
    Pound,
    Tonne,
    // volume
    Milliliter,
    Liter,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
    // area
    SquareMillimeter,
    SquareCentimeter,
    SquareMeter,
    SquareKilometer,
    SquareInch,
    SquareFoot,
    SquareYard,
    SquareMile,
    Acre,
    Hectare,
    // speed
    KilometerPerHour,
    MilePerHour,
    MeterPerSecond,
    FootPerSecond,
    Knot,
}

/// Static description of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitMeta {
    pub id: UnitId,
    pub dimension: Dimension,
    pub symbol: &'static str,
    pub name: &'static str,
    /// Multiply by this to reach the dimension's canonical unit.
    pub scale_to_canonical: f64,
}

const INCH: f64 = <qtty::Inch as Unit>::RATIO;
const FOOT: f64 = <qtty::Foot as Unit>::RATIO;
const YARD: f64 = <qtty::Yard as Unit>::RATIO;
const MILE: f64 = <qtty::Mile as Unit>::RATIO;
const MILLIMETER: f64 = <qtty::Millimeter as Unit>::RATIO;
const CENTIMETER: f64 = <qtty::Centimeter as Unit>::RATIO;
const KILOMETER: f64 = <qtty::Kilometer as Unit>::RATIO;

const LITERS_PER_CUBIC_INCH: f64 = INCH * INCH * INCH * 1_000.0;
const US_GALLON_LITERS: f64 = 231.0 * LITERS_PER_CUBIC_INCH;
const SQUARE_FEET_PER_ACRE: f64 = 43_560.0;

const fn unit(
    id: UnitId,
    dimension: Dimension,
    symbol: &'static str,
    name: &'static str,
    scale_to_canonical: f64,
) -> UnitMeta {
    UnitMeta {
        id,
        dimension,
        symbol,
        name,
        scale_to_canonical,
    }
}

/// Registry in display order. Canonical units: metre, gram, litre, square
/// metre and metre per second.
const UNITS: [UnitMeta; 36] = [
    unit(UnitId::Millimeter, Dimension::Length, "mm", "Millimeter", MILLIMETER),
    unit(UnitId::Centimeter, Dimension::Length, "cm", "Centimeter", CENTIMETER),
    unit(UnitId::Meter, Dimension::Length, "m", "Meter", <qtty::Meter as Unit>::RATIO),
    unit(UnitId::Kilometer, Dimension::Length, "km", "Kilometer", KILOMETER),
    unit(UnitId::Inch, Dimension::Length, "in", "Inch", INCH),
    unit(UnitId::Foot, Dimension::Length, "ft", "Foot", FOOT),
    unit(UnitId::Yard, Dimension::Length, "yd", "Yard", YARD),
    unit(UnitId::Mile, Dimension::Length, "mi", "Mile", MILE),
    unit(UnitId::Milligram, Dimension::Mass, "mg", "Milligram", <qtty::Milligram as Unit>::RATIO),
    unit(UnitId::Gram, Dimension::Mass, "g", "Gram", <qtty::Gram as Unit>::RATIO),
    unit(UnitId::Kilogram, Dimension::Mass, "kg", "Kilogram", <qtty::Kilogram as Unit>::RATIO),
    unit(UnitId::Ounce, Dimension::Mass, "oz", "Ounce", <qtty::Ounce as Unit>::RATIO),
    unit(UnitId::Pound, Dimension::Mass, "lb", "Pound", <qtty::Pound as Unit>::RATIO),
    unit(UnitId::Tonne, Dimension::Mass, "t", "Metric Ton", <qtty::Tonne as Unit>::RATIO),
    unit(UnitId::Milliliter, Dimension::Volume, "mL", "Milliliter", 1e-3),
    unit(UnitId::Liter, Dimension::Volume, "L", "Liter", 1.0),
    unit(UnitId::FluidOunce, Dimension::Volume, "fl oz", "Fluid Ounce", US_GALLON_LITERS / 128.0),
    unit(UnitId::Cup, Dimension::Volume, "cup", "Cup", US_GALLON_LITERS / 16.0),
    unit(UnitId::Pint, Dimension::Volume, "pt", "Pint", US_GALLON_LITERS / 8.0),
    unit(UnitId::Quart, Dimension::Volume, "qt", "Quart", US_GALLON_LITERS / 4.0),
    unit(UnitId::Gallon, Dimension::Volume, "gal", "Gallon", US_GALLON_LITERS),
    unit(UnitId::SquareMillimeter, Dimension::Area, "mm²", "Square Millimeter", MILLIMETER * MILLIMETER),
    unit(UnitId::SquareCentimeter, Dimension::Area, "cm²", "Square Centimeter", CENTIMETER * CENTIMETER),
    unit(UnitId::SquareMeter, Dimension::Area, "m²", "Square Meter", 1.0),
    unit(UnitId::SquareKilometer, Dimension::Area, "km²", "Square Kilometer", KILOMETER * KILOMETER),
    unit(UnitId::SquareInch, Dimension::Area, "in²", "Square Inch", INCH * INCH),
    unit(UnitId::SquareFoot, Dimension::Area, "ft²", "Square Foot", FOOT * FOOT),
    unit(UnitId::SquareYard, Dimension::Area, "yd²", "Square Yard", YARD * YARD),
    unit(UnitId::SquareMile, Dimension::Area, "mi²", "Square Mile", MILE * MILE),
    unit(UnitId::Acre, Dimension::Area, "acre", "Acre", SQUARE_FEET_PER_ACRE * FOOT * FOOT),
    unit(UnitId::Hectare, Dimension::Area, "hectare", "Hectare", 10_000.0),
    unit(UnitId::KilometerPerHour, Dimension::Speed, "km/h", "Kilometers per Hour", <Per<qtty::Kilometer, qtty::Hour> as Unit>::RATIO),
    unit(UnitId::MilePerHour, Dimension::Speed, "mph", "Miles per Hour", <Per<qtty::Mile, qtty::Hour> as Unit>::RATIO),
    unit(UnitId::MeterPerSecond, Dimension::Speed, "m/s", "Meters per Second", <Per<qtty::Meter, qtty::Second> as Unit>::RATIO),
    unit(UnitId::FootPerSecond, Dimension::Speed, "ft/s", "Feet per Second", <Per<qtty::Foot, qtty::Second> as Unit>::RATIO),
    unit(UnitId::Knot, Dimension::Speed, "knot", "Knots", <Per<qtty::NauticalMile, qtty::Hour> as Unit>::RATIO),
];

/// Extra spellings accepted by [`UnitId::from_str`], matched case-insensitively.
const ALIASES: &[(&str, UnitId)] = &[
    ("meters", UnitId::Meter),
    ("metre", UnitId::Meter),
    ("feet", UnitId::Foot),
    ("inches", UnitId::Inch),
    ("miles", UnitId::Mile),
    ("grams", UnitId::Gram),
    ("kilograms", UnitId::Kilogram),
    ("pounds", UnitId::Pound),
    ("lbs", UnitId::Pound),
    ("ton", UnitId::Tonne),
    ("tonne", UnitId::Tonne),
    ("ml", UnitId::Milliliter),
    ("l", UnitId::Liter),
    ("litre", UnitId::Liter),
    ("floz", UnitId::FluidOunce),
    ("gallons", UnitId::Gallon),
    ("mm2", UnitId::SquareMillimeter),
    ("cm2", UnitId::SquareCentimeter),
    ("m2", UnitId::SquareMeter),
    ("km2", UnitId::SquareKilometer),
    ("in2", UnitId::SquareInch),
    ("ft2", UnitId::SquareFoot),
    ("yd2", UnitId::SquareYard),
    ("mi2", UnitId::SquareMile),
    ("acres", UnitId::Acre),
    ("ha", UnitId::Hectare),
    ("kph", UnitId::KilometerPerHour),
    ("kmh", UnitId::KilometerPerHour),
    ("mps", UnitId::MeterPerSecond),
    ("fps", UnitId::FootPerSecond),
    ("knots", UnitId::Knot),
    ("kn", UnitId::Knot),
];

impl UnitId {
    pub fn meta(self) -> &'static UnitMeta {
        // UNITS is declared in enum order
        &UNITS[self as usize]
    }

    pub fn symbol(self) -> &'static str {
        self.meta().symbol
    }

    pub fn dimension(self) -> Dimension {
        self.meta().dimension
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for UnitId {
    type Err = ConversionError;

    /// Exact symbols win (`mm` vs `Mm`), then symbols, names and aliases
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(meta) = UNITS.iter().find(|u| u.symbol == s) {
            return Ok(meta.id);
        }
        UNITS
            .iter()
            .find(|u| u.symbol.eq_ignore_ascii_case(s) || u.name.eq_ignore_ascii_case(s))
            .map(|u| u.id)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(s))
                    .map(|(_, id)| *id)
            })
            .ok_or_else(|| ConversionError::UnknownUnit(s.to_string()))
    }
}

impl TryFrom<String> for UnitId {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UnitId> for String {
    fn from(id: UnitId) -> Self {
        id.symbol().to_string()
    }
}

/// Units of one dimension, in display order.
pub fn units_of(dimension: Dimension) -> impl Iterator<Item = &'static UnitMeta> {
    UNITS.iter().filter(move |u| u.dimension == dimension)
}

/// Convert `value` from one unit to another of the same dimension.
pub fn convert_value(value: f64, from: UnitId, to: UnitId) -> Result<f64, ConversionError> {
    let value = ensure_finite(value)?;
    let (src, dst) = (from.meta(), to.meta());
    if src.dimension != dst.dimension {
        return Err(ConversionError::IncompatibleUnits {
            from,
            from_dimension: src.dimension,
            to,
            to_dimension: dst.dimension,
        });
    }
    if from == to {
        return Ok(value);
    }
    Ok(value * src.scale_to_canonical / dst.scale_to_canonical)
}

/// One converted value, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub unit: UnitId,
    pub name: &'static str,
    pub value: f64,
    pub display: String,
}

impl Conversion {
    fn new(unit: UnitId, value: f64) -> Self {
        let meta = unit.meta();
        Self {
            unit,
            name: meta.name,
            value,
            display: format_trimmed(value, meta.dimension.display_places()),
        }
    }
}

/// Convert a single value, packaged with its display string.
pub fn convert(value: f64, from: UnitId, to: UnitId) -> Result<Conversion, ConversionError> {
    convert_value(value, from, to).map(|v| Conversion::new(to, v))
}

/// Convert `value` into every other unit of `from`'s dimension.
pub fn convert_all(value: f64, from: UnitId) -> Result<Vec<Conversion>, ConversionError> {
    let value = ensure_finite(value)?;
    units_of(from.dimension())
        .filter(|u| u.id != from)
        .map(|u| convert_value(value, from, u.id).map(|v| Conversion::new(u.id, v)))
        .collect()
}
