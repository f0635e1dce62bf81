//! Cross-module checks of the widget tools through the public API.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use handyman::models::time::parse_instant;
use handyman::services::calculator::{Calculator, Key};
use handyman::services::calculators;
use handyman::services::converters::currency::RateTable;
use handyman::services::converters::temperature::convert_temperature;
use handyman::services::converters::{convert_value, TemperatureUnit, UnitId};
use handyman::services::text::{self, encoding, url, CleanOp, Rgb, TextCase};
use handyman::services::{convert_time_of_day, eta, response_time, EtaUnit, SnippetDeck};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_units_round_trip_within_dimension() {
    let feet = convert_value(100.0, UnitId::Meter, UnitId::Foot).unwrap();
    assert_relative_eq!(feet, 328.083_989_501_312_3, max_relative = 1e-12);
    let back = convert_value(feet, UnitId::Foot, UnitId::Meter).unwrap();
    assert_relative_eq!(back, 100.0, max_relative = 1e-12);
    assert!(convert_value(1.0, UnitId::Kilogram, UnitId::Meter).is_err());
}

#[test]
fn test_temperature_fixed_points() {
    assert_relative_eq!(
        convert_temperature(100.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit).unwrap(),
        212.0
    );
    assert_relative_eq!(
        convert_temperature(32.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Kelvin).unwrap(),
        273.15,
        max_relative = 1e-12
    );
}

#[test]
fn test_currency_cross_rate() {
    let table = RateTable::parse("usd", r#"{"usd": {"eur": 0.5, "jpy": 150}}"#).unwrap();
    assert_relative_eq!(table.cross_convert(1.0, "eur", "jpy").unwrap(), 300.0);
}

#[test]
fn test_pricing_calculators_agree() {
    // A 25% markup is a 20% margin.
    let result = calculators::markup_margin(100.0, 125.0).unwrap();
    assert_relative_eq!(result.markup.unwrap(), 25.0);
    assert_relative_eq!(result.margin.unwrap(), 20.0);

    let taxed = calculators::tax(100.0, 20.0).unwrap();
    let reverse = calculators::tax(taxed.total, 20.0).unwrap();
    assert_relative_eq!(reverse.pre_tax.unwrap(), 100.0, max_relative = 1e-12);
}

#[test]
fn test_keypad_chain() {
    let mut calc = Calculator::new();
    calc.press_all(
        ["2", "^", "3", "-", "1", "Enter"]
            .iter()
            .filter_map(|k| Key::from_keyboard(k)),
    );
    assert_eq!(calc.display(), "7");
}

#[test]
fn test_text_pipeline() {
    let cleaned = text::clean("<p>  order   shipped </p>", CleanOp::StripHtml);
    let collapsed = text::clean(&cleaned, CleanOp::CollapseSpaces);
    let trimmed = text::clean(&collapsed, CleanOp::Trim);
    assert_eq!(text::convert_case(&trimmed, TextCase::Title), "Order Shipped");

    let encoded = encoding::base64_encode("ticket #42");
    assert_eq!(encoding::base64_decode(&encoded).unwrap(), "ticket #42");
}

#[test]
fn test_url_and_color() {
    let parsed = url::parse_url("https://help.example.com/t/42?lang=fr").unwrap();
    assert_eq!(parsed.path, "/t/42");
    assert!(!url::looks_like_url("let x = 1;"));

    let rgb = Rgb::from_hex("#0a0B0c").unwrap();
    assert_eq!(rgb, Rgb::new(10, 11, 12));
    assert_eq!(rgb.to_hex(), "#0a0b0c");
}

#[test]
fn test_timezone_shift_backwards() {
    let shifted = convert_time_of_day("01:00", 2.0, -5.0).unwrap();
    assert_eq!(shifted.formatted(), "18:00");
    assert_eq!(shifted.day_offset, -1);
}

#[test]
fn test_support_tools() {
    let start = parse_instant("2024-03-08T09:00").unwrap();
    let end = parse_instant("2024-03-09T10:30").unwrap();
    let elapsed = response_time(start, end).unwrap();
    assert_eq!((elapsed.hours, elapsed.minutes), (25, 30));

    let arrival = eta(start, 1.0, 0.5, EtaUnit::Weeks).unwrap();
    assert_eq!(
        arrival.eta.date(),
        NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
    );

    let deck = SnippetDeck::default();
    let mut rng = StdRng::seed_from_u64(7);
    let picked = deck.pick_with(&mut rng).unwrap();
    assert!(deck.snippets().iter().any(|s| s == picked));
}
