//! Currency conversion against a caller-supplied rate table.
//!
//! Rates are not fetched here. The table is built from the JSON document
//! published by the public currency API the panel uses:
//!
//! ```json
//! { "date": "2024-03-08", "usd": { "eur": 0.915, "gbp": 0.781 } }
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::{ensure_finite, ConversionError};
use crate::services::format::format_fixed2;

/// Currencies listed first, in this order; everything else follows
/// alphabetically.
pub const POPULAR_CURRENCIES: [&str; 20] = [
    "usd", "eur", "gbp", "jpy", "cad", "aud", "chf", "cny", "inr", "mxn", "brl", "krw", "sgd",
    "nzd", "sek", "nok", "dkk", "pln", "thb", "aed",
];

const FLAGS: [(&str, &str); 40] = [
    ("usd", "🇺🇸"), ("eur", "🇪🇺"), ("gbp", "🇬🇧"), ("jpy", "🇯🇵"), ("cad", "🇨🇦"),
    ("aud", "🇦🇺"), ("chf", "🇨🇭"), ("cny", "🇨🇳"), ("inr", "🇮🇳"), ("mxn", "🇲🇽"),
    ("brl", "🇧🇷"), ("krw", "🇰🇷"), ("sgd", "🇸🇬"), ("nzd", "🇳🇿"), ("sek", "🇸🇪"),
    ("nok", "🇳🇴"), ("dkk", "🇩🇰"), ("pln", "🇵🇱"), ("thb", "🇹🇭"), ("aed", "🇦🇪"),
    ("rub", "🇷🇺"), ("zar", "🇿🇦"), ("try", "🇹🇷"), ("hkd", "🇭🇰"), ("idr", "🇮🇩"),
    ("php", "🇵🇭"), ("myr", "🇲🇾"), ("czk", "🇨🇿"), ("huf", "🇭🇺"), ("ils", "🇮🇱"),
    ("clp", "🇨🇱"), ("sar", "🇸🇦"), ("pkr", "🇵🇰"), ("egp", "🇪🇬"), ("ngn", "🇳🇬"),
    ("vnd", "🇻🇳"), ("bdt", "🇧🇩"), ("ars", "🇦🇷"), ("kes", "🇰🇪"), ("cop", "🇨🇴"),
];

/// Flag emoji for a currency code, if known.
pub fn flag(code: &str) -> Option<&'static str> {
    let code = code.to_lowercase();
    FLAGS.iter().find(|(c, _)| *c == code).map(|(_, f)| *f)
}

fn normalize(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Exchange rates relative to one base currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    pub base: String,
    pub date: Option<String>,
    /// Units of each currency per one unit of `base`.
    pub rates: BTreeMap<String, f64>,
}

/// One line of a convert-all result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyConversion {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<&'static str>,
    pub rate: f64,
    pub value: f64,
    pub display: String,
}

impl RateTable {
    /// Build a table from explicit rates.
    pub fn new<I, S>(base: &str, rates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let rates = rates
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .map(|(code, rate)| (normalize(code.as_ref()), rate))
            .collect();
        Self {
            base: normalize(base),
            date: None,
            rates,
        }
    }

    /// Parse the currency API payload for `base`.
    ///
    /// Entries that are not positive finite numbers are skipped.
    pub fn from_api_json(base: &str, payload: &Value) -> Result<Self, ConversionError> {
        let base = normalize(base);
        let object = payload
            .as_object()
            .ok_or_else(|| ConversionError::InvalidRates("payload is not an object".into()))?;
        let rates = object
            .get(&base)
            .and_then(Value::as_object)
            .ok_or_else(|| {
                ConversionError::InvalidRates(format!("missing rate object for '{}'", base))
            })?;

        let mut table = RateTable::new(
            &base,
            rates
                .iter()
                .filter_map(|(code, rate)| rate.as_f64().map(|r| (code.as_str(), r))),
        );
        table.date = object.get("date").and_then(Value::as_str).map(str::to_string);
        log::debug!(
            "loaded {} exchange rates for {} ({:?})",
            table.rates.len(),
            table.base,
            table.date
        );
        Ok(table)
    }

    /// Same as [`RateTable::from_api_json`], from raw text.
    pub fn parse(base: &str, payload: &str) -> Result<Self, ConversionError> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| ConversionError::InvalidRates(e.to_string()))?;
        Self::from_api_json(base, &value)
    }

    /// Rate from the base currency to `code`. The base itself is always 1.
    pub fn rate(&self, code: &str) -> Result<f64, ConversionError> {
        let code = normalize(code);
        if code == self.base {
            return Ok(1.0);
        }
        self.rates
            .get(&code)
            .copied()
            .ok_or(ConversionError::UnknownCurrency(code))
    }

    /// Convert `amount` of the base currency into `to`.
    pub fn convert(&self, amount: f64, to: &str) -> Result<f64, ConversionError> {
        let amount = ensure_finite(amount)?;
        Ok(amount * self.rate(to)?)
    }

    /// Convert between any two currencies in the table via the base.
    pub fn cross_convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        let amount = ensure_finite(amount)?;
        Ok(amount / self.rate(from)? * self.rate(to)?)
    }

    /// Convert `amount` into every other currency, popular ones first.
    pub fn convert_all(&self, amount: f64) -> Result<Vec<CurrencyConversion>, ConversionError> {
        let amount = ensure_finite(amount)?;
        let mut conversions: Vec<CurrencyConversion> = self
            .rates
            .iter()
            .filter(|(code, _)| **code != self.base)
            .map(|(code, rate)| {
                let value = amount * rate;
                CurrencyConversion {
                    code: code.clone(),
                    flag: flag(code),
                    rate: *rate,
                    value,
                    display: format_fixed2(value),
                }
            })
            .collect();
        conversions.sort_by(|a, b| popular_first(&a.code, &b.code));
        Ok(conversions)
    }
}

fn popular_first(a: &str, b: &str) -> Ordering {
    let rank = |code: &str| POPULAR_CURRENCIES.iter().position(|p| *p == code);
    match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn table() -> RateTable {
        RateTable::from_api_json(
            "USD",
            &json!({
                "date": "2024-03-08",
                "usd": {"eur": 0.9, "gbp": 0.8, "aaa": 2.0, "zzz": 3.0, "usd": 1.0, "bad": "x", "neg": -1.0}
            }),
        )
        .unwrap()
    }

    #[test]
    fn parses_api_payload() {
        let table = table();
        assert_eq!(table.base, "usd");
        assert_eq!(table.date.as_deref(), Some("2024-03-08"));
        assert!(!table.rates.contains_key("bad"));
        assert!(!table.rates.contains_key("neg"));
    }

    #[test]
    fn rejects_payload_without_base() {
        let err = RateTable::from_api_json("jpy", &json!({"usd": {}})).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidRates(_)));
        assert!(RateTable::parse("usd", "not json").is_err());
    }

    #[test]
    fn converts_with_case_insensitive_codes() {
        let table = table();
        assert_relative_eq!(table.convert(10.0, "EUR").unwrap(), 9.0);
        assert_relative_eq!(table.convert(10.0, "usd").unwrap(), 10.0);
        assert_relative_eq!(table.cross_convert(9.0, "eur", "gbp").unwrap(), 8.0);
        assert_eq!(
            table.convert(1.0, "xyz"),
            Err(ConversionError::UnknownCurrency("xyz".to_string()))
        );
    }

    #[test]
    fn convert_all_orders_popular_then_alphabetical() {
        let all = table().convert_all(100.0).unwrap();
        let codes: Vec<&str> = all.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["eur", "gbp", "aaa", "zzz"]);
        assert_eq!(all[0].display, "90.00");
        assert_eq!(all[0].flag, Some("🇪🇺"));
        assert_eq!(all[2].flag, None);
    }
}
