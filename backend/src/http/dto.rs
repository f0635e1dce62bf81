//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies mirror the form fields of each tool. Responses reuse the
//! library's own result types wherever they already serialise cleanly, and
//! add a wrapper only where the HTTP shape differs.

use serde::{Deserialize, Serialize};

pub use crate::models::tool::{MenuSection, Tool};
pub use crate::services::calculators::{MarkupResult, PercentageResult, TaxResult};
pub use crate::services::converters::currency::CurrencyConversion;
pub use crate::services::converters::units::Conversion;
pub use crate::services::support::ResponseTime;
pub use crate::services::text::url::UrlBreakdown;

use crate::services::converters::{Dimension, TemperatureUnit, UnitId};
use crate::services::support::EtaUnit;
use crate::services::text::{CleanOp, Rgb, TextCase};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Preference store status
    pub storage: String,
}

// =============================================================================
// Tools & Preferences
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ToolMenuResponse {
    pub sections: Vec<MenuSection>,
    pub selected_tool: Option<Tool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub favorites: Vec<String>,
    pub selected_tool: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteToggleResponse {
    pub tool_id: String,
    pub favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectToolRequest {
    pub tool_id: String,
}

// =============================================================================
// Deadline & Time Zones
// =============================================================================

/// Request body for the SLA deadline estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlineRequest {
    /// `YYYY-MM-DDTHH:MM[:SS]`
    pub start: String,
    pub duration_hours: f64,
    /// Preset id such as `247`, `weekday24` or `biz_9_17`; 24/7 when absent
    #[serde(default = "default_schedule")]
    pub schedule: String,
}

fn default_schedule() -> String {
    "247".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlineResponse {
    pub start: String,
    pub deadline: String,
    pub duration_hours: f64,
    pub schedule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeZoneConvertRequest {
    /// `HH:MM`
    pub time: String,
    pub from_offset: f64,
    pub to_offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeZoneConvertResponse {
    pub time: String,
    /// Calendar days between input and result; -2..=2 for offsets within ±14 h.
    pub day_offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerTimeRequest {
    pub offset_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerTimeResponse {
    pub local_time: String,
    pub offset_hours: f64,
}

// =============================================================================
// Converters
// =============================================================================

/// Convert to one unit when `to` is given, otherwise to every unit of the
/// same dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitConvertRequest {
    pub value: f64,
    pub from: UnitId,
    #[serde(default)]
    pub to: Option<UnitId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitConvertResponse {
    pub dimension: Dimension,
    pub conversions: Vec<Conversion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureRequest {
    pub value: f64,
    pub from: TemperatureUnit,
    #[serde(default)]
    pub to: Option<TemperatureUnit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub unit: TemperatureUnit,
    pub value: f64,
    pub display: String,
}

/// Rates are supplied by the caller in the public currency API's format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyRequest {
    pub amount: f64,
    pub base: String,
    #[serde(default)]
    pub to: Option<String>,
    pub rates: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrencyResponse {
    pub base: String,
    pub date: Option<String>,
    pub conversions: Vec<CurrencyConversion>,
}

// =============================================================================
// Calculators
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentageRequest {
    pub value: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupRequest {
    pub cost: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRequest {
    pub amount: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitPriceRequest {
    pub total: f64,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitPriceResponse {
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Keyboard key names replayed on a fresh keypad calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeypadRequest {
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeypadResponse {
    pub display: String,
    pub expression: String,
    pub history: Vec<crate::services::calculator::HistoryEntry>,
}

// =============================================================================
// Text
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRequest {
    pub text: String,
    pub case: TextCase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanRequest {
    pub text: String,
    pub op: CleanOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecDirection {
    Encode,
    Decode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Base64Request {
    pub text: String,
    pub direction: CodecDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlAction {
    Encode,
    Decode,
    Parse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRequest {
    pub text: String,
    pub action: UrlAction,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UrlResponse {
    Text(TextResponse),
    Breakdown(UrlBreakdown),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonAction {
    Format,
    Minify,
    Validate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRequest {
    pub text: String,
    pub action: JsonAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Exactly one of `hex` or `rgb` should be given; `hex` wins if both are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorRequest {
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub rgb: Option<Rgb>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorResponse {
    pub hex: String,
    pub rgb: Rgb,
    pub css: String,
}

// =============================================================================
// Customer Support
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTimeRequest {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtaRequest {
    pub start: String,
    pub base: f64,
    #[serde(default)]
    pub delay: f64,
    pub unit: EtaUnit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtaResponse {
    pub eta: String,
    pub total: f64,
    pub unit: EtaUnit,
}

/// Pick from `snippets`, or from the default replies when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetRequest {
    #[serde(default)]
    pub snippets: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetResponse {
    pub snippet: Option<String>,
    pub deck_size: usize,
}
