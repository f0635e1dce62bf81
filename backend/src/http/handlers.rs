//! HTTP handlers for the REST API.
//!
//! Each handler collects the tool's form fields from the request body, calls
//! the library and renders the result. No tool logic lives here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::dto::*;
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::schedule::{Schedule, SchedulePreset, SCHEDULE_PRESETS};
use crate::models::time::{format_instant, parse_instant};
use crate::services::calculator::{Calculator, Key};
use crate::services::calculators;
use crate::services::converters::currency::{flag, RateTable};
use crate::services::converters::temperature::{convert_temperature, display_temperature};
use crate::services::converters::units::{self, UnitMeta};
use crate::services::converters::{Dimension, TemperatureUnit};
use crate::services::deadline::{compute_deadline, DeadlineError};
use crate::services::format::format_fixed2;
use crate::services::support::{self, SnippetDeck};
use crate::services::text::{self, encoding, json, url, Rgb};
use crate::services::timezone::{
    self, customer_local_time, preset_for_offset, TimeZonePreset, TIMEZONE_PRESETS,
};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Verify the service is running and the preference store is usable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let storage = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "available".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        storage,
    }))
}

// =============================================================================
// Tools & Preferences
// =============================================================================

/// GET /v1/tools
///
/// The catalog grouped by category with favourites first, plus the
/// remembered selection.
pub async fn list_tools(State(state): State<AppState>) -> HandlerResult<ToolMenuResponse> {
    let repo = state.repository.as_ref();
    let sections = db_services::tool_menu(repo).await?;
    let selected_tool = db_services::selected_tool(repo).await?.copied();
    Ok(Json(ToolMenuResponse {
        sections,
        selected_tool,
    }))
}

/// GET /v1/preferences
pub async fn get_preferences(State(state): State<AppState>) -> HandlerResult<PreferencesResponse> {
    let repo = state.repository.as_ref();
    Ok(Json(PreferencesResponse {
        favorites: db_services::load_favorites(repo).await?,
        selected_tool: db_services::selected_tool(repo)
            .await?
            .map(|t| t.id.to_string()),
    }))
}

/// POST /v1/preferences/favorites/{tool_id}
///
/// Toggle a favourite. The response says whether it is now favourited.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(tool_id): Path<String>,
) -> HandlerResult<FavoriteToggleResponse> {
    let favorite = db_services::toggle_favorite(state.repository.as_ref(), &tool_id).await?;
    Ok(Json(FavoriteToggleResponse { tool_id, favorite }))
}

/// POST /v1/preferences/selected-tool
pub async fn select_tool(
    State(state): State<AppState>,
    Json(request): Json<SelectToolRequest>,
) -> HandlerResult<Tool> {
    let tool = db_services::select_tool(state.repository.as_ref(), &request.tool_id).await?;
    Ok(Json(*tool))
}

/// DELETE /v1/preferences/selected-tool
pub async fn clear_selected_tool(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    db_services::clear_selected_tool(state.repository.as_ref()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Deadline & Time Zones
// =============================================================================

/// GET /v1/schedules
pub async fn list_schedules() -> Json<Vec<SchedulePreset>> {
    Json(SCHEDULE_PRESETS.to_vec())
}

/// POST /v1/deadline
///
/// SLA deadline for a start time, a duration and a schedule preset.
pub async fn compute_sla_deadline(
    Json(request): Json<DeadlineRequest>,
) -> HandlerResult<DeadlineResponse> {
    let schedule: Schedule = request.schedule.parse()?;
    let start = parse_instant(&request.start).map_err(DeadlineError::from)?;
    let deadline = compute_deadline(start, request.duration_hours, schedule)?;

    Ok(Json(DeadlineResponse {
        start: format_instant(&start),
        deadline: format_instant(&deadline),
        duration_hours: request.duration_hours,
        schedule: schedule.id(),
    }))
}

/// GET /v1/timezone/presets
pub async fn list_timezones() -> Json<Vec<TimeZonePreset>> {
    Json(TIMEZONE_PRESETS.to_vec())
}

/// POST /v1/timezone/convert
pub async fn convert_timezone(
    Json(request): Json<TimeZoneConvertRequest>,
) -> HandlerResult<TimeZoneConvertResponse> {
    let shifted =
        timezone::convert_time_of_day(&request.time, request.from_offset, request.to_offset)?;
    let label = |offset: f64| preset_for_offset(offset).map(|p| p.label.to_string());

    Ok(Json(TimeZoneConvertResponse {
        time: shifted.formatted(),
        day_offset: shifted.day_offset,
        from_label: label(request.from_offset),
        to_label: label(request.to_offset),
    }))
}

/// POST /v1/timezone/customer-time
///
/// The customer's current wall-clock time for a UTC offset.
pub async fn customer_time(
    Json(request): Json<CustomerTimeRequest>,
) -> HandlerResult<CustomerTimeResponse> {
    let local = customer_local_time(Utc::now(), request.offset_hours)?;
    Ok(Json(CustomerTimeResponse {
        local_time: format_instant(&local),
        offset_hours: request.offset_hours,
    }))
}

// =============================================================================
// Converters
// =============================================================================

/// GET /v1/convert/units/{dimension}
pub async fn list_units(Path(dimension): Path<String>) -> HandlerResult<Vec<UnitMeta>> {
    let dimension: Dimension = dimension.parse()?;
    Ok(Json(units::units_of(dimension).copied().collect()))
}

/// POST /v1/convert/units
pub async fn convert_units(
    Json(request): Json<UnitConvertRequest>,
) -> HandlerResult<UnitConvertResponse> {
    let conversions = match request.to {
        Some(to) => vec![units::convert(request.value, request.from, to)?],
        None => units::convert_all(request.value, request.from)?,
    };
    Ok(Json(UnitConvertResponse {
        dimension: request.from.dimension(),
        conversions,
    }))
}

/// POST /v1/convert/temperature
///
/// Without `to`, the reading is returned in every other scale.
pub async fn convert_temperature_reading(
    Json(request): Json<TemperatureRequest>,
) -> HandlerResult<Vec<TemperatureReading>> {
    let targets: Vec<TemperatureUnit> = match request.to {
        Some(to) => vec![to],
        None => TemperatureUnit::ALL
            .into_iter()
            .filter(|u| *u != request.from)
            .collect(),
    };

    let readings = targets
        .into_iter()
        .map(|unit| {
            convert_temperature(request.value, request.from, unit).map(|value| {
                TemperatureReading {
                    unit,
                    value,
                    display: display_temperature(value, unit),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(readings))
}

/// POST /v1/convert/currency
pub async fn convert_currency(
    Json(request): Json<CurrencyRequest>,
) -> HandlerResult<CurrencyResponse> {
    let table = RateTable::from_api_json(&request.base, &request.rates)?;
    let conversions = match request.to.as_deref() {
        Some(to) => {
            let code = to.trim().to_lowercase();
            let rate = table.rate(&code)?;
            let value = table.convert(request.amount, &code)?;
            vec![CurrencyConversion {
                flag: flag(&code),
                code,
                rate,
                value,
                display: format_fixed2(value),
            }]
        }
        None => table.convert_all(request.amount)?,
    };

    Ok(Json(CurrencyResponse {
        base: table.base,
        date: table.date,
        conversions,
    }))
}

// =============================================================================
// Calculators
// =============================================================================

/// POST /v1/calculators/percentage
pub async fn percentage(Json(request): Json<PercentageRequest>) -> HandlerResult<PercentageResult> {
    Ok(Json(calculators::percentage(request.value, request.percent)?))
}

/// POST /v1/calculators/markup
pub async fn markup(Json(request): Json<MarkupRequest>) -> HandlerResult<MarkupResult> {
    Ok(Json(calculators::markup_margin(request.cost, request.price)?))
}

/// POST /v1/calculators/tax
pub async fn tax(Json(request): Json<TaxRequest>) -> HandlerResult<TaxResult> {
    Ok(Json(calculators::tax(request.amount, request.rate)?))
}

/// POST /v1/calculators/unit-price
pub async fn unit_price(Json(request): Json<UnitPriceRequest>) -> HandlerResult<UnitPriceResponse> {
    Ok(Json(UnitPriceResponse {
        unit_price: calculators::unit_price(request.total, request.quantity)?,
        unit: request.unit,
    }))
}

/// POST /v1/calculators/keypad
///
/// Replay keyboard keys on a fresh calculator and return its final state.
pub async fn keypad(Json(request): Json<KeypadRequest>) -> HandlerResult<KeypadResponse> {
    let keys = request
        .keys
        .iter()
        .map(|name| {
            Key::from_keyboard(name)
                .ok_or_else(|| AppError::bad_request(format!("Unknown calculator key: {}", name)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut calculator = Calculator::new();
    calculator.press_all(keys);
    Ok(Json(KeypadResponse {
        display: calculator.display().to_string(),
        expression: calculator.expression().to_string(),
        history: calculator.history().cloned().collect(),
    }))
}

// =============================================================================
// Text
// =============================================================================

/// POST /v1/text/case
pub async fn convert_case(Json(request): Json<CaseRequest>) -> HandlerResult<TextResponse> {
    Ok(Json(TextResponse {
        text: text::convert_case(&request.text, request.case),
    }))
}

/// POST /v1/text/clean
pub async fn clean_text(Json(request): Json<CleanRequest>) -> HandlerResult<TextResponse> {
    Ok(Json(TextResponse {
        text: text::clean(&request.text, request.op),
    }))
}

/// POST /v1/text/base64
pub async fn base64(Json(request): Json<Base64Request>) -> HandlerResult<TextResponse> {
    let text = match request.direction {
        CodecDirection::Encode => encoding::base64_encode(&request.text),
        CodecDirection::Decode => encoding::base64_decode(&request.text)?,
    };
    Ok(Json(TextResponse { text }))
}

/// POST /v1/text/url
pub async fn url_tool(Json(request): Json<UrlRequest>) -> HandlerResult<UrlResponse> {
    let response = match request.action {
        UrlAction::Encode => UrlResponse::Text(TextResponse {
            text: encoding::encode_component(&request.text),
        }),
        UrlAction::Decode => UrlResponse::Text(TextResponse {
            text: encoding::decode_component(&request.text)?,
        }),
        UrlAction::Parse => UrlResponse::Breakdown(url::parse_url(&request.text)?),
    };
    Ok(Json(response))
}

/// POST /v1/text/json
///
/// Invalid input is a 400 whose `details` carry the line and column.
pub async fn json_tool(Json(request): Json<JsonRequest>) -> HandlerResult<JsonResponse> {
    let text = match request.action {
        JsonAction::Format => Some(json::format_json(&request.text)?),
        JsonAction::Minify => Some(json::minify_json(&request.text)?),
        JsonAction::Validate => {
            json::validate_json(&request.text)?;
            None
        }
    };
    Ok(Json(JsonResponse { valid: true, text }))
}

/// POST /v1/text/color
pub async fn color(Json(request): Json<ColorRequest>) -> HandlerResult<ColorResponse> {
    let rgb = match (request.hex.as_deref(), request.rgb) {
        (Some(hex), _) => Rgb::from_hex(hex)?,
        (None, Some(rgb)) => rgb,
        (None, None) => return Err(AppError::bad_request("Provide either 'hex' or 'rgb'")),
    };
    Ok(Json(ColorResponse {
        hex: rgb.to_hex(),
        css: rgb.to_css(),
        rgb,
    }))
}

// =============================================================================
// Customer Support
// =============================================================================

/// POST /v1/support/response-time
pub async fn response_time(
    Json(request): Json<ResponseTimeRequest>,
) -> HandlerResult<ResponseTime> {
    Ok(Json(support::response_time_str(&request.start, &request.end)?))
}

/// POST /v1/support/eta
pub async fn eta(Json(request): Json<EtaRequest>) -> HandlerResult<EtaResponse> {
    let start = parse_instant(&request.start).map_err(support::SupportError::from)?;
    let eta = support::eta(start, request.base, request.delay, request.unit)?;
    Ok(Json(EtaResponse {
        eta: format_instant(&eta.eta),
        total: eta.total,
        unit: eta.unit,
    }))
}

/// POST /v1/support/snippet
///
/// Random canned reply from the supplied list or the default deck.
pub async fn random_snippet(Json(request): Json<SnippetRequest>) -> HandlerResult<SnippetResponse> {
    let deck = match request.snippets {
        Some(snippets) => SnippetDeck::new(snippets),
        None => SnippetDeck::default(),
    };
    Ok(Json(SnippetResponse {
        snippet: deck.pick().map(str::to_string),
        deck_size: deck.len(),
    }))
}
