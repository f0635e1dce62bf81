//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing) and
//! returns the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Request bodies are form fields plus, at most, a currency rate table.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The panel is embedded in a third-party sidebar, so any origin may call.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Catalog and preferences
        .route("/tools", get(handlers::list_tools))
        .route("/preferences", get(handlers::get_preferences))
        .route(
            "/preferences/favorites/{tool_id}",
            post(handlers::toggle_favorite),
        )
        .route(
            "/preferences/selected-tool",
            post(handlers::select_tool).delete(handlers::clear_selected_tool),
        )
        // Deadline and time zones
        .route("/schedules", get(handlers::list_schedules))
        .route("/deadline", post(handlers::compute_sla_deadline))
        .route("/timezone/presets", get(handlers::list_timezones))
        .route("/timezone/convert", post(handlers::convert_timezone))
        .route("/timezone/customer-time", post(handlers::customer_time))
        // Converters
        .route("/convert/units", post(handlers::convert_units))
        .route("/convert/units/{dimension}", get(handlers::list_units))
        .route(
            "/convert/temperature",
            post(handlers::convert_temperature_reading),
        )
        .route("/convert/currency", post(handlers::convert_currency))
        // Calculators
        .route("/calculators/percentage", post(handlers::percentage))
        .route("/calculators/markup", post(handlers::markup))
        .route("/calculators/tax", post(handlers::tax))
        .route("/calculators/unit-price", post(handlers::unit_price))
        .route("/calculators/keypad", post(handlers::keypad))
        // Text utilities
        .route("/text/case", post(handlers::convert_case))
        .route("/text/clean", post(handlers::clean_text))
        .route("/text/base64", post(handlers::base64))
        .route("/text/url", post(handlers::url_tool))
        .route("/text/json", post(handlers::json_tool))
        .route("/text/color", post(handlers::color))
        // Customer support
        .route("/support/response-time", post(handlers::response_time))
        .route("/support/eta", post(handlers::eta))
        .route("/support/snippet", post(handlers::random_snippet));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
