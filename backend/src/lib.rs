//! # Handyman
//!
//! Everyday calculators and converters for a customer-support tool panel.
//!
//! The centrepiece is the SLA deadline estimator, which walks a business
//! calendar to find when a number of working hours will have elapsed. Around
//! it sit the panel's smaller tools, each a pure function or a small state
//! machine:
//!
//! - **Time**: SLA deadlines, time-zone conversion, response times, ETAs
//! - **Converters**: length, mass, volume, area, speed, temperature, currency
//! - **Calculators**: percentage, markup/margin, tax/VAT, unit price, keypad
//! - **Text**: case, cleaning, Base64, URL breakdown, JSON, colour codes
//! - **Preferences**: favourite tools and the last selected tool
//!
//! ## Architecture
//!
//! - [`models`]: Instants, schedules and the tool catalog
//! - [`services`]: The tools themselves
//! - [`db`]: Preference repository, backends and preference services
//! - [`config`]: `handyman.toml` loading with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use handyman::models::{parse_instant, Schedule};
//! use handyman::services::compute_deadline;
//!
//! // Friday 16:00 plus two business hours lands on Monday morning.
//! let start = parse_instant("2024-03-08T16:00").unwrap();
//! let deadline = compute_deadline(start, 2.0, Schedule::BUSINESS_HOURS).unwrap();
//! assert_eq!(deadline, parse_instant("2024-03-11T10:00").unwrap());
//! ```

// RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
