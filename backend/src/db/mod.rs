//! Preference storage.
//!
//! The panel remembers which tools are favourited and which tool was open
//! last. Storage goes through the Repository pattern so the backend can be
//! swapped without touching callers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (HTTP handlers, tests)               │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - JSON encoding of stored values                       │
//! │  - Catalog validation of tool ids                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  PreferenceRepository trait (repository/)               │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Local Repository │     │ File Repository         │
//! │ (in-memory)      │     │ (JSON object on disk)   │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! The repository handle is always passed explicitly; there is no global
//! instance.

#[cfg(not(any(feature = "local-repo", feature = "file-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;

pub use factory::{RepositoryFactory, RepositoryType, DEFAULT_STORE_PATH};
#[cfg(feature = "file-repo")]
pub use repositories::FileRepository;
#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, PreferenceRepository, RepositoryError, RepositoryResult, ValueUpdate,
};
pub use services::{FAVORITES_KEY, SELECTED_TOOL_KEY};
