//! Preference repository implementations.
//!
//! - `local`: in-memory map for tests and throwaway sessions
//! - `file`: one JSON object on disk, rewritten on every change
#[cfg(feature = "file-repo")]
pub mod file;
#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "file-repo")]
pub use file::FileRepository;
#[cfg(feature = "local-repo")]
pub use local::LocalRepository;
