//! Application state.
//!
//! Shared state for all request handlers. Everything here is read-only:
//! each request reads its file from disk and renders independently.

use std::path::PathBuf;

use crate::bots::BotDetector;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Directory holding the uppercase `<PAGE>.md` source files.
    pub(crate) source_dir: PathBuf,
    /// License file served on its dedicated route.
    pub(crate) license_path: PathBuf,
    /// User-agent classifier.
    pub(crate) detector: BotDetector,
    /// Domain injected into the layout; `None` falls back to the
    /// request's `Host` header.
    pub(crate) domain: Option<String>,
}
