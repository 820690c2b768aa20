//! Application constants and configuration

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "Pref Counter";

/// File name of the preference document inside the data directory.
pub const PREFS_FILE_NAME: &str = "preferences.json";

/// Simulated in-transaction work so that rapid clicks visibly queue.
pub const UPDATE_WORK_MS: u64 = 1000;
pub const CLEAR_WORK_MS: u64 = 2000;
