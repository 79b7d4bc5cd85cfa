// --- File: crates/salon_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Default base URL of the salon REST API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Default request timeout towards the salon REST API, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of days after "tomorrow" during which a booking can be made.
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

// --- REST API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String, // e.g. SALON__API__BASE_URL
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// --- Booking Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// Length of the bookable window, counted from tomorrow.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,
    /// IANA name of the salon's time zone, used to decide what "today" is.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// Display label of the synthetic "any professional" roster entry.
    #[serde(default = "default_no_preference_label")]
    pub no_preference_label: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            time_zone: default_time_zone(),
            no_preference_label: default_no_preference_label(),
        }
    }
}

// --- Durable Storage Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    pub path: String, // JSON file holding the client's persisted keys
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: ".salon/state.json".to_string(),
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_horizon_days() -> i64 {
    DEFAULT_HORIZON_DAYS
}

fn default_time_zone() -> String {
    "Europe/Paris".to_string()
}

fn default_no_preference_label() -> String {
    "No preference".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
