// --- File: crates/salon_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use std::env;
use tracing::debug;

pub mod models;
pub use models::*;


/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "SALON";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Loads the application configuration.
///
/// Sources are layered, later ones overriding earlier ones:
///
/// 1. built-in defaults
/// 2. `config/default.{toml,yaml,json}`
/// 3. `config/{RUN_ENV}.{toml,yaml,json}` (`RUN_ENV` defaults to `debug`)
/// 4. environment variables such as `SALON__API__BASE_URL`
///
/// The config directory can be moved with `SALON_CONFIG_DIR`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());
    let config_dir = env::var("SALON_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    let default_path = format!("{}/default", config_dir);
    let env_path = format!("{}/{}", config_dir, run_env);
    debug!("Loading config from {} and {}", default_path, env_path);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path).required(false))
        .add_source(File::with_name(&env_path).required(false))
        .add_source(Environment::with_prefix(&prefix).separator(CONFIG_SEPARATOR));

    builder.build()?.try_deserialize()
}

/// Parses a configuration from an in-memory TOML document, without touching
/// the environment. Missing sections fall back to their defaults.
pub fn parse_config(toml: &str) -> Result<AppConfig, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The path can be overridden with `DOTENV_OVERRIDE`, otherwise `.env` is used.
/// Loading happens at most once per process; a missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
