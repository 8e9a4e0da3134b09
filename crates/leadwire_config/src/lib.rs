use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;

pub mod models;
pub use models::*;

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures the dotenv file is loaded into the environment exactly once.
///
/// Safe to call from any crate; subsequent calls are no-ops thanks to the
/// `OnceCell` guard.
pub fn ensure_dotenv_loaded() {
    INIT_DOTENV.get_or_init(|| {
        dotenv::dotenv().ok();
    });
}

/// Loads the application configuration.
///
/// Layers, later sources winning:
/// 1. `{config_dir}/default` (any supported format, optional)
/// 2. `{config_dir}/{RUN_ENV}` (optional)
/// 3. `LEADWIRE`-prefixed environment variables with `__` separators,
///    e.g. `LEADWIRE_SERVER__PORT=8080`, `LEADWIRE_FIRESTORE__PROJECT_ID=...`
///
/// `config_dir` defaults to `config` relative to the working directory and can
/// be overridden with `LEADWIRE_CONFIG_DIR`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir =
        PathBuf::from(env::var("LEADWIRE_CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(Environment::with_prefix("LEADWIRE").separator("__"));

    builder.build()?.try_deserialize()
}
