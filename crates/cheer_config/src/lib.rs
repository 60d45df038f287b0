use config::{Config, ConfigError, Environment as EnvSource, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::PathBuf;
use tracing::warn;

pub mod models;
pub use models::*;

/// Marker value replaced by an environment variable when the config is loaded.
pub const SECRET_FROM_ENV: &str = "secret_from_env";

/// Loads the layered application configuration.
///
/// Sources, later ones winning:
/// 1. `{CONFIG_DIR}/default` (any format the `config` crate understands)
/// 2. `{CONFIG_DIR}/{RUN_ENV}` (`RUN_ENV` defaults to `debug`)
/// 3. Environment variables prefixed with `PREFIX` (default `CHEER`), using `__`
///    as separator, e.g. `CHEER__DATABASE__URL`
///
/// Afterwards every `"secret_from_env"` value is resolved from the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "CHEER".to_string());
    let config_dir = PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(EnvSource::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Recursively replaces all "secret_from_env" string values with environment variable values
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_FROM_ENV => {
                let env_key = path.join("_").to_uppercase();
                if let Ok(env_val) = std::env::var(&env_key) {
                    *obj = Value::String(env_val);
                } else {
                    warn!("env var {} not found for secret_from_env", env_key);
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` if set, else the first command line argument if it
/// starts with `.env`, else `.env`. Loading happens at most once per process; a
/// missing file is not an error. Returns the path that was (or would have been) used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_marker_is_replaced_from_env() {
        std::env::set_var("FIREBASE_KEY_PATH", "/tmp/test-service-account.json");
        let config = AppConfig {
            firebase: Some(FirebaseConfig {
                project_id: Some("cheer-test".to_string()),
                key_path: Some(SECRET_FROM_ENV.to_string()),
                api_base_url: None,
            }),
            ..Default::default()
        };

        let resolved = apply_env_overrides_from_marker(config).unwrap();
        let firebase = resolved.firebase.unwrap();
        assert_eq!(
            firebase.key_path.as_deref(),
            Some("/tmp/test-service-account.json")
        );
        assert_eq!(firebase.project_id.as_deref(), Some("cheer-test"));
    }

    #[test]
    fn test_missing_secret_keeps_marker() {
        let config = AppConfig {
            database: DatabaseConfig {
                url: SECRET_FROM_ENV.to_string(),
                max_connections: None,
            },
            ..Default::default()
        };
        std::env::remove_var("DATABASE_URL");

        let resolved = apply_env_overrides_from_marker(config).unwrap();
        assert_eq!(resolved.database.url, SECRET_FROM_ENV);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "cheer": { "environment": "development" }
        }))
        .unwrap();

        assert_eq!(config.cheer.environment, Environment::Development);
        assert_eq!(config.server.port, 8080);
        assert!(!config.use_firebase);
        assert!(config.firebase.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_double_underscore_env_var_overrides_nested_key() {
        std::env::set_var("CONFIG_DIR", "/nonexistent/cheer-config");
        std::env::set_var("CHEER__DATABASE__URL", "sqlite:data/override.db");

        let config = load_config().unwrap();
        assert_eq!(config.database.url, "sqlite:data/override.db");
    }
}
