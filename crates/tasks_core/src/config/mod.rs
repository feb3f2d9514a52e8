use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TASKS_CONFIG_PATH";
const STORE_ENV_VAR: &str = "TASKS_STORE_PATH";
pub const DEFAULT_STORE_FILE_NAME: &str = ".tasks.csv";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Some(path) = non_blank_env(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("tasks").join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("tasks")
            .join(CONFIG_FILE_NAME))
    }
}

/// Load the config file, falling back to defaults when it is absent or broken.
///
/// A missing file is normal and yields no error. An unreadable or invalid one
/// yields defaults plus the error so the caller can warn about it.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })
}

/// Pick the store file: `--file`, then `TASKS_STORE_PATH`, then the config
/// file, then `.tasks.csv` in the working directory.
pub fn resolve_store_path(flag: Option<&Path>, config: &Config) -> Result<PathBuf, AppError> {
    let cwd = std::env::current_dir()
        .map_err(|err| AppError::io(format!("cannot read working directory: {err}")))?;
    Ok(resolve_store_path_from(
        flag,
        non_blank_env(STORE_ENV_VAR).as_deref(),
        config,
        &cwd,
    ))
}

fn resolve_store_path_from(
    flag: Option<&Path>,
    env_value: Option<&str>,
    config: &Config,
    cwd: &Path,
) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }

    if let Some(path) = env_value {
        return PathBuf::from(path);
    }

    if let Some(path) = config.store_path.as_ref()
        && !path.as_os_str().is_empty()
    {
        return path.clone();
    }

    cwd.join(DEFAULT_STORE_FILE_NAME)
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
