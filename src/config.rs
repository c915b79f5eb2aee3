use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::request::CANONICAL_SIZES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "tagsheet";
const APP_CONFIG_FILE: &str = "config.json";

/// Prefill values for a new label request from `config.json`: the firm
/// identity block that rarely changes between jobs, plus the size list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub firm_name: String,
    pub address: String,
    pub marketed_by: String,
    pub contact: String,
    pub website: String,
    pub sizes: Vec<String>,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            firm_name: String::new(),
            address: String::new(),
            marketed_by: String::new(),
            contact: String::new(),
            website: String::new(),
            sizes: CANONICAL_SIZES.iter().map(|size| size.to_string()).collect(),
        }
    }
}

pub fn load_form_defaults() -> FormDefaults {
    let (xdg_config_home, home) = config_env_dirs();
    load_form_defaults_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_form_defaults_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> FormDefaults {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return FormDefaults::default(),
    };
    if !path.exists() {
        return FormDefaults::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            FormDefaults::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            FormDefaults::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
