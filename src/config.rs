use crate::error::{HealthError, Result};
use crate::types::config::HealthConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "repo-health.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/repo-health/config.toml";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// Global, then working-directory, then explicit config; later layers win.
pub fn load_config(explicit: Option<&Path>) -> Result<HealthConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    let mut cfg = load_config_with(global.as_deref(), Some(&local), explicit)?;
    apply_env(&mut cfg, |key| std::env::var(key).ok());
    cfg.validate()?;
    Ok(cfg)
}

pub(crate) fn load_config_with(
    global_path: Option<&Path>,
    local_path: Option<&Path>,
    explicit_path: Option<&Path>,
) -> Result<HealthConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    if let Some(path) = local_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    if let Some(path) = explicit_path {
        if !path.exists() {
            return Err(HealthError::ConfigNotFound(path.display().to_string()));
        }
        merge_file_if_exists(&mut merged, path)?;
    }

    merged
        .try_into()
        .map_err(|e: toml::de::Error| HealthError::ConfigParse(e.to_string()))
}

pub(crate) fn apply_env(cfg: &mut HealthConfig, lookup: impl Fn(&str) -> Option<String>) {
    let token = lookup(TOKEN_ENV).filter(|value| !value.trim().is_empty());
    let base_url = lookup(API_URL_ENV).filter(|value| !value.trim().is_empty());
    if token.is_none() && base_url.is_none() {
        return;
    }

    let api = cfg.api.get_or_insert_with(Default::default);
    if let Some(token) = token {
        api.token = Some(token);
    }
    if let Some(base_url) = base_url {
        api.base_url = base_url;
    }
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| HealthError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
