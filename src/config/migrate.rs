//! Bring an existing YAML config up to the current set of keys.

use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

const WEEKDAY_HELP: &str = "# show_weekday options:\n\
#   None   → do not show weekday\n\
#   Short  → Mo, Tu, We, Th, Fr, Sa, Su\n\
#   Medium → Mon, Tue, Wed, Thu, Fri, Sat, Sun\n\
#   Long   → Monday, Tuesday, ...\n";

/// Keys every config file should carry, with their default values.
fn expected_keys() -> Vec<(&'static str, Value)> {
    let defaults = super::Config::default();
    vec![
        ("database", Value::String(defaults.database)),
        ("hourly_rate", Value::from(defaults.hourly_rate)),
        ("decimal_comma", Value::Bool(defaults.decimal_comma)),
        ("show_weekday", Value::String(defaults.show_weekday)),
    ]
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(_) => Err(AppError::Config(format!(
            "{}: top level is not a mapping",
            path.display()
        ))),
        Err(e) => Err(AppError::Config(format!("{}: {}", path.display(), e))),
    }
}

/// Names of the keys absent from the config file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let map = read_mapping(path)?;
    Ok(expected_keys()
        .into_iter()
        .filter(|(k, _)| !map.contains_key(Value::String(k.to_string())))
        .map(|(k, _)| k.to_string())
        .collect())
}

/// Add every missing key with its default value. Existing values are never
/// touched. Returns the keys that were added.
pub fn migrate_config(path: &Path) -> AppResult<Vec<String>> {
    let mut map = read_mapping(path)?;
    let mut added = Vec::new();

    for (key, default) in expected_keys() {
        let k = Value::String(key.to_string());
        if !map.contains_key(&k) {
            map.insert(k, default);
            added.push(key.to_string());
        }
    }

    if added.is_empty() {
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(map))
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    let mut content = String::new();
    for line in serialized.lines() {
        content.push_str(line);
        content.push('\n');
        if line.starts_with("show_weekday:") {
            content.push_str(WEEKDAY_HELP);
        }
    }

    fs::write(path, content)?;
    Ok(added)
}
