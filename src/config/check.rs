use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Keys a complete configuration file is expected to carry.
pub const EXPECTED_KEYS: [&str; 9] = [
    "database",
    "dark_mode",
    "zones",
    "tracked_companies",
    "purge_code_ttl_secs",
    "recent_exits_limit",
    "history_default_days",
    "productivity_default_days",
    "watch_interval_ms",
];

/// Return the expected keys missing from the YAML document.
pub fn missing_keys(yaml: &str) -> AppResult<Vec<&'static str>> {
    let doc: Value = serde_yaml::from_str(yaml)?;
    let map = doc
        .as_mapping()
        .ok_or_else(|| AppError::Config("a raiz da configuração não é um mapa".into()))?;

    Ok(EXPECTED_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Rewrite the config file with every key present, keeping existing values.
pub fn fill_missing(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    let missing = missing_keys(&content)?;

    if !missing.is_empty() {
        // serde defaults already supply the absent values
        let cfg: Config = serde_yaml::from_str(&content)?;
        fs::write(path, serde_yaml::to_string(&cfg)?)?;
    }

    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_absent_keys_only() {
        let yaml = "database: /tmp/x.sqlite\ndark_mode: false\nzones: [SUL]\n";
        let missing = missing_keys(yaml).unwrap();
        assert!(!missing.contains(&"database"));
        assert!(!missing.contains(&"zones"));
        assert!(missing.contains(&"tracked_companies"));
        assert_eq!(missing.len(), EXPECTED_KEYS.len() - 3);
    }

    #[test]
    fn rejects_non_mapping_root() {
        assert!(missing_keys("- a\n- b\n").is_err());
    }
}
