//! Loading configuration and bubble datasets from disk.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use drills_logic::bubble::Dataset;
use drills_logic::config::{validate_config, DrillsConfig};
use tracing::debug;

/// Load the config file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<DrillsConfig> {
    let Some(path) = path else {
        debug!("no config file, using defaults");
        return Ok(DrillsConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: DrillsConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

/// Fail with every validation error when the config is unusable.
pub fn ensure_valid(config: &DrillsConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    bail!("Invalid configuration: {joined}");
}

/// Read a bubble dataset. `.json` files are JSON, everything else is TOML.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let dataset = if is_json {
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON data file {}", path.display()))?
    } else {
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse TOML data file {}", path.display()))?
    };
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_default() {
        assert_eq!(load_config(None).unwrap(), DrillsConfig::default());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drills.toml");
        fs::write(&path, "[guess]\nmax = 20\nseed = 3\n").unwrap();
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.guess.max, 20);
        assert_eq!(config.guess.seed, Some(3));
        assert!(ensure_valid(&config).is_ok());
    }

    #[test]
    fn test_unreadable_config_has_context() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_bad_toml_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[guess\nmax = ").unwrap();
        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_ensure_valid_joins_errors() {
        let mut config = DrillsConfig::default();
        config.guess.min = 10;
        config.guess.max = 1;
        config.guess.max_attempts = 0;
        let msg = ensure_valid(&config).unwrap_err().to_string();
        assert!(msg.contains("guess range 10..=1 is empty"));
        assert!(msg.contains("max_attempts must be at least 1"));
    }

    #[test]
    fn test_load_json_and_toml_datasets() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("points.json");
        fs::write(
            &json,
            r#"{"title": "J", "points": [{"x": 1, "y": 2, "size": 3, "label": "a"}]}"#,
        )
        .unwrap();
        let data = load_dataset(&json).unwrap();
        assert_eq!(data.title, "J");
        assert_eq!(data.points[0].size, 3.0);

        let toml_path = dir.path().join("points.toml");
        fs::write(&toml_path, "[[points]]\nx = 1.0\ny = 2.0\nsize = 3.0\n").unwrap();
        let data = load_dataset(&toml_path).unwrap();
        assert_eq!(data.points.len(), 1);
    }
}
