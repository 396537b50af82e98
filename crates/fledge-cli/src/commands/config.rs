//! `fledge config`: inspect the effective configuration.

use serde_json::Value;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            output.value(&display_value(&value))?;
        }

        ConfigCommands::List => {
            let text = if output.format() == OutputFormat::Json {
                serde_json::to_string_pretty(config).map_err(|e| serialise_error(&e))?
            } else {
                toml::to_string_pretty(config).map_err(|e| serialise_error(&e))?
            };
            output.value(text.trim_end())?;
        }

        ConfigCommands::Path => {
            output.value(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn serialise_error(e: &dyn std::fmt::Display) -> CliError {
    CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: None,
    }
}

/// Look up a dotted key such as `toolchain.flutter`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let tree = serde_json::to_value(config).map_err(|e| serialise_error(&e))?;

    key.split('.')
        .try_fold(&tree, |node, part| node.get(part))
        .cloned()
        .ok_or_else(|| CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        })
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_keys() {
        let cfg = AppConfig::default();
        let get = |k: &str| display_value(&get_config_value(&cfg, k).unwrap());

        assert_eq!(get("toolchain.flutter"), "flutter");
        assert_eq!(get("process.tick_ms"), "25");
        assert_eq!(get("output.open_artifacts"), "true");
        assert_eq!(get("paths.features_root"), "lib/features");
    }

    #[test]
    fn get_unknown_key_is_config_error() {
        let cfg = AppConfig::default();
        let err = get_config_value(&cfg, "toolchain.gradle").unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn sections_render_as_json() {
        let cfg = AppConfig::default();
        let git = get_config_value(&cfg, "git").unwrap();
        assert_eq!(display_value(&git), r#"{"remote":"origin"}"#);
    }
}
