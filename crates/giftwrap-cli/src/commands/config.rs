//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use giftwrap_core::Config;

use crate::output::{Output, OutputFormat};

const VALID_KEYS: &str =
    "data_dir, log_file, ai_api_key, ai_endpoint, ai_model, ai_timeout_secs, import_unknown_blocks";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "log_file": config.log_file,
                    "ai_api_key": config.ai_api_key.as_deref().map(mask_secret),
                    "ai_endpoint": config.ai_endpoint,
                    "ai_model": config.ai_model,
                    "ai_timeout_secs": config.ai_timeout_secs,
                    "import_unknown_blocks": config.import_unknown_blocks
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:              {}", config.data_dir.display());
            println!(
                "  log_file:              {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!(
                "  ai_api_key:            {}",
                config
                    .ai_api_key
                    .as_deref()
                    .map(mask_secret)
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  ai_endpoint:           {}", config.ai_endpoint);
            println!("  ai_model:              {}", config.ai_model);
            println!("  ai_timeout_secs:       {}", config.ai_timeout_secs);
            println!("  import_unknown_blocks: {}", config.import_unknown_blocks);
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    let shown = if key == "ai_api_key" {
        mask_secret(&value)
    } else {
        value
    };
    output.success(&format!("Set {} = {}", key, shown));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let optional = |value: &str| {
        if value.is_empty() || value == "none" {
            None
        } else {
            Some(value.to_string())
        }
    };

    match key {
        "data_dir" => config.data_dir = value.into(),
        "log_file" => config.log_file = optional(value).map(PathBuf::from),
        "ai_api_key" => config.ai_api_key = optional(value),
        "ai_endpoint" => config.ai_endpoint = value.trim_end_matches('/').to_string(),
        "ai_model" => config.ai_model = value.to_string(),
        "ai_timeout_secs" => {
            let secs: u64 = value
                .parse()
                .context("Invalid value for ai_timeout_secs. Use a whole number of seconds.")?;
            if secs == 0 {
                bail!("ai_timeout_secs must be at least 1");
            }
            config.ai_timeout_secs = secs;
        }
        "import_unknown_blocks" => {
            config.import_unknown_blocks = value
                .parse()
                .context("Invalid value for import_unknown_blocks. Use 'true' or 'false'.")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\nValid keys: {}",
                key,
                VALID_KEYS
            );
        }
    }

    Ok(())
}

/// Show only the last four characters of a secret
fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_values() {
        let mut config = Config::default();

        apply(&mut config, "ai_model", "gemini-pro").unwrap();
        apply(&mut config, "ai_timeout_secs", "45").unwrap();
        apply(&mut config, "import_unknown_blocks", "true").unwrap();
        apply(&mut config, "ai_api_key", "secret-key").unwrap();
        apply(&mut config, "ai_endpoint", "http://localhost:8080/models/").unwrap();

        assert_eq!(config.ai_model, "gemini-pro");
        assert_eq!(config.ai_timeout_secs, 45);
        assert!(config.import_unknown_blocks);
        assert_eq!(config.ai_api_key.as_deref(), Some("secret-key"));
        assert_eq!(config.ai_endpoint, "http://localhost:8080/models");

        apply(&mut config, "ai_api_key", "none").unwrap();
        assert!(config.ai_api_key.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply(&mut config, "ai_timeout_secs", "soon").is_err());
        assert!(apply(&mut config, "ai_timeout_secs", "0").is_err());
        assert!(apply(&mut config, "import_unknown_blocks", "maybe").is_err());
        assert!(apply(&mut config, "favorite_color", "blue").is_err());
    }

    #[test]
    fn test_set_writes_to_override_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let data_dir = dir.path().join("data").display().to_string();
        std::fs::write(&path, format!("data_dir = {:?}\n", data_dir)).unwrap();
        let output = Output::new(OutputFormat::Quiet);

        set(
            "ai_model".to_string(),
            "gemini-test".to_string(),
            Some(&path),
            &output,
        )
        .unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("gemini-test"));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abc"), "****");
        assert_eq!(mask_secret("AIzaSyExample1234"), "****1234");
    }
}
