// Copyright 2025 Pupil Chat Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Values are layered in this order:
//! 1. TOML file (or built-in defaults when no file is found)
//! 2. Environment variables
//! 3. CLI arguments

use crate::{ConfigError, ConfigResult, PupilChatConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "pupil_chat.toml";

/// Find the pupil-chat configuration file
///
/// Search order:
/// 1. `PUPIL_CHAT_CONFIG_PATH` environment variable
/// 2. Current working directory: `./pupil_chat.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("PUPIL_CHAT_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by PUPIL_CHAT_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd;
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent.to_path_buf();
                }
                None => break,
            }
        }
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration
///
/// An explicit `config_path` must exist. Without one, the file is searched for
/// with [`find_config_file`]; built-in defaults are used when the search finds
/// nothing. Environment and CLI overrides are applied on top in both cases.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<PupilChatConfig> {
    let config_file = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => match find_config_file() {
            Ok(path) => Some(path),
            // A dangling PUPIL_CHAT_CONFIG_PATH is still an error
            Err(e) if env::var("PUPIL_CHAT_CONFIG_PATH").is_ok() => return Err(e),
            Err(_) => None,
        },
    };

    let mut config = match config_file {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        }
        None => PupilChatConfig::default(),
    };

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `PUPIL_REMOTE_ADDRESS` -> `remote.address`
/// - `PUPIL_PROBE_TIMEOUT_MS` -> `remote.probe_timeout_ms`
/// - `PUPIL_LINGER_MS` -> `remote.linger_ms`
/// - `PUPIL_EXPORT_DIR` -> `export.output_dir`
/// - `PUPIL_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut PupilChatConfig) {
    if let Ok(value) = env::var("PUPIL_REMOTE_ADDRESS") {
        config.remote.address = value;
    }
    if let Ok(value) = env::var("PUPIL_PROBE_TIMEOUT_MS") {
        if let Ok(timeout) = value.parse::<u64>() {
            config.remote.probe_timeout_ms = timeout;
        }
    }
    if let Ok(value) = env::var("PUPIL_LINGER_MS") {
        if let Ok(linger) = value.parse::<i32>() {
            config.remote.linger_ms = linger;
        }
    }
    if let Ok(value) = env::var("PUPIL_EXPORT_DIR") {
        config.export.output_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("PUPIL_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - Map of CLI arguments (e.g., `{"address": "tcp://10.0.0.2:50020"}`)
pub fn apply_cli_overrides(config: &mut PupilChatConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("address") {
        config.remote.address = value.clone();
    }
    if let Some(value) = cli_args.get("probe_timeout_ms") {
        if let Ok(timeout) = value.parse::<u64>() {
            config.remote.probe_timeout_ms = timeout;
        }
    }
    if let Some(value) = cli_args.get("linger_ms") {
        if let Ok(linger) = value.parse::<i32>() {
            config.remote.linger_ms = linger;
        }
    }
    if let Some(value) = cli_args.get("output_dir") {
        config.export.output_dir = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("PUPIL_CHAT_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("PUPIL_CHAT_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::set_var("PUPIL_CHAT_CONFIG_PATH", "/nonexistent/pupil_chat.toml");
        let result = find_config_file();
        let load = load_config(None, None);
        env::remove_var("PUPIL_CHAT_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
        assert!(load.is_err());
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::remove_var("PUPIL_REMOTE_ADDRESS");
        env::remove_var("PUPIL_PROBE_TIMEOUT_MS");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[remote]").unwrap();
        writeln!(file, "address = \"tcp://192.168.1.20:50020\"").unwrap();
        writeln!(file, "probe_timeout_ms = 250").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.remote.address, "tcp://192.168.1.20:50020");
        assert_eq!(config.remote.probe_timeout_ms, 250);
        // Unspecified sections keep their defaults
        assert_eq!(config.remote.linger_ms, 0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[remote\naddress = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = PupilChatConfig::default();

        env::set_var("PUPIL_REMOTE_ADDRESS", "tcp://10.1.1.1:50020");
        env::set_var("PUPIL_PROBE_TIMEOUT_MS", "not-a-number");
        env::set_var("PUPIL_LOG_LEVEL", "debug");

        apply_environment_overrides(&mut config);

        env::remove_var("PUPIL_REMOTE_ADDRESS");
        env::remove_var("PUPIL_PROBE_TIMEOUT_MS");
        env::remove_var("PUPIL_LOG_LEVEL");

        assert_eq!(config.remote.address, "tcp://10.1.1.1:50020");
        assert_eq!(config.remote.probe_timeout_ms, 1000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[remote]").unwrap();
        writeln!(file, "address = \"tcp://file-host:50020\"").unwrap();
        writeln!(file, "probe_timeout_ms = 100").unwrap();

        env::set_var("PUPIL_REMOTE_ADDRESS", "tcp://env-host:50020");
        env::set_var("PUPIL_PROBE_TIMEOUT_MS", "300");

        let mut cli_args = HashMap::new();
        cli_args.insert("address".to_string(), "tcp://cli-host:50020".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("PUPIL_REMOTE_ADDRESS");
        env::remove_var("PUPIL_PROBE_TIMEOUT_MS");

        // CLI wins for the address, env wins for the timeout (no CLI override)
        assert_eq!(config.remote.address, "tcp://cli-host:50020");
        assert_eq!(config.remote.probe_timeout_ms, 300);
    }
}
