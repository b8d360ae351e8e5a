//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/tabdeck/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "TABDECK_CONFIG";

/// Keys accepted by `config set`.
const VALID_KEYS: &str =
    "sources.bookmarks, sources.history, output.color, card.max_items, card.history_days";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# tabdeck configuration

# Config schema version (do not modify)
version = 1

# Browser exports used by `tabdeck card`
[sources]
# bookmarks = "/path/to/bookmarks.json"   # bookmark tree export
# history = "/path/to/history.json"       # history entries export

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)

# Card defaults
[card]
# max_items = 100
# history_days = 7
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Item source files.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Card defaults.
    #[serde(default)]
    pub card: CardDefaults,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            sources: SourcesConfig::default(),
            output: OutputConfig::default(),
            card: CardDefaults::default(),
        }
    }
}

/// Source file locations.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Bookmark tree JSON export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<PathBuf>,

    /// History entries JSON export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Defaults for the card command.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CardDefaults {
    /// Maximum number of items on a card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,

    /// History window in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_days: Option<u32>,
}

/// Gets the config file path.
///
/// Uses `$TABDECK_CONFIG` if set, then `$XDG_CONFIG_HOME/tabdeck/config.toml`,
/// then `~/.config/tabdeck/config.toml` on all platforms.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME").filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(xdg_config).join("tabdeck").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("tabdeck").join("config.toml"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk.
///
/// A missing file yields the default configuration.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    debug!(path = %path.display(), version = config.version, "loaded config");
    migrate_config(config)
}

/// Migrates config to current version if needed.
/// Returns the config as-is if already at current version.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the only schema so far.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("[sources]");
            if let Some(ref bookmarks) = config.sources.bookmarks {
                println!("  bookmarks: {}", bookmarks.display());
            }
            if let Some(ref history) = config.sources.history {
                println!("  history: {}", history.display());
            }

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }

            println!("\n[card]");
            if let Some(max_items) = config.card.max_items {
                println!("  max_items: {}", max_items);
            }
            if let Some(days) = config.card.history_days {
                println!("  history_days: {}", days);
            }
        } else {
            println!("(No config file exists. Run 'tabdeck config edit' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config edit command.
pub fn execute_edit(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    // Create default config if it doesn't exist
    if !path.exists() {
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;

        if !ctx.quiet && !ctx.json_output {
            eprintln!("Created default config at: {}", path.display());
        }
    }

    let editor = env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| "vi".to_string());

    debug!(path = %path.display(), editor = %editor, "opening config in editor");

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .map_err(|e| CommandError::Config(format!("Failed to open editor '{}': {}", editor, e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if status.success() { "success" } else { "error" },
            "editor": editor,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if status.success() {
            println!("Config saved.");
        } else {
            eprintln!("Editor exited with error");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Sets `section.field` on the config, validating the value.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key.split_once('.') {
        Some(("sources", "bookmarks")) => {
            config.sources.bookmarks = Some(PathBuf::from(value));
        }
        Some(("sources", "history")) => {
            config.sources.history = Some(PathBuf::from(value));
        }
        Some(("output", "color")) => {
            config.output.color = Some(parse_bool(value)?);
        }
        Some(("card", "max_items")) => {
            config.card.max_items = Some(parse_number(key, value)?);
        }
        Some(("card", "history_days")) => {
            config.card.history_days = Some(parse_number(key, value)?);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: {}",
                key, VALID_KEYS
            )));
        }
    }
    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}

/// Parses a non-negative integer for `key`.
fn parse_number<T: std::str::FromStr>(key: &str, s: &str) -> Result<T> {
    s.trim().parse().map_err(|_| {
        CommandError::Config(format!(
            "Invalid value '{}' for {}. Expected a non-negative integer",
            s, key
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Points the config location at `path` for the duration of `f`.
    fn with_config_env<T>(path: &std::path::Path, f: impl FnOnce() -> T) -> T {
        let original = env::var_os(CONFIG_ENV);
        env::set_var(CONFIG_ENV, path);
        let result = f();
        match original {
            Some(val) => env::set_var(CONFIG_ENV, val),
            None => env::remove_var(CONFIG_ENV),
        }
        result
    }

    #[test]
    fn test_parse_bool_values() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(parse_bool("on").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("Off").unwrap());
        assert!(parse_bool("maybe").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<usize>("card.max_items", "20").unwrap(), 20);
        assert_eq!(parse_number::<u32>("card.history_days", " 7 ").unwrap(), 7);
        assert!(parse_number::<usize>("card.max_items", "-1").is_err());
        assert!(parse_number::<u32>("card.history_days", "week").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.sources.bookmarks.is_none());
        assert!(config.sources.history.is_none());
        assert!(config.output.color.is_none());
        assert!(config.card.max_items.is_none());
    }

    #[test]
    fn test_default_config_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.version, 1);
        assert!(config.sources.history.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
version = 1

[sources]
bookmarks = "/data/bookmarks.json"
history = "/data/history.json"

[output]
color = false

[card]
max_items = 25
history_days = 14
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.sources.bookmarks,
            Some(PathBuf::from("/data/bookmarks.json"))
        );
        assert_eq!(config.sources.history, Some(PathBuf::from("/data/history.json")));
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.card.max_items, Some(25));
        assert_eq!(config.card.history_days, Some(14));
    }

    #[test]
    fn test_config_deserialization_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.sources.bookmarks.is_none());
    }

    #[test]
    fn test_config_serialization_skips_unset() {
        let mut config = Config::default();
        config.card.max_items = Some(10);

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("version = 1"));
        assert!(toml_str.contains("[card]"));
        assert!(toml_str.contains("max_items = 10"));
        assert!(!toml_str.contains("history_days"));
        assert!(!toml_str.contains("bookmarks"));
    }

    #[test]
    fn test_apply_setting_known_keys() {
        let mut config = Config::default();
        apply_setting(&mut config, "sources.history", "/tmp/h.json").unwrap();
        apply_setting(&mut config, "output.color", "off").unwrap();
        apply_setting(&mut config, "card.max_items", "12").unwrap();
        apply_setting(&mut config, "card.history_days", "3").unwrap();

        assert_eq!(config.sources.history, Some(PathBuf::from("/tmp/h.json")));
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.card.max_items, Some(12));
        assert_eq!(config.card.history_days, Some(3));
    }

    #[test]
    fn test_apply_setting_unknown_key() {
        let mut config = Config::default();
        let err = apply_setting(&mut config, "token", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown config key 'token'"));
        assert!(apply_setting(&mut config, "card.color", "x").is_err());
    }

    #[test]
    fn test_apply_setting_invalid_value() {
        let mut config = Config::default();
        assert!(apply_setting(&mut config, "card.max_items", "many").is_err());
        assert!(config.card.max_items.is_none());
    }

    #[test]
    fn test_migrate_config_sets_current_version() {
        let config = Config {
            version: 0,
            ..Config::default()
        };
        assert_eq!(migrate_config(config).unwrap().version, CONFIG_VERSION);
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        let resolved = with_config_env(&path, get_config_path).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    #[serial]
    fn test_load_missing_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");
        let config = with_config_env(&path, load_config).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.sources.bookmarks.is_none());
    }

    #[test]
    #[serial]
    fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let loaded = with_config_env(&path, || {
            let mut config = Config::default();
            apply_setting(&mut config, "sources.bookmarks", "/b.json")?;
            save_config(&config)?;
            load_config()
        })
        .unwrap();

        assert!(path.exists());
        assert_eq!(loaded.sources.bookmarks, Some(PathBuf::from("/b.json")));
    }

    #[test]
    #[serial]
    fn test_load_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[card]\nmax_items = \"lots\"\n").unwrap();

        let err = with_config_env(&path, load_config).unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }
}
