//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.hjkl-nav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Config is loaded before the logger exists (the log file is itself a
//! setting), so loading and resolution record `ConfigNote`s instead of
//! logging directly. Call `ResolvedConfig::log_notes` once logging is up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::Level;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavConfig {
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Messages from loading, replayed after the logger starts.
    #[serde(skip)]
    pub notes: Vec<ConfigNote>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigationConfig {
    pub move_step: Option<f64>,
    pub zoom_factor: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

/// A log line held back until a logger is installed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigNote {
    pub level: Level,
    pub message: String,
}

impl ConfigNote {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

/// Time units (beats) moved per left/right keypress.
pub const DEFAULT_MOVE_STEP: f64 = 1.0;
/// Configurable but read by no action;
/// zooming delegates to the host's own zoom commands.
pub const DEFAULT_ZOOM_FACTOR: f64 = 2.0;
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "hjkl-nav.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Settings the router consults on every dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavSettings {
    pub move_step: f64,
    /// Unused by every action; see `DEFAULT_ZOOM_FACTOR`.
    pub zoom_factor: f64,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            move_step: DEFAULT_MOVE_STEP,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub settings: NavSettings,
    pub log_level: log::LevelFilter,
    pub log_file: PathBuf,
    /// Everything loading and resolution wanted to log, in order.
    pub notes: Vec<ConfigNote>,
}

impl ResolvedConfig {
    /// Emit the held-back notes through the installed logger.
    pub fn log_notes(&self) {
        for note in &self.notes {
            log::log!(note.level, "{}", note.message);
        }
    }
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub move_step: Option<f64>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.hjkl-nav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".hjkl-nav").join("config.toml"))
}

/// Load config from `~/.hjkl-nav/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NavConfig, ConfigError> {
    match config_path() {
        Some(path) => load_or_generate(&path),
        None => {
            let mut config = NavConfig::default();
            config.notes.push(ConfigNote::new(
                Level::Warn,
                "Could not determine home directory, using default config",
            ));
            Ok(config)
        }
    }
}

/// Load an explicitly named config file. Unlike `load_config`, a missing
/// file is an error: nothing is generated at a user-supplied path.
pub fn load_config_from(path: &Path) -> Result<NavConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: NavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    let dump = format!("Config: {:?}", config);
    config.notes.push(ConfigNote::new(
        Level::Info,
        format!("Loaded config from {}", path.display()),
    ));
    config.notes.push(ConfigNote::new(Level::Debug, dump));
    Ok(config)
}

fn load_or_generate(path: &Path) -> Result<NavConfig, ConfigError> {
    if path.exists() {
        return load_config_from(path);
    }
    let mut config = NavConfig::default();
    config.notes.push(ConfigNote::new(
        Level::Info,
        format!("No config file found, generating default at {}", path.display()),
    ));
    generate_default_config(path, &mut config.notes);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path, notes: &mut Vec<ConfigNote>) {
    let default_content = r#"# HJKL Navigation Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [navigation]
# move_step = 1.0      # Beats moved per h/l press (or HJKL_MOVE_STEP)
# zoom_factor = 2.0    # Reserved; zoom uses the host's own commands

# [logging]
# level = "debug"      # "error", "warn", "info", "debug", "trace", "off"
# file = "hjkl-nav.log"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            notes.push(ConfigNote::new(
                Level::Warn,
                format!("Failed to create config directory: {e}"),
            ));
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        notes.push(ConfigNote::new(
            Level::Warn,
            format!("Failed to write default config: {e}"),
        ));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NavConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with an injectable environment lookup.
pub fn resolve_with_env(
    config: &NavConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let mut notes = config.notes.clone();

    // Move step: CLI → env → config → default
    let env_step = env("HJKL_MOVE_STEP").and_then(|s| parse_env("HJKL_MOVE_STEP", &s, &mut notes));
    let move_step = match cli.move_step.or(env_step).or(config.navigation.move_step) {
        Some(step) => validate_move_step(step, &mut notes),
        None => DEFAULT_MOVE_STEP,
    };

    let zoom_factor = config
        .navigation
        .zoom_factor
        .unwrap_or(DEFAULT_ZOOM_FACTOR);

    // Log level: env → config → default
    let log_level = env("HJKL_LOG_LEVEL")
        .or_else(|| config.logging.level.clone())
        .and_then(|s| parse_env("log level", &s, &mut notes))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("HJKL_LOG_FILE").map(PathBuf::from))
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        settings: NavSettings {
            move_step,
            zoom_factor,
        },
        log_level,
        log_file,
        notes,
    }
}

fn parse_env<T: FromStr>(name: &str, raw: &str, notes: &mut Vec<ConfigNote>) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            notes.push(ConfigNote::new(
                Level::Warn,
                format!("Ignoring unparseable {name}: {raw:?}"),
            ));
            None
        }
    }
}

/// A step must move the view. Anything else falls back to the default.
fn validate_move_step(step: f64, notes: &mut Vec<ConfigNote>) -> f64 {
    if step.is_finite() && step > 0.0 {
        step
    } else {
        notes.push(ConfigNote::new(
            Level::Warn,
            format!("Invalid move_step {step}, using default {DEFAULT_MOVE_STEP}"),
        ));
        DEFAULT_MOVE_STEP
    }
}
