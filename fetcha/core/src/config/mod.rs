//! TOML Configuration File Support
//!
//! This module builds the immutable [`RenderConfig`] every rendering component
//! receives. Configuration is read once, validated, and then passed by
//! reference; nothing in the crate mutates it after construction.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables (`FETCHA_ASCII`, `NO_COLOR`)
//! 3. TOML configuration file
//! 4. Default values
//!
//! # XDG Base Directory Compliance
//!
//! The configuration file defaults to `$XDG_CONFIG_HOME/fetcha/config.toml`
//! (typically `~/.config/fetcha/config.toml`). `FETCHA_CONFIG` points at a
//! different file.
//!
//! # Example Configuration
//!
//! ```toml
//! ascii_path = "~/.config/fetcha/ascii.txt"
//! ascii_pad = 4
//! info_align = true
//! header_show = true
//! color_palette_show = false
//! info_sep = " -> "
//! boundary_char = "-"
//! colors = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]
//! modules = ["OS", "Kernel", "CPU"]
//! ```

mod palette;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use palette::{color_to_ansi, Palette, PaletteError, Role, PALETTE_SIZE};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "FETCHA_CONFIG";

/// Environment variable naming the art file
pub const ASCII_ENV: &str = "FETCHA_ASCII";

/// Environment variable that disables all color output when set and non-empty
pub const NO_COLOR_ENV: &str = "NO_COLOR";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize the effective configuration
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl From<PaletteError> for ConfigError {
    fn from(err: PaletteError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structure
// =============================================================================

/// On-disk shape of the configuration file
///
/// Every field is optional; absent fields keep their default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchaToml {
    /// Path to the art file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascii_path: Option<String>,

    /// Gap in columns between the art block and the panel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascii_pad: Option<usize>,

    /// Pad labels so separators line up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_align: Option<bool>,

    /// Show the `user@host` header and its boundary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_show: Option<bool>,

    /// Show the two color palette rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_palette_show: Option<bool>,

    /// Number repeated labels of multi-line facts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerate_same: Option<bool>,

    /// Truncate rows at the terminal width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_break: Option<bool>,

    /// Separator between label and value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_sep: Option<String>,

    /// Glyph repeated under the header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_char: Option<String>,

    /// Separator between user and host in the header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_sep: Option<String>,

    /// Marker printed where a row is truncated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_break_char: Option<String>,

    /// Ten palette entries, color numbers (0-15) or SGR codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<i64>>,

    /// Fact modules to show, in order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<String>>,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Validated configuration for one render pass
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Art file to load (None = built-in art)
    pub ascii_path: Option<PathBuf>,
    /// Gap in columns between the art block and the panel
    pub ascii_pad: usize,
    /// Pad labels to a common width
    pub info_align: bool,
    /// Show header and boundary rows
    pub header_show: bool,
    /// Show the palette rows
    pub color_palette_show: bool,
    /// Number labels of multi-line facts
    pub numerate_same: bool,
    /// Truncate rows at the terminal width
    pub line_break: bool,
    /// Label/value separator
    pub info_sep: String,
    /// Boundary glyph (one or more characters)
    pub boundary_char: String,
    /// User/host separator
    pub header_sep: String,
    /// Wrap marker
    pub line_break_char: char,
    /// ANSI color table
    pub colors: Palette,
    /// Emit SGR sequences at all
    pub color_enabled: bool,
    /// Fact modules to show (None = all, in default order)
    pub modules: Option<Vec<String>>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Highest-priority source that contributed a value
    pub(crate) source: ConfigSource,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            ascii_path: None,
            ascii_pad: 10,
            info_align: true,
            header_show: true,
            color_palette_show: true,
            numerate_same: true,
            line_break: true,
            info_sep: ": ".to_string(),
            boundary_char: "=".to_string(),
            header_sep: "@".to_string(),
            line_break_char: '>',
            colors: Palette::default(),
            color_enabled: true,
            modules: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// ANSI code for a semantic role
    #[must_use]
    pub fn color(&self, role: Role) -> u8 {
        self.colors.role(role)
    }

    /// Convert back to the file representation (for `--print-config`)
    #[must_use]
    pub fn to_toml(&self) -> FetchaToml {
        FetchaToml {
            ascii_path: self
                .ascii_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            ascii_pad: Some(self.ascii_pad),
            info_align: Some(self.info_align),
            header_show: Some(self.header_show),
            color_palette_show: Some(self.color_palette_show),
            numerate_same: Some(self.numerate_same),
            line_break: Some(self.line_break),
            info_sep: Some(self.info_sep.clone()),
            boundary_char: Some(self.boundary_char.clone()),
            header_sep: Some(self.header_sep.clone()),
            line_break_char: Some(self.line_break_char.to_string()),
            colors: Some(self.colors.codes().iter().map(|&c| i64::from(c)).collect()),
            modules: self.modules.clone(),
        }
    }

    /// Render the effective configuration as TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(&self.to_toml())?)
    }
}

/// Command-line overrides, applied last
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Art file path
    pub ascii_path: Option<PathBuf>,
    /// Gap between art and panel
    pub ascii_pad: Option<usize>,
    /// Header visibility
    pub header_show: Option<bool>,
    /// Palette visibility
    pub color_palette_show: Option<bool>,
    /// Width-limited wrapping
    pub line_break: Option<bool>,
    /// Color output
    pub color_enabled: Option<bool>,
}

impl ConfigOverrides {
    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/fetcha/config.toml` or
/// `~/.config/fetcha/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fetcha").join("config.toml"))
}

/// Load configuration from all sources with proper priority
///
/// `explicit` is a path requested by the user (CLI flag). When absent,
/// `FETCHA_CONFIG` and then the XDG default are tried. A missing default
/// file is not an error; a missing explicitly requested file is.
///
/// # Errors
///
/// Returns an error if a config file cannot be read, parsed, or validated.
pub fn load_config(
    explicit: Option<PathBuf>,
    overrides: &ConfigOverrides,
) -> Result<RenderConfig, ConfigError> {
    load_config_with_env(explicit, overrides, |key| std::env::var(key).ok())
}

/// [`load_config`] with an injectable environment lookup
///
/// # Errors
///
/// Returns an error if a config file cannot be read, parsed, or validated.
pub fn load_config_with_env<F>(
    explicit: Option<PathBuf>,
    overrides: &ConfigOverrides,
    env: F,
) -> Result<RenderConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let (path, required) = match explicit {
        Some(path) => (Some(path), true),
        None => match env(CONFIG_ENV).filter(|v| !v.is_empty()) {
            Some(path) => (Some(PathBuf::from(path)), true),
            None => (default_config_path(), false),
        },
    };

    let mut config = match path {
        Some(ref path) if required || path.exists() => load_config_from_path(path)?,
        Some(ref path) => {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            RenderConfig::default()
        }
        None => RenderConfig::default(),
    };

    apply_env_config(&mut config, &env);
    apply_overrides(&mut config, overrides);

    Ok(config)
}

/// Load configuration from a specific file (no env or CLI layering)
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_config_from_path(path: &Path) -> Result<RenderConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config = parse_config(&content)?;
    config.config_file_path = Some(path.to_path_buf());
    config.source = ConfigSource::File;

    tracing::info!(path = %path.display(), "Loaded configuration from file");
    Ok(config)
}

/// Parse and validate TOML text on top of the defaults
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or fails validation.
pub fn parse_config(content: &str) -> Result<RenderConfig, ConfigError> {
    let toml_config: FetchaToml = toml::from_str(content)?;
    let mut config = RenderConfig::default();
    apply_toml_config(&mut config, toml_config)?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut RenderConfig, toml: FetchaToml) -> Result<(), ConfigError> {
    if let Some(path) = toml.ascii_path {
        config.ascii_path = Some(expand_home(&path));
    }
    if let Some(pad) = toml.ascii_pad {
        config.ascii_pad = pad;
    }
    if let Some(align) = toml.info_align {
        config.info_align = align;
    }
    if let Some(show) = toml.header_show {
        config.header_show = show;
    }
    if let Some(show) = toml.color_palette_show {
        config.color_palette_show = show;
    }
    if let Some(numerate) = toml.numerate_same {
        config.numerate_same = numerate;
    }
    if let Some(line_break) = toml.line_break {
        config.line_break = line_break;
    }
    if let Some(sep) = toml.info_sep {
        config.info_sep = sep;
    }
    if let Some(boundary) = toml.boundary_char {
        if boundary.is_empty() {
            return Err(ConfigError::ValidationError(
                "boundary_char must not be empty".to_string(),
            ));
        }
        config.boundary_char = boundary;
    }
    if let Some(sep) = toml.header_sep {
        config.header_sep = sep;
    }
    if let Some(marker) = toml.line_break_char {
        config.line_break_char = single_char(&marker)?;
    }
    if let Some(colors) = toml.colors {
        config.colors = Palette::from_config(&colors)?;
    }
    if let Some(modules) = toml.modules {
        config.modules = Some(modules);
    }
    Ok(())
}

/// Apply environment variables (overrides file values)
fn apply_env_config<F>(config: &mut RenderConfig, env: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = env(ASCII_ENV).filter(|v| !v.is_empty()) {
        config.ascii_path = Some(expand_home(&path));
        config.source = ConfigSource::Env;
    }
    if env(NO_COLOR_ENV).is_some_and(|v| !v.is_empty()) {
        config.color_enabled = false;
        config.source = ConfigSource::Env;
    }
}

/// Apply command-line overrides (highest priority)
fn apply_overrides(config: &mut RenderConfig, overrides: &ConfigOverrides) {
    if overrides.is_empty() {
        return;
    }
    if let Some(ref path) = overrides.ascii_path {
        config.ascii_path = Some(path.clone());
    }
    if let Some(pad) = overrides.ascii_pad {
        config.ascii_pad = pad;
    }
    if let Some(show) = overrides.header_show {
        config.header_show = show;
    }
    if let Some(show) = overrides.color_palette_show {
        config.color_palette_show = show;
    }
    if let Some(line_break) = overrides.line_break {
        config.line_break = line_break;
    }
    if let Some(color) = overrides.color_enabled {
        config.color_enabled = color;
    }
    config.source = ConfigSource::Cli;
}

fn single_char(value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::ValidationError(format!(
            "line_break_char must be exactly one character, got {value:?}"
        ))),
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
