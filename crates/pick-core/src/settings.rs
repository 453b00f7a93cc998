//! Suggestion endpoint and per-mode selection rules.
//!
//! The shipped defaults live in `default_settings.toml` and are checked by
//! `build.rs`. A deployment may swap in its own file once, at startup, through
//! `init_custom`; after that the values are frozen for the process. Engines
//! copy their `ModeConfig` when they are built.

use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static OVERRIDE_TOML: OnceLock<String> = OnceLock::new();

/// Replace the shipped defaults. Only effective before the first
/// `settings()` call, and only once per process.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    OVERRIDE_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Process-wide settings, parsed on first use.
pub fn settings() -> &'static Settings {
    static ACTIVE: OnceLock<Settings> = OnceLock::new();
    ACTIVE.get_or_init(|| {
        // Overrides are validated by `init_custom`, defaults by build.rs.
        let source = OVERRIDE_TOML.get().map_or(DEFAULT_SETTINGS_TOML, String::as_str);
        parse_settings_toml(source).expect("settings TOML must be valid")
    })
}

/// The shipped defaults, as TOML text.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub remote: RemoteSettings,
    pub tag: ModeConfig,
    pub lookup: ModeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSettings {
    pub endpoint: String,
    /// Transport timeout. Absent means the request may wait indefinitely.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    pub max_results: usize,
}

/// Per-mode behaviour of a selection engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeConfig {
    /// Inputs shorter than this (in chars) never reach the remote source.
    pub min_query_length: usize,
    /// `None` means unbounded.
    pub max_selection: Option<usize>,
    pub allow_bulk_tokenization: bool,
    pub token_separators: Vec<char>,
    /// Offer a "create new" candidate when nothing matches exactly.
    pub synthesize: bool,
}

impl ModeConfig {
    /// Multi-value tag selector.
    pub fn tag() -> Self {
        settings().tag.clone()
    }

    /// Single-value lookup selector.
    pub fn lookup() -> Self {
        settings().lookup.clone()
    }

    pub fn selection_bound(&self) -> usize {
        self.max_selection.unwrap_or(usize::MAX)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModeConfig {
    min_query_length: usize,
    #[serde(default)]
    max_selection: Option<usize>,
    allow_bulk_tokenization: bool,
    #[serde(default)]
    token_separators: Vec<String>,
    #[serde(default = "default_true")]
    synthesize: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
struct RawSettings {
    remote: RemoteSettings,
    tag: RawModeConfig,
    lookup: RawModeConfig,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let raw: RawSettings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate_remote(&raw.remote)?;
    Ok(Settings {
        remote: raw.remote,
        tag: build_mode("tag", raw.tag)?,
        lookup: build_mode("lookup", raw.lookup)?,
    })
}

/// Read and parse a settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path)?;
    parse_settings_toml(&content)
}

fn invalid(field: String, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

fn validate_remote(r: &RemoteSettings) -> Result<(), SettingsError> {
    if !(r.endpoint.starts_with("http://") || r.endpoint.starts_with("https://")) {
        return Err(invalid(
            "remote.endpoint".to_string(),
            "must be an absolute http(s) URL",
        ));
    }
    if r.max_results == 0 {
        return Err(invalid("remote.max_results".to_string(), "must be positive"));
    }
    if r.timeout_ms == Some(0) {
        return Err(invalid(
            "remote.timeout_ms".to_string(),
            "must be positive (omit it for no timeout)",
        ));
    }
    Ok(())
}

fn build_mode(section: &str, raw: RawModeConfig) -> Result<ModeConfig, SettingsError> {
    if raw.max_selection == Some(0) {
        return Err(invalid(
            format!("{section}.max_selection"),
            "must be positive",
        ));
    }
    let mut token_separators = Vec::with_capacity(raw.token_separators.len());
    for sep in &raw.token_separators {
        let mut chars = sep.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => token_separators.push(c),
            _ => {
                return Err(invalid(
                    format!("{section}.token_separators"),
                    "each separator must be a single character",
                ))
            }
        }
    }
    if raw.allow_bulk_tokenization && token_separators.is_empty() {
        return Err(invalid(
            format!("{section}.token_separators"),
            "bulk tokenization needs at least one separator",
        ));
    }
    Ok(ModeConfig {
        min_query_length: raw.min_query_length,
        max_selection: raw.max_selection,
        allow_bulk_tokenization: raw.allow_bulk_tokenization,
        token_separators,
        synthesize: raw.synthesize,
    })
}
