//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.luminary/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::auth::{DEFAULT_LOGIN_DELAY, DEFAULT_VERIFY_DELAY};
use crate::core::settings::{
    AppSettings, FONT_SIZE_MAX, FONT_SIZE_MIN, Language, Theme,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LuminaryConfig {
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppearanceConfig {
    pub theme: Option<Theme>,
    pub font_size: Option<u8>,
    pub wallpaper: Option<String>,
    pub language: Option<Language>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub notifications: Option<bool>,
    pub animations: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub login_delay_ms: Option<u64>,
    pub verify_delay_ms: Option<u64>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub settings: AppSettings,
    pub login_delay: Duration,
    pub verify_delay: Duration,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub theme: Option<Theme>,
    pub language: Option<Language>,
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

/// Returns the path to `~/.luminary/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".luminary").join("config.toml"))
}

/// Load config from `~/.luminary/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LuminaryConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LuminaryConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LuminaryConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(LuminaryConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<LuminaryConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Luminary Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [appearance]
# theme = "light"                    # "light" or "dark" (env: LUMINARY_THEME)
# font_size = 14                     # 12..22, widens message bubbles
# wallpaper = "https://picsum.photos/1200/800?grayscale"
# language = "ru"                    # "en" or "ru" (env: LUMINARY_LANGUAGE)

# [general]
# notifications = true               # show unread total in the title bar
# animations = true                  # animate the loading spinner

# [auth]
# login_delay_ms = 600               # simulated sign-in latency
# verify_delay_ms = 800              # simulated code verification latency
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Parse an enum-valued env var, ignoring (and logging) junk values.
fn env_enum<T: ValueEnum>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match T::from_str(&raw, true) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LuminaryConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with the environment lookup supplied by the caller.
pub fn resolve_with_env(
    config: &LuminaryConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let defaults = AppSettings::default();

    // Theme: CLI → env → config → default
    let theme = cli
        .theme
        .or_else(|| env_enum(&env, "LUMINARY_THEME"))
        .or(config.appearance.theme)
        .unwrap_or(defaults.theme);

    // Language: CLI → env → config → default
    let language = cli
        .language
        .or_else(|| env_enum(&env, "LUMINARY_LANGUAGE"))
        .or(config.appearance.language)
        .unwrap_or(defaults.language);

    // Font size is a slider in the UI; keep the file inside the same bounds
    let font_size = config
        .appearance
        .font_size
        .map(|size| size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX))
        .unwrap_or(defaults.font_size);

    let settings = AppSettings {
        theme,
        font_size,
        wallpaper: config
            .appearance
            .wallpaper
            .clone()
            .unwrap_or(defaults.wallpaper),
        notifications: config
            .general
            .notifications
            .unwrap_or(defaults.notifications),
        animations: config.general.animations.unwrap_or(defaults.animations),
        language,
    };

    ResolvedConfig {
        settings,
        login_delay: config
            .auth
            .login_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LOGIN_DELAY),
        verify_delay: config
            .auth
            .verify_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_VERIFY_DELAY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = LuminaryConfig::default();
        assert!(config.appearance.theme.is_none());
        assert!(config.auth.login_delay_ms.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = LuminaryConfig::default();
        let cli = CliOverrides {
            theme: Some(Theme::Light),
            language: Some(Language::Ru),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.settings, AppSettings::default());
        assert_eq!(resolved.login_delay, Duration::from_millis(600));
        assert_eq!(resolved.verify_delay, Duration::from_millis(800));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = LuminaryConfig {
            appearance: AppearanceConfig {
                font_size: Some(18),
                wallpaper: Some("file:///tmp/bg.png".to_string()),
                ..Default::default()
            },
            general: GeneralConfig {
                notifications: Some(false),
                animations: Some(false),
            },
            auth: AuthConfig {
                login_delay_ms: Some(0),
                verify_delay_ms: Some(50),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.settings.font_size, 18);
        assert_eq!(resolved.settings.wallpaper, "file:///tmp/bg.png");
        assert!(!resolved.settings.notifications);
        assert!(!resolved.settings.animations);
        assert_eq!(resolved.login_delay, Duration::ZERO);
        assert_eq!(resolved.verify_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = LuminaryConfig {
            appearance: AppearanceConfig {
                theme: Some(Theme::Light),
                language: Some(Language::Ru),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            theme: Some(Theme::Dark),
            language: Some(Language::En),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.settings.theme, Theme::Dark);
        assert_eq!(resolved.settings.language, Language::En);
    }

    fn env_of(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_env_beats_config_file() {
        let config = LuminaryConfig {
            appearance: AppearanceConfig {
                theme: Some(Theme::Light),
                language: Some(Language::Ru),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = env_of(&[("LUMINARY_THEME", "dark"), ("LUMINARY_LANGUAGE", "EN")]);
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.settings.theme, Theme::Dark);
        assert_eq!(resolved.settings.language, Language::En);
    }

    #[test]
    fn test_cli_beats_env() {
        let cli = CliOverrides {
            theme: Some(Theme::Light),
            language: None,
        };
        let env = env_of(&[("LUMINARY_THEME", "dark"), ("LUMINARY_LANGUAGE", "en")]);
        let resolved = resolve_with_env(&LuminaryConfig::default(), &cli, env);
        assert_eq!(resolved.settings.theme, Theme::Light);
        assert_eq!(resolved.settings.language, Language::En);
    }

    #[test]
    fn test_junk_env_value_ignored() {
        let config = LuminaryConfig {
            appearance: AppearanceConfig {
                theme: Some(Theme::Dark),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = env_of(&[("LUMINARY_THEME", "sepia"), ("LUMINARY_LANGUAGE", "")]);
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.settings.theme, Theme::Dark);
        assert_eq!(resolved.settings.language, AppSettings::default().language);
    }

    #[test]
    fn test_font_size_clamped() {
        let config = LuminaryConfig {
            appearance: AppearanceConfig {
                font_size: Some(40),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.settings.font_size, FONT_SIZE_MAX);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[appearance]
theme = "dark"
font_size = 16
language = "en"

[general]
animations = false

[auth]
login_delay_ms = 100
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.appearance.theme, Some(Theme::Dark));
        assert_eq!(config.appearance.font_size, Some(16));
        assert_eq!(config.appearance.language, Some(Language::En));
        assert_eq!(config.general.animations, Some(false));
        assert!(config.general.notifications.is_none());
        assert_eq!(config.auth.login_delay_ms, Some(100));
        assert!(config.auth.verify_delay_ms.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[appearance]
language = "ru"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.appearance.language, Some(Language::Ru));
        assert!(config.appearance.theme.is_none());
        assert!(config.general.animations.is_none());
    }

    #[test]
    fn test_unknown_theme_is_parse_error() {
        let err = parse_config("[appearance]\ntheme = \"sepia\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }
}
