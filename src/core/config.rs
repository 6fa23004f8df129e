//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.stackviz/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use thiserror::Error;

use crate::Representation;
use crate::core::sequencer::{AnimationTimings, BusyPolicy};
use crate::core::stack::{DEFAULT_SEED, ParseError, parse_element};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StackvizConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_view: Option<Representation>,
    pub seed: Option<Vec<i64>>,
    pub busy_policy: Option<BusyPolicy>,
    pub notice_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnimationConfig {
    pub push_delay_ms: Option<u64>,
    pub enter_ms: Option<u64>,
    pub pop_delay_ms: Option<u64>,
    pub exit_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_NOTICE_MS: u64 = 3000;

// ============================================================================
// CLI overrides & resolved config
// ============================================================================

/// Values given on the command line (None / false = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub view: Option<Representation>,
    pub seed: Option<Vec<i64>>,
    /// Start with an empty stack, whatever the seed says.
    pub empty: bool,
    /// Skip every animation delay.
    pub instant: bool,
    pub policy: Option<BusyPolicy>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub view: Representation,
    pub seed: Vec<i64>,
    pub busy_policy: BusyPolicy,
    pub timings: AnimationTimings,
    pub notice_duration: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.stackviz/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".stackviz").join("config.toml"))
}

/// Load config from `~/.stackviz/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `StackvizConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<StackvizConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(StackvizConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(StackvizConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<StackvizConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: StackvizConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Stackviz Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_view = "array"        # "stack", "array" or "linked-list"
# seed = [15, 25, 30, 50]       # Starting elements, bottom first. [] for empty.
# busy_policy = "reject"        # "reject" or "queue": requests made mid-animation
# notice_ms = 3000              # How long notices stay on screen

# [animation]
# push_delay_ms = 50            # Before a pushed value lands
# enter_ms = 300                # Highlight on a freshly pushed element
# pop_delay_ms = 400            # Exit animation before the value is removed
# exit_ms = 300                 # Settle time after removal
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

/// Parse a comma separated seed such as `"15, 25,30"`. Blank means empty.
pub fn parse_seed(raw: &str) -> Result<Vec<i64>, ParseError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',').map(parse_element).collect()
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &StackvizConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &StackvizConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // View: CLI → env → config → default
    let view = cli
        .view
        .or_else(|| {
            env("STACKVIZ_VIEW").and_then(|s| match Representation::from_str(&s, true) {
                Ok(view) => Some(view),
                Err(e) => {
                    warn!("Ignoring STACKVIZ_VIEW={:?}: {}", s, e);
                    None
                }
            })
        })
        .or(config.general.default_view)
        .unwrap_or_default();

    // Seed: --empty → CLI → env → config → default
    let seed = if cli.empty {
        Vec::new()
    } else {
        cli.seed
            .clone()
            .or_else(|| {
                env("STACKVIZ_SEED").and_then(|s| match parse_seed(&s) {
                    Ok(seed) => Some(seed),
                    Err(e) => {
                        warn!("Ignoring STACKVIZ_SEED: {}", e);
                        None
                    }
                })
            })
            .or_else(|| config.general.seed.clone())
            .unwrap_or_else(|| DEFAULT_SEED.to_vec())
    };

    // Busy policy: CLI → env → config → default
    let busy_policy = cli
        .policy
        .or_else(|| {
            env("STACKVIZ_POLICY").and_then(|s| match BusyPolicy::from_str(&s, true) {
                Ok(policy) => Some(policy),
                Err(e) => {
                    warn!("Ignoring STACKVIZ_POLICY={:?}: {}", s, e);
                    None
                }
            })
        })
        .or(config.general.busy_policy)
        .unwrap_or_default();

    // Timings: --instant wins over everything
    let timings = if cli.instant {
        AnimationTimings::instant()
    } else {
        let defaults = AnimationTimings::default();
        let anim = &config.animation;
        AnimationTimings {
            push_delay: anim
                .push_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.push_delay),
            enter: anim
                .enter_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.enter),
            pop_delay: anim
                .pop_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.pop_delay),
            exit: anim
                .exit_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.exit),
        }
    };

    let notice_duration =
        Duration::from_millis(config.general.notice_ms.unwrap_or(DEFAULT_NOTICE_MS));

    let resolved = ResolvedConfig {
        view,
        seed,
        busy_policy,
        timings,
        notice_duration,
    };
    debug!("Resolved config: {:?}", resolved);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&StackvizConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.view, Representation::Array);
        assert_eq!(resolved.seed, DEFAULT_SEED.to_vec());
        assert_eq!(resolved.busy_policy, BusyPolicy::Reject);
        assert_eq!(resolved.timings, AnimationTimings::default());
        assert_eq!(resolved.notice_duration, Duration::from_millis(DEFAULT_NOTICE_MS));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = StackvizConfig {
            general: GeneralConfig {
                default_view: Some(Representation::LinkedList),
                seed: Some(vec![1, 2]),
                busy_policy: Some(BusyPolicy::Queue),
                notice_ms: Some(1000),
            },
            animation: AnimationConfig {
                push_delay_ms: Some(10),
                enter_ms: None,
                pop_delay_ms: Some(20),
                exit_ms: None,
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.view, Representation::LinkedList);
        assert_eq!(resolved.seed, vec![1, 2]);
        assert_eq!(resolved.busy_policy, BusyPolicy::Queue);
        assert_eq!(resolved.timings.push_delay, Duration::from_millis(10));
        assert_eq!(resolved.timings.enter, Duration::from_millis(300));
        assert_eq!(resolved.timings.pop_delay, Duration::from_millis(20));
        assert_eq!(resolved.notice_duration, Duration::from_millis(1000));
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = StackvizConfig {
            general: GeneralConfig {
                default_view: Some(Representation::Stack),
                seed: Some(vec![9]),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "STACKVIZ_VIEW" => Some("linked-list".to_string()),
            "STACKVIZ_SEED" => Some("4, 5".to_string()),
            "STACKVIZ_POLICY" => Some("queue".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.view, Representation::LinkedList);
        assert_eq!(resolved.seed, vec![4, 5]);
        assert_eq!(resolved.busy_policy, BusyPolicy::Queue);

        let cli = CliOverrides {
            view: Some(Representation::Array),
            seed: Some(vec![7]),
            policy: Some(BusyPolicy::Reject),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.view, Representation::Array);
        assert_eq!(resolved.seed, vec![7]);
        assert_eq!(resolved.busy_policy, BusyPolicy::Reject);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let env = |key: &str| match key {
            "STACKVIZ_VIEW" => Some("pyramid".to_string()),
            "STACKVIZ_SEED" => Some("1,x".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&StackvizConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.view, Representation::Array);
        assert_eq!(resolved.seed, DEFAULT_SEED.to_vec());
    }

    #[test]
    fn test_empty_and_instant_flags() {
        let cli = CliOverrides {
            seed: Some(vec![1, 2, 3]),
            empty: true,
            instant: true,
            ..Default::default()
        };
        let resolved = resolve_with_env(&StackvizConfig::default(), &cli, no_env);
        assert!(resolved.seed.is_empty());
        assert_eq!(resolved.timings, AnimationTimings::instant());
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("15, 25,30 ,50").unwrap(), vec![15, 25, 30, 50]);
        assert_eq!(parse_seed("  ").unwrap(), Vec::<i64>::new());
        assert!(parse_seed("1,,2").is_err());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[general]
default_view = "stack"
seed = [3, 1, 4]
busy_policy = "queue"
notice_ms = 1500

[animation]
push_delay_ms = 0
enter_ms = 100
pop_delay_ms = 200
exit_ms = 50
"#;
        let config: StackvizConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_view, Some(Representation::Stack));
        assert_eq!(config.general.seed, Some(vec![3, 1, 4]));
        assert_eq!(config.general.busy_policy, Some(BusyPolicy::Queue));
        assert_eq!(config.animation.exit_ms, Some(50));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[general]
seed = []
"#;
        let config: StackvizConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.seed, Some(vec![]));
        assert!(config.general.default_view.is_none());
        assert!(config.animation.push_delay_ms.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("stackviz-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general]\nseed = \"nope\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let err = load_config_from(Path::new("/definitely/not/here/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
