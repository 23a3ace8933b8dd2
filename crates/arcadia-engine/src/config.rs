//! Configuration loading and typed config structures for the demo engine.
//!
//! The canonical configuration lives in `arcadia-config.yaml` at the
//! project root. Every field has a default, so a missing key (or an empty
//! file) falls back to the values documented on each struct.

use std::path::Path;

use arcadia_heroine::HeroineTuning;
use arcadia_types::{Input, Region};
use serde::Deserialize;

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "ARCADIA_LOG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level demo configuration, mirroring `arcadia-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArcadiaConfig {
    /// Heroine movement and ability parameters.
    #[serde(default)]
    pub heroine: HeroineConfig,

    /// Length and input source of the run.
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArcadiaConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `ARCADIA_LOG` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.logging.apply_env_override();
        Ok(config)
    }
}

/// Heroine section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeroineConfig {
    /// Ticks of ducking before the super bomb fires.
    #[serde(default = "default_max_charge")]
    pub max_charge: u32,

    /// Upward velocity applied when a jump starts.
    #[serde(default = "default_jump_velocity")]
    pub jump_velocity: i32,

    /// Downward velocity applied when a dive starts.
    #[serde(default = "default_dive_velocity")]
    pub dive_velocity: i32,

    /// Velocity lost per airborne tick.
    #[serde(default = "default_gravity")]
    pub gravity: i32,
}

impl HeroineConfig {
    /// The tuning handed to a new heroine.
    pub const fn tuning(&self) -> HeroineTuning {
        HeroineTuning {
            max_charge: self.max_charge,
            jump_velocity: self.jump_velocity,
            dive_velocity: self.dive_velocity,
            gravity: self.gravity,
        }
    }
}

impl Default for HeroineConfig {
    fn default() -> Self {
        Self {
            max_charge: default_max_charge(),
            jump_velocity: default_jump_velocity(),
            dive_velocity: default_dive_velocity(),
            gravity: default_gravity(),
        }
    }
}

/// Where the run's inputs come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Replay `run.script`.
    #[default]
    Script,
    /// Generate inputs from `run.seed`.
    Random,
}

/// One scripted action.
///
/// A step may carry any combination of an input, a region change and a
/// fall; they are applied in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScriptStep {
    /// Tick at which the step fires.
    pub tick: u64,

    /// Input fed to the heroine's state machine.
    #[serde(default)]
    pub input: Option<Input>,

    /// Region the heroine moves into.
    #[serde(default)]
    pub region: Option<Region>,

    /// Whether the heroine falls.
    #[serde(default)]
    pub fall: bool,
}

/// Run section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Number of ticks to simulate.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Simulated milliseconds per tick.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,

    /// Seed for [`RunMode::Random`].
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Input source.
    #[serde(default)]
    pub mode: RunMode,

    /// Steps replayed in [`RunMode::Script`].
    #[serde(default = "default_script")]
    pub script: Vec<ScriptStep>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            tick_ms: default_tick_ms(),
            seed: default_seed(),
            mode: RunMode::default(),
            script: default_script(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl LoggingConfig {
    /// Replace the level with `ARCADIA_LOG` when it is set.
    pub fn apply_env_override(&mut self) {
        if let Ok(val) = std::env::var(LOG_LEVEL_ENV) {
            self.level = val;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_max_charge() -> u32 {
    30
}

const fn default_jump_velocity() -> i32 {
    12
}

const fn default_dive_velocity() -> i32 {
    -20
}

const fn default_gravity() -> i32 {
    1
}

const fn default_ticks() -> u64 {
    120
}

const fn default_tick_ms() -> u32 {
    16
}

const fn default_seed() -> u64 {
    42
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// Walk onto the bridge, charge a super bomb, jump, dive, land and fall.
fn default_script() -> Vec<ScriptStep> {
    let step = |tick: u64| ScriptStep {
        tick,
        ..ScriptStep::default()
    };
    vec![
        ScriptStep {
            region: Some(Region::Bridge),
            ..step(2)
        },
        ScriptStep {
            input: Some(Input::PressDown),
            ..step(5)
        },
        ScriptStep {
            input: Some(Input::ReleaseDown),
            ..step(45)
        },
        ScriptStep {
            input: Some(Input::PressA),
            ..step(50)
        },
        ScriptStep {
            input: Some(Input::PressDown),
            ..step(58)
        },
        ScriptStep {
            input: Some(Input::Land),
            ..step(64)
        },
        ScriptStep {
            fall: true,
            ..step(80)
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_tuning_defaults() {
        let config = ArcadiaConfig::default();
        assert_eq!(config.heroine.tuning(), HeroineTuning::default());
        assert_eq!(config.run.mode, RunMode::Script);
        assert_eq!(config.run.script.len(), 7);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
heroine:
  max_charge: 10
  jump_velocity: 8
  dive_velocity: -15
  gravity: 2

run:
  ticks: 40
  tick_ms: 33
  seed: 7
  mode: random
  script:
    - tick: 1
      input: press_a
    - tick: 3
      region: bridge
    - tick: 4
      fall: true

logging:
  level: debug
";
        let config = ArcadiaConfig::parse(yaml).unwrap();

        assert_eq!(config.heroine.max_charge, 10);
        assert_eq!(config.heroine.gravity, 2);
        assert_eq!(config.run.ticks, 40);
        assert_eq!(config.run.mode, RunMode::Random);
        assert_eq!(config.run.script.len(), 3);
        assert_eq!(config.run.script.first().and_then(|s| s.input), Some(Input::PressA));
        assert_eq!(config.run.script.get(1).and_then(|s| s.region), Some(Region::Bridge));
        assert!(config.run.script.get(2).is_some_and(|s| s.fall));
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = ArcadiaConfig::parse("run:\n  seed: 9\n").unwrap();

        assert_eq!(config.run.seed, 9);
        assert_eq!(config.run.ticks, 120);
        assert_eq!(config.heroine.max_charge, 30);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(ArcadiaConfig::parse("").is_ok());
    }

    #[test]
    fn unknown_input_is_rejected() {
        let yaml = "run:\n  script:\n    - tick: 1\n      input: somersault\n";
        assert!(matches!(ArcadiaConfig::parse(yaml), Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("arcadia-config.yaml");
        if path.exists() {
            let config = ArcadiaConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
