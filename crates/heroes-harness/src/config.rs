//! Harness configuration read from the environment.
//!
//! | Variable                   | Default | Meaning                                   |
//! |----------------------------|---------|-------------------------------------------|
//! | `HEROES_MAX_LAYOUT_PASSES` | `64`    | Layout passes to wait for before a row lookup gives up |
//! | `HEROES_HARNESS_JSONL`     | off     | Mirror the run log to stderr              |
//! | `HEROES_SEED`              | `0`     | Seed embedded in run ids                  |

use std::fmt;

pub const ENV_MAX_LAYOUT_PASSES: &str = "HEROES_MAX_LAYOUT_PASSES";
pub const ENV_JSONL: &str = "HEROES_HARNESS_JSONL";
pub const ENV_SEED: &str = "HEROES_SEED";

/// An environment variable held a value that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid value {:?} for {}: expected {}",
            self.value, self.key, self.expected
        )
    }
}

impl std::error::Error for ConfigError {}

/// Settings shared by every interaction in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Upper bound on layout passes while waiting for a list to go idle.
    pub max_layout_passes: usize,
    /// Mirror JSONL run logs to stderr.
    pub jsonl_stderr: bool,
    pub seed: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            max_layout_passes: 64,
            jsonl_stderr: false,
            seed: 0,
        }
    }
}

impl HarnessConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`from_env`](Self::from_env), falling back to defaults when a
    /// variable cannot be parsed.
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_lookup_or_default(|key| std::env::var(key).ok())
    }

    /// [`from_lookup`](Self::from_lookup) that logs a bad value and keeps
    /// going with the defaults.
    #[must_use]
    pub fn from_lookup_or_default(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_lookup(lookup).unwrap_or_else(|err| {
            tracing::warn!(message = "harness.config_invalid", key = err.key, error = %err);
            Self::default()
        })
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let max_layout_passes = match lookup(ENV_MAX_LAYOUT_PASSES) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError {
                key: ENV_MAX_LAYOUT_PASSES,
                value: raw,
                expected: "a non-negative integer",
            })?,
            None => defaults.max_layout_passes,
        };
        let jsonl_stderr = match lookup(ENV_JSONL) {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError {
                key: ENV_JSONL,
                value: raw,
                expected: "1/0, true/false, yes/no, or on/off",
            })?,
            None => defaults.jsonl_stderr,
        };
        let seed = match lookup(ENV_SEED) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError {
                key: ENV_SEED,
                value: raw,
                expected: "a 64-bit unsigned integer",
            })?,
            None => defaults.seed,
        };
        Ok(Self {
            max_layout_passes,
            jsonl_stderr,
            seed,
        })
    }

    #[must_use]
    pub fn with_max_layout_passes(mut self, passes: usize) -> Self {
        self.max_layout_passes = passes;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
