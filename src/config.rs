//! Runtime configuration read from environment variables.
//!
//! | Variable              | Default                          | Meaning                               |
//! |-----------------------|----------------------------------|---------------------------------------|
//! | `STATS_INTERVAL_SECS` | `60`                             | Seconds between collection cycles.    |
//! | `STATS_SNAPSHOT_PATH` | `/etc/ra-statistics/usage.json`  | Usage snapshot read every cycle.      |
//! | `STATS_REPORTER`      | `log`                            | `log` or `none`.                      |
use std::num::ParseIntError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const INTERVAL_VAR: &str = "STATS_INTERVAL_SECS";
pub const SNAPSHOT_PATH_VAR: &str = "STATS_SNAPSHOT_PATH";
pub const REPORTER_VAR: &str = "STATS_REPORTER";

const DEFAULT_INTERVAL_SECS: u64 = 60;
const DEFAULT_SNAPSHOT_PATH: &str = "/etc/ra-statistics/usage.json";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid value for `STATS_INTERVAL_SECS`: '{value}': {source}")]
    InvalidInterval {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("`STATS_INTERVAL_SECS` must be greater than zero")]
    ZeroInterval,
    #[error("unknown reporter `{0}` in `STATS_REPORTER` (expected `log` or `none`)")]
    UnknownReporter(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Which stats reporter to trigger after each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReporterKind {
    #[default]
    Log,
    Disabled,
}

impl FromStr for ReporterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "none" | "" => Ok(Self::Disabled),
            _ => Err(Error::UnknownReporter(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub interval: Duration,
    pub snapshot_path: PathBuf,
    pub reporter: ReporterKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            reporter: ReporterKind::default(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(INTERVAL_VAR) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|source| Error::InvalidInterval {
                    value: value.clone(),
                    source,
                })?;
            if secs == 0 {
                return Err(Error::ZeroInterval);
            }
            config.interval = Duration::from_secs(secs);
        }

        if let Some(path) = lookup(SNAPSHOT_PATH_VAR) {
            config.snapshot_path = PathBuf::from(path);
        }

        if let Some(reporter) = lookup(REPORTER_VAR) {
            config.reporter = reporter.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.interval, Duration::from_secs(60));
        assert_eq!(config.reporter, ReporterKind::Log);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (INTERVAL_VAR, " 5 "),
            (SNAPSHOT_PATH_VAR, "/tmp/usage.json"),
            (REPORTER_VAR, "NONE"),
        ]))
        .unwrap();
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/usage.json"));
        assert_eq!(config.reporter, ReporterKind::Disabled);
    }

    #[test]
    fn test_invalid_interval() {
        assert!(matches!(
            Config::from_lookup(lookup(&[(INTERVAL_VAR, "soon")])),
            Err(Error::InvalidInterval { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(INTERVAL_VAR, "0")])),
            Err(Error::ZeroInterval)
        ));
    }

    #[test]
    fn test_unknown_reporter() {
        let err = Config::from_lookup(lookup(&[(REPORTER_VAR, "statsd")])).unwrap_err();
        assert!(matches!(err, Error::UnknownReporter(ref r) if r == "statsd"));
    }
}
