use anyhow::Result;
use serde::Deserialize;
/// Configuration module for the vigil liveness checker
///
/// Holds the monitored target list and the timing settings. Every field has
/// a default, so a missing or unreadable config file falls back to a
/// complete default configuration.
use std::time::Duration;

fn parse_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(&s).map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// URLs to keep checking, in configuration order.
    #[serde(default = "Config::default_targets")]
    pub targets: Vec<String>,

    /// Fixed delay between consecutive checks of the same target.
    #[serde(
        default = "Config::default_check_interval",
        deserialize_with = "parse_duration"
    )]
    pub check_interval: Duration,

    /// Per-probe request timeout; an expired timeout classifies as down.
    #[serde(
        default = "Config::default_probe_timeout",
        deserialize_with = "parse_duration"
    )]
    pub probe_timeout: Duration,
}

impl Config {
    /// Loads the configuration from the first parsable candidate path.
    pub fn from_toml_file() -> Result<Self> {
        let candidates = ["./vigil.toml", "./config/vigil.toml"];
        let mut last_err = None;
        for path in &candidates {
            let content = match std::fs::read_to_string(path) {
                Ok(c) => c,
                Err(e) => {
                    last_err = Some(anyhow::anyhow!("failed to read {}: {}", path, e));
                    continue;
                }
            };
            match toml::from_str::<Config>(&content) {
                Ok(config) => {
                    tracing::debug!("config loaded from {}: {:?}", path, config);
                    return Ok(config);
                }
                Err(e) => {
                    last_err = Some(anyhow::anyhow!("failed to parse {}: {}", path, e));
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("no config file found")))
    }

    fn default_targets() -> Vec<String> {
        [
            "http://google.com",
            "http://facebook.com",
            "http://stackoverflow.com",
            "http://golang.org",
            "http://amazon.com",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn default_check_interval() -> Duration {
        Duration::from_secs(5)
    }

    fn default_probe_timeout() -> Duration {
        Duration::from_secs(10)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: Self::default_targets(),
            check_interval: Self::default_check_interval(),
            probe_timeout: Self::default_probe_timeout(),
        }
    }
}
