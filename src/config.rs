// Runtime configuration read from the environment. Every value has a
// default so a bare `pfpswap` run works against a bridge on localhost.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// The picture file is not configurable: it is always `pfp.jpg` in the
/// working directory.
pub const IMAGE_FILE: &str = "pfp.jpg";

const DEFAULT_GATEWAY_URL: &str = "http://localhost:3001";
const DEFAULT_STORE: &str = "login.db";
const DEFAULT_SETTLE_SECS: u64 = 3;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the messaging bridge, without a trailing slash.
    pub gateway_url: String,
    pub store_path: PathBuf,
    /// Pause after connecting before the first request is sent.
    pub settle_delay: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Read `PFPSWAP_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gateway_url = lookup("PFPSWAP_GATEWAY_URL")
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.into())
            .trim_end_matches('/')
            .to_string();
        if gateway_url.is_empty() {
            return Err(Error::Config("PFPSWAP_GATEWAY_URL is empty".into()));
        }

        let store_path = expand_home(&lookup("PFPSWAP_STORE").unwrap_or_else(|| DEFAULT_STORE.into()));
        let settle_delay = Duration::from_secs(seconds(&lookup, "PFPSWAP_SETTLE_SECS", DEFAULT_SETTLE_SECS)?);
        let request_timeout = Duration::from_secs(seconds(&lookup, "PFPSWAP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?);

        Ok(Config {
            gateway_url,
            store_path,
            settle_delay,
            request_timeout,
        })
    }
}

fn seconds<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{key} must be a whole number of seconds, got {raw:?}"))),
        None => Ok(default),
    }
}

/// Expand a leading `~/` to the user's home directory.
fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(rest),
        None => PathBuf::from(raw),
    }
}
