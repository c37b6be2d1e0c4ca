// Plain data shared between the bootstrapper, the updater and the client
// implementations. Nothing in here talks to the network or the disk.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account address in `user[:device]@server` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Jid {
    pub user: String,
    pub device: Option<u16>,
    pub server: String,
}

impl Jid {
    pub fn new(user: impl Into<String>, server: impl Into<String>) -> Self {
        Jid {
            user: user.into(),
            device: None,
            server: server.into(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || Error::InvalidJid(raw.to_string());
        let (local, server) = raw.split_once('@').ok_or_else(invalid)?;
        let (user, device) = match local.split_once(':') {
            Some((user, device)) => (user, Some(device.parse::<u16>().map_err(|_| invalid())?)),
            None => (local, None),
        };
        if user.is_empty() || server.is_empty() {
            return Err(invalid());
        }
        Ok(Jid {
            user: user.to_string(),
            device,
            server: server.to_string(),
        })
    }

    /// The account itself, without the linked-device suffix.
    pub fn to_non_ad(&self) -> Jid {
        Jid::new(self.user.clone(), self.server.clone())
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.device {
            Some(device) => write!(f, "{}:{}@{}", self.user, device, self.server),
            None => write!(f, "{}@{}", self.user, self.server),
        }
    }
}

/// A linked device: who we are plus the auth material the bridge issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub jid: Jid,
    pub secret: Vec<u8>,
}

/// Query options for a profile picture lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PictureParams {
    pub preview: bool,
    pub existing_id: String,
    pub is_community: bool,
}

/// Where the service keeps a profile picture.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PictureInfo {
    pub id: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub direct_path: String,
}

/// One item of the pairing stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingEvent {
    /// A code to be scanned from the phone.
    Code(String),
    Success(Identity),
    /// Timeouts, errors and anything else the bridge reports by name.
    Other(String),
}
