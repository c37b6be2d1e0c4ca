// Error types shared by every module of the crate. The binary wraps these
// in `anyhow` at the top level; library code returns `Result<T>`.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The messaging bridge answered with a non-success status.
    #[error("Gateway returned {status}: {body}")]
    Gateway { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid auth material: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid JID: {0:?}")]
    InvalidJid(String),

    #[error("Could not render pairing code: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Cannot read {}: {source}. Picture should be a jpeg, and named pfp.jpg", .path.display())]
    ImageUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a JPEG image. Picture should be a jpeg, and named pfp.jpg", .path.display())]
    NotJpeg { path: PathBuf },

    #[error("Pairing ended before a device was linked")]
    PairingIncomplete,

    #[error("Client is not connected")]
    NotConnected,
}

impl Error {
    /// Build a `Gateway` error from a status code and whatever body came back.
    pub fn gateway(status: u16, body: impl Into<String>) -> Self {
        Error::Gateway {
            status,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_errors_mention_required_name_and_format() {
        let err = Error::NotJpeg {
            path: PathBuf::from("pfp.jpg"),
        };
        let msg = err.to_string();
        assert!(msg.contains("pfp.jpg"));
        assert!(msg.contains("jpeg"));

        let err = Error::ImageUnreadable {
            path: PathBuf::from("pfp.jpg"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("named pfp.jpg"));
    }

    #[test]
    fn gateway_error_keeps_status() {
        let err = Error::gateway(502, "bridge down");
        assert_eq!(err.to_string(), "Gateway returned 502: bridge down");
    }
}
