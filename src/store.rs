// Credential store: a small SQLite file holding the devices this machine
// has been linked as. Only the first device is ever used, but the table
// keeps all of them so re-pairing a different account does not lose the
// old one.

use crate::error::{Error, Result};
use crate::types::{Identity, Jid};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

pub struct CredentialStore {
    conn: Connection,
}

impl CredentialStore {
    /// Open the store at `path`, creating the file and schema on first use.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE IF NOT EXISTS devices (
                 jid       TEXT PRIMARY KEY,
                 secret    BLOB NOT NULL,
                 paired_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
             );",
        )?;
        debug!(path = %path.display(), "credential store opened");
        Ok(CredentialStore { conn })
    }

    /// The oldest stored device, if any.
    pub fn first_device(&self) -> Result<Option<Identity>> {
        let row = self
            .conn
            .query_row(
                "SELECT jid, secret FROM devices ORDER BY rowid LIMIT 1",
                [],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?)),
            )
            .optional()?;

        match row {
            Some((jid, secret)) => Ok(Some(Identity {
                jid: Jid::parse(&jid)?,
                secret,
            })),
            None => Ok(None),
        }
    }

    /// Insert a device, replacing the auth material if the JID is known.
    pub fn save_device(&self, identity: &Identity) -> Result<()> {
        self.conn.execute(
            "INSERT INTO devices (jid, secret) VALUES (?1, ?2)
             ON CONFLICT(jid) DO UPDATE SET secret = excluded.secret",
            params![identity.jid.to_string(), identity.secret],
        )?;
        info!(jid = %identity.jid, "device saved to credential store");
        Ok(())
    }

    /// Flush and close the underlying database.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| Error::Store(err))
    }
}
