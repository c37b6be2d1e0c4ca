// Session bootstrap: gets a connected client for the first device in the
// credential store, pairing a new one from scratch when the store is empty.

use crate::client::MessagingClient;
use crate::error::{Error, Result};
use crate::store::CredentialStore;
use crate::types::{Jid, PairingEvent};
use crate::ui::Terminal;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Connect `client`, pairing first if it has no identity. Returns the
/// account JID (without device suffix) once a session exists.
///
/// `settle` is slept after connecting: the bridge drops requests that
/// arrive right after a fresh connect.
pub fn bootstrap<C, T>(
    client: &mut C,
    store: &CredentialStore,
    term: &mut T,
    settle: Duration,
) -> Result<Jid>
where
    C: MessagingClient + ?Sized,
    T: Terminal + ?Sized,
{
    if client.identity().is_none() {
        info!("no stored device, starting pairing");
        let events = client.pairing_events()?;
        client.connect()?;
        for event in events {
            match event? {
                PairingEvent::Code(code) => term.show_pairing_code(&code)?,
                PairingEvent::Success(identity) => {
                    store.save_device(&identity)?;
                    client.complete_pairing(identity);
                }
                PairingEvent::Other(name) => term.show_event(&name),
            }
        }
        debug!("pairing stream closed");
    } else {
        term.begin("Connecting...");
        let connected = client.connect();
        term.finish();
        connected?;
    }

    let jid = client
        .identity()
        .map(|identity| identity.jid.to_non_ad())
        .ok_or(Error::PairingIncomplete)?;

    if !settle.is_zero() {
        debug!(?settle, "waiting for session to settle");
        thread::sleep(settle);
    }

    term.status(&format!("Using: {}", jid.user));
    Ok(jid)
}
