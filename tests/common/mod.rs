// Scripted stand-ins for the messaging client and the terminal.

#![allow(dead_code)]

use pfpswap::client::{MessagingClient, PairingStream};
use pfpswap::store::CredentialStore;
use pfpswap::types::{Identity, Jid, PairingEvent, PictureInfo, PictureParams};
use pfpswap::ui::Terminal;
use pfpswap::{Error, Result};
use std::cell::RefCell;
use std::collections::VecDeque;
use tempfile::TempDir;

pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01];

pub fn identity() -> Identity {
    Identity {
        jid: Jid::parse("15551234567:4@s.whatsapp.net").unwrap(),
        secret: b"auth-material".to_vec(),
    }
}

pub fn picture(id: &str, url: &str) -> PictureInfo {
    PictureInfo {
        id: id.into(),
        url: url.into(),
        kind: "image".into(),
        direct_path: String::new(),
    }
}

pub fn temp_store() -> (TempDir, CredentialStore) {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::open(dir.path().join("login.db")).unwrap();
    (dir, store)
}

#[derive(Default)]
pub struct FakeClient {
    pub identity: Option<Identity>,
    /// Events handed out by `pairing_events`, in order.
    pub pairing: Vec<PairingEvent>,
    pub fail_connect: bool,
    pub fail_upload: bool,
    /// Answers for successive `picture_info` calls.
    pub pictures: RefCell<VecDeque<Option<PictureInfo>>>,
    pub lookups: RefCell<Vec<Jid>>,
    pub uploads: RefCell<Vec<Vec<u8>>>,
    pub calls: RefCell<Vec<&'static str>>,
    pub connected: bool,
}

impl FakeClient {
    pub fn paired() -> Self {
        FakeClient {
            identity: Some(identity()),
            ..Default::default()
        }
    }

    pub fn unpaired(events: Vec<PairingEvent>) -> Self {
        FakeClient {
            pairing: events,
            ..Default::default()
        }
    }

    pub fn with_pictures(self, pictures: Vec<Option<PictureInfo>>) -> Self {
        *self.pictures.borrow_mut() = pictures.into();
        self
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == call).count()
    }
}

impl MessagingClient for FakeClient {
    fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    fn pairing_events(&mut self) -> Result<PairingStream> {
        self.calls.borrow_mut().push("pairing_events");
        let events = std::mem::take(&mut self.pairing);
        Ok(Box::new(events.into_iter().map(Ok)))
    }

    fn connect(&mut self) -> Result<()> {
        self.calls.borrow_mut().push("connect");
        if self.fail_connect {
            return Err(Error::gateway(503, "bridge unavailable"));
        }
        self.connected = true;
        Ok(())
    }

    fn complete_pairing(&mut self, identity: Identity) {
        self.calls.borrow_mut().push("complete_pairing");
        self.identity = Some(identity);
    }

    fn picture_info(&self, jid: &Jid, _params: &PictureParams) -> Result<Option<PictureInfo>> {
        self.calls.borrow_mut().push("picture_info");
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.lookups.borrow_mut().push(jid.clone());
        Ok(self.pictures.borrow_mut().pop_front().flatten())
    }

    fn set_picture(&self, image: &[u8]) -> Result<String> {
        self.calls.borrow_mut().push("set_picture");
        if self.fail_upload {
            return Err(Error::gateway(500, "upload rejected"));
        }
        self.uploads.borrow_mut().push(image.to_vec());
        Ok("1700000001".into())
    }

    fn disconnect(&mut self) {
        self.calls.borrow_mut().push("disconnect");
        self.connected = false;
    }
}

/// Terminal that answers the confirmation with a fixed string and records
/// everything it was asked to show.
pub struct ScriptedTerminal {
    pub answer: String,
    pub codes: Vec<String>,
    pub events: Vec<String>,
    pub lines: Vec<String>,
    pub confirms: usize,
    pub pauses: usize,
}

impl ScriptedTerminal {
    pub fn answering(answer: &str) -> Self {
        ScriptedTerminal {
            answer: answer.into(),
            codes: Vec::new(),
            events: Vec::new(),
            lines: Vec::new(),
            confirms: 0,
            pauses: 0,
        }
    }

    pub fn printed(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl Terminal for ScriptedTerminal {
    fn show_pairing_code(&mut self, code: &str) -> Result<()> {
        self.codes.push(code.to_string());
        Ok(())
    }

    fn show_event(&mut self, event: &str) {
        self.events.push(event.to_string());
    }

    fn status(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn begin(&mut self, _message: &str) {}

    fn finish(&mut self) {}

    fn confirm(&mut self, _disclaimer: &str, _prompt: &str) -> Result<String> {
        self.confirms += 1;
        Ok(self.answer.clone())
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }
}
