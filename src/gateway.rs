// Gateway client: a small blocking HTTP client that talks to the local
// messaging bridge. The bridge embeds the protocol library and does the
// pairing, encryption and upload work; this side only drives it.

use crate::client::{MessagingClient, PairingStream};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Identity, Jid, PairingEvent, PictureInfo, PictureParams};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::blocking::{multipart, Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Blocking client for the bridge. Holds two reqwest clients: one with the
/// configured request timeout and one without, for the pairing stream.
pub struct GatewayClient {
    client: Client,
    stream_client: Client,
    base_url: String,
    identity: Option<Identity>,
    connected: bool,
    /// Set once `POST /session` succeeded; a pairing-only connection never
    /// opens one.
    session_open: bool,
}

/// One line of the `/pair` stream as the bridge writes it.
#[derive(Deserialize, Debug)]
struct WirePairingEvent {
    event: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    jid: Option<String>,
    /// Base64 auth material, only on `success`.
    #[serde(default)]
    secret: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SetPictureResponse {
    id: String,
}

impl GatewayClient {
    pub fn new(config: &Config, identity: Option<Identity>) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        let stream_client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(GatewayClient {
            client,
            stream_client,
            base_url: config.gateway_url.clone(),
            identity,
            connected: false,
            session_open: false,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Authorization header for the linked device, empty before pairing.
    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(identity) = &self.identity {
            let val = format!("Bearer {}", STANDARD.encode(&identity.secret));
            let val = HeaderValue::from_str(&val).map_err(|e| Error::Config(e.to_string()))?;
            headers.insert(AUTHORIZATION, val);
        }
        Ok(headers)
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }
}

/// Turn a non-success response into `Error::Gateway` with the body text.
fn check(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let txt = res.text().unwrap_or_else(|_| "".into());
    Err(Error::gateway(status.as_u16(), txt))
}

/// Decode one NDJSON line of the pairing stream.
fn parse_pairing_line(line: &str) -> Result<PairingEvent> {
    let wire: WirePairingEvent = serde_json::from_str(line)?;
    match wire.event.as_str() {
        "code" => Ok(PairingEvent::Code(wire.code.unwrap_or_default())),
        "success" => {
            let jid = wire.jid.ok_or_else(|| Error::InvalidJid(String::new()))?;
            let secret = STANDARD.decode(wire.secret.unwrap_or_default())?;
            Ok(PairingEvent::Success(Identity {
                jid: Jid::parse(&jid)?,
                secret,
            }))
        }
        _ => match wire.error {
            Some(err) => Ok(PairingEvent::Other(format!("{} ({})", wire.event, err))),
            None => Ok(PairingEvent::Other(wire.event)),
        },
    }
}

fn picture_query(params: &PictureParams) -> [(&'static str, String); 3] {
    [
        ("preview", params.preview.to_string()),
        ("existing_id", params.existing_id.clone()),
        ("community", params.is_community.to_string()),
    ]
}

impl MessagingClient for GatewayClient {
    fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    fn pairing_events(&mut self) -> Result<PairingStream> {
        let url = self.url("/pair");
        debug!(%url, "opening pairing stream");
        let res = check(self.stream_client.get(&url).send()?)?;
        let lines = BufReader::new(res).lines();
        Ok(Box::new(lines.filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(parse_pairing_line(&line)),
            Err(err) => Some(Err(Error::Io(err))),
        })))
    }

    fn connect(&mut self) -> Result<()> {
        if self.identity.is_none() {
            // The pairing stream is the connection until a device is linked.
            self.connected = true;
            return Ok(());
        }
        let url = self.url("/session");
        check(self.client.post(&url).headers(self.auth_headers()?).send()?)?;
        self.connected = true;
        self.session_open = true;
        info!("connected to messaging bridge");
        Ok(())
    }

    fn complete_pairing(&mut self, identity: Identity) {
        info!(jid = %identity.jid, "pairing completed");
        self.identity = Some(identity);
    }

    fn picture_info(&self, jid: &Jid, params: &PictureParams) -> Result<Option<PictureInfo>> {
        self.ensure_connected()?;
        let url = self.url(&format!("/users/{}/picture", jid));
        debug!(%url, "fetching picture info");
        let res = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .query(&picture_query(params))
            .send()?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let info: PictureInfo = check(res)?.json()?;
        Ok(Some(info))
    }

    fn set_picture(&self, image: &[u8]) -> Result<String> {
        self.ensure_connected()?;
        let url = self.url("/me/picture");

        let part = multipart::Part::bytes(image.to_vec())
            .file_name(crate::config::IMAGE_FILE)
            .mime_str("image/jpeg")?;
        let form = multipart::Form::new().part("image", part);

        debug!(%url, bytes = image.len(), "uploading picture");
        let res = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .multipart(form)
            .send()?;
        let resp: SetPictureResponse = check(res)?.json()?;
        Ok(resp.id)
    }

    fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;
        if !std::mem::take(&mut self.session_open) {
            return;
        }
        let url = self.url("/session");
        let sent = self
            .auth_headers()
            .and_then(|headers| Ok(self.client.delete(&url).headers(headers).send()?))
            .and_then(check);
        match sent {
            Ok(_) => info!("disconnected from messaging bridge"),
            Err(err) => warn!(error = %err, "disconnect failed"),
        }
    }
}
