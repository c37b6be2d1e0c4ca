// The seam between this tool and whatever actually speaks the messaging
// protocol. The bootstrapper and the updater only ever see this trait;
// `gateway::GatewayClient` is the production implementation.

use crate::error::Result;
use crate::types::{Identity, Jid, PairingEvent, PictureInfo, PictureParams};

/// Blocking stream of pairing events. It ends when the other side closes it.
pub type PairingStream = Box<dyn Iterator<Item = Result<PairingEvent>>>;

pub trait MessagingClient {
    /// The linked device, or `None` before the first pairing.
    fn identity(&self) -> Option<&Identity>;

    /// Subscribe to pairing events. Must be called before `connect` on a
    /// client without identity.
    fn pairing_events(&mut self) -> Result<PairingStream>;

    fn connect(&mut self) -> Result<()>;

    /// Adopt the identity announced by a successful pairing.
    fn complete_pairing(&mut self, identity: Identity);

    /// Current picture of `jid`, or `None` when it has none.
    fn picture_info(&self, jid: &Jid, params: &PictureParams) -> Result<Option<PictureInfo>>;

    /// Replace the account's own picture. Returns the new picture id.
    fn set_picture(&self, image: &[u8]) -> Result<String>;

    /// Best effort; never fails.
    fn disconnect(&mut self);
}
