// Top-to-bottom application flow: bootstrap, update, disconnect.

use crate::client::MessagingClient;
use crate::error::Result;
use crate::picture::{update_picture, UpdateOutcome};
use crate::session::bootstrap;
use crate::store::CredentialStore;
use crate::ui::Terminal;
use std::path::Path;
use std::time::Duration;

/// Run the whole flow. The client is disconnected whatever the result.
pub fn run<C, T>(
    client: &mut C,
    store: &CredentialStore,
    term: &mut T,
    image_path: &Path,
    settle: Duration,
) -> Result<UpdateOutcome>
where
    C: MessagingClient + ?Sized,
    T: Terminal + ?Sized,
{
    let outcome = bootstrap(client, store, term, settle)
        .and_then(|jid| update_picture(&*client, term, &jid, image_path));
    client.disconnect();
    outcome
}

/// Combine the flow's result with the store teardown. A failure of the flow
/// wins; a failed close only surfaces when the flow itself succeeded.
pub fn finish(outcome: Result<UpdateOutcome>, closed: Result<()>) -> Result<UpdateOutcome> {
    let outcome = outcome?;
    closed?;
    Ok(outcome)
}
