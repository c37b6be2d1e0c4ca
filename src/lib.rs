// Library root
// -----------
// The binary (`main.rs`) wires these modules together; keeping them in a
// library lets the tests drive the flows with a scripted client.
//
// Module responsibilities:
// - `session`: pairs or reconnects and yields the account JID.
// - `picture`: reads pfp.jpg, asks for confirmation and uploads it.
// - `app`: runs both and always disconnects.
// - `client`: the `MessagingClient` trait the flows are written against.
// - `gateway`: the HTTP implementation that talks to the messaging bridge.
// - `store`: SQLite credential store for linked devices.
// - `ui`: terminal rendering and prompts.
// - `config`, `error`, `types`: shared plumbing.
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod picture;
pub mod session;
pub mod store;
pub mod types;
pub mod ui;

pub use error::{Error, Result};
