// Entrypoint for the CLI application.
// - Keeps `main` small: build the handles and hand them to `app::run`.
// - Every failure ends up here, is logged once to stderr and exits 1.

use pfpswap::{
    app,
    config::{Config, IMAGE_FILE},
    gateway::GatewayClient,
    picture::UpdateOutcome,
    store::CredentialStore,
    ui::ConsoleTerminal,
};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let store = CredentialStore::open(&config.store_path)?;
    let identity = store.first_device()?;
    let mut client = GatewayClient::new(&config, identity)?;
    let mut term = ConsoleTerminal::new();

    let outcome = app::run(
        &mut client,
        &store,
        &mut term,
        Path::new(IMAGE_FILE),
        config.settle_delay,
    );
    let closed = store.close();

    match app::finish(outcome, closed)? {
        UpdateOutcome::Declined => info!("nothing changed"),
        UpdateOutcome::Updated { picture_id, .. } => info!(%picture_id, "finished"),
    }
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
