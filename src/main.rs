//! `rehashd` daemon: loads the fixed secret key and serves the keyed rehash
//! endpoint. There are no flags and no environment configuration; the key
//! path and listen address are part of the service contract.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use rehash::{DEFAULT_KEY_PATH, JsonWire, LISTEN_ADDR, ServerState, load_key_file, run_server};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let key = load_key_file(DEFAULT_KEY_PATH)
        .with_context(|| format!("loading secret key from {DEFAULT_KEY_PATH}"))?;
    let state = ServerState::new(key, Arc::new(JsonWire));

    let addr: SocketAddr = LISTEN_ADDR.parse().context("parsing listen address")?;
    run_server(state, addr)
        .await
        .with_context(|| format!("serving on {LISTEN_ADDR}"))?;
    Ok(())
}
