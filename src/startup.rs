use std::sync::Arc;

use crate::{
    config::Config,
    data::store::{DatabaseConnector, TransactionStore},
    error::Error,
    scheduler::Scheduler,
    service::{esi::EsiClient, sync::SyncOrchestrator},
};

/// Initialize logging, `RUST_LOG` overrides the default `info` filter
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Build the ESI client with the configured user agent and endpoints
pub fn build_esi_client(config: &Config) -> Result<EsiClient, Error> {
    let esi_client = EsiClient::builder()
        .user_agent(&config.esi_user_agent)
        .esi_url(&config.esi_url)
        .token_url(&config.esi_token_url)
        .build()?;

    Ok(esi_client)
}

/// Build the persistence layer connecting to the configured database on every batch
pub fn build_transaction_store(config: &Config) -> TransactionStore {
    TransactionStore::new(Arc::new(DatabaseConnector::new(&config.database_url)))
}

/// Wire the orchestrator and scheduler from the configuration
pub fn build_scheduler(config: Config) -> Result<Scheduler, Error> {
    let esi_client = build_esi_client(&config)?;
    let store = build_transaction_store(&config);
    let orchestrator = SyncOrchestrator::new(config.identities, esi_client, store);

    Ok(Scheduler::new(orchestrator))
}
