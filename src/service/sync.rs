//! Per-identity synchronization and cycle orchestration.
//!
//! One cycle walks the identity registry in order and drives each identity through
//! `Idle → TokenRefresh → Fetch → Transform → Persist → Done | Failed`. A failure is contained
//! to its identity: it is logged with the stage it occurred in and the cycle moves on.

use std::fmt;

use crate::{
    data::store::TransactionStore,
    error::Error,
    model::identity::{Credentials, Identity, IdentityRegistry},
    service::{auth::CredentialService, esi::EsiClient, transform::transform, wallet::WalletService},
};

/// Stage of an identity's synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Idle,
    TokenRefresh,
    Fetch,
    Transform,
    Persist,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::TokenRefresh => "token refresh",
            Self::Fetch => "fetch",
            Self::Transform => "transform",
            Self::Persist => "persist",
        };
        f.write_str(name)
    }
}

/// Result of one identity's synchronization within a cycle.
#[derive(Debug)]
pub enum IdentityOutcome {
    /// Identity is missing credentials and was not processed.
    Skipped,
    /// Transactions were fetched and persisted.
    Synced { fetched: usize, stored: u64 },
    /// Processing stopped at `stage` with `error`.
    Failed { stage: SyncStage, error: Error },
}

impl IdentityOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcomes of every identity processed in one cycle, in registry order.
#[derive(Debug, Default)]
pub struct CycleReport {
    pub outcomes: Vec<(usize, IdentityOutcome)>,
}

impl CycleReport {
    pub fn synced(&self) -> usize {
        self.count(|o| matches!(o, IdentityOutcome::Synced { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, IdentityOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(IdentityOutcome::is_failed)
    }

    /// Outcome for the identity loaded from suffix `index`
    pub fn outcome(&self, index: usize) -> Option<&IdentityOutcome> {
        self.outcomes
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, predicate: impl Fn(&IdentityOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| predicate(o)).count()
    }
}

pub struct SyncOrchestrator {
    identities: IdentityRegistry,
    esi_client: EsiClient,
    store: TransactionStore,
}

impl SyncOrchestrator {
    pub fn new(identities: IdentityRegistry, esi_client: EsiClient, store: TransactionStore) -> Self {
        Self {
            identities,
            esi_client,
            store,
        }
    }

    pub fn identities(&self) -> &IdentityRegistry {
        &self.identities
    }

    /// Processes every identity once, sequentially.
    ///
    /// Never fails: each identity's error is logged and recorded in the report.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        for identity in self.identities.iter() {
            let outcome = self.sync_identity(identity).await;

            if let IdentityOutcome::Failed { stage, error } = &outcome {
                tracing::error!(
                    identity = identity.index,
                    character_id = ?identity.character_id,
                    stage = %stage,
                    "Failed to synchronize wallet transactions: {}",
                    error
                );
            }

            report.outcomes.push((identity.index, outcome));
        }

        tracing::info!(
            synced = report.synced(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Synchronization cycle complete"
        );

        report
    }

    /// Runs one identity through token refresh, fetch, transform and persist.
    pub async fn sync_identity(&self, identity: &Identity) -> IdentityOutcome {
        let mut stage = SyncStage::Idle;

        let credentials = match identity.credentials() {
            Ok(credentials) => credentials,
            Err(e) => {
                if identity.is_inert() {
                    tracing::info!(identity = identity.index, "Skipping identity without client ID");
                } else {
                    tracing::warn!(identity = identity.index, "Skipping identity: {}", e);
                }
                return IdentityOutcome::Skipped;
            }
        };
        let character_id = credentials.character_id;

        match self.run_stages(&credentials, &mut stage).await {
            Ok((fetched, stored)) => {
                tracing::info!(
                    character_id = %character_id,
                    fetched,
                    stored,
                    "Wallet transactions synchronized"
                );
                IdentityOutcome::Synced { fetched, stored }
            }
            Err(error) => IdentityOutcome::Failed { stage, error },
        }
    }

    /// Advances `stage` before each step so a failure can be attributed to it.
    async fn run_stages(
        &self,
        credentials: &Credentials<'_>,
        stage: &mut SyncStage,
    ) -> Result<(usize, u64), Error> {
        let character_id = credentials.character_id;

        *stage = SyncStage::TokenRefresh;
        tracing::info!(character_id = %character_id, "Refreshing access token");
        let token = CredentialService::new(&self.esi_client)
            .refresh_access_token(credentials)
            .await?;

        *stage = SyncStage::Fetch;
        tracing::info!(character_id = %character_id, "Fetching wallet transactions");
        let transactions = WalletService::new(&self.esi_client)
            .fetch_transactions(&token, character_id)
            .await?;

        if transactions.is_empty() {
            tracing::info!(character_id = %character_id, "No new transactions found");
            return Ok((0, 0));
        }
        let fetched = transactions.len();

        *stage = SyncStage::Transform;
        let records = transactions.into_iter().map(transform).collect();

        *stage = SyncStage::Persist;
        tracing::info!(character_id = %character_id, "Storing {} transactions", fetched);
        let stored = self.store.upsert_batch(records).await?;

        Ok((fetched, stored))
    }
}
