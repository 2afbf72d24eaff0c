//! Tests for SyncOrchestrator.

use std::time::Duration;

use ledger_test_utils::prelude::*;
use market_ledger::{
    config::Config,
    error::{auth::AuthError, config::ConfigError, fetch::FetchError, storage::StorageError, Error},
    service::sync::{IdentityOutcome, SyncStage},
};
use mockito::Matcher;
use sea_orm::EntityTrait;

use crate::util::{
    connector::TestConnector,
    setup::{identity, inert_identity, orchestrator},
    sleeper::RecordingSleeper,
};

/// An identity without a client ID is skipped before any I/O.
///
/// Expected: Skipped with no HTTP requests and no database connection
#[tokio::test]
async fn skips_inert_identity_without_io() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| server.mock("POST", Matcher::Any).expect(0).create())
        .with_mock_endpoint(|server| server.mock("GET", Matcher::Any).expect(0).create())
        .build()
        .await?;
    let connector = TestConnector::new(&test.db);
    let sleeper = RecordingSleeper::new();
    let orchestrator = orchestrator(&test, vec![inert_identity(1)], &connector, &sleeper);

    let report = orchestrator.run_cycle().await;

    assert!(matches!(report.outcome(1), Some(IdentityOutcome::Skipped)));
    assert_eq!(report.skipped(), 1);
    assert_eq!(connector.connects(), 0);

    test.assert_mocks();

    Ok(())
}

/// Expected: Skipped when a credential other than the client ID is missing
#[tokio::test]
async fn skips_identity_with_incomplete_credentials() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| server.mock("POST", Matcher::Any).expect(0).create())
        .build()
        .await?;
    let connector = TestConnector::new(&test.db);
    let sleeper = RecordingSleeper::new();

    let mut incomplete = identity(1, TEST_REFRESH_TOKEN, TEST_CHARACTER_ID);
    incomplete.refresh_token = None;
    let orchestrator = orchestrator(&test, vec![incomplete], &connector, &sleeper);

    let report = orchestrator.run_cycle().await;

    assert!(matches!(report.outcome(1), Some(IdentityOutcome::Skipped)));
    assert_eq!(connector.connects(), 0);

    test.assert_mocks();

    Ok(())
}

/// Expected: Synced with every fetched transaction stored
#[tokio::test]
async fn synchronizes_identity() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_endpoint(TEST_REFRESH_TOKEN, TEST_ACCESS_TOKEN, 1)
        .with_transactions_endpoint(
            TEST_CHARACTER_ID,
            TEST_ACCESS_TOKEN,
            vec![
                factory::mock_transaction(1),
                factory::mock_transaction_without_type_name(2),
            ],
            1,
        )
        .build()
        .await?;
    let connector = TestConnector::new(&test.db);
    let sleeper = RecordingSleeper::new();
    let orchestrator = orchestrator(
        &test,
        vec![identity(1, TEST_REFRESH_TOKEN, TEST_CHARACTER_ID)],
        &connector,
        &sleeper,
    );

    let report = orchestrator.run_cycle().await;

    assert!(matches!(
        report.outcome(1),
        Some(IdentityOutcome::Synced {
            fetched: 2,
            stored: 2
        })
    ));

    let stored = entity::prelude::MarketTransaction::find_by_id(2_i64)
        .one(&test.db)
        .await?
        .expect("transaction 2 not stored");
    assert_eq!(stored.type_name, "Unknown");

    test.assert_mocks();

    Ok(())
}

/// Expected: Synced with zero counts and no database connection
#[tokio::test]
async fn empty_fetch_skips_persistence() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_endpoint(TEST_REFRESH_TOKEN, TEST_ACCESS_TOKEN, 1)
        .with_transactions_endpoint(TEST_CHARACTER_ID, TEST_ACCESS_TOKEN, vec![], 1)
        .build()
        .await?;
    let connector = TestConnector::new(&test.db);
    let sleeper = RecordingSleeper::new();
    let orchestrator = orchestrator(
        &test,
        vec![identity(1, TEST_REFRESH_TOKEN, TEST_CHARACTER_ID)],
        &connector,
        &sleeper,
    );

    let report = orchestrator.run_cycle().await;

    assert!(matches!(
        report.outcome(1),
        Some(IdentityOutcome::Synced {
            fetched: 0,
            stored: 0
        })
    ));
    assert_eq!(connector.connects(), 0);

    test.assert_mocks();

    Ok(())
}

/// Expected: Failed at token refresh without fetching
#[tokio::test]
async fn fails_at_token_refresh() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_rejected_token_endpoint(
            TEST_REFRESH_TOKEN,
            400,
            r#"{"error":"invalid_grant"}"#,
            1,
        )
        .with_transactions_endpoint(TEST_CHARACTER_ID, TEST_ACCESS_TOKEN, vec![], 0)
        .build()
        .await?;
    let connector = TestConnector::new(&test.db);
    let sleeper = RecordingSleeper::new();
    let orchestrator = orchestrator(
        &test,
        vec![identity(1, TEST_REFRESH_TOKEN, TEST_CHARACTER_ID)],
        &connector,
        &sleeper,
    );

    let report = orchestrator.run_cycle().await;

    assert!(matches!(
        report.outcome(1),
        Some(IdentityOutcome::Failed {
            stage: SyncStage::TokenRefresh,
            error: Error::AuthError(AuthError::RefreshRejected { status: 400, .. }),
        })
    ));
    assert_eq!(connector.connects(), 0);

    test.assert_mocks();

    Ok(())
}

/// Expected: Failed at fetch with the ESI status
#[tokio::test]
async fn fails_at_fetch() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_endpoint(TEST_REFRESH_TOKEN, TEST_ACCESS_TOKEN, 1)
        .with_transactions_error_endpoint(
            TEST_CHARACTER_ID,
            503,
            r#"{"error":"service unavailable"}"#,
            1,
        )
        .build()
        .await?;
    let connector = TestConnector::new(&test.db);
    let sleeper = RecordingSleeper::new();
    let orchestrator = orchestrator(
        &test,
        vec![identity(1, TEST_REFRESH_TOKEN, TEST_CHARACTER_ID)],
        &connector,
        &sleeper,
    );

    let report = orchestrator.run_cycle().await;

    assert!(matches!(
        report.outcome(1),
        Some(IdentityOutcome::Failed {
            stage: SyncStage::Fetch,
            error: Error::FetchError(FetchError::Status { status: 503, .. }),
        })
    ));
    assert_eq!(connector.connects(), 0);

    test.assert_mocks();

    Ok(())
}

/// A persistence failure for one identity does not stop the next one.
///
/// Expected: identity 1 Failed at persist after 3 attempts, identity 2 Synced
#[tokio::test]
async fn contains_failures_to_their_identity() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_endpoint("refresh-1", "access-1", 1)
        .with_token_endpoint("refresh-2", "access-2", 1)
        .with_transactions_endpoint(1001, "access-1", vec![factory::mock_transaction(1)], 1)
        .with_transactions_endpoint(1002, "access-2", vec![factory::mock_transaction(2)], 1)
        .build()
        .await?;
    let connector = TestConnector::failing_first(&test.db, 3);
    let sleeper = RecordingSleeper::new();
    let orchestrator = orchestrator(
        &test,
        vec![identity(1, "refresh-1", 1001), identity(2, "refresh-2", 1002)],
        &connector,
        &sleeper,
    );

    let report = orchestrator.run_cycle().await;

    assert!(matches!(
        report.outcome(1),
        Some(IdentityOutcome::Failed {
            stage: SyncStage::Persist,
            error: Error::StorageError(StorageError::RetriesExhausted { attempts: 3, .. }),
        })
    ));
    assert!(matches!(
        report.outcome(2),
        Some(IdentityOutcome::Synced {
            fetched: 1,
            stored: 1
        })
    ));
    assert_eq!(report.failed(), 1);
    assert_eq!(report.synced(), 1);
    assert_eq!(connector.connects(), 4);
    assert_eq!(
        sleeper.calls(),
        vec![Duration::from_secs(3), Duration::from_secs(3)]
    );

    let ids: Vec<i64> = entity::prelude::MarketTransaction::find()
        .all(&test.db)
        .await?
        .into_iter()
        .map(|row| row.transaction_id)
        .collect();
    assert_eq!(ids, vec![2]);

    test.assert_mocks();

    Ok(())
}

/// Expected: Synced with the malformed date stored as null
#[tokio::test]
async fn stores_malformed_date_as_null() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_endpoint(TEST_REFRESH_TOKEN, TEST_ACCESS_TOKEN, 1)
        .with_transactions_endpoint(
            TEST_CHARACTER_ID,
            TEST_ACCESS_TOKEN,
            vec![factory::mock_transaction_with(
                1,
                serde_json::json!({ "date": "2024-03-15 18:42:07" }),
            )],
            1,
        )
        .build()
        .await?;
    let connector = TestConnector::new(&test.db);
    let sleeper = RecordingSleeper::new();
    let orchestrator = orchestrator(
        &test,
        vec![identity(1, TEST_REFRESH_TOKEN, TEST_CHARACTER_ID)],
        &connector,
        &sleeper,
    );

    let report = orchestrator.run_cycle().await;

    assert_eq!(report.synced(), 1);
    let stored = entity::prelude::MarketTransaction::find_by_id(1_i64)
        .one(&test.db)
        .await?
        .expect("transaction 1 not stored");
    assert_eq!(stored.date, None);
    assert_eq!(stored.type_name, "Tritanium");

    test.assert_mocks();

    Ok(())
}

/// A malformed character ID only affects its own identity.
///
/// Expected: configuration loads, identities with bad IDs are Skipped, the valid one is Synced
#[tokio::test]
async fn skips_identities_with_malformed_character_id() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_token_endpoint(TEST_REFRESH_TOKEN, TEST_ACCESS_TOKEN, 1)
        .with_transactions_endpoint(
            TEST_CHARACTER_ID,
            TEST_ACCESS_TOKEN,
            vec![factory::mock_transaction(1)],
            1,
        )
        .build()
        .await?;
    let character_id = TEST_CHARACTER_ID.to_string();
    let config = Config::from_vars(
        [
            ("CLIENT_ID_1", TEST_CLIENT_ID),
            ("CLIENT_SECRET_1", TEST_CLIENT_SECRET),
            ("REFRESH_TOKEN_1", TEST_REFRESH_TOKEN),
            ("CHARACTER_ID_1", character_id.as_str()),
            ("CHARACTER_ID_2", "oops"),
            ("CLIENT_ID_3", TEST_CLIENT_ID),
            ("CLIENT_SECRET_3", TEST_CLIENT_SECRET),
            ("REFRESH_TOKEN_3", "refresh-3"),
            ("CHARACTER_ID_3", "not-a-number"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string())),
    )
    .expect("configuration rejected");

    let identity_3 = config
        .identities
        .iter()
        .find(|identity| identity.index == 3)
        .expect("identity 3 not loaded");
    match identity_3.credentials() {
        Err(ConfigError::InvalidEnvValue { var, .. }) => assert_eq!(var, "CHARACTER_ID_3"),
        other => panic!("unexpected result: {:?}", other),
    }

    let connector = TestConnector::new(&test.db);
    let sleeper = RecordingSleeper::new();
    let orchestrator = orchestrator(
        &test,
        config.identities.iter().cloned().collect(),
        &connector,
        &sleeper,
    );

    let report = orchestrator.run_cycle().await;

    assert!(matches!(
        report.outcome(1),
        Some(IdentityOutcome::Synced {
            fetched: 1,
            stored: 1
        })
    ));
    assert!(matches!(report.outcome(2), Some(IdentityOutcome::Skipped)));
    assert!(matches!(report.outcome(3), Some(IdentityOutcome::Skipped)));
    assert_eq!(report.skipped(), 2);

    test.assert_mocks();

    Ok(())
}
