//! Tests for WalletService::fetch_transactions.

use ledger_test_utils::prelude::*;
use market_ledger::{
    error::fetch::FetchError, model::token::AccessToken, service::wallet::WalletService,
};

use crate::util::setup::esi_client;

/// Expected: Ok with every returned transaction decoded
#[tokio::test]
async fn fetches_transactions() -> Result<(), TestError> {
    let test = TestBuilder::new()
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
    let esi_client = esi_client(&test);

    let result = WalletService::new(&esi_client)
        .fetch_transactions(&AccessToken::new(TEST_ACCESS_TOKEN), TEST_CHARACTER_ID)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let transactions = result.unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].transaction_id, 1);
    assert_eq!(transactions[0].type_name.as_deref(), Some("Tritanium"));
    assert_eq!(transactions[1].transaction_id, 2);
    assert_eq!(transactions[1].type_name, None);

    test.assert_mocks();

    Ok(())
}

/// Expected: Ok with an empty list
#[tokio::test]
async fn returns_empty_list_when_no_transactions() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_transactions_endpoint(TEST_CHARACTER_ID, TEST_ACCESS_TOKEN, vec![], 1)
        .build()
        .await?;
    let esi_client = esi_client(&test);

    let result = WalletService::new(&esi_client)
        .fetch_transactions(&AccessToken::new(TEST_ACCESS_TOKEN), TEST_CHARACTER_ID)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(result.unwrap().is_empty());

    test.assert_mocks();

    Ok(())
}

/// A malformed date must not fail decoding of the page.
///
/// Expected: Ok with the raw date string preserved
#[tokio::test]
async fn decodes_transactions_with_malformed_dates() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_transactions_endpoint(
            TEST_CHARACTER_ID,
            TEST_ACCESS_TOKEN,
            vec![factory::mock_transaction_with(
                1,
                serde_json::json!({ "date": "24/10/2016 09:00" }),
            )],
            1,
        )
        .build()
        .await?;
    let esi_client = esi_client(&test);

    let transactions = WalletService::new(&esi_client)
        .fetch_transactions(&AccessToken::new(TEST_ACCESS_TOKEN), TEST_CHARACTER_ID)
        .await
        .expect("fetch failed");

    assert_eq!(transactions[0].date, "24/10/2016 09:00");

    Ok(())
}

/// Expected: Err(Status) with the status code and ESI error body
#[tokio::test]
async fn fails_on_non_success_status() -> Result<(), TestError> {
    let error_body = r#"{"error":"token not valid for scope(s): esi-wallet.read_character_wallet.v1"}"#;
    let test = TestBuilder::new()
        .with_transactions_error_endpoint(TEST_CHARACTER_ID, 403, error_body, 1)
        .build()
        .await?;
    let esi_client = esi_client(&test);

    let result = WalletService::new(&esi_client)
        .fetch_transactions(&AccessToken::new(TEST_ACCESS_TOKEN), TEST_CHARACTER_ID)
        .await;

    match result {
        Err(FetchError::Status { status, body }) => {
            assert_eq!(status, 403);
            assert_eq!(body, error_body);
        }
        other => panic!("unexpected result: {:?}", other),
    }

    test.assert_mocks();

    Ok(())
}

/// Expected: Err(Decode) when a success body is not a transaction list
#[tokio::test]
async fn fails_on_unexpected_success_body() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/characters/2114794365/wallet/transactions/")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"unexpected":"object"}"#)
                .expect(1)
                .create()
        })
        .build()
        .await?;
    let esi_client = esi_client(&test);

    let result = WalletService::new(&esi_client)
        .fetch_transactions(&AccessToken::new(TEST_ACCESS_TOKEN), TEST_CHARACTER_ID)
        .await;

    assert!(matches!(result, Err(FetchError::Decode(_))));

    test.assert_mocks();

    Ok(())
}
