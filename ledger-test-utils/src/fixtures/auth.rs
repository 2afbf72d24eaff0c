//! EVE SSO token endpoint mocks.

use mockito::{Matcher, Mock};
use serde_json::json;

use crate::{constant::TOKEN_PATH, context::TestContext};

pub struct AuthFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> AuthFixtures<'a> {
    pub(crate) fn new(setup: &'a mut TestContext) -> Self {
        Self { setup }
    }

    /// Create a mock token endpoint granting `access_token` for `refresh_token`.
    ///
    /// Only matches form bodies carrying `grant_type=refresh_token` and the given refresh token,
    /// so several identities can be mocked side by side.
    ///
    /// # Arguments
    /// - `refresh_token` - Refresh token the request must carry
    /// - `access_token` - Access token returned in the JSON body
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_token_endpoint(
        &mut self,
        refresh_token: &str,
        access_token: &str,
        expected_requests: usize,
    ) -> Mock {
        let body = json!({
            "access_token": access_token,
            "expires_in": 1199,
            "token_type": "Bearer",
            "refresh_token": refresh_token
        });

        self.setup
            .server
            .mock("POST", TOKEN_PATH)
            .match_body(refresh_grant(refresh_token))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock token endpoint answering the refresh grant with an error body.
    pub fn create_rejected_token_endpoint(
        &mut self,
        refresh_token: &str,
        status: usize,
        body: &str,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("POST", TOKEN_PATH)
            .match_body(refresh_grant(refresh_token))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create()
    }
}

fn refresh_grant(refresh_token: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("grant_type".to_string(), "refresh_token".to_string()),
        Matcher::UrlEncoded("refresh_token".to_string(), refresh_token.to_string()),
    ])
}
