//! HTTP client for EVE SSO and ESI.

use std::time::Duration;

use crate::config::{DEFAULT_ESI_TOKEN_URL, DEFAULT_ESI_URL};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client configured with the ESI and EVE SSO token endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct EsiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) esi_url: String,
    pub(crate) token_url: String,
}

impl EsiClient {
    pub fn builder() -> EsiClientBuilder {
        EsiClientBuilder::default()
    }

    pub fn esi_url(&self) -> &str {
        &self.esi_url
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

/// Builder for [`EsiClient`].
#[derive(Debug, Clone)]
pub struct EsiClientBuilder {
    user_agent: Option<String>,
    esi_url: String,
    token_url: String,
    timeout: Duration,
}

impl Default for EsiClientBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            esi_url: DEFAULT_ESI_URL.to_string(),
            token_url: DEFAULT_ESI_TOKEN_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl EsiClientBuilder {
    /// User agent sent with every request, ESI asks for contact information here
    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    /// Base URL of ESI including the version segment, e.g. `https://esi.evetech.net/latest`
    pub fn esi_url(mut self, esi_url: &str) -> Self {
        self.esi_url = esi_url.trim_end_matches('/').to_string();
        self
    }

    pub fn token_url(mut self, token_url: &str) -> Self {
        self.token_url = token_url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<EsiClient, reqwest::Error> {
        let mut http = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            http = http.user_agent(user_agent);
        }

        Ok(EsiClient {
            http: http.build()?,
            esi_url: self.esi_url,
            token_url: self.token_url,
        })
    }
}
