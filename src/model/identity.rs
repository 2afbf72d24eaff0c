//! Character credential sets synchronized by the ledger.

use crate::error::config::ConfigError;

/// One set of ESI application credentials plus the character they grant access to.
///
/// Loaded once from `CLIENT_ID_n`, `CLIENT_SECRET_n`, `REFRESH_TOKEN_n` and `CHARACTER_ID_n`.
/// Any field may be absent; an identity without a client ID is inert and skipped every cycle.
/// `character_id` keeps the raw value so a malformed ID only affects its own identity.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// The `n` suffix of the environment variables this identity was loaded from
    pub index: usize,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub character_id: Option<String>,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("index", &self.index)
            .field("client_id", &self.client_id)
            .field("character_id", &self.character_id)
            .finish_non_exhaustive()
    }
}

/// Complete credentials borrowed from an [`Identity`], ready for a refresh grant.
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub refresh_token: &'a str,
    pub character_id: i64,
}

impl std::fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("character_id", &self.character_id)
            .finish_non_exhaustive()
    }
}

impl Identity {
    /// Returns the identity's credentials if every field is present and the character ID is a
    /// number.
    ///
    /// # Returns
    /// - `Ok(Credentials)` - All four fields are set
    /// - `Err(ConfigError::MissingCredential)` - The first missing field, client ID checked first
    /// - `Err(ConfigError::InvalidEnvValue)` - `CHARACTER_ID_n` is not a number
    pub fn credentials(&self) -> Result<Credentials<'_>, ConfigError> {
        let var = |name: &str| format!("{}_{}", name, self.index);
        let missing = |name: &str| ConfigError::MissingCredential {
            index: self.index,
            var: var(name),
        };

        let client_id = self.client_id.as_deref().ok_or_else(|| missing("CLIENT_ID"))?;
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or_else(|| missing("CLIENT_SECRET"))?;
        let refresh_token = self
            .refresh_token
            .as_deref()
            .ok_or_else(|| missing("REFRESH_TOKEN"))?;
        let character_id = self
            .character_id
            .as_deref()
            .ok_or_else(|| missing("CHARACTER_ID"))?
            .trim()
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: var("CHARACTER_ID"),
                reason: e.to_string(),
            })?;

        Ok(Credentials {
            client_id,
            client_secret,
            refresh_token,
            character_id,
        })
    }

    /// Whether the identity has no client ID and should be skipped silently.
    pub fn is_inert(&self) -> bool {
        self.client_id.is_none()
    }
}

/// Immutable, ordered list of identities processed each cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityRegistry {
    identities: Vec<Identity>,
}

impl IdentityRegistry {
    pub fn new(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.identities.iter()
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
