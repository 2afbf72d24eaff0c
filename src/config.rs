use std::collections::{BTreeSet, HashMap};

use reqwest::Url;

use crate::{
    error::config::ConfigError,
    model::identity::{Identity, IdentityRegistry},
};

pub const DEFAULT_DB_HOST: &str = "borg";
pub const DEFAULT_DB_USER: &str = "root";
pub const DEFAULT_DB_NAME: &str = "eve";

pub const DEFAULT_ESI_URL: &str = "https://esi.evetech.net/latest";
pub const DEFAULT_ESI_TOKEN_URL: &str = "https://login.eveonline.com/v2/oauth/token";

const IDENTITY_PREFIXES: [&str; 4] = ["CLIENT_ID", "CLIENT_SECRET", "REFRESH_TOKEN", "CHARACTER_ID"];

pub struct Config {
    pub identities: IdentityRegistry,
    pub database_url: String,
    pub esi_user_agent: String,
    pub esi_url: String,
    pub esi_token_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Build the configuration from an iterator of environment-style key/value pairs.
    ///
    /// Identities are read for every suffix `n` from 1 up to the highest suffix found on any
    /// `CLIENT_ID_n`, `CLIENT_SECRET_n`, `REFRESH_TOKEN_n` or `CHARACTER_ID_n` variable, so a
    /// gap in the numbering yields an inert identity rather than truncating the list. Empty
    /// values count as unset. Identity values are not validated here; a malformed
    /// `CHARACTER_ID_n` only causes that identity to be skipped each cycle.
    ///
    /// # Returns
    /// - `Ok(Config)` - Configuration ready to hand to [`crate::startup`]
    /// - `Err(ConfigError::InvalidEnvValue)` - The database URL cannot be composed from the
    ///   `DB_*` variables
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();

        let identities = IdentityRegistry::new(
            identity_indexes(&vars)
                .into_iter()
                .map(|index| load_identity(&vars, index))
                .collect(),
        );

        let database_url = match non_empty(&vars, "DATABASE_URL") {
            Some(url) => url,
            None => compose_database_url(
                vars.get("DB_HOST").map(String::as_str).unwrap_or(DEFAULT_DB_HOST),
                vars.get("DB_USER").map(String::as_str).unwrap_or(DEFAULT_DB_USER),
                vars.get("DB_PASSWORD").map(String::as_str).unwrap_or_default(),
                vars.get("DB_NAME").map(String::as_str).unwrap_or(DEFAULT_DB_NAME),
            )?,
        };

        Ok(Self {
            identities,
            database_url,
            esi_user_agent: non_empty(&vars, "ESI_USER_AGENT").unwrap_or_else(|| {
                format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            }),
            esi_url: non_empty(&vars, "ESI_URL").unwrap_or_else(|| DEFAULT_ESI_URL.to_string()),
            esi_token_url: non_empty(&vars, "ESI_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_ESI_TOKEN_URL.to_string()),
        })
    }
}

fn non_empty(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key).filter(|value| !value.is_empty()).cloned()
}

fn identity_indexes(vars: &HashMap<String, String>) -> Vec<usize> {
    let found: BTreeSet<usize> = vars
        .keys()
        .filter_map(|key| {
            IDENTITY_PREFIXES.iter().find_map(|prefix| {
                key.strip_prefix(prefix)?
                    .strip_prefix('_')?
                    .parse::<usize>()
                    .ok()
            })
        })
        .filter(|index| *index > 0)
        .collect();

    match found.last() {
        Some(max) => (1..=*max).collect(),
        None => Vec::new(),
    }
}

fn load_identity(vars: &HashMap<String, String>, index: usize) -> Identity {
    Identity {
        index,
        client_id: non_empty(vars, &format!("CLIENT_ID_{}", index)),
        client_secret: non_empty(vars, &format!("CLIENT_SECRET_{}", index)),
        refresh_token: non_empty(vars, &format!("REFRESH_TOKEN_{}", index)),
        character_id: non_empty(vars, &format!("CHARACTER_ID_{}", index)),
    }
}

fn compose_database_url(
    host: &str,
    user: &str,
    password: &str,
    name: &str,
) -> Result<String, ConfigError> {
    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvValue {
        var: var.to_string(),
        reason,
    };

    let mut url = Url::parse("mysql://localhost").map_err(|e| invalid("DB_HOST", e.to_string()))?;
    url.set_host(Some(host))
        .map_err(|e| invalid("DB_HOST", e.to_string()))?;
    url.set_username(user)
        .map_err(|_| invalid("DB_USER", "cannot be used in a database URL".to_string()))?;
    if !password.is_empty() {
        url.set_password(Some(password))
            .map_err(|_| invalid("DB_PASSWORD", "cannot be used in a database URL".to_string()))?;
    }
    url.set_path(name);

    Ok(url.to_string())
}
