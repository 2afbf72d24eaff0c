use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },
    /// Identity is missing one of its credentials and is skipped every cycle.
    #[error("Identity {index} is missing credential {var}")]
    MissingCredential { index: usize, var: String },
}
