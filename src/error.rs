//! Error types for the partner onboarding portal.

use crate::screen::Screen;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Persistence-store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A user action that the current state does not allow.
///
/// These mirror the disabled controls of the portal: a gated action that
/// returns one of these has not changed any state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Cannot move from the {from} screen to the {to} screen")]
    InvalidTransition { from: Screen, to: Screen },

    #[error("That action belongs to the {expected} screen (currently on {current})")]
    WrongScreen { expected: Screen, current: Screen },

    #[error("Enter a login id and password to continue")]
    LoginIncomplete,

    #[error("Enter a 10-digit mobile number and the 6-digit OTP to continue")]
    SignupIncomplete,

    #[error("OTP can only be sent to a 10-digit mobile number once the countdown has finished")]
    OtpSendBlocked,

    #[error("The partnership agreement must be accepted before submitting")]
    AgreementRequired,

    #[error("Submission is only available on the final step (currently on step {current})")]
    NotOnFinalStep { current: u8 },

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Result type alias for the portal.
pub type Result<T> = std::result::Result<T, Error>;
