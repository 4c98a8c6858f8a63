//! Error types for the BASTION access-control core.
//!
//! All fallible operations return `BastionResult<T>`. Variants carry enough
//! context to produce an actionable log line.

use thiserror::Error;

/// The unified error type for the BASTION crates.
#[derive(Debug, Error)]
pub enum BastionError {
    /// The capability store was read before a session was initialised.
    ///
    /// Raised instead of defaulting so that ungated UI never renders before
    /// the actor's permissions are known.
    #[error("capability store not initialized: '{operation}' called outside a session")]
    NotInitialized { operation: String },

    /// The store was initialised twice without an intervening logout.
    #[error("capability store already initialized for session {session_id}")]
    AlreadyInitialized { session_id: String },

    /// A menu node could not be converted into a typed navigation node.
    #[error("malformed navigation node '{node}': {reason}")]
    MalformedNavigationNode { node: String, reason: String },

    /// A capability string is not part of the closed token enumeration.
    #[error("unknown capability token '{token}'")]
    UnknownCapability { token: String },

    /// The authentication collaborator could not supply the actor profile.
    #[error("actor profile unavailable: {reason}")]
    ProfileUnavailable { reason: String },

    /// A menu or profile document is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the BASTION crates.
pub type BastionResult<T> = Result<T, BastionError>;
