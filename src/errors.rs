//! Unified error types for the budget tracker core.
//!
//! Lookups that miss the current user's scope report [`Error::NotFound`]
//! whether the row is absent or owned by someone else, so existence of other
//! users' data is never leaked.

use thiserror::Error;

/// All failure modes surfaced by core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// Malformed user input that is not one of the more specific cases below
    #[error("Validation error: {message}")]
    Validation {
        /// Field-level message for the submitting form
        message: String,
    },

    /// An active sibling already carries this name (case-insensitive)
    #[error("The name '{name}' is already in use")]
    DuplicateName {
        /// The rejected name
        name: String,
    },

    /// Scoped lookup miss - absent row and cross-tenant probe look identical
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Entity kind, e.g. "group" or "label"
        entity: &'static str,
        /// Stringified id or code that was looked up
        key: String,
    },

    /// Deletion attempt on a system-seeded group
    #[error("Group '{name}' is protected and cannot be deleted")]
    ProtectedGroup {
        /// Name of the protected group
        name: String,
    },

    /// Amount outside the accepted range for the operation
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    /// Default seeding attempted for a user that already has coded groups
    #[error("Default categories already seeded for user {user_id}")]
    AlreadySeeded {
        /// Id of the already-seeded user
        user_id: i64,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
