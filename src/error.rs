//! Error types for fleetdesk
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the store, queries and configuration layer
#[derive(Debug, Snafu)]
pub enum Error {
    /// An action referenced an entity that does not exist
    #[snafu(display("{entity} '{id}' not found"))]
    NotFound { entity: &'static str, id: String },

    /// A maintenance record cannot move to the requested status
    #[snafu(display("maintenance '{id}' cannot be {action} while {status}"))]
    InvalidTransition {
        id: String,
        action: &'static str,
        status: String,
    },

    /// The bay cannot take the vehicle
    #[snafu(display("bay '{bay}' is unavailable: {reason}"))]
    BayUnavailable { bay: String, reason: String },

    /// A planning slot overlaps an active slot on the same mechanic or bay
    #[snafu(display("'{resource}' is already booked by planning entry '{planning}'"))]
    ScheduleConflict { resource: String, planning: String },

    /// The session role lacks a permission
    #[snafu(display("role '{role}' is not allowed to {permission}"))]
    Forbidden {
        role: &'static str,
        permission: &'static str,
    },

    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (config and script files)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl Error {
    /// Shorthand for a missing entity
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether the error is a missing-entity error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
