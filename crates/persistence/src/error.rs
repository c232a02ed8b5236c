// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The remote backend could not be reached or timed out.
    #[error("Backend unreachable: {0}")]
    Connectivity(String),
    /// The backend rejected the credential. The credential has been cleared.
    #[error("Authentication expired. Please sign in again.")]
    Unauthorized,
    /// The credential is valid but lacks access to the resource.
    #[error("Access denied: {0}")]
    Forbidden(String),
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),
    /// The backend failed while handling the request.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// The backend rejected the request.
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// A response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(String),
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// No credential is available for an authenticated call.
    #[error("No access token available")]
    MissingCredential,
    /// The request could not be built.
    #[error("Invalid request: {0}")]
    Request(String),
}

impl PersistenceError {
    /// True when the failure means the backend itself is unavailable.
    ///
    /// Only these errors cause the gateway to fall back to local storage.
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for PersistenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Request(err.to_string())
        } else {
            Self::Connectivity(err.to_string())
        }
    }
}
