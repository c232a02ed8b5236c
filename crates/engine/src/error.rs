// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use swadesi::CoreError;
use swadesi_domain::DomainError;
use swadesi_persistence::PersistenceError;
use thiserror::Error;

/// Errors returned by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A validation or transition rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// A required write or read failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// The session has been closed.
    #[error("Session is closed")]
    SessionClosed,
    #[error("Order not found: {0}")]
    OrderNotFound(String),
    #[error("Bill not found: {0}")]
    BillNotFound(String),
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        Self::Core(CoreError::from(err))
    }
}
