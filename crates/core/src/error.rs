// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use swadesi_domain::DomainError;
use swadesi_ledger::LedgerError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A ledger entry could not be built.
    Ledger(LedgerError),
    /// Checkout was attempted with nothing in the cart.
    EmptyCart,
    /// There is no signed-in user to act for.
    NoActiveUser,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Ledger(err) => write!(f, "Ledger error: {err}"),
            Self::EmptyCart => write!(f, "Cart is empty"),
            Self::NoActiveUser => write!(f, "No signed-in user"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<LedgerError> for CoreError {
    fn from(err: LedgerError) -> Self {
        Self::Ledger(err)
    }
}
