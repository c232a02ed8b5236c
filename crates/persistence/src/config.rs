// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;
use std::time::Duration;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "swadesi_demo_data";

/// Settings for building a [`crate::Gateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the remote backend. `None` runs local-only.
    pub backend_url: Option<String>,
    /// Upper bound on any single remote request.
    pub request_timeout: Duration,
    /// File backing the local store. `None` uses a private in-memory database.
    pub database_path: Option<PathBuf>,
    /// Key separating local data sets in one database.
    pub namespace: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            request_timeout: Duration::from_secs(10),
            database_path: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}
