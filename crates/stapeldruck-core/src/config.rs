// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::types::FailurePolicy;

/// Runtime settings for the batch tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// What the batch loop does after a terminal per-request failure.
    pub failure_policy: FailurePolicy,
    /// Override for the Ghostscript executable name. `None` picks the
    /// platform default (`gswin64c` on Windows, `gs` elsewhere).
    pub gs_executable: Option<String>,
    /// Override for the Ghostscript shared-library path used by the native
    /// binding. `None` searches the platform candidate names.
    pub gs_library: Option<String>,
    /// Bounded wait for the external process, in seconds. `None` waits
    /// indefinitely (a hung backend hangs the caller).
    pub process_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::FailFast,
            gs_executable: None,
            gs_library: None,
            process_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Platform-default executable name honouring the override.
    pub fn executable(&self) -> &str {
        match &self.gs_executable {
            Some(name) => name,
            None if cfg!(target_os = "windows") => "gswin64c",
            None => "gs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executable_override_wins() {
        let config = AppConfig {
            gs_executable: Some("gs-test".into()),
            ..Default::default()
        };
        assert_eq!(config.executable(), "gs-test");
    }

    #[test]
    fn default_policy_is_fail_fast() {
        assert_eq!(AppConfig::default().failure_policy, FailurePolicy::FailFast);
    }
}
