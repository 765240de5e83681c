// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Stapeldruck.

use thiserror::Error;

/// Top-level error type for all Stapeldruck operations.
#[derive(Debug, Error)]
pub enum StapeldruckError {
    // -- Native binding --
    #[error("ghostscript library unavailable: {0}")]
    BindingUnavailable(String),

    #[error("ghostscript library call failed: {0}")]
    BindingExecution(String),

    // -- External process --
    #[error("failed to launch ghostscript executable '{program}': {detail}")]
    ProcessSpawn { program: String, detail: String },

    #[error("ghostscript exited with code {code}: {detail}")]
    ProcessExit { code: i32, detail: String },

    #[error("ghostscript did not finish within {0} seconds")]
    ProcessTimeout(u64),

    // -- Request validation --
    #[error("merge requested with no input documents")]
    EmptyMergeSet,

    // -- Sync / self-update utilities --
    #[error("directory sync failed: {0}")]
    Sync(String),

    #[error("self-update failed: {0}")]
    Update(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StapeldruckError {
    /// Whether this failure means the in-process binding cannot serve the
    /// request and the external-process strategy should be tried instead.
    ///
    /// Capability-level failures (library missing, call errored) fall back;
    /// anything else is terminal for the request.
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            Self::BindingUnavailable(_) | Self::BindingExecution(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StapeldruckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_failures_trigger_fallback() {
        assert!(StapeldruckError::BindingUnavailable("not found".into()).triggers_fallback());
        assert!(StapeldruckError::BindingExecution("gsapi -100".into()).triggers_fallback());
    }

    #[test]
    fn process_failures_are_terminal() {
        let spawn = StapeldruckError::ProcessSpawn {
            program: "gs".into(),
            detail: "No such file or directory".into(),
        };
        assert!(!spawn.triggers_fallback());
        assert!(
            !StapeldruckError::ProcessExit {
                code: 255,
                detail: String::new()
            }
            .triggers_fallback()
        );
    }
}
