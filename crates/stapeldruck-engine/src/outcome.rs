// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Exit-status classification for the external-process strategy.
//
// Ghostscript's exit-code protocol is an implicit contract: code 1 means the
// operator dismissed the printer-selection dialog, not that anything broke.
// The whole mapping lives in this one function so the convention can be
// updated in a single place if Ghostscript's behaviour changes.

use stapeldruck_core::types::Outcome;

/// Ghostscript's documented code for an operator-dismissed destination dialog.
pub const EXIT_CANCELLED: i32 = 1;

/// Synthetic code used when the child died to a signal and has no exit code.
pub const CODE_SIGNALED: i32 = -1;

/// Raw result of a completed (reaped) external-process invocation.
#[derive(Debug, Clone)]
pub struct ProcessExit {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    /// Captured standard-error text, never echoed to the console.
    pub stderr: String,
}

/// Map an exit status onto the request outcome.
pub fn classify(exit: &ProcessExit) -> Outcome {
    match exit.code {
        Some(0) => Outcome::Success,
        Some(EXIT_CANCELLED) => Outcome::Cancelled,
        Some(code) => Outcome::Failed {
            code,
            detail: exit.stderr.trim().to_owned(),
        },
        None => Outcome::Failed {
            code: CODE_SIGNALED,
            detail: format!("terminated by signal; stderr: {}", exit.stderr.trim()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit(code: Option<i32>, stderr: &str) -> ProcessExit {
        ProcessExit {
            code,
            stderr: stderr.to_owned(),
        }
    }

    #[test]
    fn zero_is_success() {
        assert_eq!(classify(&exit(Some(0), "")), Outcome::Success);
    }

    #[test]
    fn one_is_operator_cancellation() {
        assert_eq!(classify(&exit(Some(1), "")), Outcome::Cancelled);
    }

    #[test]
    fn other_codes_fail_with_detail() {
        let outcome = classify(&exit(Some(255), "GPL Ghostscript: Unrecoverable error\n"));
        assert_eq!(
            outcome,
            Outcome::Failed {
                code: 255,
                detail: "GPL Ghostscript: Unrecoverable error".to_owned(),
            }
        );
    }

    #[test]
    fn signal_death_is_failure() {
        let outcome = classify(&exit(None, ""));
        assert!(matches!(
            outcome,
            Outcome::Failed {
                code: CODE_SIGNALED,
                ..
            }
        ));
    }
}
