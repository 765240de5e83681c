// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operator notification.
//
// Errors are mirrored to a modal alert so unattended batch runs are noticed;
// cancellations are logged only and never alerted. The trait keeps the
// desktop dialog out of the batch logic so headless runs and tests inject
// the logging-only implementation.

use tracing::error;

/// Injected operator-facing alert capability.
pub trait OperatorNotifier {
    fn alert_error(&self, title: &str, body: &str);
}

/// Desktop modal dialog via `rfd`. Blocks until dismissed.
pub struct DialogNotifier;

impl OperatorNotifier for DialogNotifier {
    fn alert_error(&self, title: &str, body: &str) {
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(format!(
                "{body}\n\nPlease contact your friendly Test Eng Department"
            ))
            .show();
    }
}

/// Logging-only notifier for headless environments and tests.
pub struct LogNotifier;

impl OperatorNotifier for LogNotifier {
    fn alert_error(&self, title: &str, body: &str) {
        error!(title, "{body}");
    }
}
