// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Stapeldruck batch print router.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a document request, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single unit of work for the execution engine.
///
/// Built once by the batch selector from already-validated paths and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DocumentRequest {
    /// Send one document to a printer.
    Print {
        id: RequestId,
        path: PathBuf,
        /// Target device name. `None` routes to the system default sink
        /// (Ghostscript raises the OS printer-selection dialog).
        printer: Option<String>,
    },
    /// Combine several documents into one output file.
    Merge {
        id: RequestId,
        /// Page order of the merged output follows this order verbatim.
        inputs: Vec<PathBuf>,
        /// Overwritten if it already exists.
        output: PathBuf,
    },
}

impl DocumentRequest {
    pub fn print(path: impl Into<PathBuf>, printer: Option<String>) -> Self {
        Self::Print {
            id: RequestId::new(),
            path: path.into(),
            printer,
        }
    }

    pub fn merge(inputs: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self::Merge {
            id: RequestId::new(),
            inputs,
            output: output.into(),
        }
    }

    pub fn id(&self) -> RequestId {
        match self {
            Self::Print { id, .. } | Self::Merge { id, .. } => *id,
        }
    }

    /// Short human-readable label for logs ("a.pdf" or "merge → out.pdf").
    pub fn label(&self) -> String {
        match self {
            Self::Print { path, .. } => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Merge { inputs, output, .. } => {
                format!("merge {} files → {}", inputs.len(), output.display())
            }
        }
    }
}

/// How a single backend invocation is carried out. Stateless; chosen fresh
/// per request by the fallback coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationStrategy {
    /// In-process Ghostscript shared-library call (no process spawn).
    NativeBinding,
    /// Ghostscript executable spawned as a child process.
    ExternalProcess,
}

/// Final classification of one request's execution. Exactly one is produced
/// per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The backend completed the operation.
    Success,
    /// The operator dismissed the destination dialog. Not an error.
    Cancelled,
    /// The backend ran but failed. Terminal for the request.
    Failed { code: i32, detail: String },
}

impl Outcome {
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// What the batch loop does when a request fails terminally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop the batch at the failing request (reference behaviour).
    FailFast,
    /// Record the failure, keep processing, report everything at the end.
    ContinueAndReport,
}

/// Result of processing one whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub succeeded: u32,
    pub cancelled: u32,
    /// Request label and error detail for each terminal failure.
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    pub fn begin() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            succeeded: 0,
            cancelled: 0,
            failures: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    pub fn all_ok(&self) -> bool {
        self.failures.is_empty()
    }
}
