// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Two-tier fallback coordinator.
//
// The native binding is preferred (no process-spawn overhead) but may be
// absent from the deployment environment; the executable is the universally
// available fallback. At most two attempts per request, never a retry of
// either strategy.

use tracing::{info, warn};

use stapeldruck_core::config::AppConfig;
use stapeldruck_core::error::{Result, StapeldruckError};
use stapeldruck_core::types::{DocumentRequest, InvocationStrategy, Outcome};

use crate::args;
use crate::native::NativeGhostscript;
use crate::outcome::{self, ProcessExit};
use crate::process;

/// Seam between the coordinator and the two invocation strategies.
///
/// The production implementation is [`Ghostscript`]; tests substitute a
/// scripted backend so the branch logic is exercised without Ghostscript
/// installed.
pub trait Backend {
    /// Run the argument list through the in-process binding.
    fn invoke_native(&self, args: &[String]) -> Result<()>;
    /// Run the argument list through the external executable.
    fn invoke_external(&self, args: &[String]) -> Result<ProcessExit>;
}

/// The real Ghostscript backend.
pub struct Ghostscript {
    config: AppConfig,
}

impl Ghostscript {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

impl Backend for Ghostscript {
    fn invoke_native(&self, args: &[String]) -> Result<()> {
        let gs = NativeGhostscript::load(self.config.gs_library.as_deref())?;
        gs.run(args)
    }

    fn invoke_external(&self, args: &[String]) -> Result<ProcessExit> {
        process::invoke(&self.config, args)
    }
}

/// Executes document requests to completion, one at a time.
pub struct Engine<B: Backend> {
    backend: B,
}

impl Engine<Ghostscript> {
    /// Engine wired to the real Ghostscript backend.
    pub fn with_config(config: AppConfig) -> Self {
        Self::new(Ghostscript::new(config))
    }
}

impl<B: Backend> Engine<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Execute one request using at most two attempts.
    ///
    /// Ok(`Success`) and Ok(`Cancelled`) are the non-error outcomes;
    /// cancellation is the operator dismissing the destination dialog and
    /// must never be surfaced as a failure. A classified failure of the
    /// external strategy propagates as `ProcessExit`, terminal for this
    /// request. There is no third attempt.
    pub fn execute(&self, request: &DocumentRequest) -> Result<Outcome> {
        let argv = args::build_args(request)?;

        match self.backend.invoke_native(&argv) {
            Ok(()) => {
                info!(
                    request = %request.id(),
                    strategy = ?InvocationStrategy::NativeBinding,
                    label = %request.label(),
                    "request completed"
                );
                return Ok(Outcome::Success);
            }
            Err(err) if err.triggers_fallback() => {
                warn!(
                    request = %request.id(),
                    error = %err,
                    "ghostscript library attempt failed, falling back to executable"
                );
            }
            Err(err) => return Err(err),
        }

        let exit = self.backend.invoke_external(&argv)?;
        match outcome::classify(&exit) {
            Outcome::Success => {
                info!(
                    request = %request.id(),
                    strategy = ?InvocationStrategy::ExternalProcess,
                    label = %request.label(),
                    "request completed"
                );
                Ok(Outcome::Success)
            }
            Outcome::Cancelled => {
                warn!(
                    request = %request.id(),
                    label = %request.label(),
                    "job cancelled by the operator"
                );
                Ok(Outcome::Cancelled)
            }
            Outcome::Failed { code, detail } => {
                Err(StapeldruckError::ProcessExit { code, detail })
            }
        }
    }
}
