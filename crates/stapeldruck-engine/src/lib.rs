// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stapeldruck Engine — the dual-path Ghostscript execution engine. Argument
// construction, the in-process gsapi binding, the external-process strategy,
// exit-status classification, and the fallback coordinator that ties them
// together. This crate bridges the domain types in `stapeldruck-core` to the
// actual backend.

pub mod args;
pub mod fallback;
pub mod native;
pub mod outcome;
pub mod process;

pub use fallback::{Backend, Engine, Ghostscript};
pub use outcome::{ProcessExit, classify};
