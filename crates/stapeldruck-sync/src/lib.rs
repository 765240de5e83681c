// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stapeldruck Sync — checksum-based directory mirroring and the self-update
// service. Deployment glue around the print engine, no document-processing
// logic.

pub mod checksum;
pub mod mirror;
pub mod update;

pub use checksum::file_sha256;
pub use mirror::{MirrorFilter, MirrorStats, sync_directories};
pub use update::{UpdateAction, check_and_update};
