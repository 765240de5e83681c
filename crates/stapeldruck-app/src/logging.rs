// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Logging initialisation: stderr plus an append-mode file under `log/`
// next to the working directory. Rotation and retention stay out of scope.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_DIR: &str = "log";
const LOG_FILE: &str = "stapeldruck.log";

/// Initialise the global subscriber. Returns the log-file path if the file
/// layer could be set up; logging still works stderr-only when it could not.
pub fn init() -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    match open_log_file() {
        Ok((path, file)) => {
            let file_layer = fmt::layer().with_writer(Arc::new(file)).with_ansi(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            tracing::info!("logger initialised, logging started");
            Some(path)
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            tracing::warn!(error = %e, "file logging unavailable, stderr only");
            None
        }
    }
}

fn open_log_file() -> std::io::Result<(PathBuf, std::fs::File)> {
    fs::create_dir_all(LOG_DIR)?;
    let path = PathBuf::from(LOG_DIR).join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}
