// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Self-update — replace a local cached file with a newer network copy.
//
// The library only reports what happened; deciding to alert the operator and
// restart the process belongs to the caller.

use std::fs;
use std::path::Path;

use tracing::info;

use stapeldruck_core::error::{Result, StapeldruckError};

/// What a self-update check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    /// Local copy is current; nothing changed.
    UpToDate,
    /// Local copy replaced (or created) from the network; the caller should
    /// restart the process before relying on the file.
    RestartRequired,
}

/// Compare modification times of `network_copy` against `local_copy` and
/// replace the local file when the network copy is newer or the local copy
/// is missing.
pub fn check_and_update(network_copy: &Path, local_copy: &Path) -> Result<UpdateAction> {
    let network_mtime = fs::metadata(network_copy)
        .and_then(|m| m.modified())
        .map_err(|e| {
            StapeldruckError::Update(format!("cannot stat {}: {e}", network_copy.display()))
        })?;

    if local_copy.exists() {
        let local_mtime = fs::metadata(local_copy)
            .and_then(|m| m.modified())
            .map_err(|e| {
                StapeldruckError::Update(format!("cannot stat {}: {e}", local_copy.display()))
            })?;

        if network_mtime <= local_mtime {
            info!(file = %local_copy.display(), "local copy is up to date");
            return Ok(UpdateAction::UpToDate);
        }
        info!(file = %local_copy.display(), "newer network copy found, updating");
    } else {
        info!(file = %local_copy.display(), "local copy missing, fetching from network");
    }

    if let Some(parent) = local_copy.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(network_copy, local_copy)?;
    Ok(UpdateAction::RestartRequired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::time::{Duration, SystemTime};

    fn write_with_mtime(path: &Path, contents: &str, mtime: SystemTime) {
        let mut f = File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        drop(f);
        f = File::options().write(true).open(path).unwrap();
        f.set_modified(mtime).unwrap();
    }

    #[test]
    fn missing_local_copy_is_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("net/module.cfg");
        let local = dir.path().join("cache/module.cfg");
        fs::create_dir_all(network.parent().unwrap()).unwrap();
        File::create(&network).unwrap().write_all(b"v2").unwrap();

        assert_eq!(
            check_and_update(&network, &local).unwrap(),
            UpdateAction::RestartRequired
        );
        assert_eq!(fs::read_to_string(&local).unwrap(), "v2");
    }

    #[test]
    fn newer_network_copy_replaces_local() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("module.net");
        let local = dir.path().join("module.local");
        let now = SystemTime::now();
        write_with_mtime(&local, "v1", now - Duration::from_secs(3600));
        write_with_mtime(&network, "v2", now);

        assert_eq!(
            check_and_update(&network, &local).unwrap(),
            UpdateAction::RestartRequired
        );
        assert_eq!(fs::read_to_string(&local).unwrap(), "v2");
    }

    #[test]
    fn current_local_copy_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let network = dir.path().join("module.net");
        let local = dir.path().join("module.local");
        let now = SystemTime::now();
        write_with_mtime(&network, "v1", now - Duration::from_secs(3600));
        write_with_mtime(&local, "v1-local", now);

        assert_eq!(
            check_and_update(&network, &local).unwrap(),
            UpdateAction::UpToDate
        );
        assert_eq!(fs::read_to_string(&local).unwrap(), "v1-local");
    }

    #[test]
    fn missing_network_copy_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_and_update(
            Path::new("/no/such/network/file"),
            &dir.path().join("local"),
        )
        .unwrap_err();
        assert!(matches!(err, StapeldruckError::Update(_)));
    }
}
