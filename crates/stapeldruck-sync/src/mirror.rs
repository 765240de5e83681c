// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Directory mirroring — copy a remote tree into a local cache, skipping
// files whose checksum already matches. Per-file failures are logged and
// skipped; a dead file never aborts the rest of the sync.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{info, warn};
use walkdir::WalkDir;

use stapeldruck_core::error::{Result, StapeldruckError};

use crate::checksum::file_sha256;

/// Exclusion rules for a mirror run, as glob patterns matched against paths
/// relative to the remote root (directories) or bare file names (files).
#[derive(Debug, Default)]
pub struct MirrorFilter {
    pub excluded_dirs: Vec<Pattern>,
    pub excluded_files: Vec<Pattern>,
}

impl MirrorFilter {
    /// Parse pattern strings, rejecting malformed globs up front.
    pub fn new(dirs: &[&str], files: &[&str]) -> Result<Self> {
        let parse = |patterns: &[&str]| -> Result<Vec<Pattern>> {
            patterns
                .iter()
                .map(|p| {
                    Pattern::new(p).map_err(|e| StapeldruckError::Sync(format!("bad pattern {p}: {e}")))
                })
                .collect()
        };
        Ok(Self {
            excluded_dirs: parse(dirs)?,
            excluded_files: parse(files)?,
        })
    }

    fn dir_excluded(&self, relative: &Path) -> bool {
        self.excluded_dirs.iter().any(|p| p.matches_path(relative))
    }

    fn file_excluded(&self, name: &str) -> bool {
        self.excluded_files.iter().any(|p| p.matches(name))
    }
}

/// Counters for one mirror run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MirrorStats {
    pub copied: u32,
    pub updated: u32,
    pub unchanged: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// Mirror `remote` into `local`, creating directories as needed.
///
/// An existing local file is replaced only when its SHA-256 differs from the
/// remote copy; unchanged files are left untouched.
pub fn sync_directories(remote: &Path, local: &Path, filter: &MirrorFilter) -> Result<MirrorStats> {
    if !remote.is_dir() {
        return Err(StapeldruckError::Sync(format!(
            "remote directory {} does not exist",
            remote.display()
        )));
    }

    let mut stats = MirrorStats::default();
    let mut walker = WalkDir::new(remote).into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "unreadable entry during sync, skipping");
                stats.failed += 1;
                continue;
            }
        };

        let relative = entry
            .path()
            .strip_prefix(remote)
            .map_err(|e| StapeldruckError::Sync(e.to_string()))?
            .to_path_buf();

        if entry.file_type().is_dir() {
            if !relative.as_os_str().is_empty() && filter.dir_excluded(&relative) {
                info!(dir = %relative.display(), "skipping excluded directory");
                walker.skip_current_dir();
                stats.skipped += 1;
                continue;
            }
            if let Err(e) = fs::create_dir_all(local.join(&relative)) {
                warn!(dir = %relative.display(), error = %e, "failed to create local directory");
                stats.failed += 1;
                walker.skip_current_dir();
            }
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if filter.file_excluded(&name) {
            info!(file = %relative.display(), "skipping excluded file");
            stats.skipped += 1;
            continue;
        }

        match sync_one(entry.path(), &local.join(&relative)) {
            Ok(action) => match action {
                FileAction::Copied => stats.copied += 1,
                FileAction::Updated => stats.updated += 1,
                FileAction::Unchanged => stats.unchanged += 1,
            },
            Err(e) => {
                warn!(file = %relative.display(), error = %e, "failed to sync file");
                stats.failed += 1;
            }
        }
    }

    info!(
        copied = stats.copied,
        updated = stats.updated,
        unchanged = stats.unchanged,
        skipped = stats.skipped,
        failed = stats.failed,
        "directory sync finished"
    );
    Ok(stats)
}

enum FileAction {
    Copied,
    Updated,
    Unchanged,
}

fn sync_one(remote_file: &Path, local_file: &PathBuf) -> Result<FileAction> {
    if local_file.exists() {
        if file_sha256(remote_file)? == file_sha256(local_file)? {
            return Ok(FileAction::Unchanged);
        }
        fs::copy(remote_file, local_file)?;
        info!(file = %local_file.display(), "updated stale local copy");
        Ok(FileAction::Updated)
    } else {
        fs::copy(remote_file, local_file)?;
        Ok(FileAction::Copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_file(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut f = File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn copies_new_and_skips_unchanged() {
        let remote = tempfile::tempdir().unwrap();
        let local = tempfile::tempdir().unwrap();
        write_file(&remote.path().join("a.txt"), "alpha");
        write_file(&remote.path().join("sub/b.txt"), "beta");

        let filter = MirrorFilter::default();
        let first = sync_directories(remote.path(), local.path(), &filter).unwrap();
        assert_eq!(first.copied, 2);
        assert_eq!(first.unchanged, 0);

        let second = sync_directories(remote.path(), local.path(), &filter).unwrap();
        assert_eq!(second.copied, 0);
        assert_eq!(second.unchanged, 2);
    }

    #[test]
    fn updates_stale_copy() {
        let remote = tempfile::tempdir().unwrap();
        let local = tempfile::tempdir().unwrap();
        write_file(&remote.path().join("a.txt"), "new contents");
        write_file(&local.path().join("a.txt"), "old contents");

        let stats =
            sync_directories(remote.path(), local.path(), &MirrorFilter::default()).unwrap();
        assert_eq!(stats.updated, 1);
        assert_eq!(
            fs::read_to_string(local.path().join("a.txt")).unwrap(),
            "new contents"
        );
    }

    #[test]
    fn exclusion_patterns_are_honoured() {
        let remote = tempfile::tempdir().unwrap();
        let local = tempfile::tempdir().unwrap();
        write_file(&remote.path().join("keep.txt"), "keep");
        write_file(&remote.path().join("notes.tmp"), "drop");
        write_file(&remote.path().join("cache/c.txt"), "drop");

        let filter = MirrorFilter::new(&["cache*"], &["*.tmp"]).unwrap();
        let stats = sync_directories(remote.path(), local.path(), &filter).unwrap();

        assert_eq!(stats.copied, 1);
        assert!(local.path().join("keep.txt").exists());
        assert!(!local.path().join("notes.tmp").exists());
        assert!(!local.path().join("cache").join("c.txt").exists());
    }

    #[test]
    fn missing_remote_is_an_error() {
        let local = tempfile::tempdir().unwrap();
        assert!(
            sync_directories(Path::new("/no/such/dir"), local.path(), &MirrorFilter::default())
                .is_err()
        );
    }
}
