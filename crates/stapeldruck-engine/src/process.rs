// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External-process invocation of the Ghostscript executable.
//
// Output streams are captured, never echoed to the caller's console; the
// captured stderr becomes the diagnostic detail when the run fails. The
// child is reaped on every path, including timeout, so no orphan survives.

use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use stapeldruck_core::config::AppConfig;
use stapeldruck_core::error::{Result, StapeldruckError};

use crate::outcome::ProcessExit;

/// Poll interval for the bounded-wait loop.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Spawn the Ghostscript executable with the given argument list and wait
/// for it to finish.
///
/// With `process_timeout_secs` set, the wait is bounded: on expiry the child
/// is killed, reaped, and `ProcessTimeout` is returned. Otherwise the call
/// blocks until the backend exits — a hung backend hangs the caller.
pub fn invoke(config: &AppConfig, args: &[String]) -> Result<ProcessExit> {
    let program = config.executable();
    debug!(program, argc = args.len(), "spawning ghostscript");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| StapeldruckError::ProcessSpawn {
            program: program.to_owned(),
            detail: e.to_string(),
        })?;

    let output = match config.process_timeout_secs {
        None => child.wait_with_output()?,
        Some(secs) => {
            let deadline = Instant::now() + Duration::from_secs(secs);
            loop {
                if child.try_wait()?.is_some() {
                    break child.wait_with_output()?;
                }
                if Instant::now() >= deadline {
                    child.kill()?;
                    // Reap before surfacing the timeout.
                    let _ = child.wait_with_output()?;
                    return Err(StapeldruckError::ProcessTimeout(secs));
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    };

    Ok(ProcessExit {
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(program: &str) -> AppConfig {
        AppConfig {
            gs_executable: Some(program.to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_executable_is_spawn_error() {
        let config = config_with("stapeldruck-no-such-backend");
        let err = invoke(&config, &[]).unwrap_err();
        assert!(matches!(err, StapeldruckError::ProcessSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_and_stderr_are_captured() {
        // `sh -c` stands in for the backend: prints a diagnostic and exits 3.
        let config = config_with("sh");
        let exit = invoke(
            &config,
            &[
                "-c".to_owned(),
                "echo boom >&2; exit 3".to_owned(),
            ],
        )
        .unwrap();
        assert_eq!(exit.code, Some(3));
        assert_eq!(exit.stderr.trim(), "boom");
    }

    #[cfg(unix)]
    #[test]
    fn timeout_kills_and_reaps() {
        let config = AppConfig {
            gs_executable: Some("sh".to_owned()),
            process_timeout_secs: Some(1),
            ..Default::default()
        };
        let err = invoke(&config, &["-c".to_owned(), "sleep 30".to_owned()]).unwrap_err();
        assert!(matches!(err, StapeldruckError::ProcessTimeout(1)));
    }
}
