// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process Ghostscript binding via the gsapi C interface.
//
// The shared library is loaded at call time with `libloading`; the OS caches
// dlopen/LoadLibrary, so repeat loads are near-free. Load failures mean the
// capability is absent from the environment (`BindingUnavailable`) and the
// coordinator falls back to the external executable. A loaded library whose
// call errors is `BindingExecution` — present but broken for this request.
//
// gsapi lifecycle: new_instance → set_arg_encoding(UTF8) → init_with_args →
// exit → delete_instance. The instance is deleted on every path.

use std::ffi::{CString, c_char, c_int, c_void};
use std::ptr;

use libloading::Library;
use tracing::{debug, info};

use stapeldruck_core::error::{Result, StapeldruckError};

/// argv[0] placeholder; gsapi ignores it but requires it to be present.
const GS_ARGV0: &str = "gs";

/// gsapi return code for a clean `quit` — treated as success.
const E_QUIT: c_int = -101;

/// gsapi argument-encoding selector for UTF-8.
const GS_ARG_ENCODING_UTF8: c_int = 1;

/// Environment override for the shared-library path.
pub const GS_LIBRARY_ENV: &str = "STAPELDRUCK_GS_LIB";

type NewInstanceFn = unsafe extern "C" fn(*mut *mut c_void, *mut c_void) -> c_int;
type SetArgEncodingFn = unsafe extern "C" fn(*mut c_void, c_int) -> c_int;
type InitWithArgsFn = unsafe extern "C" fn(*mut c_void, c_int, *mut *mut c_char) -> c_int;
type ExitFn = unsafe extern "C" fn(*mut c_void) -> c_int;
type DeleteInstanceFn = unsafe extern "C" fn(*mut c_void);

/// Platform candidate names for the Ghostscript shared library.
fn candidate_names() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &["gsdll64.dll", "gsdll32.dll"]
    } else if cfg!(target_os = "macos") {
        &["libgs.dylib", "libgs.9.dylib"]
    } else {
        &["libgs.so", "libgs.so.9", "libgs.so.10"]
    }
}

/// A loaded Ghostscript shared library.
pub struct NativeGhostscript {
    lib: Library,
}

impl NativeGhostscript {
    /// Load the Ghostscript shared library.
    ///
    /// Search order: explicit `override_path` from config, then the
    /// `STAPELDRUCK_GS_LIB` env var, then the platform candidate names on
    /// the system library search path.
    pub fn load(override_path: Option<&str>) -> Result<Self> {
        let env_path = std::env::var(GS_LIBRARY_ENV).ok();
        let explicit = override_path.or(env_path.as_deref());

        if let Some(path) = explicit {
            debug!(path, "loading ghostscript library from explicit path");
            let lib = unsafe { Library::new(path) }.map_err(|e| {
                StapeldruckError::BindingUnavailable(format!("{path}: {e}"))
            })?;
            return Ok(Self { lib });
        }

        let mut last_error = String::new();
        for name in candidate_names() {
            match unsafe { Library::new(name) } {
                Ok(lib) => {
                    debug!(name, "loaded ghostscript library");
                    return Ok(Self { lib });
                }
                Err(e) => last_error = format!("{name}: {e}"),
            }
        }

        Err(StapeldruckError::BindingUnavailable(last_error))
    }

    /// Run one Ghostscript invocation in-process.
    ///
    /// `args` is the shared argument list from `args::build_args`; the gsapi
    /// argv[0] placeholder is prepended here.
    pub fn run(&self, args: &[String]) -> Result<()> {
        // A missing symbol means this is not a usable gsapi library at all.
        let unavailable =
            |e: libloading::Error| StapeldruckError::BindingUnavailable(e.to_string());

        let (new_instance, set_arg_encoding, init_with_args, gs_exit, delete_instance) = unsafe {
            (
                *self
                    .lib
                    .get::<NewInstanceFn>(b"gsapi_new_instance\0")
                    .map_err(unavailable)?,
                *self
                    .lib
                    .get::<SetArgEncodingFn>(b"gsapi_set_arg_encoding\0")
                    .map_err(unavailable)?,
                *self
                    .lib
                    .get::<InitWithArgsFn>(b"gsapi_init_with_args\0")
                    .map_err(unavailable)?,
                *self.lib.get::<ExitFn>(b"gsapi_exit\0").map_err(unavailable)?,
                *self
                    .lib
                    .get::<DeleteInstanceFn>(b"gsapi_delete_instance\0")
                    .map_err(unavailable)?,
            )
        };

        let mut cstrings = Vec::with_capacity(args.len() + 1);
        cstrings.push(
            CString::new(GS_ARGV0)
                .map_err(|e| StapeldruckError::BindingExecution(e.to_string()))?,
        );
        for arg in args {
            cstrings.push(
                CString::new(arg.as_str())
                    .map_err(|e| StapeldruckError::BindingExecution(e.to_string()))?,
            );
        }
        let mut argv: Vec<*mut c_char> = cstrings
            .iter()
            .map(|s| s.as_ptr() as *mut c_char)
            .collect();

        let mut instance: *mut c_void = ptr::null_mut();
        let code = unsafe { new_instance(&mut instance, ptr::null_mut()) };
        if code < 0 || instance.is_null() {
            return Err(StapeldruckError::BindingExecution(format!(
                "gsapi_new_instance returned {code}"
            )));
        }

        // From here the instance must be deleted on every path.
        let result = unsafe {
            let enc = set_arg_encoding(instance, GS_ARG_ENCODING_UTF8);
            if enc < 0 {
                Err(StapeldruckError::BindingExecution(format!(
                    "gsapi_set_arg_encoding returned {enc}"
                )))
            } else {
                let init = init_with_args(instance, argv.len() as c_int, argv.as_mut_ptr());
                // exit must run even when init failed, before the instance dies.
                gs_exit(instance);
                match init {
                    0 | E_QUIT => Ok(()),
                    code => Err(StapeldruckError::BindingExecution(format!(
                        "gsapi_init_with_args returned {code}"
                    ))),
                }
            }
        };
        unsafe { delete_instance(instance) };

        if result.is_ok() {
            info!("ghostscript library call completed");
        }
        result
    }
}
