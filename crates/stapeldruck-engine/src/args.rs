// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ghostscript argument construction.
//
// Both invocation strategies consume the exact same list; the native binding
// prepends its own argv[0]. The grammar here is a compatibility contract with
// the Ghostscript CLI and must not drift:
//
//   print: -dNOPAUSE -dBATCH -dSAFER -sDEVICE=mswinpr2
//          -sOutputFile=%printer%[<name>] <path>
//   merge: -dBATCH -dNOPAUSE -q -sDEVICE=pdfwrite
//          -sOutputFile=<output> <input1> ... <inputN>

use std::path::Path;

use stapeldruck_core::error::{Result, StapeldruckError};
use stapeldruck_core::types::DocumentRequest;

/// Build the backend argument list for a request.
///
/// Document paths are always the final argument(s). Merge input order is
/// preserved verbatim — it determines page order in the output.
pub fn build_args(request: &DocumentRequest) -> Result<Vec<String>> {
    match request {
        DocumentRequest::Print { path, printer, .. } => Ok(print_args(path, printer.as_deref())),
        DocumentRequest::Merge { inputs, output, .. } => {
            if inputs.is_empty() {
                return Err(StapeldruckError::EmptyMergeSet);
            }
            Ok(merge_args(inputs, output))
        }
    }
}

fn print_args(path: &Path, printer: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "-dNOPAUSE".to_owned(),
        "-dBATCH".to_owned(),
        "-dSAFER".to_owned(),
        "-sDEVICE=mswinpr2".to_owned(),
    ];

    // No printer name routes to the default sink (OS printer dialog).
    match printer {
        Some(name) => args.push(format!("-sOutputFile=%printer%{name}")),
        None => args.push("-sOutputFile=%printer%".to_owned()),
    }

    args.push(path.display().to_string());
    args
}

fn merge_args(inputs: &[std::path::PathBuf], output: &Path) -> Vec<String> {
    let mut args = vec![
        "-dBATCH".to_owned(),
        "-dNOPAUSE".to_owned(),
        "-q".to_owned(),
        "-sDEVICE=pdfwrite".to_owned(),
        format!("-sOutputFile={}", output.display()),
    ];
    args.extend(inputs.iter().map(|p| p.display().to_string()));
    args
}
