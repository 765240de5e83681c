// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stapeldruck — batch PDF print/merge over Ghostscript.
//
// Entry point. Parses flags, scans the source directory for PDFs, and hands
// each request to the dual-path execution engine. When both printing and
// merging options are provided, merging takes priority.

mod batch;
mod logging;
mod notify;
mod scan;

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use stapeldruck_core::config::AppConfig;
use stapeldruck_core::types::{DocumentRequest, FailurePolicy};
use stapeldruck_engine::Engine;

use notify::{DialogNotifier, LogNotifier, OperatorNotifier};

#[derive(Parser)]
#[command(
    name = "stapeldruck",
    about = "A utility for printing or merging PDF files using Ghostscript",
    version,
    after_help = "If both printing and merging options are provided, merging takes priority."
)]
struct Cli {
    /// Directory containing the PDF files to process.
    #[arg(short, long, value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Printer to send PDF files to; omitted routes to the system default.
    #[arg(short, long, value_name = "PRINTER")]
    printer: Option<String>,

    /// Merge all PDFs into this output file instead of printing.
    #[arg(short, long, value_name = "OUTPUT")]
    merge: Option<PathBuf>,

    /// Keep processing after a failed request and report at the end.
    #[arg(long)]
    continue_on_error: bool,

    /// Bounded wait for the Ghostscript process, in seconds.
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Suppress the error dialog; log only.
    #[arg(long)]
    no_alerts: bool,

    /// Mirror this remote directory into --directory before processing.
    #[arg(long, value_name = "REMOTE_DIR")]
    sync_from: Option<PathBuf>,

    /// Check this network file for a newer copy of the local one with the
    /// same name; exits with a restart prompt when an update was applied.
    #[arg(long, value_name = "NETWORK_FILE")]
    update_from: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_file = logging::init();

    if !cli.directory.is_dir() {
        bail!("'{}' is not a valid directory", cli.directory.display());
    }

    let dialog = DialogNotifier;
    let log_only = LogNotifier;
    let notifier: &dyn OperatorNotifier = if cli.no_alerts { &log_only } else { &dialog };

    if let Some(network_file) = &cli.update_from {
        let name = network_file
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("--update-from must name a file"))?;
        let local = std::env::current_dir()?.join(name);
        if stapeldruck_sync::check_and_update(network_file, &local)?
            == stapeldruck_sync::UpdateAction::RestartRequired
        {
            notifier.alert_error(
                "Restart Required",
                "A module was updated, please restart the program",
            );
            return Ok(());
        }
    }

    if let Some(remote) = &cli.sync_from {
        // Never pull log artefacts over the documents.
        let filter = stapeldruck_sync::MirrorFilter::new(&["log"], &["*.log"])?;
        stapeldruck_sync::sync_directories(remote, &cli.directory, &filter)?;
    }

    let pdfs = scan::find_pdfs(&cli.directory)?;
    if pdfs.is_empty() {
        println!("No PDF files found in the specified directory.");
        return Ok(());
    }
    tracing::info!(count = pdfs.len(), dir = %cli.directory.display(), "found PDF files");

    let requests: Vec<DocumentRequest> = match &cli.merge {
        Some(output) => vec![DocumentRequest::merge(pdfs, output.clone())],
        None => pdfs
            .into_iter()
            .map(|path| DocumentRequest::print(path, cli.printer.clone()))
            .collect(),
    };

    let policy = if cli.continue_on_error {
        FailurePolicy::ContinueAndReport
    } else {
        FailurePolicy::FailFast
    };
    let config = AppConfig {
        failure_policy: policy,
        process_timeout_secs: cli.timeout,
        ..Default::default()
    };

    let engine = Engine::with_config(config);
    let report = batch::run_batch(&engine, &requests, policy, notifier);

    println!(
        "Done: {} succeeded, {} cancelled, {} failed.",
        report.succeeded,
        report.cancelled,
        report.failures.len()
    );
    if !report.all_ok() {
        for (label, detail) in &report.failures {
            eprintln!("  {label}: {detail}");
        }
        bail!("{} request(s) failed", report.failures.len());
    }
    Ok(())
}
