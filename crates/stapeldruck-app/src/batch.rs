// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sequential batch loop over document requests.
//
// One request in flight at a time. Operator cancellations never stop the
// batch; terminal failures follow the configured policy: FailFast stops at
// the failing request (reference behaviour), ContinueAndReport records it
// and keeps going.

use tracing::{error, info, warn};

use stapeldruck_core::types::{BatchReport, DocumentRequest, FailurePolicy, Outcome};
use stapeldruck_engine::fallback::{Backend, Engine};

use crate::notify::OperatorNotifier;

/// Process all requests and produce the batch report.
pub fn run_batch<B: Backend>(
    engine: &Engine<B>,
    requests: &[DocumentRequest],
    policy: FailurePolicy,
    notifier: &dyn OperatorNotifier,
) -> BatchReport {
    let mut report = BatchReport::begin();

    for request in requests {
        match engine.execute(request) {
            Ok(Outcome::Success) => {
                report.succeeded += 1;
            }
            Ok(Outcome::Cancelled) => {
                // Logged by the engine at warn; never alerted.
                report.cancelled += 1;
            }
            Ok(Outcome::Failed { code, detail }) => {
                // The engine propagates failures as errors; a Failed outcome
                // reaching here would mean the classifier leaked through.
                warn!(code, "unexpected failed outcome surfaced as Ok");
                record_failure(&mut report, request, &detail, notifier);
                if policy == FailurePolicy::FailFast {
                    break;
                }
            }
            Err(err) => {
                let detail = err.to_string();
                error!(request = %request.id(), label = %request.label(), "{detail}");
                record_failure(&mut report, request, &detail, notifier);
                if policy == FailurePolicy::FailFast {
                    break;
                }
            }
        }
    }

    report.finish();
    info!(
        succeeded = report.succeeded,
        cancelled = report.cancelled,
        failed = report.failures.len(),
        "batch finished"
    );
    report
}

fn record_failure(
    report: &mut BatchReport,
    request: &DocumentRequest,
    detail: &str,
    notifier: &dyn OperatorNotifier,
) {
    notifier.alert_error(
        "Error",
        &format!("Failed to process {}: {detail}", request.label()),
    );
    report.failures.push((request.label(), detail.to_owned()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use stapeldruck_core::error::{Result, StapeldruckError};
    use stapeldruck_engine::outcome::ProcessExit;

    /// Backend whose external exit code is scripted per call.
    struct SequencedBackend {
        codes: RefCell<Vec<i32>>,
    }

    impl SequencedBackend {
        fn new(codes: Vec<i32>) -> Self {
            Self {
                codes: RefCell::new(codes),
            }
        }
    }

    impl Backend for SequencedBackend {
        fn invoke_native(&self, _args: &[String]) -> Result<()> {
            Err(StapeldruckError::BindingUnavailable("absent".into()))
        }

        fn invoke_external(&self, _args: &[String]) -> Result<ProcessExit> {
            let code = self.codes.borrow_mut().remove(0);
            Ok(ProcessExit {
                code: Some(code),
                stderr: String::new(),
            })
        }
    }

    /// Notifier that records each alert.
    #[derive(Default)]
    struct RecordingNotifier {
        alerts: RefCell<Vec<String>>,
    }

    impl OperatorNotifier for RecordingNotifier {
        fn alert_error(&self, _title: &str, body: &str) {
            self.alerts.borrow_mut().push(body.to_owned());
        }
    }

    fn print_requests(n: usize) -> Vec<DocumentRequest> {
        (0..n)
            .map(|i| DocumentRequest::print(format!("/docs/{i}.pdf"), None))
            .collect()
    }

    #[test]
    fn cancellation_continues_and_never_alerts() {
        let engine = Engine::new(SequencedBackend::new(vec![0, 1, 0]));
        let notifier = RecordingNotifier::default();

        let report = run_batch(
            &engine,
            &print_requests(3),
            FailurePolicy::FailFast,
            &notifier,
        );

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.cancelled, 1);
        assert!(report.all_ok());
        assert!(notifier.alerts.borrow().is_empty());
    }

    #[test]
    fn fail_fast_stops_at_the_failing_request() {
        let engine = Engine::new(SequencedBackend::new(vec![0, 255, 0]));
        let notifier = RecordingNotifier::default();

        let report = run_batch(
            &engine,
            &print_requests(3),
            FailurePolicy::FailFast,
            &notifier,
        );

        // The third request is never attempted.
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(notifier.alerts.borrow().len(), 1);
    }

    #[test]
    fn continue_and_report_collects_all_failures() {
        let engine = Engine::new(SequencedBackend::new(vec![255, 0, 9]));
        let notifier = RecordingNotifier::default();

        let report = run_batch(
            &engine,
            &print_requests(3),
            FailurePolicy::ContinueAndReport,
            &notifier,
        );

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(notifier.alerts.borrow().len(), 2);
    }
}
