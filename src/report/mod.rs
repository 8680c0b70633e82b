//! Report entity and lifecycle
//!
//! A `Report` is one concrete occurrence of an issue, produced by a named
//! reporter. Reports are shared (`Arc`) between the runner stores,
//! synthesis buckets and caller snapshots; the shadow set has its own
//! per-report lock so concurrent shadow attachment against different
//! masters never contends on a runner-wide lock.

use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::time::Duration;

use crate::issue::{Issue, Severity};
use crate::policy::DetailLevel;
use crate::session::Session;


/// One occurrence of an issue
#[derive(Debug)]
pub struct Report {
    issue: Arc<Issue>,
    reporter: String,
    message: String,
    severity: Severity,
    timestamp: Duration,
    detail: OnceLock<DetailLevel>,
    repeated: Mutex<Vec<Arc<Report>>>,
    master: Mutex<Option<Weak<Report>>>,
    shadow: Mutex<Vec<Arc<Report>>>,
}

impl Report {
    /// Create a report against a catalog issue
    ///
    /// The severity is copied from the issue's default and is immutable
    /// thereafter; the timestamp is relative to the session start.
    pub fn new(
        session: &Session,
        issue: Arc<Issue>,
        reporter: impl Into<String>,
        message: impl Into<String>,
    ) -> Arc<Report> {
        let severity = issue.default_severity();
        Arc::new(Report {
            issue,
            reporter: reporter.into(),
            message: message.into(),
            severity,
            timestamp: session.elapsed(),
            detail: OnceLock::new(),
            repeated: Mutex::new(Vec::new()),
            master: Mutex::new(None),
            shadow: Mutex::new(Vec::new()),
        })
    }

    pub fn issue(&self) -> &Arc<Issue> {
        &self.issue
    }

    pub fn reporter(&self) -> &str {
        &self.reporter
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }

    /// Current reporting detail level; `Unknown` until resolved
    pub fn detail(&self) -> DetailLevel {
        self.detail.get().copied().unwrap_or(DetailLevel::Unknown)
    }

    /// One-time `Unknown -> concrete` transition, terminal thereafter
    ///
    /// Returns false if the level was already resolved.
    pub fn set_detail(&self, level: DetailLevel) -> bool {
        self.detail.set(level).is_ok()
    }

    /// Append a later occurrence from the same reporter for the same issue
    ///
    /// Always appends; repeated occurrences are never deduplicated.
    pub fn add_repeated(&self, repeated: Arc<Report>) {
        self.repeated.lock().unwrap().push(repeated);
    }

    /// Snapshot of the repeated occurrences, in append order
    pub fn repeated(&self) -> Vec<Arc<Report>> {
        self.repeated.lock().unwrap().clone()
    }

    pub fn repeated_count(&self) -> usize {
        self.repeated.lock().unwrap().len()
    }

    /// Attach this report as a shadow of `master`
    ///
    /// Fails when the master's detail level has escalated to `Monitor` or
    /// above, meaning the master no longer accepts synthesis; the caller
    /// may fall back to full storage. At most one shadow is kept per
    /// distinct reporter; re-attaching the same reporter is a no-op.
    pub fn set_master(self: &Arc<Report>, master: &Arc<Report>) -> bool {
        if master.detail() >= DetailLevel::Monitor {
            return false;
        }

        *self.master.lock().unwrap() = Some(Arc::downgrade(master));

        let mut shadows = master.shadow.lock().unwrap();
        if !shadows.iter().any(|shadow| shadow.reporter == self.reporter) {
            shadows.push(Arc::clone(self));
        }
        true
    }

    /// The master this report shadows, if it is still alive
    pub fn master(&self) -> Option<Arc<Report>> {
        self.master
            .lock()
            .unwrap()
            .as_ref()
            .and_then(Weak::upgrade)
    }

    /// Snapshot of the shadow reports attached to this report
    pub fn shadows(&self) -> Vec<Arc<Report>> {
        self.shadow.lock().unwrap().clone()
    }

    /// This report's reporter followed by its shadow reporters
    pub fn reporter_names(&self) -> Vec<String> {
        let mut names = vec![self.reporter.clone()];
        for shadow in self.shadow.lock().unwrap().iter() {
            if !names.iter().any(|name| name == &shadow.reporter) {
                names.push(shadow.reporter.clone());
            }
        }
        names
    }
}
