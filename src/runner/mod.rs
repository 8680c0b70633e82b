//! Report aggregation core
//!
//! The runner is where all issue reporting converges: it resolves each
//! report's detail level against the reporting policy, then drops,
//! synthesizes or fully stores the report. At session end it summarizes
//! everything and yields the process exit status.
//!
//! Multiple monitor threads may call `add_report` concurrently. The stored
//! list and the bucket map are each guarded by one runner-wide mutex held
//! only for list/map mutation, never across hook invocation or output.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::issue::{IssueId, Severity};
use crate::policy::{DetailLevel, ReportingPolicy};
use crate::report::Report;
use crate::session::Session;


/// Exit code returned by `finalize` when critical reports were collected
pub const CRITICAL_EXIT_CODE: i32 = 18;

/// Hook invoked synchronously on the `add_report` call path whenever a
/// report is fully stored
pub type ReportAddedHook = Arc<dyn Fn(&Arc<Report>) + Send + Sync>;

/// Hook invoked at the start of finalization, before summarization
pub type StoppingHook = Arc<dyn Fn() + Send + Sync>;

/// Thread-safe aggregation of validation reports for one session
pub struct Runner {
    session: Arc<Session>,
    reports: Mutex<Vec<Arc<Report>>>,
    by_issue: Mutex<BTreeMap<IssueId, Vec<Arc<Report>>>>,
    policy: Mutex<ReportingPolicy>,
    report_added: Mutex<Vec<ReportAddedHook>>,
    stopping: Mutex<Vec<StoppingHook>>,
}

impl Runner {
    /// Create a runner bound to a session
    ///
    /// The session's reporting-detail configuration string, if any, is
    /// applied to the runner's policy.
    pub fn new(session: Arc<Session>) -> Runner {
        let mut policy = ReportingPolicy::new();
        if let Some(details) = session.reporting_details() {
            policy.parse_config(details);
        }

        Runner {
            session,
            reports: Mutex::new(Vec::new()),
            by_issue: Mutex::new(BTreeMap::new()),
            policy: Mutex::new(policy),
            report_added: Mutex::new(Vec::new()),
            stopping: Mutex::new(Vec::new()),
        }
    }

    /// Create a runner bound to the process-wide default session
    pub fn with_default_session() -> Runner {
        Runner::new(Session::default_session())
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Add a glob rule to the runner's reporting policy
    pub fn add_reporting_rule(&self, pattern: &str, level: DetailLevel) -> crate::Result<()> {
        self.policy.lock().unwrap().add_rule(pattern, level)
    }

    /// Set the global default detail level
    pub fn set_default_reporting_level(&self, level: DetailLevel) {
        self.policy.lock().unwrap().set_default(level);
    }

    pub fn default_reporting_level(&self) -> DetailLevel {
        self.policy.lock().unwrap().default_level()
    }

    /// Resolve the detail level the policy applies to a reporter name
    pub fn reporting_level_for_name(&self, name: &str) -> DetailLevel {
        self.policy.lock().unwrap().resolve(name)
    }

    /// Register a hook fired whenever a report is fully stored
    pub fn on_report_added(&self, hook: impl Fn(&Arc<Report>) + Send + Sync + 'static) {
        self.report_added.lock().unwrap().push(Arc::new(hook));
    }

    /// Register a hook fired at the start of finalization
    pub fn on_stopping(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.stopping.lock().unwrap().push(Arc::new(hook));
    }

    /// Whether the session flags mark this report's severity as fatal
    pub fn check_abort(&self, report: &Report) -> bool {
        self.session.flags().is_fatal(report.severity())
    }

    /// Whether this report should be printed at finalization
    pub fn should_print(&self, report: &Report) -> bool {
        self.session.flags().should_print(report.severity())
    }

    /// Submit a report
    ///
    /// Resolves the report's detail level if still unknown, then routes it:
    /// dropped (`None`), synthesized into the per-issue bucket
    /// (`Synthetic`, and `Smart` unless the report is critical or
    /// abort-worthy), or fully stored (everything else).
    pub fn add_report(&self, report: Arc<Report>) {
        if report.detail() == DetailLevel::Unknown {
            let resolved = {
                let policy = self.policy.lock().unwrap();
                match policy.resolve(report.reporter()) {
                    DetailLevel::Unknown => policy.default_level(),
                    level => level,
                }
            };
            report.set_detail(resolved);
            debug!(
                reporter = report.reporter(),
                issue = %report.issue().id(),
                level = %resolved,
                "resolved reporting level"
            );
        }

        match report.detail() {
            DetailLevel::None => {}
            DetailLevel::Synthetic => self.synthesize_report(report),
            DetailLevel::Smart => {
                if report.severity() == Severity::Critical || self.check_abort(&report) {
                    self.store_report(report);
                } else {
                    self.synthesize_report(report);
                }
            }
            _ => self.store_report(report),
        }
    }

    /// Append to the fully-stored list, then fire the report-added hooks
    /// outside the lock
    fn store_report(&self, report: Arc<Report>) {
        self.reports.lock().unwrap().push(Arc::clone(&report));

        let hooks: Vec<ReportAddedHook> = self.report_added.lock().unwrap().clone();
        for hook in hooks {
            hook(&report);
        }
    }

    /// Append to the synthesis bucket for the report's issue id
    ///
    /// The bucket is created on first use; its first member becomes the
    /// representative used for printing.
    fn synthesize_report(&self, report: Arc<Report>) {
        let mut buckets = self.by_issue.lock().unwrap();
        buckets
            .entry(report.issue().id().clone())
            .or_default()
            .push(report);
    }

    /// Number of reports in the runner
    ///
    /// Fully-stored reports count one each plus their repeated
    /// occurrences; each non-empty synthesis bucket counts once — it
    /// summarizes a kind, not an occurrence count.
    pub fn reports_count(&self) -> usize {
        let mut count = {
            let reports = self.reports.lock().unwrap();
            reports.len()
                + reports
                    .iter()
                    .map(|report| report.repeated_count())
                    .sum::<usize>()
        };
        count += self
            .by_issue
            .lock()
            .unwrap()
            .values()
            .filter(|bucket| !bucket.is_empty())
            .count();
        count
    }

    /// Snapshot of the fully-stored reports, in submission order
    ///
    /// The returned list holds additional shared references and is
    /// independent of internal mutation after the call returns.
    pub fn reports(&self) -> Vec<Arc<Report>> {
        self.reports.lock().unwrap().clone()
    }

    /// Finish the session: fire stopping hooks, optionally print the
    /// summary, and compute the exit status
    ///
    /// Returns `18` if critical reports were collected, `0` otherwise.
    pub fn finalize(&self, print: bool) -> i32 {
        let hooks: Vec<StoppingHook> = self.stopping.lock().unwrap().clone();
        for hook in hooks {
            hook();
        }

        if print {
            return self.print_summary();
        }

        let has_criticals = self
            .reports
            .lock()
            .unwrap()
            .iter()
            .any(|report| report.severity() == Severity::Critical);
        if has_criticals {
            CRITICAL_EXIT_CODE
        } else {
            0
        }
    }

    /// Print the synthesized kinds, then every printable stored report,
    /// then the criticals recap; returns the exit status
    fn print_summary(&self) -> i32 {
        let writer = self.session.writer();
        let mut criticals: Vec<Arc<Report>> = Vec::new();

        // Snapshots only: no runner lock is held while writing
        let buckets: Vec<(IssueId, Vec<Arc<Report>>)> = self
            .by_issue
            .lock()
            .unwrap()
            .iter()
            .map(|(id, bucket)| (id.clone(), bucket.clone()))
            .collect();

        for (_, members) in &buckets {
            let Some(representative) = members.first() else {
                continue;
            };

            writer.writeln(&format!(
                "{:>10} : {}",
                representative.severity(),
                representative.issue().summary()
            ));

            let mut names: Vec<String> = Vec::new();
            for member in members {
                for name in member.reporter_names() {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
                if member.severity() == Severity::Critical {
                    criticals.push(Arc::clone(member));
                }
            }
            writer.writeln(&format!("{:12} Detected on <{}>", "", names.join(", ")));

            if let Some(description) = representative.issue().description() {
                writer.writeln(&format!("{:12} Description : {}", "", description));
            }
            writer.writeln("");
        }

        for report in self.reports() {
            if report.severity() == Severity::Critical {
                criticals.push(Arc::clone(&report));
            }
            if !self.should_print(&report) {
                continue;
            }

            writer.writeln(&format!(
                "{:>10} : {}",
                report.severity(),
                report.issue().summary()
            ));
            writer.writeln(&format!(
                "{:12} Detected on <{}>",
                "",
                report.reporter_names().join(", ")
            ));
            writer.writeln(&format!("{:12} Details : {}", "", report.message()));
            for repeated in report.repeated() {
                writer.writeln(&format!("{:12} Details : {}", "", repeated.message()));
            }
            if let Some(description) = report.issue().description() {
                writer.writeln(&format!("{:12} Description : {}", "", description));
            }
            writer.writeln("");
        }

        if !criticals.is_empty() {
            eprintln!("\n\n==== Got criticals, Return value set to {} ====", CRITICAL_EXIT_CODE);
            for critical in &criticals {
                eprintln!("     Critical error {}", critical.message());
            }
            eprintln!();
        }

        writer.writeln(&format!("Issues found: {}", self.reports_count()));

        if criticals.is_empty() {
            0
        } else {
            CRITICAL_EXIT_CODE
        }
    }
}
