//! Validation session context
//!
//! A `Session` carries the process-scope state the reporting subsystem
//! needs: the start instant report timestamps are relative to, the
//! severity-action flags, the issue catalog and the summary output sinks.
//! It replaces an implicit global with an explicit context object; a
//! lazily-initialized default instance keeps the zero-setup ergonomics.

use std::sync::Arc;
use std::time::{Duration, Instant};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::config::ReportingConfig;
use crate::issue::{builtin, IssueCatalog, Severity};
use crate::output::SummaryWriter;


/// Process-scope severity-action switches
///
/// The fatal flags decide which severities make `check_abort` true; the
/// print flags decide which fully-stored reports are printed at
/// finalization. With no print flag set at all, everything prints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityFlags {
    #[serde(default)]
    pub fatal_criticals: bool,
    #[serde(default)]
    pub fatal_warnings: bool,
    #[serde(default)]
    pub fatal_issues: bool,
    #[serde(default)]
    pub print_criticals: bool,
    #[serde(default)]
    pub print_warnings: bool,
    #[serde(default)]
    pub print_issues: bool,
}

impl SeverityFlags {
    /// Parse a comma-separated flag list; unknown tokens are ignored
    pub fn parse(text: &str) -> SeverityFlags {
        let mut flags = SeverityFlags::default();
        for token in text.split(',') {
            match token.trim() {
                "fatal_criticals" => flags.fatal_criticals = true,
                "fatal_warnings" => flags.fatal_warnings = true,
                "fatal_issues" => flags.fatal_issues = true,
                "print_criticals" => flags.print_criticals = true,
                "print_warnings" => flags.print_warnings = true,
                "print_issues" => flags.print_issues = true,
                _ => {}
            }
        }
        flags
    }

    /// Whether a report of this severity must terminate the run
    ///
    /// A fatal flag covers its own severity and everything more severe, so
    /// `fatal_issues` also makes warnings and criticals fatal. `Ignore` is
    /// never fatal.
    pub fn is_fatal(&self, severity: Severity) -> bool {
        (self.fatal_issues && severity.is_at_least(Severity::Issue))
            || (self.fatal_warnings && severity.is_at_least(Severity::Warning))
            || (self.fatal_criticals && severity.is_at_least(Severity::Critical))
    }

    fn has_print_flags(&self) -> bool {
        self.print_criticals || self.print_warnings || self.print_issues
    }

    /// Whether a report of this severity is printed at finalization
    pub fn should_print(&self, severity: Severity) -> bool {
        if severity == Severity::Ignore {
            return false;
        }
        if !self.has_print_flags() {
            return true;
        }
        (self.print_issues && severity.is_at_least(Severity::Issue))
            || (self.print_warnings && severity.is_at_least(Severity::Warning))
            || (self.print_criticals && severity.is_at_least(Severity::Critical))
    }
}

/// Process-scope context for one validation session
#[derive(Debug)]
pub struct Session {
    start: Instant,
    flags: SeverityFlags,
    reporting_details: Option<String>,
    catalog: IssueCatalog,
    writer: SummaryWriter,
}

lazy_static! {
    static ref DEFAULT_SESSION: Arc<Session> = Session::new(&ReportingConfig::from_env());
}

impl Session {
    /// Create a session from configuration, registering the built-in
    /// issues
    pub fn new(config: &ReportingConfig) -> Arc<Session> {
        let catalog = IssueCatalog::new();
        builtin::register_all(&catalog);

        Arc::new(Session {
            start: Instant::now(),
            flags: config.flags,
            reporting_details: config.reporting_details.clone(),
            catalog,
            writer: SummaryWriter::from_targets(&config.outputs),
        })
    }

    /// The process-wide default session, initialized once from the
    /// environment
    pub fn default_session() -> Arc<Session> {
        Arc::clone(&DEFAULT_SESSION)
    }

    /// Time elapsed since the session started; report timestamps are
    /// relative to this origin
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn flags(&self) -> &SeverityFlags {
        &self.flags
    }

    /// Reporting-detail configuration string applied to new runners
    pub fn reporting_details(&self) -> Option<&str> {
        self.reporting_details.as_deref()
    }

    pub fn catalog(&self) -> &IssueCatalog {
        &self.catalog
    }

    pub fn writer(&self) -> &SummaryWriter {
        &self.writer
    }
}
