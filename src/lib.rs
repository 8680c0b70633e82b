//! # Vigil - Issue Taxonomy and Report Aggregation
//!
//! A validation/diagnostics core for long-running pipelines: independent
//! monitor components observe a running system and emit typed issue
//! reports; the runner collects, deduplicates, classifies them by
//! configurable verbosity, and summarizes everything into a deterministic
//! exit status.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use vigil::{Issue, Report, Runner, Session, Severity};
//!
//! let session = Session::default_session();
//! let issue = session
//!     .catalog()
//!     .register(Issue::new(
//!         "core::bad-state",
//!         "component entered a bad state",
//!         None,
//!         Severity::Warning,
//!     )?)?;
//!
//! let runner = Runner::new(Arc::clone(&session));
//! runner.add_report(Report::new(&session, issue, "src0", "state lost"));
//!
//! let _exit_code = runner.finalize(true);
//! # Ok::<(), vigil::issue::CatalogError>(())
//! ```

pub mod config;
pub mod issue;
pub mod output;
pub mod policy;
pub mod report;
pub mod runner;
pub mod session;

pub use config::ReportingConfig;
pub use issue::{Issue, IssueCatalog, IssueId, Severity};
pub use output::SummaryWriter;
pub use policy::{DetailLevel, ReportingPolicy};
pub use report::Report;
pub use runner::{Runner, CRITICAL_EXIT_CODE};
pub use session::{Session, SeverityFlags};

/// Result type alias for Vigil operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
