//! Issue taxonomy for validation reporting
//!
//! This module defines the registered defect kinds (issues), their severity
//! ordering, and the catalog that maps issue identifiers to metadata.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod builtin;

#[cfg(test)]
mod tests;

/// Errors raised by the issue catalog at bootstrap time
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The id was already registered; re-registration is a logic defect
    #[error("issue id `{0}` is already registered")]
    DuplicateIssueId(IssueId),

    /// The id string did not have exactly two non-empty `::` segments
    #[error("malformed issue id `{0}`: expected `<area>::<name>`")]
    MalformedIssueId(String),
}

/// Inherent seriousness of an issue, most severe first
///
/// Comparisons are "at-least-as-severe-as" ordinal comparisons: a lower
/// discriminant means a more severe level. `Ignore` is a sentinel that
/// never triggers printing or fatality.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Issue,
    Ignore,
}

impl Severity {
    /// Whether this level is at least as severe as `other`
    pub fn is_at_least(self, other: Severity) -> bool {
        self <= other
    }

    /// Parse a lowercase severity name
    pub fn from_name(name: &str) -> Option<Severity> {
        match name {
            "critical" => Some(Severity::Critical),
            "warning" => Some(Severity::Warning),
            "issue" => Some(Severity::Issue),
            "ignore" => Some(Severity::Ignore),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f.pad so summary lines can right-align the level name
        match self {
            Severity::Critical => f.pad("critical"),
            Severity::Warning => f.pad("warning"),
            Severity::Issue => f.pad("issue"),
            Severity::Ignore => f.pad("ignore"),
        }
    }
}

/// Validated issue identifier of the form `<area>::<name>`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueId {
    area: String,
    name: String,
}

impl IssueId {
    /// Parse an identifier, enforcing exactly two non-empty `::` segments
    pub fn parse(id: &str) -> Result<IssueId, CatalogError> {
        let segments: Vec<&str> = id.split("::").collect();
        match segments.as_slice() {
            [area, name] if !area.is_empty() && !name.is_empty() => Ok(IssueId {
                area: area.to_string(),
                name: name.to_string(),
            }),
            _ => Err(CatalogError::MalformedIssueId(id.to_string())),
        }
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.area, self.name)
    }
}

/// A registered defect kind
#[derive(Debug, Clone)]
pub struct Issue {
    id: IssueId,
    summary: String,
    description: Option<String>,
    default_severity: Severity,
}

impl Issue {
    /// Create an issue from a raw id string, validating the id format
    pub fn new(
        id: &str,
        summary: &str,
        description: Option<&str>,
        default_severity: Severity,
    ) -> Result<Issue, CatalogError> {
        Ok(Issue {
            id: IssueId::parse(id)?,
            summary: summary.to_string(),
            description: description.map(str::to_string),
            default_severity,
        })
    }

    pub fn id(&self) -> &IssueId {
        &self.id
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_severity(&self) -> Severity {
        self.default_severity
    }
}

/// Thread-safe registry mapping issue ids to their metadata
///
/// Issues are registered once at session bootstrap and live for the
/// process; `lookup` is stable across calls within a session.
#[derive(Debug, Default)]
pub struct IssueCatalog {
    issues: Mutex<BTreeMap<IssueId, Arc<Issue>>>,
}

impl IssueCatalog {
    pub fn new() -> IssueCatalog {
        IssueCatalog::default()
    }

    /// Register an issue, returning the shared handle on success
    pub fn register(&self, issue: Issue) -> Result<Arc<Issue>, CatalogError> {
        let mut issues = self.issues.lock().unwrap();
        if issues.contains_key(issue.id()) {
            return Err(CatalogError::DuplicateIssueId(issue.id().clone()));
        }
        let issue = Arc::new(issue);
        issues.insert(issue.id().clone(), Arc::clone(&issue));
        Ok(issue)
    }

    /// Look up an issue by id; never mutates the catalog
    pub fn lookup(&self, id: &IssueId) -> Option<Arc<Issue>> {
        self.issues.lock().unwrap().get(id).cloned()
    }

    /// Look up an issue by raw id string
    pub fn lookup_str(&self, id: &str) -> Option<Arc<Issue>> {
        let id = IssueId::parse(id).ok()?;
        self.lookup(&id)
    }

    /// Override the default severity of a registered issue
    ///
    /// This is a bootstrap-time convenience: reports copy the severity at
    /// creation, so existing reports are unaffected.
    pub fn set_default_severity(&self, id: &IssueId, severity: Severity) -> bool {
        let mut issues = self.issues.lock().unwrap();
        match issues.get(id) {
            Some(existing) => {
                let mut updated = Issue::clone(existing);
                updated.default_severity = severity;
                issues.insert(id.clone(), Arc::new(updated));
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.issues.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.lock().unwrap().is_empty()
    }
}
