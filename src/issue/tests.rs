//! Issue taxonomy tests

use super::*;

#[test]
fn test_severity_ordering() {
    assert!(Severity::Critical.is_at_least(Severity::Critical));
    assert!(Severity::Critical.is_at_least(Severity::Warning));
    assert!(Severity::Critical.is_at_least(Severity::Issue));
    assert!(Severity::Warning.is_at_least(Severity::Issue));
    assert!(!Severity::Issue.is_at_least(Severity::Warning));
    assert!(!Severity::Warning.is_at_least(Severity::Critical));

    // The sentinel is less severe than everything
    assert!(!Severity::Ignore.is_at_least(Severity::Issue));
}

#[test]
fn test_severity_names() {
    assert_eq!(Severity::from_name("critical"), Some(Severity::Critical));
    assert_eq!(Severity::from_name("warning"), Some(Severity::Warning));
    assert_eq!(Severity::from_name("issue"), Some(Severity::Issue));
    assert_eq!(Severity::from_name("ignore"), Some(Severity::Ignore));
    assert_eq!(Severity::from_name("fatal"), None);

    assert_eq!(Severity::Critical.to_string(), "critical");
    assert_eq!(Severity::Ignore.to_string(), "ignore");
}

#[test]
fn test_issue_id_parsing() {
    let id = IssueId::parse("caps::missing-field").expect("valid id");
    assert_eq!(id.area(), "caps");
    assert_eq!(id.name(), "missing-field");
    assert_eq!(id.to_string(), "caps::missing-field");

    // Exactly two non-empty segments
    assert!(IssueId::parse("noseparator").is_err());
    assert!(IssueId::parse("::name").is_err());
    assert!(IssueId::parse("area::").is_err());
    assert!(IssueId::parse("a::b::c").is_err());
    assert!(IssueId::parse("").is_err());
}

#[test]
fn test_catalog_register_and_lookup() {
    let catalog = IssueCatalog::new();
    let issue = Issue::new(
        "core::bad-state",
        "component entered a bad state",
        Some("a component reported an internal state transition failure"),
        Severity::Warning,
    )
    .expect("valid issue");

    let registered = catalog.register(issue).expect("first registration");
    assert_eq!(registered.default_severity(), Severity::Warning);

    let id = IssueId::parse("core::bad-state").unwrap();
    let found = catalog.lookup(&id).expect("registered issue");
    assert_eq!(found.summary(), "component entered a bad state");

    // Lookup is stable across calls
    let again = catalog.lookup(&id).expect("still registered");
    assert!(Arc::ptr_eq(&found, &again));
}

#[test]
fn test_catalog_rejects_duplicate_id() {
    let catalog = IssueCatalog::new();
    let issue = Issue::new("core::dup", "first", None, Severity::Issue).unwrap();
    catalog.register(issue).expect("first registration");

    let duplicate = Issue::new("core::dup", "second", None, Severity::Critical).unwrap();
    let err = catalog.register(duplicate).unwrap_err();
    assert_eq!(
        err,
        CatalogError::DuplicateIssueId(IssueId::parse("core::dup").unwrap())
    );

    // The original entry is untouched
    let found = catalog.lookup_str("core::dup").unwrap();
    assert_eq!(found.summary(), "first");
}

#[test]
fn test_catalog_set_default_severity() {
    let catalog = IssueCatalog::new();
    let issue = Issue::new("core::tunable", "tunable issue", None, Severity::Issue).unwrap();
    catalog.register(issue).unwrap();

    let id = IssueId::parse("core::tunable").unwrap();
    assert!(catalog.set_default_severity(&id, Severity::Critical));
    assert_eq!(
        catalog.lookup(&id).unwrap().default_severity(),
        Severity::Critical
    );

    let missing = IssueId::parse("core::missing").unwrap();
    assert!(!catalog.set_default_severity(&missing, Severity::Ignore));
}

#[test]
fn test_builtin_issues_registered() {
    let catalog = IssueCatalog::new();
    builtin::register_all(&catalog);

    assert!(!catalog.is_empty());
    let critical = catalog.lookup_str("log::critical").expect("builtin issue");
    assert_eq!(critical.default_severity(), Severity::Critical);
    assert!(catalog.lookup_str("core::error-reported").is_some());
}
