//! Built-in issues registered at session bootstrap

use super::{Issue, IssueCatalog, Severity};

/// Register the built-in issue set on a freshly created catalog
///
/// Called once from `Session::new` before any user registration; duplicate
/// ids here are a build-time defect, so registration failures abort.
pub(crate) fn register_all(catalog: &IssueCatalog) {
    let builtins = [
        (
            Severity::Critical,
            "core::error-reported",
            "an unrecoverable error was reported by the system under test",
            Some(
                "the observed system signalled an error on its message channel; \
                 the run cannot be considered valid past this point",
            ),
        ),
        (
            Severity::Warning,
            "core::warning-reported",
            "a warning was reported by the system under test",
            None,
        ),
        (
            Severity::Critical,
            "core::allocation-failure",
            "a memory allocation failed during the validation run",
            None,
        ),
        (
            Severity::Critical,
            "core::missing-component",
            "a required component is missing and prevented validation from running",
            None,
        ),
        (
            Severity::Critical,
            "log::critical",
            "a critical entry was forwarded from the host logging system",
            None,
        ),
        (
            Severity::Warning,
            "log::warning",
            "a warning entry was forwarded from the host logging system",
            None,
        ),
        (
            Severity::Issue,
            "log::issue",
            "an informational entry was forwarded from the host logging system",
            None,
        ),
    ];

    for (severity, id, summary, description) in builtins {
        let issue = Issue::new(id, summary, description, severity)
            .expect("built-in issue id is well-formed");
        catalog
            .register(issue)
            .expect("built-in issue registered twice");
    }
}
