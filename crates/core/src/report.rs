use apiscope_api::error::ApiError;
use apiscope_api::issues::{IssueKind, Severity};
use apiscope_api::model::element::ElementRef;
use apiscope_api::traits::Reporter;
use std::collections::HashMap;

/// Per-invocation policy for the compatibility check: severity overrides
/// by issue-kind name. Constructed by the caller and passed in explicitly;
/// nothing here is ambient state.
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    overrides: HashMap<&'static str, Severity>,
}

impl CheckConfig {
    pub fn new() -> Self {
        CheckConfig::default()
    }

    pub fn set_severity(&mut self, name: &str, severity: Severity) -> crate::Result<()> {
        let kind = IssueKind::from_name(name)
            .ok_or_else(|| ApiError::UnknownIssue(name.to_string()))?;
        self.overrides.insert(kind.name, severity);
        Ok(())
    }

    /// Hide a comma-separated list of issue kinds, e.g.
    /// "AddedPackage,AddedClass,ChangedDeprecated".
    pub fn hide(&mut self, names: &str) -> crate::Result<()> {
        for name in names.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            self.set_severity(name, Severity::Hidden)?;
        }
        Ok(())
    }

    pub fn resolve(&self, kind: &'static IssueKind) -> Severity {
        self.overrides
            .get(kind.name)
            .copied()
            .unwrap_or(kind.default_severity)
    }
}

/// One finding as handed to a reporter, with the element flattened to its
/// description so the record outlives the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedIssue {
    pub severity: Severity,
    pub kind: &'static IssueKind,
    pub element: Option<String>,
    pub message: String,
}

/// Accumulates findings in order. The workhorse for tests and for callers
/// that render a batch at the end of a pass.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub issues: Vec<ReportedIssue>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        CollectingReporter::default()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues
            .iter()
            .map(|i| format!("{}: {} [{}]", i.severity, i.message, i.kind))
            .collect()
    }

    pub fn contains(&self, kind: &'static IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }
}

impl Reporter for CollectingReporter {
    fn report(
        &mut self,
        severity: Severity,
        kind: &'static IssueKind,
        element: Option<ElementRef<'_>>,
        message: &str,
    ) {
        self.issues.push(ReportedIssue {
            severity,
            kind,
            element: element.map(|e| e.describe(false)),
            message: message.to_string(),
        });
    }
}

/// Routes findings straight to the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(
        &mut self,
        severity: Severity,
        kind: &'static IssueKind,
        _element: Option<ElementRef<'_>>,
        message: &str,
    ) {
        match severity {
            Severity::Error => tracing::error!(kind = %kind, "{message}"),
            Severity::Warning => tracing::warn!(kind = %kind, "{message}"),
            Severity::Hidden => {}
        }
    }
}
