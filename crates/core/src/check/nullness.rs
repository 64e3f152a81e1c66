use crate::compare::ComparisonVisitor;
use apiscope_api::model::element::ElementRef;

/// Marks nullness annotations that are new in the current snapshot so
/// downstream consumers can treat them as recently migrated rather than
/// long-standing contract. This is the one pass that mutates elements —
/// always the new snapshot, never the baseline — and the consumer of the
/// engine's recursive added mode: every member of a newly added subtree
/// gets inspected, not just its root.
#[derive(Debug, Default)]
pub struct NullnessMigration;

impl NullnessMigration {
    pub fn new() -> Self {
        NullnessMigration
    }

    fn mark(element: ElementRef<'_>) {
        for annotation in element.annotations() {
            if annotation.nullness().is_some() {
                annotation.mark_recent();
            }
        }
    }
}

impl ComparisonVisitor for NullnessMigration {
    fn visit_added_recursively(&self) -> bool {
        true
    }

    fn compare_item(&mut self, old: ElementRef<'_>, new: ElementRef<'_>) {
        if new.nullness().is_some() && old.nullness().is_none() {
            Self::mark(new);
        }
    }

    fn added_item(&mut self, new: ElementRef<'_>) {
        if new.nullness().is_some() {
            Self::mark(new);
        }
    }
}
