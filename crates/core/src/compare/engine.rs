use super::comparator::compare_elements;
use super::tree::{ApiTree, build_forest};
use super::visitor::{ComparisonVisitor, dispatch_added, dispatch_compare, dispatch_removed};
use crate::model::Codebase;
use apiscope_api::model::element::ElementRef;
use apiscope_api::traits::ElementPredicate;
use std::cmp::Ordering;

/// Walks two snapshot forests in lockstep and classifies every node as
/// paired, added, or removed — exactly one outcome per node. Stateless;
/// each `compare` call builds fresh forests and may run independently of
/// any other pass.
#[derive(Debug, Default)]
pub struct CodebaseComparator;

impl CodebaseComparator {
    pub fn new() -> Self {
        CodebaseComparator
    }

    pub fn compare(
        &self,
        visitor: &mut dyn ComparisonVisitor,
        old: &Codebase,
        new: &Codebase,
        filter: &dyn ElementPredicate,
    ) {
        let old_forest = build_forest(old, filter);
        let new_forest = build_forest(new, filter);
        tracing::debug!(
            old = %old.description,
            new = %new.description,
            old_roots = old_forest.len(),
            new_roots = new_forest.len(),
            "comparing codebase snapshots"
        );
        self.compare_forests(visitor, &old_forest, &new_forest, None);
    }

    /// Sorted two-pointer merge. Both child lists are ordered by the same
    /// comparator, so one linear pass per level aligns them.
    fn compare_forests(
        &self,
        visitor: &mut dyn ComparisonVisitor,
        old: &[ApiTree<'_>],
        new: &[ApiTree<'_>],
        new_parent: Option<ElementRef<'_>>,
    ) {
        let mut i = 0;
        let mut j = 0;
        while i < old.len() || j < new.len() {
            if i >= old.len() {
                // Only new nodes remain
                self.added(visitor, &new[j]);
                j += 1;
                continue;
            }
            if j >= new.len() {
                // Only old nodes remain
                dispatch_removed(visitor, old[i].element, new_parent);
                i += 1;
                continue;
            }
            match compare_elements(old[i].element, new[j].element) {
                Ordering::Greater => {
                    self.added(visitor, &new[j]);
                    j += 1;
                }
                Ordering::Less => {
                    dispatch_removed(visitor, old[i].element, new_parent);
                    i += 1;
                }
                Ordering::Equal => {
                    dispatch_compare(visitor, old[i].element, new[j].element);
                    self.compare_forests(
                        visitor,
                        &old[i].children,
                        &new[j].children,
                        Some(new[j].element),
                    );
                    i += 1;
                    j += 1;
                }
            }
        }
    }

    fn added(&self, visitor: &mut dyn ComparisonVisitor, tree: &ApiTree<'_>) {
        dispatch_added(visitor, tree.element);
        if visitor.visit_added_recursively() {
            for child in &tree.children {
                self.added(visitor, child);
            }
        }
    }
}
