use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cell::Cell;
use std::fmt;

/// Nullness polarity carried by an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullness {
    Nullable,
    NonNull,
}

/// A single annotation on an element, identified by its qualified name.
///
/// `recent` is the one piece of interior mutability in the model: the
/// nullness-migration pass marks annotations that are new in the current
/// snapshot, which switches the reported name to the `Recently*` form.
/// Only elements of the new snapshot are ever marked.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: SmolStr,
    #[serde(default)]
    recent: Cell<bool>,
}

impl Annotation {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Annotation {
            name: name.into(),
            recent: Cell::new(false),
        }
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn nullness(&self) -> Option<Nullness> {
        match self.simple_name() {
            "Nullable" | "RecentlyNullable" => Some(Nullness::Nullable),
            "NonNull" | "NotNull" | "RecentlyNonNull" => Some(Nullness::NonNull),
            _ => None,
        }
    }

    pub fn is_recent(&self) -> bool {
        self.recent.get()
    }

    pub fn mark_recent(&self) {
        self.recent.set(true);
    }

    /// Name as it should be reported, accounting for migration marking.
    pub fn qualified_name(&self) -> String {
        if !self.recent.get() {
            return self.name.to_string();
        }
        match self.name.rsplit_once('.') {
            Some((pkg, simple)) => format!("{pkg}.Recently{simple}"),
            None => format!("Recently{}", self.name),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.qualified_name())
    }
}

/// The nullness declared by a list of annotations, if any.
pub fn nullness_of(annotations: &[Annotation]) -> Option<Nullness> {
    annotations.iter().find_map(|a| a.nullness())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_recent_rewrites_reported_name() {
        let a = Annotation::new("androidx.annotation.NonNull");
        assert_eq!(a.qualified_name(), "androidx.annotation.NonNull");
        a.mark_recent();
        assert_eq!(a.qualified_name(), "androidx.annotation.RecentlyNonNull");
        assert_eq!(a.nullness(), Some(Nullness::NonNull));
    }
}
