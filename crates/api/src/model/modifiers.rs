use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared visibility, ordered from most to least restricted so that
/// narrowing/widening checks are plain comparisons.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    PackagePrivate,
    Protected,
    Public,
}

impl Visibility {
    /// Visible enough to be part of a published API surface.
    pub fn is_accessible(self) -> bool {
        self >= Visibility::Protected
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Visibility::Private => "private",
            Visibility::PackagePrivate => "package-private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        };
        write!(f, "{s}")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_native: bool,
    pub is_synchronized: bool,
    pub is_transient: bool,
    pub is_volatile: bool,
    pub is_sealed: bool,
    /// Interface method with a body (a `default` method)
    pub is_default: bool,
    pub deprecated: bool,
}

impl Modifiers {
    pub fn new(visibility: Visibility) -> Self {
        Modifiers {
            visibility,
            ..Modifiers::default()
        }
    }

    pub fn public() -> Self {
        Modifiers::new(Visibility::Public)
    }

    pub fn protected() -> Self {
        Modifiers::new(Visibility::Protected)
    }

    pub fn private() -> Self {
        Modifiers::new(Visibility::Private)
    }
}
