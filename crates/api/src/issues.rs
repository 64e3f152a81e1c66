use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How a reported issue is treated by default. `Hidden` issues are
/// suppressed entirely; only `Error` marks the comparison as failed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hidden,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Hidden => "hidden",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// One kind of compatibility finding. Codes are stable identifiers carried
/// in rendered reports; severities are defaults that a `CheckConfig` may
/// override per kind.
#[derive(Debug, PartialEq, Eq)]
pub struct IssueKind {
    pub name: &'static str,
    pub code: u32,
    pub default_severity: Severity,
}

macro_rules! issue_kinds {
    ($($konst:ident => ($name:literal, $code:literal, $severity:ident);)*) => {
        $(
            pub const $konst: IssueKind = IssueKind {
                name: $name,
                code: $code,
                default_severity: Severity::$severity,
            };
        )*

        pub static ALL: &[&IssueKind] = &[$(&$konst),*];
    };
}

issue_kinds! {
    ADDED_PACKAGE => ("AddedPackage", 2, Warning);
    ADDED_CLASS => ("AddedClass", 3, Warning);
    ADDED_METHOD => ("AddedMethod", 4, Warning);
    ADDED_FIELD => ("AddedField", 5, Warning);
    ADDED_INTERFACE => ("AddedInterface", 6, Warning);
    REMOVED_PACKAGE => ("RemovedPackage", 7, Error);
    REMOVED_CLASS => ("RemovedClass", 8, Error);
    REMOVED_METHOD => ("RemovedMethod", 9, Error);
    REMOVED_FIELD => ("RemovedField", 10, Error);
    REMOVED_INTERFACE => ("RemovedInterface", 11, Warning);
    CHANGED_STATIC => ("ChangedStatic", 12, Warning);
    ADDED_FINAL => ("AddedFinal", 13, Warning);
    CHANGED_TRANSIENT => ("ChangedTransient", 14, Warning);
    CHANGED_VOLATILE => ("ChangedVolatile", 15, Warning);
    CHANGED_TYPE => ("ChangedType", 16, Warning);
    CHANGED_VALUE => ("ChangedValue", 17, Warning);
    CHANGED_SUPERCLASS => ("ChangedSuperclass", 18, Warning);
    CHANGED_SCOPE => ("ChangedScope", 19, Warning);
    CHANGED_ABSTRACT => ("ChangedAbstract", 20, Warning);
    CHANGED_THROWS => ("ChangedThrows", 21, Warning);
    CHANGED_NATIVE => ("ChangedNative", 22, Hidden);
    CHANGED_CLASS => ("ChangedClass", 23, Error);
    CHANGED_DEPRECATED => ("ChangedDeprecated", 24, Warning);
    CHANGED_SYNCHRONIZED => ("ChangedSynchronized", 25, Hidden);
    ADDED_FINAL_UNINSTANTIABLE => ("AddedFinalUninstantiable", 26, Warning);
    REMOVED_FINAL => ("RemovedFinal", 27, Warning);
    REMOVED_DEPRECATED_CLASS => ("RemovedDeprecatedClass", 28, Error);
    ADDED_ABSTRACT_METHOD => ("AddedAbstractMethod", 31, Error);
    INVALID_NULL_CONVERSION => ("InvalidNullConversion", 135, Error);
    PARAMETER_NAME_CHANGE => ("ParameterNameChange", 136, Error);
    VARARG_REMOVAL => ("VarargRemoval", 139, Error);
    ADDED_SEALED => ("AddedSealed", 140, Error);
    DEFAULT_VALUE_CHANGE => ("DefaultValueChange", 144, Error);
}

static BY_NAME: Lazy<HashMap<&'static str, &'static IssueKind>> =
    Lazy::new(|| ALL.iter().map(|kind| (kind.name, *kind)).collect());

impl IssueKind {
    /// Look up a kind by its report name (e.g. for severity overrides).
    pub fn from_name(name: &str) -> Option<&'static IssueKind> {
        BY_NAME.get(name).copied()
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(
            IssueKind::from_name("InvalidNullConversion"),
            Some(&INVALID_NULL_CONVERSION)
        );
        assert!(IssueKind::from_name("NoSuchKind").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<u32> = ALL.iter().map(|k| k.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ALL.len());
    }
}
