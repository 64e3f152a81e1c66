use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "data")]
pub enum TypeRef {
    /// Unresolved type name as spelled in the source (e.g., "int", "List<T>")
    Raw(String),

    /// Resolved reference to a type by fully qualified name
    Named(String),

    /// Generic instantiation (e.g., List<String>)
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Array type (e.g., String[])
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    /// Type variable with its optional upper bound (e.g., T extends Number)
    Variable {
        name: String,
        bound: Option<Box<TypeRef>>,
    },

    /// Wildcard type (e.g., ? extends Number)
    Wildcard {
        bound: Option<Box<TypeRef>>,
        is_upper_bound: bool, // true: extends, false: super
    },
}

impl TypeRef {
    /// Helper to create a Raw type
    pub fn raw(s: impl Into<String>) -> Self {
        TypeRef::Raw(s.into())
    }

    /// Helper to create a Named type
    pub fn named(s: impl Into<String>) -> Self {
        TypeRef::Named(s.into())
    }

    pub fn array(element: TypeRef, dimensions: usize) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            dimensions,
        }
    }

    pub fn generic(base: TypeRef, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            base: Box::new(base),
            args,
        }
    }

    pub fn variable(name: impl Into<String>, bound: Option<TypeRef>) -> Self {
        TypeRef::Variable {
            name: name.into(),
            bound: bound.map(Box::new),
        }
    }

    /// Erased spelling of this type: generic arguments dropped, type
    /// variables replaced by their bound (Object when unbounded). This is
    /// the canonical form used to align overloads across versions.
    pub fn erasure(&self) -> String {
        match self {
            TypeRef::Raw(s) => {
                let base = s.split('<').next().unwrap_or(s);
                match base.strip_suffix("...") {
                    Some(stripped) => format!("{stripped}[]"),
                    None => base.to_string(),
                }
            }
            TypeRef::Named(s) => s.clone(),
            TypeRef::Generic { base, .. } => base.erasure(),
            TypeRef::Array {
                element,
                dimensions,
            } => {
                let mut out = element.erasure();
                for _ in 0..*dimensions {
                    out.push_str("[]");
                }
                out
            }
            TypeRef::Variable { bound, .. } => bound
                .as_ref()
                .map(|b| b.erasure())
                .unwrap_or_else(|| "java.lang.Object".to_string()),
            TypeRef::Wildcard { bound, .. } => bound
                .as_ref()
                .map(|b| b.erasure())
                .unwrap_or_else(|| "java.lang.Object".to_string()),
        }
    }

    /// Semantic equivalence: structural equality that tolerates renaming a
    /// type variable as long as its bound is unchanged, and treats a raw
    /// spelling and a resolved name of the same type as the same.
    pub fn is_equivalent(&self, other: &TypeRef) -> bool {
        match (self, other) {
            (TypeRef::Variable { bound: b1, .. }, TypeRef::Variable { bound: b2, .. }) => {
                match (b1, b2) {
                    (None, None) => true,
                    (Some(a), Some(b)) => a.is_equivalent(b),
                    _ => false,
                }
            }
            (TypeRef::Raw(a), TypeRef::Raw(b)) => a == b,
            (TypeRef::Raw(a), TypeRef::Named(b)) | (TypeRef::Named(a), TypeRef::Raw(b)) => a == b,
            (TypeRef::Named(a), TypeRef::Named(b)) => a == b,
            (
                TypeRef::Generic { base: a, args: x },
                TypeRef::Generic { base: b, args: y },
            ) => {
                a.is_equivalent(b)
                    && x.len() == y.len()
                    && x.iter().zip(y).all(|(l, r)| l.is_equivalent(r))
            }
            (
                TypeRef::Array {
                    element: a,
                    dimensions: d1,
                },
                TypeRef::Array {
                    element: b,
                    dimensions: d2,
                },
            ) => d1 == d2 && a.is_equivalent(b),
            (
                TypeRef::Wildcard {
                    bound: a,
                    is_upper_bound: u1,
                },
                TypeRef::Wildcard {
                    bound: b,
                    is_upper_bound: u2,
                },
            ) => {
                u1 == u2
                    && match (a, b) {
                        (None, None) => true,
                        (Some(l), Some(r)) => l.is_equivalent(r),
                        _ => false,
                    }
            }
            _ => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Raw(s) | TypeRef::Named(s) => write!(f, "{s}"),
            TypeRef::Generic { base, args } => {
                write!(f, "{base}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                write!(f, "{element}")?;
                for _ in 0..*dimensions {
                    write!(f, "[]")?;
                }
                Ok(())
            }
            TypeRef::Variable { name, .. } => write!(f, "{name}"),
            TypeRef::Wildcard {
                bound,
                is_upper_bound,
            } => match bound {
                Some(b) if *is_upper_bound => write!(f, "? extends {b}"),
                Some(b) => write!(f, "? super {b}"),
                None => write!(f, "?"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erasure_drops_generics() {
        let t = TypeRef::generic(
            TypeRef::named("java.util.List"),
            vec![TypeRef::named("java.lang.String")],
        );
        assert_eq!(t.erasure(), "java.util.List");
    }

    #[test]
    fn test_erasure_spells_varargs_as_array() {
        assert_eq!(TypeRef::raw("int...").erasure(), "int[]");
        assert_eq!(
            TypeRef::array(TypeRef::raw("int"), 1).erasure(),
            "int[]"
        );
    }

    #[test]
    fn test_variable_rename_is_equivalent() {
        let t = TypeRef::variable("T", Some(TypeRef::named("java.lang.Number")));
        let u = TypeRef::variable("U", Some(TypeRef::named("java.lang.Number")));
        let v = TypeRef::variable("V", Some(TypeRef::named("java.lang.Float")));
        assert!(t.is_equivalent(&u));
        assert!(!t.is_equivalent(&v));
    }
}
