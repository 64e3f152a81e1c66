use crate::issues::{IssueKind, Severity};
use crate::model::element::{ApiField, ApiMethod, ElementRef};

/// Sink for compatibility findings. Implementations decide rendering,
/// deduplication and how findings escalate to exit codes; the engine only
/// hands them over and moves on.
pub trait Reporter {
    fn report(
        &mut self,
        severity: Severity,
        kind: &'static IssueKind,
        element: Option<ElementRef<'_>>,
        message: &str,
    );
}

/// Opaque boolean selection over elements, used both as the emit filter
/// (what is part of the compared surface) and the reference filter (what
/// may legally be referenced from emitted elements).
pub trait ElementPredicate {
    fn test(&self, element: ElementRef<'_>) -> bool;
}

impl<F> ElementPredicate for F
where
    F: Fn(ElementRef<'_>) -> bool,
{
    fn test(&self, element: ElementRef<'_>) -> bool {
        self(element)
    }
}

/// The standard emit predicate: accessible, not marked hidden. With
/// `include_package_private` it doubles as a reference filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPredicate {
    pub include_package_private: bool,
}

impl ElementPredicate for ApiPredicate {
    fn test(&self, element: ElementRef<'_>) -> bool {
        let hidden = match element {
            ElementRef::Package(p) => p.hidden,
            ElementRef::Class(c) => c.hidden,
            ElementRef::Method(m) => m.hidden,
            ElementRef::Field(f) => f.hidden,
            // Parameters have no visibility of their own; they ride along
            // with their method.
            ElementRef::Parameter(_) => return true,
        };
        if hidden {
            return false;
        }
        match element.modifiers() {
            Some(m) => {
                m.visibility.is_accessible()
                    || (self.include_package_private
                        && m.visibility >= crate::model::modifiers::Visibility::PackagePrivate)
            }
            None => true,
        }
    }
}

/// Resolves members still satisfied through inheritance, used to suppress
/// removal findings when an equivalent inherited member remains visible.
pub trait InheritedLookup {
    fn inherited_method(
        &self,
        container: &str,
        name: &str,
        erased_parameter_types: &[String],
    ) -> Option<&ApiMethod>;

    fn inherited_field(&self, container: &str, name: &str) -> Option<&ApiField>;
}
