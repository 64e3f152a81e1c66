use apiscope_api::model::element::{
    ApiClass, ApiField, ApiMethod, ApiPackage, ApiParameter, ElementRef,
};

/// Double-dispatch protocol for diff outcomes. The engine invokes the
/// generic callback first, then exactly one kind-specific overload; policy
/// modules override only what they care about, everything else defaults to
/// a no-op.
#[allow(unused_variables)]
pub trait ComparisonVisitor {
    /// When true (the default), constructors are routed through the method
    /// overloads and `compare_constructor`/`added_constructor`/
    /// `removed_constructor` are never invoked.
    fn constructors_as_methods(&self) -> bool {
        true
    }

    /// When true, every descendant of a newly added subtree is reported
    /// individually through the `added` callbacks, not just the subtree
    /// root.
    fn visit_added_recursively(&self) -> bool {
        false
    }

    fn compare_item(&mut self, old: ElementRef<'_>, new: ElementRef<'_>) {}
    fn added_item(&mut self, new: ElementRef<'_>) {}
    fn removed_item(&mut self, old: ElementRef<'_>, from: Option<ElementRef<'_>>) {}

    fn compare_package(&mut self, old: &ApiPackage, new: &ApiPackage) {}
    fn compare_class(&mut self, old: &ApiClass, new: &ApiClass) {}
    fn compare_constructor(&mut self, old: &ApiMethod, new: &ApiMethod) {}
    fn compare_method(&mut self, old: &ApiMethod, new: &ApiMethod) {}
    fn compare_field(&mut self, old: &ApiField, new: &ApiField) {}
    fn compare_parameter(&mut self, old: &ApiParameter, new: &ApiParameter) {}

    fn added_package(&mut self, new: &ApiPackage) {}
    fn added_class(&mut self, new: &ApiClass) {}
    fn added_constructor(&mut self, new: &ApiMethod) {}
    fn added_method(&mut self, new: &ApiMethod) {}
    fn added_field(&mut self, new: &ApiField) {}
    fn added_parameter(&mut self, new: &ApiParameter) {}

    fn removed_package(&mut self, old: &ApiPackage, from: Option<ElementRef<'_>>) {}
    fn removed_class(&mut self, old: &ApiClass, from: Option<ElementRef<'_>>) {}
    fn removed_constructor(&mut self, old: &ApiMethod, from: Option<ElementRef<'_>>) {}
    fn removed_method(&mut self, old: &ApiMethod, from: Option<ElementRef<'_>>) {}
    fn removed_field(&mut self, old: &ApiField, from: Option<ElementRef<'_>>) {}
    fn removed_parameter(&mut self, old: &ApiParameter, from: Option<ElementRef<'_>>) {}
}

/// The single dispatch point: generic callback, then the most specific
/// overload. Alignment guarantees equal kinds on both sides of a pair; a
/// mismatch here means the ordering comparator broke its contract.
pub(crate) fn dispatch_compare(
    visitor: &mut dyn ComparisonVisitor,
    old: ElementRef<'_>,
    new: ElementRef<'_>,
) {
    visitor.compare_item(old, new);
    match (old, new) {
        (ElementRef::Package(o), ElementRef::Package(n)) => visitor.compare_package(o, n),
        (ElementRef::Class(o), ElementRef::Class(n)) => visitor.compare_class(o, n),
        (ElementRef::Method(o), ElementRef::Method(n)) => {
            if o.is_constructor && !visitor.constructors_as_methods() {
                visitor.compare_constructor(o, n);
            } else {
                visitor.compare_method(o, n);
            }
        }
        (ElementRef::Field(o), ElementRef::Field(n)) => visitor.compare_field(o, n),
        (ElementRef::Parameter(o), ElementRef::Parameter(n)) => visitor.compare_parameter(o, n),
        _ => unreachable!(
            "aligned pair with mismatched kinds: {:?} vs {:?}",
            old.kind(),
            new.kind()
        ),
    }
}

pub(crate) fn dispatch_added(visitor: &mut dyn ComparisonVisitor, new: ElementRef<'_>) {
    visitor.added_item(new);
    match new {
        ElementRef::Package(p) => visitor.added_package(p),
        ElementRef::Class(c) => visitor.added_class(c),
        ElementRef::Method(m) => {
            if m.is_constructor && !visitor.constructors_as_methods() {
                visitor.added_constructor(m);
            } else {
                visitor.added_method(m);
            }
        }
        ElementRef::Field(f) => visitor.added_field(f),
        ElementRef::Parameter(p) => visitor.added_parameter(p),
    }
}

pub(crate) fn dispatch_removed(
    visitor: &mut dyn ComparisonVisitor,
    old: ElementRef<'_>,
    from: Option<ElementRef<'_>>,
) {
    visitor.removed_item(old, from);
    match old {
        ElementRef::Package(p) => visitor.removed_package(p, from),
        ElementRef::Class(c) => visitor.removed_class(c, from),
        ElementRef::Method(m) => {
            if m.is_constructor && !visitor.constructors_as_methods() {
                visitor.removed_constructor(m, from);
            } else {
                visitor.removed_method(m, from);
            }
        }
        ElementRef::Field(f) => visitor.removed_field(f, from),
        ElementRef::Parameter(p) => visitor.removed_parameter(p, from),
    }
}
