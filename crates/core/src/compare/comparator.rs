use apiscope_api::model::element::{ApiMethod, ElementRef};
use std::cmp::Ordering;

/// Rank of an element kind in the total order. Children of one container
/// are grouped by kind before any name comparison applies.
pub fn type_rank(element: ElementRef<'_>) -> u8 {
    match element {
        ElementRef::Package(_) => 0,
        ElementRef::Method(m) if m.is_constructor => 1,
        ElementRef::Method(_) => 2,
        ElementRef::Field(_) => 3,
        ElementRef::Class(_) => 4,
        ElementRef::Parameter(_) => 5,
    }
}

/// Total order over elements. `Ordering::Equal` is the alignment relation:
/// two elements that compare equal are treated as the same API entity
/// across versions, even when other attributes (return type, modifiers)
/// differ.
pub fn compare_elements(a: ElementRef<'_>, b: ElementRef<'_>) -> Ordering {
    let rank = type_rank(a).cmp(&type_rank(b));
    if rank != Ordering::Equal {
        return rank;
    }
    match (a, b) {
        (ElementRef::Package(x), ElementRef::Package(y)) => x.name.cmp(&y.name),
        (ElementRef::Class(x), ElementRef::Class(y)) => {
            x.qualified_name.cmp(&y.qualified_name)
        }
        (ElementRef::Method(x), ElementRef::Method(y)) => compare_methods(x, y),
        (ElementRef::Field(x), ElementRef::Field(y)) => x.name.cmp(&y.name),
        (ElementRef::Parameter(x), ElementRef::Parameter(y)) => x.index.cmp(&y.index),
        _ => unreachable!(
            "kind ranks matched but element kinds differ: {:?} vs {:?}",
            a.kind(),
            b.kind()
        ),
    }
}

/// Methods order by name, then by raw parameter-type spelling with the
/// parameter count as tiebreak. When the raw pass finds a difference, a
/// secondary pass over erased spellings decides whether the two are still
/// the same overload (varargs vs array, generic spelling drift).
fn compare_methods(a: &ApiMethod, b: &ApiMethod) -> Ordering {
    let by_name = a.name.cmp(&b.name);
    if by_name != Ordering::Equal {
        return by_name;
    }

    let primary = compare_parameter_spellings(a, b, |p| p.type_string());
    if primary == Ordering::Equal {
        return Ordering::Equal;
    }
    let erased = compare_parameter_spellings(a, b, |p| p.type_ref.erasure());
    if erased == Ordering::Equal {
        return Ordering::Equal;
    }
    primary
}

fn compare_parameter_spellings(
    a: &ApiMethod,
    b: &ApiMethod,
    spell: impl Fn(&apiscope_api::model::element::ApiParameter) -> String,
) -> Ordering {
    for (pa, pb) in a.parameters.iter().zip(&b.parameters) {
        let by_type = spell(pa).cmp(&spell(pb));
        if by_type != Ordering::Equal {
            return by_type;
        }
    }
    a.parameters.len().cmp(&b.parameters.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiscope_api::model::element::{ApiClass, ApiField, ApiPackage, ApiParameter};
    use apiscope_api::model::types::TypeRef;

    fn method_with_params(name: &str, types: &[TypeRef]) -> ApiMethod {
        let mut m = ApiMethod::new("test.pkg.C", name);
        for (i, t) in types.iter().enumerate() {
            m.parameters
                .push(ApiParameter::new(format!("test.pkg.C.{name}"), i, t.clone()));
        }
        m
    }

    #[test]
    fn test_kind_rank_orders_siblings_by_kind_first() {
        let pkg = ApiPackage::new("p");
        let class = ApiClass::new("p", "C");
        let field = ApiField::new("p.C", "f", TypeRef::raw("int"));
        let method = ApiMethod::new("p.C", "m");
        let ctor = ApiMethod::constructor("p.C", "C");
        assert_eq!(
            compare_elements(ElementRef::Package(&pkg), ElementRef::Class(&class)),
            Ordering::Less
        );
        assert_eq!(
            compare_elements(ElementRef::Method(&ctor), ElementRef::Method(&method)),
            Ordering::Less
        );
        assert_eq!(
            compare_elements(ElementRef::Method(&method), ElementRef::Field(&field)),
            Ordering::Less
        );
        assert_eq!(
            compare_elements(ElementRef::Field(&field), ElementRef::Class(&class)),
            Ordering::Less
        );
    }

    #[test]
    fn test_overloads_are_distinct() {
        let one = method_with_params("bar", &[TypeRef::raw("int")]);
        let two = method_with_params("bar", &[TypeRef::raw("int"), TypeRef::raw("int")]);
        assert_ne!(
            compare_elements(ElementRef::Method(&one), ElementRef::Method(&two)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_vararg_and_array_spellings_align() {
        let mut vararg = method_with_params("m", &[TypeRef::array(TypeRef::raw("int"), 1)]);
        vararg.parameters[0].is_vararg = true;
        let array = method_with_params("m", &[TypeRef::array(TypeRef::raw("int"), 1)]);
        assert_eq!(
            compare_elements(ElementRef::Method(&vararg), ElementRef::Method(&array)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_generic_spelling_drift_aligns() {
        let raw = method_with_params(
            "m",
            &[TypeRef::raw("java.util.List<java.lang.String>")],
        );
        let erased = method_with_params("m", &[TypeRef::named("java.util.List")]);
        assert_eq!(
            compare_elements(ElementRef::Method(&raw), ElementRef::Method(&erased)),
            Ordering::Equal
        );
    }
}
