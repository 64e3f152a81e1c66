use super::comparator::compare_elements;
use crate::model::Codebase;
use apiscope_api::model::element::{ApiClass, ApiMethod, ElementRef};
use apiscope_api::traits::ElementPredicate;

/// One node of a snapshot tree: an element plus its ordered children.
#[derive(Debug)]
pub struct ApiTree<'a> {
    pub element: ElementRef<'a>,
    pub children: Vec<ApiTree<'a>>,
}

/// Build the ordered, filtered forest for one snapshot. Elements failing
/// the emit predicate are pruned together with their whole subtree, so
/// they never surface in a diff, not even as removals. For a fixed
/// codebase and predicate the result is uniquely ordered regardless of
/// input order.
pub fn build_forest<'a>(
    codebase: &'a Codebase,
    filter: &dyn ElementPredicate,
) -> Vec<ApiTree<'a>> {
    let mut forest: Vec<ApiTree<'a>> = codebase
        .packages
        .iter()
        .filter(|p| filter.test(ElementRef::Package(p)))
        .map(|p| ApiTree {
            element: ElementRef::Package(p),
            children: sort(
                p.classes
                    .iter()
                    .filter(|c| filter.test(ElementRef::Class(c)))
                    .map(|c| build_class(c, filter))
                    .collect(),
            ),
        })
        .collect();
    forest.sort_by(|a, b| compare_elements(a.element, b.element));
    forest
}

fn build_class<'a>(class: &'a ApiClass, filter: &dyn ElementPredicate) -> ApiTree<'a> {
    let mut children: Vec<ApiTree<'a>> = Vec::new();
    children.extend(
        class
            .constructors
            .iter()
            .chain(&class.methods)
            .filter(|m| filter.test(ElementRef::Method(m)))
            .map(build_method),
    );
    children.extend(
        class
            .fields
            .iter()
            .filter(|f| filter.test(ElementRef::Field(f)))
            .map(|f| ApiTree {
                element: ElementRef::Field(f),
                children: Vec::new(),
            }),
    );
    children.extend(
        class
            .classes
            .iter()
            .filter(|nested| filter.test(ElementRef::Class(nested)))
            .map(|nested| build_class(nested, filter)),
    );
    ApiTree {
        element: ElementRef::Class(class),
        children: sort(children),
    }
}

fn build_method(method: &ApiMethod) -> ApiTree<'_> {
    ApiTree {
        element: ElementRef::Method(method),
        children: sort(
            method
                .parameters
                .iter()
                .map(|p| ApiTree {
                    element: ElementRef::Parameter(p),
                    children: Vec::new(),
                })
                .collect(),
        ),
    }
}

fn sort(mut children: Vec<ApiTree<'_>>) -> Vec<ApiTree<'_>> {
    children.sort_by(|a, b| compare_elements(a.element, b.element));
    children
}
