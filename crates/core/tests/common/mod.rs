#![allow(dead_code)]

use apiscope_api::model::annotations::Annotation;
use apiscope_api::model::element::{ApiClass, ApiField, ApiMethod, ApiPackage, ApiParameter};
use apiscope_api::model::types::TypeRef;
use apiscope_api::traits::ApiPredicate;
use apiscope_core::check::CompatibilityCheck;
use apiscope_core::compare::CodebaseComparator;
use apiscope_core::model::Codebase;
use apiscope_core::report::{CheckConfig, CollectingReporter};

pub const PKG: &str = "test.pkg";

pub fn codebase(description: &str, classes: Vec<ApiClass>) -> Codebase {
    let mut package = ApiPackage::new(PKG);
    package.classes = classes;
    let mut cb = Codebase::new(description);
    cb.add_package(package);
    cb
}

pub fn class(name: &str) -> ApiClass {
    ApiClass::new(PKG, name)
}

pub fn ctor(class_name: &str) -> ApiMethod {
    ApiMethod::constructor(format!("{PKG}.{class_name}"), class_name)
}

pub fn method(class_name: &str, name: &str, params: &[TypeRef], returns: &str) -> ApiMethod {
    let container = format!("{PKG}.{class_name}");
    let mut m = ApiMethod::new(container.clone(), name);
    m.return_type = Some(TypeRef::raw(returns));
    for (i, t) in params.iter().enumerate() {
        m.parameters.push(ApiParameter::new(
            format!("{container}.{name}"),
            i,
            t.clone(),
        ));
    }
    m
}

pub fn field(class_name: &str, name: &str, ty: &str) -> ApiField {
    ApiField::new(format!("{PKG}.{class_name}"), name, TypeRef::raw(ty))
}

pub fn nullable() -> Annotation {
    Annotation::new("androidx.annotation.Nullable")
}

pub fn non_null() -> Annotation {
    Annotation::new("androidx.annotation.NonNull")
}

pub fn run_check(old: &Codebase, new: &Codebase) -> (CollectingReporter, bool) {
    run_check_with(old, new, &CheckConfig::new())
}

pub fn run_check_with(
    old: &Codebase,
    new: &Codebase,
    config: &CheckConfig,
) -> (CollectingReporter, bool) {
    let mut reporter = CollectingReporter::new();
    let found = {
        let mut check = CompatibilityCheck::new(&mut reporter, config, old, new);
        CodebaseComparator::new().compare(&mut check, old, new, &ApiPredicate::default());
        check.found_problems()
    };
    (reporter, found)
}
