mod common;

use apiscope_api::issues::{self, Severity};
use apiscope_api::model::types::TypeRef;
use apiscope_core::report::CheckConfig;
use common::*;

#[test]
fn test_return_nullness_tightening_is_compatible() {
    // old: @Nullable String get(); new: @NonNull String get()
    let mut old_m = method("Foo", "get", &[], "String");
    old_m.annotations.push(nullable());
    let mut new_m = method("Foo", "get", &[], "String");
    new_m.annotations.push(non_null());

    let mut old_foo = class("Foo");
    old_foo.methods.push(old_m);
    let mut new_foo = class("Foo");
    new_foo.methods.push(new_m);

    let (reporter, found) = run_check(
        &codebase("old", vec![old_foo]),
        &codebase("new", vec![new_foo]),
    );
    assert!(!found, "{:?}", reporter.messages());
    assert!(!reporter.contains(&issues::INVALID_NULL_CONVERSION));
}

#[test]
fn test_return_nullness_loosening_is_incompatible() {
    let mut old_m = method("Foo", "get", &[], "String");
    old_m.annotations.push(non_null());
    let mut new_m = method("Foo", "get", &[], "String");
    new_m.annotations.push(nullable());

    let mut old_foo = class("Foo");
    old_foo.methods.push(old_m);
    let mut new_foo = class("Foo");
    new_foo.methods.push(new_m);

    let (reporter, found) = run_check(
        &codebase("old", vec![old_foo]),
        &codebase("new", vec![new_foo]),
    );
    assert!(found);
    assert!(reporter.contains(&issues::INVALID_NULL_CONVERSION));
}

#[test]
fn test_parameter_nullness_directionality() {
    // Tightening a parameter nullable -> non-null breaks callers; the
    // reverse direction is fine.
    let build = |param_annotation: apiscope_api::model::annotations::Annotation| {
        let mut m = method("Foo", "set", &[TypeRef::raw("String")], "void");
        m.parameters[0].annotations.push(param_annotation);
        let mut c = class("Foo");
        c.methods.push(m);
        codebase("cb", vec![c])
    };

    let (reporter, found) = run_check(&build(nullable()), &build(non_null()));
    assert!(found);
    assert!(reporter.contains(&issues::INVALID_NULL_CONVERSION));

    let (reporter, found) = run_check(&build(non_null()), &build(nullable()));
    assert!(!found, "{:?}", reporter.messages());
}

#[test]
fn test_removing_nullness_annotation_is_incompatible() {
    // old: @Nullable String get(); new: String get()
    let mut old_m = method("Foo", "get", &[], "String");
    old_m.annotations.push(nullable());
    let new_m = method("Foo", "get", &[], "String");

    let mut old_foo = class("Foo");
    old_foo.methods.push(old_m);
    let mut new_foo = class("Foo");
    new_foo.methods.push(new_m);

    let (reporter, found) = run_check(
        &codebase("old", vec![old_foo]),
        &codebase("new", vec![new_foo]),
    );
    assert!(found);
    let messages = reporter.messages();
    assert!(
        messages
            .iter()
            .any(|m| m.contains("Attempted to remove @Nullable annotation")),
        "{messages:?}"
    );
}

#[test]
fn test_transparent_removal_through_inheritance() {
    let mut parent = class("Parent");
    parent.methods.push(method("Parent", "m", &[], "void"));
    parent.fields.push(field("Parent", "f", "int"));
    let mut child_with = class("Child");
    child_with.superclass = Some(TypeRef::named("test.pkg.Parent"));
    child_with.methods.push(method("Child", "m", &[], "void"));
    child_with.fields.push(field("Child", "f", "int"));
    let mut child_without = class("Child");
    child_without.superclass = Some(TypeRef::named("test.pkg.Parent"));

    let old = codebase("old", vec![parent.clone(), child_with]);
    let new = codebase("new", vec![parent, child_without]);
    let (reporter, found) = run_check(&old, &new);
    assert!(!found, "{:?}", reporter.messages());
    assert!(!reporter.contains(&issues::REMOVED_METHOD));
    assert!(!reporter.contains(&issues::REMOVED_FIELD));
}

#[test]
fn test_removal_without_inherited_substitute_is_incompatible() {
    let mut with_method = class("Foo");
    with_method.methods.push(method("Foo", "m", &[], "void"));
    let without_method = class("Foo");

    let (reporter, found) = run_check(
        &codebase("old", vec![with_method]),
        &codebase("new", vec![without_method]),
    );
    assert!(found);
    assert!(reporter.contains(&issues::REMOVED_METHOD));
}

#[test]
fn test_added_final_on_instantiable_class() {
    let mut old_c = class("Foo");
    old_c.constructors.push(ctor("Foo"));
    let mut new_c = old_c.clone();
    new_c.modifiers.is_final = true;

    let (reporter, _) = run_check(
        &codebase("old", vec![old_c]),
        &codebase("new", vec![new_c]),
    );
    assert!(reporter.contains(&issues::ADDED_FINAL));
    assert!(!reporter.contains(&issues::ADDED_FINAL_UNINSTANTIABLE));
}

#[test]
fn test_added_final_on_uninstantiable_class_is_informational() {
    // No accessible constructor in the old snapshot: nothing could
    // subclass it, so adding final changes nothing for callers.
    let old_c = class("Foo");
    let mut new_c = class("Foo");
    new_c.modifiers.is_final = true;

    let (reporter, found) = run_check(
        &codebase("old", vec![old_c]),
        &codebase("new", vec![new_c]),
    );
    assert!(!found);
    assert!(reporter.contains(&issues::ADDED_FINAL_UNINSTANTIABLE));
    assert!(!reporter.contains(&issues::ADDED_FINAL));
}

#[test]
fn test_class_interface_flip_short_circuits() {
    let mut old_c = class("Foo");
    old_c.superclass = Some(TypeRef::named("test.pkg.Base"));
    let mut new_c = class("Foo");
    new_c.is_interface = true;

    let (reporter, found) = run_check(
        &codebase("old", vec![old_c]),
        &codebase("new", vec![new_c]),
    );
    assert!(found);
    assert!(reporter.contains(&issues::CHANGED_CLASS));
    // The superclass delta is not reported on top of the flip
    assert!(!reporter.contains(&issues::CHANGED_SUPERCLASS));
}

#[test]
fn test_superclass_change_tolerated_when_new_one_still_extends_old() {
    let base = class("Base");
    let mut middle = class("Middle");
    middle.superclass = Some(TypeRef::named("test.pkg.Base"));

    let mut old_c = class("Foo");
    old_c.superclass = Some(TypeRef::named("test.pkg.Base"));
    let mut new_c = class("Foo");
    new_c.superclass = Some(TypeRef::named("test.pkg.Middle"));

    let old = codebase("old", vec![base.clone(), middle.clone(), old_c]);
    let new = codebase("new", vec![base, middle, new_c]);
    let (reporter, _) = run_check(&old, &new);
    assert!(
        !reporter.contains(&issues::CHANGED_SUPERCLASS),
        "{:?}",
        reporter.messages()
    );
}

#[test]
fn test_superclass_change_to_unrelated_type_is_reported() {
    let mut old_c = class("Foo");
    old_c.superclass = Some(TypeRef::named("test.pkg.Base"));
    let mut new_c = class("Foo");
    new_c.superclass = Some(TypeRef::named("test.pkg.Other"));

    let (reporter, _) = run_check(
        &codebase("old", vec![old_c]),
        &codebase("new", vec![new_c]),
    );
    assert!(reporter.contains(&issues::CHANGED_SUPERCLASS));
}

#[test]
fn test_finalize_throws_exemption() {
    let mut old_finalize = method("Foo", "finalize", &[], "void");
    old_finalize.throws.push("java.lang.Throwable".into());
    let new_finalize = method("Foo", "finalize", &[], "void");

    let mut old_other = method("Foo", "read", &[], "void");
    old_other.throws.push("java.io.IOException".into());
    let new_other = method("Foo", "read", &[], "void");

    let mut old_c = class("Foo");
    old_c.methods.push(old_finalize);
    old_c.methods.push(old_other);
    let mut new_c = class("Foo");
    new_c.methods.push(new_finalize);
    new_c.methods.push(new_other);

    let (reporter, _) = run_check(
        &codebase("old", vec![old_c]),
        &codebase("new", vec![new_c]),
    );
    let messages = reporter.messages();
    assert!(
        messages
            .iter()
            .any(|m| m.contains("read()") && m.contains("no longer throws")),
        "{messages:?}"
    );
    assert!(!messages.iter().any(|m| m.contains("finalize")));
}

#[test]
fn test_vararg_to_array_is_incompatible() {
    let mut old_m = method("Foo", "m", &[TypeRef::array(TypeRef::raw("int"), 1)], "void");
    old_m.parameters[0].is_vararg = true;
    let new_m = method("Foo", "m", &[TypeRef::array(TypeRef::raw("int"), 1)], "void");

    let mut old_c = class("Foo");
    old_c.methods.push(old_m);
    let mut new_c = class("Foo");
    new_c.methods.push(new_m);

    let (reporter, found) = run_check(
        &codebase("old", vec![old_c]),
        &codebase("new", vec![new_c]),
    );
    assert!(found);
    assert!(reporter.contains(&issues::VARARG_REMOVAL));
    // The two spellings still aligned: no remove/add pair
    assert!(!reporter.contains(&issues::REMOVED_METHOD));
}

#[test]
fn test_removing_parameter_default_value() {
    let mut old_m = method("Foo", "m", &[TypeRef::raw("String")], "void");
    old_m.parameters[0].default_value = Some("null".to_string());
    let new_m = method("Foo", "m", &[TypeRef::raw("String")], "void");

    let mut old_c = class("Foo");
    old_c.methods.push(old_m);
    let mut new_c = class("Foo");
    new_c.methods.push(new_m);

    let (reporter, found) = run_check(
        &codebase("old", vec![old_c]),
        &codebase("new", vec![new_c]),
    );
    assert!(found);
    assert!(reporter.contains(&issues::DEFAULT_VALUE_CHANGE));
}

#[test]
fn test_parameter_name_rules() {
    let named = |name: &str| {
        let mut m = method("Foo", "m", &[TypeRef::raw("String")], "void");
        m.parameters[0].name = Some(name.into());
        let mut c = class("Foo");
        c.methods.push(m);
        codebase("cb", vec![c])
    };
    let unnamed = {
        let mut m = method("Foo", "m", &[TypeRef::raw("String")], "void");
        m.parameters[0].name = None;
        let mut c = class("Foo");
        c.methods.push(m);
        codebase("cb", vec![c])
    };

    // Removing a published name
    let (reporter, found) = run_check(&named("arg"), &unnamed);
    assert!(found);
    assert!(reporter.contains(&issues::PARAMETER_NAME_CHANGE));

    // Changing a published name
    let (reporter, found) = run_check(&named("before"), &named("after"));
    assert!(found);
    assert!(reporter.contains(&issues::PARAMETER_NAME_CHANGE));

    // Adding a name where there was none
    let (reporter, found) = run_check(&unnamed, &named("fresh"));
    assert!(!found, "{:?}", reporter.messages());
}

#[test]
fn test_field_type_and_value_changes() {
    let mut old_c = class("Foo");
    let mut f1 = field("Foo", "count", "int");
    f1.constant_value = Some("2".to_string());
    old_c.fields.push(f1);
    old_c.fields.push(field("Foo", "kind", "int"));

    let mut new_c = class("Foo");
    let mut f1 = field("Foo", "count", "int");
    f1.constant_value = Some("42".to_string());
    new_c.fields.push(f1);
    new_c.fields.push(field("Foo", "kind", "char"));

    let (reporter, _) = run_check(
        &codebase("old", vec![old_c]),
        &codebase("new", vec![new_c]),
    );
    assert!(reporter.contains(&issues::CHANGED_VALUE));
    assert!(reporter.contains(&issues::CHANGED_TYPE));
}

#[test]
fn test_visibility_narrowing_escalates_to_error() {
    let make = |vis: apiscope_api::Visibility| {
        let mut m = method("Foo", "m", &[], "void");
        m.modifiers.visibility = vis;
        let mut c = class("Foo");
        c.methods.push(m);
        codebase("cb", vec![c])
    };

    let (reporter, found) = run_check(
        &make(apiscope_api::Visibility::Public),
        &make(apiscope_api::Visibility::Protected),
    );
    assert!(found);
    assert!(reporter.contains(&issues::CHANGED_SCOPE));
    assert_eq!(reporter.error_count(), 1);

    // Widening is reported but not an error
    let (reporter, found) = run_check(
        &make(apiscope_api::Visibility::Protected),
        &make(apiscope_api::Visibility::Public),
    );
    assert!(!found);
    assert!(reporter.contains(&issues::CHANGED_SCOPE));
}

#[test]
fn test_severity_overrides_hide_findings() {
    let mut old_c = class("Foo");
    old_c.methods.push(method("Foo", "m", &[], "void"));
    let mut new_m = method("Foo", "m", &[], "void");
    new_m.modifiers.deprecated = true;
    let mut new_c = class("Foo");
    new_c.methods.push(new_m);

    let old = codebase("old", vec![old_c]);
    let new = codebase("new", vec![new_c]);

    let (reporter, _) = run_check(&old, &new);
    assert!(reporter.contains(&issues::CHANGED_DEPRECATED));

    let mut config = CheckConfig::new();
    config.hide("ChangedDeprecated").unwrap();
    let (reporter, _) = run_check_with(&old, &new, &config);
    assert!(!reporter.contains(&issues::CHANGED_DEPRECATED));

    // And the other way: escalate an informational kind to error
    let mut config = CheckConfig::new();
    config
        .set_severity("ChangedDeprecated", Severity::Error)
        .unwrap();
    let (_, found) = run_check_with(&old, &new, &config);
    assert!(found);
}

#[test]
fn test_added_abstract_method_on_existing_class() {
    let old_c = class("Foo");
    let mut abstract_m = method("Foo", "m", &[], "void");
    abstract_m.modifiers.is_abstract = true;
    let mut new_c = class("Foo");
    new_c.methods.push(abstract_m.clone());

    let (reporter, found) = run_check(
        &codebase("old", vec![old_c]),
        &codebase("new", vec![new_c]),
    );
    assert!(found);
    assert!(reporter.contains(&issues::ADDED_ABSTRACT_METHOD));

    // Same method arriving inside a brand-new class breaks nobody
    let mut fresh = class("Fresh");
    let mut m = abstract_m;
    m.container = "test.pkg.Fresh".into();
    fresh.methods.push(m);
    let (reporter, found) = run_check(&codebase("old", vec![]), &codebase("new", vec![fresh]));
    assert!(!found, "{:?}", reporter.messages());
    assert!(!reporter.contains(&issues::ADDED_ABSTRACT_METHOD));
}

#[test]
fn test_method_finality_is_judged_effectively() {
    // Adding final to a method of an already-final class is invisible
    let build = |class_final: bool, method_final: bool| {
        let mut c = class("Foo");
        c.modifiers.is_final = class_final;
        let mut m = method("Foo", "m", &[], "void");
        m.modifiers.is_final = method_final;
        c.methods.push(m);
        codebase("cb", vec![c])
    };

    let (reporter, _) = run_check(&build(true, false), &build(true, true));
    assert!(!reporter.contains(&issues::ADDED_FINAL));

    let (reporter, _) = run_check(&build(false, false), &build(false, true));
    assert!(reporter.contains(&issues::ADDED_FINAL));

    let (reporter, _) = run_check(&build(false, true), &build(false, false));
    assert!(reporter.contains(&issues::REMOVED_FINAL));
}

#[test]
fn test_removing_abstract_on_interface_is_tolerated() {
    let build = |is_abstract: bool| {
        let mut c = class("Callbacks");
        c.is_interface = true;
        let mut m = method("Callbacks", "onEvent", &[], "void");
        m.modifiers.is_abstract = is_abstract;
        c.methods.push(m);
        codebase("cb", vec![c])
    };

    let (reporter, _) = run_check(&build(true), &build(false));
    assert!(
        !reporter.contains(&issues::CHANGED_ABSTRACT),
        "{:?}",
        reporter.messages()
    );
}

#[test]
fn test_interface_removal_and_addition() {
    let mut old_c = class("Foo");
    old_c.interfaces.push(TypeRef::named("java.io.Closeable"));
    old_c.interfaces.push(TypeRef::named("java.util.Map"));
    let mut new_c = class("Foo");
    new_c.interfaces.push(TypeRef::named("java.util.Map"));
    new_c.interfaces.push(TypeRef::named("java.util.List"));

    let (reporter, _) = run_check(
        &codebase("old", vec![old_c]),
        &codebase("new", vec![new_c]),
    );
    assert!(reporter.contains(&issues::REMOVED_INTERFACE));
    assert!(reporter.contains(&issues::ADDED_INTERFACE));
}

#[test]
fn test_removed_deprecated_class_uses_its_own_kind() {
    let mut doomed = class("Legacy");
    doomed.modifiers.deprecated = true;
    let (reporter, found) = run_check(&codebase("old", vec![doomed]), &codebase("new", vec![]));
    assert!(found);
    assert!(reporter.contains(&issues::REMOVED_DEPRECATED_CLASS));
    assert!(!reporter.contains(&issues::REMOVED_CLASS));
}
