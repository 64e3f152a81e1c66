use crate::compare::ComparisonVisitor;
use crate::model::Codebase;
use crate::report::CheckConfig;
use apiscope_api::issues::{self, IssueKind, Severity};
use apiscope_api::model::annotations::Nullness;
use apiscope_api::model::element::{ApiClass, ApiField, ApiMethod, ApiParameter, ElementRef};
use apiscope_api::model::modifiers::Modifiers;
use apiscope_api::traits::{InheritedLookup, Reporter};

/// The compatibility policy: one stateless rule per callback, every
/// finding routed to the reporter, nothing thrown. A single pass reports
/// all problems; `found_problems` is the aggregate verdict.
pub struct CompatibilityCheck<'a> {
    reporter: &'a mut dyn Reporter,
    config: &'a CheckConfig,
    old_codebase: &'a Codebase,
    new_codebase: &'a Codebase,
    found_problems: bool,
}

impl<'a> CompatibilityCheck<'a> {
    pub fn new(
        reporter: &'a mut dyn Reporter,
        config: &'a CheckConfig,
        old_codebase: &'a Codebase,
        new_codebase: &'a Codebase,
    ) -> Self {
        CompatibilityCheck {
            reporter,
            config,
            old_codebase,
            new_codebase,
            found_problems: false,
        }
    }

    /// True when at least one finding resolved to `Severity::Error`.
    pub fn found_problems(&self) -> bool {
        self.found_problems
    }

    fn report(&mut self, kind: &'static IssueKind, element: ElementRef<'_>, message: String) {
        let severity = self.config.resolve(kind);
        self.emit(severity, kind, element, message);
    }

    /// Report with the severity floored at Error: the change is
    /// incompatible regardless of the kind's default level. A configured
    /// Hidden still suppresses it.
    fn report_incompatible(
        &mut self,
        kind: &'static IssueKind,
        element: ElementRef<'_>,
        message: String,
    ) {
        let severity = match self.config.resolve(kind) {
            Severity::Hidden => Severity::Hidden,
            resolved => resolved.max(Severity::Error),
        };
        self.emit(severity, kind, element, message);
    }

    fn emit(
        &mut self,
        severity: Severity,
        kind: &'static IssueKind,
        element: ElementRef<'_>,
        message: String,
    ) {
        if severity == Severity::Hidden {
            return;
        }
        if severity == Severity::Error {
            self.found_problems = true;
        }
        self.reporter.report(severity, kind, Some(element), &message);
    }

    fn check_scope(
        &mut self,
        old: &Modifiers,
        new: &Modifiers,
        element: ElementRef<'_>,
    ) {
        if old.visibility == new.visibility {
            return;
        }
        let message = format!(
            "{} changed visibility from {} to {}",
            element.describe(true),
            old.visibility,
            new.visibility
        );
        if new.visibility < old.visibility {
            self.report_incompatible(&issues::CHANGED_SCOPE, element, message);
        } else {
            self.report(&issues::CHANGED_SCOPE, element, message);
        }
    }

    fn class_is_final(&self, codebase: &Codebase, qualified_name: &str) -> bool {
        codebase
            .find_class(qualified_name)
            .map(|c| c.modifiers.is_final)
            .unwrap_or(false)
    }

    fn class_is_interface(&self, codebase: &Codebase, qualified_name: &str) -> bool {
        codebase
            .find_class(qualified_name)
            .map(|c| c.is_interface)
            .unwrap_or(false)
    }
}

fn nullness_name(nullness: Nullness) -> &'static str {
    match nullness {
        Nullness::Nullable => "@Nullable",
        Nullness::NonNull => "@NonNull",
    }
}

impl ComparisonVisitor for CompatibilityCheck<'_> {
    fn compare_item(&mut self, old: ElementRef<'_>, new: ElementRef<'_>) {
        if let (Some(old_mods), Some(new_mods)) = (old.modifiers(), new.modifiers()) {
            if old_mods.deprecated != new_mods.deprecated {
                self.report(
                    &issues::CHANGED_DEPRECATED,
                    new,
                    format!(
                        "{} has changed deprecation state {} --> {}",
                        new.describe(true),
                        old_mods.deprecated,
                        new_mods.deprecated
                    ),
                );
            }
        }

        match (old.nullness(), new.nullness()) {
            (Some(old_null), None) => {
                // Dropping nullness information loses contract either way
                self.report_incompatible(
                    &issues::INVALID_NULL_CONVERSION,
                    new,
                    format!(
                        "Attempted to remove {} annotation from {}",
                        nullness_name(old_null),
                        new.describe(false)
                    ),
                );
            }
            (Some(old_null), Some(new_null)) if old_null != new_null => match new {
                // Tightening a parameter breaks callers that passed null
                ElementRef::Parameter(_)
                    if old_null == Nullness::Nullable && new_null == Nullness::NonNull =>
                {
                    self.report_incompatible(
                        &issues::INVALID_NULL_CONVERSION,
                        new,
                        format!(
                            "Attempted to change parameter from @Nullable to @NonNull: incompatible change for {}",
                            new.describe(false)
                        ),
                    );
                }
                // Loosening a return breaks callers that dereference it
                ElementRef::Method(m)
                    if !m.is_constructor
                        && old_null == Nullness::NonNull
                        && new_null == Nullness::Nullable =>
                {
                    self.report_incompatible(
                        &issues::INVALID_NULL_CONVERSION,
                        new,
                        format!(
                            "Attempted to change method return from @NonNull to @Nullable: incompatible change for {}",
                            new.describe(false)
                        ),
                    );
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn compare_class(&mut self, old: &ApiClass, new: &ApiClass) {
        let element = ElementRef::Class(new);
        let described = format!("Class {}", new.qualified_name);

        if old.is_interface != new.is_interface {
            self.report_incompatible(
                &issues::CHANGED_CLASS,
                element,
                format!("{described} changed class/interface declaration"),
            );
            // Nothing below is meaningful across a class/interface flip
            return;
        }

        for old_interface in &old.interfaces {
            if !new
                .interfaces
                .iter()
                .any(|i| i.is_equivalent(old_interface))
            {
                self.report(
                    &issues::REMOVED_INTERFACE,
                    element,
                    format!("{described} no longer implements {old_interface}"),
                );
            }
        }
        for new_interface in &new.interfaces {
            if !old
                .interfaces
                .iter()
                .any(|i| i.is_equivalent(new_interface))
            {
                self.report(
                    &issues::ADDED_INTERFACE,
                    element,
                    format!(
                        "Added interface {new_interface} to {}",
                        new.qualified_name
                    ),
                );
            }
        }

        if old.modifiers.is_abstract != new.modifiers.is_abstract {
            self.report(
                &issues::CHANGED_ABSTRACT,
                element,
                format!("{described} changed abstract qualifier"),
            );
        }
        if old.modifiers.is_static != new.modifiers.is_static {
            self.report(
                &issues::CHANGED_STATIC,
                element,
                format!("{described} changed static qualifier"),
            );
        }

        if !old.modifiers.is_final && new.modifiers.is_final {
            if old.is_instantiable() {
                self.report(
                    &issues::ADDED_FINAL,
                    element,
                    format!("{described} added final qualifier"),
                );
            } else {
                self.report(
                    &issues::ADDED_FINAL_UNINSTANTIABLE,
                    element,
                    format!(
                        "{described} added final qualifier but was previously uninstantiable and therefore could not be subclassed"
                    ),
                );
            }
        } else if old.modifiers.is_final && !new.modifiers.is_final {
            self.report(
                &issues::REMOVED_FINAL,
                element,
                format!("{described} removed final qualifier"),
            );
        }

        if !old.modifiers.is_sealed && new.modifiers.is_sealed {
            self.report_incompatible(
                &issues::ADDED_SEALED,
                element,
                format!(
                    "Cannot add 'sealed' modifier to {}: Incompatible change",
                    element.describe(false)
                ),
            );
        }

        self.check_scope(&old.modifiers, &new.modifiers, element);

        if let Some(old_superclass) = &old.superclass {
            let still_extends = match &new.superclass {
                Some(new_superclass) => {
                    new_superclass.is_equivalent(old_superclass)
                        || self
                            .new_codebase
                            .extends(&new_superclass.erasure(), &old_superclass.erasure())
                }
                None => false,
            };
            if !still_extends {
                let new_spelling = new
                    .superclass
                    .as_ref()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "none".to_string());
                self.report(
                    &issues::CHANGED_SUPERCLASS,
                    element,
                    format!(
                        "{described} superclass changed from {old_superclass} to {new_spelling}"
                    ),
                );
            }
        }

        if old.type_parameters.len() != new.type_parameters.len() {
            self.report(
                &issues::CHANGED_TYPE,
                element,
                format!(
                    "{described} changed number of type parameters from {} to {}",
                    old.type_parameters.len(),
                    new.type_parameters.len()
                ),
            );
        }
    }

    fn compare_method(&mut self, old: &ApiMethod, new: &ApiMethod) {
        let element = ElementRef::Method(new);
        let described = new.describe_kind();

        if let (Some(old_return), Some(new_return)) = (&old.return_type, &new.return_type) {
            if !old_return.is_equivalent(new_return) {
                self.report(
                    &issues::CHANGED_TYPE,
                    element,
                    format!(
                        "{described} has changed return type from {old_return} to {new_return}"
                    ),
                );
            }
        }

        if old.modifiers.is_abstract != new.modifiers.is_abstract {
            let on_interface = self.class_is_interface(self.new_codebase, &new.container);
            // Interfaces may turn an abstract method into a default one
            let tolerated = on_interface && old.modifiers.is_abstract;
            if !tolerated {
                self.report(
                    &issues::CHANGED_ABSTRACT,
                    element,
                    format!("{described} has changed 'abstract' qualifier"),
                );
            }
        }
        if old.modifiers.is_static != new.modifiers.is_static {
            self.report(
                &issues::CHANGED_STATIC,
                element,
                format!("{described} has changed 'static' qualifier"),
            );
        }
        if old.modifiers.is_native != new.modifiers.is_native {
            self.report(
                &issues::CHANGED_NATIVE,
                element,
                format!("{described} has changed 'native' qualifier"),
            );
        }
        if old.modifiers.is_synchronized != new.modifiers.is_synchronized {
            self.report(
                &issues::CHANGED_SYNCHRONIZED,
                element,
                format!("{described} has changed 'synchronized' qualifier"),
            );
        }

        // Finality is judged effectively: a method inside a final class
        // was never overridable to begin with.
        let old_effectively_final =
            old.modifiers.is_final || self.class_is_final(self.old_codebase, &old.container);
        let new_effectively_final =
            new.modifiers.is_final || self.class_is_final(self.new_codebase, &new.container);
        if !old_effectively_final && new_effectively_final {
            self.report(
                &issues::ADDED_FINAL,
                element,
                format!("{described} has added 'final' qualifier"),
            );
        } else if old_effectively_final && !new_effectively_final {
            self.report(
                &issues::REMOVED_FINAL,
                element,
                format!("{described} has removed 'final' qualifier"),
            );
        }

        self.check_scope(&old.modifiers, &new.modifiers, element);

        // finalize() has runtime-managed throws; removals there are exempt
        let finalize_exempt = old.name == "finalize" && old.parameters.is_empty();
        for exception in &old.throws {
            if !new.throws.contains(exception) && !finalize_exempt {
                self.report(
                    &issues::CHANGED_THROWS,
                    element,
                    format!("{described} no longer throws exception {exception}"),
                );
            }
        }
        for exception in &new.throws {
            if !old.throws.contains(exception) {
                self.report(
                    &issues::CHANGED_THROWS,
                    element,
                    format!("{described} added thrown exception {exception}"),
                );
            }
        }
    }

    fn compare_field(&mut self, old: &ApiField, new: &ApiField) {
        let element = ElementRef::Field(new);
        let described = format!("Field {}", new.qualified_name());

        if !old.type_ref.is_equivalent(&new.type_ref) {
            self.report(
                &issues::CHANGED_TYPE,
                element,
                format!(
                    "{described} has changed type from {} to {}",
                    old.type_ref, new.type_ref
                ),
            );
        } else if old.constant_value != new.constant_value {
            let spell =
                |value: &Option<String>| -> String {
                    value.clone().unwrap_or_else(|| "nothing/not constant".to_string())
                };
            self.report(
                &issues::CHANGED_VALUE,
                element,
                format!(
                    "{described} has changed value from {} to {}",
                    spell(&old.constant_value),
                    spell(&new.constant_value)
                ),
            );
        }

        if old.modifiers.is_static != new.modifiers.is_static {
            self.report(
                &issues::CHANGED_STATIC,
                element,
                format!("{described} has changed 'static' qualifier"),
            );
        }
        if old.modifiers.is_transient != new.modifiers.is_transient {
            self.report(
                &issues::CHANGED_TRANSIENT,
                element,
                format!("{described} has changed 'transient' qualifier"),
            );
        }
        if old.modifiers.is_volatile != new.modifiers.is_volatile {
            self.report(
                &issues::CHANGED_VOLATILE,
                element,
                format!("{described} has changed 'volatile' qualifier"),
            );
        }
        if !old.modifiers.is_final && new.modifiers.is_final {
            self.report(
                &issues::ADDED_FINAL,
                element,
                format!("{described} has added 'final' qualifier"),
            );
        } else if old.modifiers.is_final && !new.modifiers.is_final {
            self.report(
                &issues::REMOVED_FINAL,
                element,
                format!("{described} has removed 'final' qualifier"),
            );
        }

        self.check_scope(&old.modifiers, &new.modifiers, element);
    }

    fn compare_parameter(&mut self, old: &ApiParameter, new: &ApiParameter) {
        let element = ElementRef::Parameter(new);

        match (&old.name, &new.name) {
            (Some(_), None) => {
                self.report_incompatible(
                    &issues::PARAMETER_NAME_CHANGE,
                    element,
                    format!(
                        "Attempted to remove parameter name from {}",
                        new.describe_in_method()
                    ),
                );
            }
            (Some(old_name), Some(new_name)) if old_name != new_name => {
                self.report_incompatible(
                    &issues::PARAMETER_NAME_CHANGE,
                    element,
                    format!(
                        "Attempted to change parameter name from {old_name} to {new_name} in method {}",
                        new.container
                    ),
                );
            }
            _ => {}
        }

        if old.default_value.is_some() && new.default_value.is_none() {
            self.report_incompatible(
                &issues::DEFAULT_VALUE_CHANGE,
                element,
                format!(
                    "Attempted to remove default value from {}",
                    new.describe_in_method()
                ),
            );
        }

        if old.is_vararg && !new.is_vararg {
            self.report_incompatible(
                &issues::VARARG_REMOVAL,
                element,
                format!(
                    "Changing from varargs to array is an incompatible change: {}",
                    new.describe_in_method()
                ),
            );
        }
    }

    fn added_item(&mut self, new: ElementRef<'_>) {
        match new {
            ElementRef::Package(_) => {
                self.report(
                    &issues::ADDED_PACKAGE,
                    new,
                    format!("Added {}", new.describe(false)),
                );
            }
            ElementRef::Class(c) => {
                let kind = if c.is_interface {
                    &issues::ADDED_INTERFACE
                } else {
                    &issues::ADDED_CLASS
                };
                self.report(kind, new, format!("Added {}", new.describe(false)));
            }
            ElementRef::Method(m) => {
                // A new abstract method breaks every existing subclass of a
                // class that was already out there; a brand-new class has no
                // subclasses to break.
                let pre_existing = self.old_codebase.find_class(&m.container).is_some();
                if m.modifiers.is_abstract && !m.is_constructor && pre_existing {
                    self.report(
                        &issues::ADDED_ABSTRACT_METHOD,
                        new,
                        format!("Added abstract {}", new.describe(false)),
                    );
                } else {
                    self.report(
                        &issues::ADDED_METHOD,
                        new,
                        format!("Added {}", new.describe(false)),
                    );
                }
            }
            ElementRef::Field(_) => {
                self.report(
                    &issues::ADDED_FIELD,
                    new,
                    format!("Added {}", new.describe(false)),
                );
            }
            ElementRef::Parameter(_) => {}
        }
    }

    fn removed_item(&mut self, old: ElementRef<'_>, from: Option<ElementRef<'_>>) {
        match old {
            ElementRef::Package(_) => {
                self.report(
                    &issues::REMOVED_PACKAGE,
                    old,
                    format!("Removed {}", old.describe(false)),
                );
            }
            ElementRef::Class(c) => {
                let kind = if c.modifiers.deprecated {
                    &issues::REMOVED_DEPRECATED_CLASS
                } else {
                    &issues::REMOVED_CLASS
                };
                self.report(kind, old, format!("Removed {}", old.describe(false)));
            }
            ElementRef::Method(m) => {
                // Transparent removal: an inherited method with the same
                // erased signature still satisfies existing callers.
                if !m.is_constructor {
                    if let Some(ElementRef::Class(parent)) = from {
                        if self
                            .new_codebase
                            .inherited_method(
                                &parent.qualified_name,
                                &m.name,
                                &m.erased_parameter_types(),
                            )
                            .is_some()
                        {
                            return;
                        }
                    }
                }
                self.report(
                    &issues::REMOVED_METHOD,
                    old,
                    format!("Removed {}", old.describe(false)),
                );
            }
            ElementRef::Field(f) => {
                if let Some(ElementRef::Class(parent)) = from {
                    if self
                        .new_codebase
                        .inherited_field(&parent.qualified_name, &f.name)
                        .is_some()
                    {
                        return;
                    }
                }
                self.report(
                    &issues::REMOVED_FIELD,
                    old,
                    format!("Removed {}", old.describe(false)),
                );
            }
            ElementRef::Parameter(_) => {}
        }
    }
}
