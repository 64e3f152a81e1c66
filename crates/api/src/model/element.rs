use super::annotations::{Annotation, Nullness, nullness_of};
use super::modifiers::Modifiers;
use super::types::TypeRef;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// One package of the API surface, owning its top-level classes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiPackage {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub classes: Vec<ApiClass>,
    pub hidden: bool,
}

impl ApiPackage {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        ApiPackage {
            name: name.into(),
            modifiers: Modifiers::public(),
            annotations: Vec::new(),
            classes: Vec::new(),
            hidden: false,
        }
    }
}

/// A class or interface. Nested classes are owned here; `package` and
/// `containing_class` are navigation handles, not back-references.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiClass {
    /// Simple name, dotted for nested classes (e.g. "Outer.Inner")
    pub name: SmolStr,
    pub qualified_name: SmolStr,
    pub package: SmolStr,
    pub containing_class: Option<SmolStr>,
    pub is_interface: bool,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub superclass: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub type_parameters: Vec<SmolStr>,
    pub constructors: Vec<ApiMethod>,
    pub methods: Vec<ApiMethod>,
    pub fields: Vec<ApiField>,
    pub classes: Vec<ApiClass>,
    pub hidden: bool,
}

impl ApiClass {
    pub fn new(package: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        let package = package.into();
        let name = name.into();
        let qualified_name = SmolStr::new(format!("{package}.{name}"));
        ApiClass {
            name,
            qualified_name,
            package,
            containing_class: None,
            is_interface: false,
            modifiers: Modifiers::public(),
            annotations: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            type_parameters: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            classes: Vec::new(),
            hidden: false,
        }
    }

    /// A class is subclass-constructible only while it exposes at least one
    /// accessible constructor.
    pub fn is_instantiable(&self) -> bool {
        self.constructors
            .iter()
            .any(|c| c.modifiers.visibility.is_accessible())
    }
}

/// A method, or a constructor when `is_constructor` is set (constructors
/// have no return type).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiMethod {
    pub name: SmolStr,
    /// Qualified name of the declaring class
    pub container: SmolStr,
    pub is_constructor: bool,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<ApiParameter>,
    pub throws: Vec<SmolStr>,
    pub type_parameters: Vec<SmolStr>,
    pub hidden: bool,
}

impl ApiMethod {
    pub fn new(container: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        ApiMethod {
            name: name.into(),
            container: container.into(),
            is_constructor: false,
            modifiers: Modifiers::public(),
            annotations: Vec::new(),
            return_type: None,
            parameters: Vec::new(),
            throws: Vec::new(),
            type_parameters: Vec::new(),
            hidden: false,
        }
    }

    pub fn constructor(container: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        let mut m = ApiMethod::new(container, name);
        m.is_constructor = true;
        m
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.container, self.name)
    }

    /// Erased parameter-type sequence; the identity of an overload.
    pub fn erased_parameter_types(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.type_ref.erasure()).collect()
    }

    /// "name(Type1,Type2)" form used in report messages and inherited
    /// member matching.
    pub fn erased_signature(&self) -> String {
        format!("{}({})", self.name, self.erased_parameter_types().join(","))
    }

    pub fn nullness(&self) -> Option<Nullness> {
        nullness_of(&self.annotations)
    }

    /// "Method a.b.C.m(int)" / "Constructor a.b.C.C()", for report
    /// messages that lead with the kind word.
    pub fn describe_kind(&self) -> String {
        let kind = if self.is_constructor {
            "Constructor"
        } else {
            "Method"
        };
        format!("{kind} {}.{}", self.container, self.erased_signature())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiField {
    pub name: SmolStr,
    /// Qualified name of the declaring class
    pub container: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub type_ref: TypeRef,
    /// Compile-time constant value in source spelling, if any
    pub constant_value: Option<String>,
    pub hidden: bool,
}

impl ApiField {
    pub fn new(
        container: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        type_ref: TypeRef,
    ) -> Self {
        ApiField {
            name: name.into(),
            container: container.into(),
            modifiers: Modifiers::public(),
            annotations: Vec::new(),
            type_ref,
            constant_value: None,
            hidden: false,
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.container, self.name)
    }

    pub fn nullness(&self) -> Option<Nullness> {
        nullness_of(&self.annotations)
    }
}

/// A method parameter. Identity within a method is the positional index;
/// the public name is optional (signature snapshots may omit it).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiParameter {
    pub name: Option<SmolStr>,
    pub index: usize,
    pub type_ref: TypeRef,
    pub is_vararg: bool,
    pub default_value: Option<String>,
    pub annotations: Vec<Annotation>,
    /// Qualified name of the owning method, for report messages
    pub container: SmolStr,
}

impl ApiParameter {
    pub fn new(container: impl Into<SmolStr>, index: usize, type_ref: TypeRef) -> Self {
        ApiParameter {
            name: None,
            index,
            type_ref,
            is_vararg: false,
            default_value: None,
            annotations: Vec::new(),
            container: container.into(),
        }
    }

    /// Source spelling of the parameter type, vararg-aware.
    pub fn type_string(&self) -> String {
        if self.is_vararg {
            match &self.type_ref {
                TypeRef::Array {
                    element,
                    dimensions: 1,
                } => format!("{element}..."),
                other => format!("{other}..."),
            }
        } else {
            self.type_ref.to_string()
        }
    }

    pub fn nullness(&self) -> Option<Nullness> {
        nullness_of(&self.annotations)
    }

    /// "parameter s1 in a.b.C.m", for report messages.
    pub fn describe_in_method(&self) -> String {
        match &self.name {
            Some(name) => format!("parameter {} in {}", name, self.container),
            None => format!("parameter {} in {}", self.index, self.container),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Package,
    Class,
    Constructor,
    Method,
    Field,
    Parameter,
}

/// Borrowed view of one element of a snapshot: the closed sum the
/// comparator, diff engine and visitors dispatch over.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Package(&'a ApiPackage),
    Class(&'a ApiClass),
    Method(&'a ApiMethod),
    Field(&'a ApiField),
    Parameter(&'a ApiParameter),
}

impl<'a> ElementRef<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Package(_) => ElementKind::Package,
            ElementRef::Class(_) => ElementKind::Class,
            ElementRef::Method(m) if m.is_constructor => ElementKind::Constructor,
            ElementRef::Method(_) => ElementKind::Method,
            ElementRef::Field(_) => ElementKind::Field,
            ElementRef::Parameter(_) => ElementKind::Parameter,
        }
    }

    pub fn modifiers(&self) -> Option<&'a Modifiers> {
        match self {
            ElementRef::Package(p) => Some(&p.modifiers),
            ElementRef::Class(c) => Some(&c.modifiers),
            ElementRef::Method(m) => Some(&m.modifiers),
            ElementRef::Field(f) => Some(&f.modifiers),
            ElementRef::Parameter(_) => None,
        }
    }

    pub fn annotations(&self) -> &'a [Annotation] {
        match self {
            ElementRef::Package(p) => &p.annotations,
            ElementRef::Class(c) => &c.annotations,
            ElementRef::Method(m) => &m.annotations,
            ElementRef::Field(f) => &f.annotations,
            ElementRef::Parameter(p) => &p.annotations,
        }
    }

    pub fn nullness(&self) -> Option<Nullness> {
        nullness_of(self.annotations())
    }

    /// Human reference to the element, e.g. "method test.pkg.Foo.bar(int)".
    /// `capitalize` upcases the leading kind word for sentence starts.
    pub fn describe(&self, capitalize: bool) -> String {
        let described = match self {
            ElementRef::Package(p) => format!("package {}", p.name),
            ElementRef::Class(c) if c.is_interface => {
                format!("interface {}", c.qualified_name)
            }
            ElementRef::Class(c) => format!("class {}", c.qualified_name),
            ElementRef::Method(m) if m.is_constructor => {
                format!("constructor {}.{}", m.container, m.erased_signature())
            }
            ElementRef::Method(m) => {
                format!("method {}.{}", m.container, m.erased_signature())
            }
            ElementRef::Field(f) => format!("field {}", f.qualified_name()),
            ElementRef::Parameter(p) => match &p.name {
                Some(name) => format!("parameter {} in {}", name, p.container),
                None => format!("parameter {} in {}", p.index, p.container),
            },
        };
        if capitalize {
            let mut chars = described.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => described,
            }
        } else {
            described
        }
    }
}
