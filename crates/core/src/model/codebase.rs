use crate::error::Result;
use apiscope_api::model::element::{ApiClass, ApiField, ApiMethod, ApiPackage};
use apiscope_api::traits::InheritedLookup;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::collections::HashSet;

/// One snapshot of a codebase's API surface: packages owning classes
/// owning members. Built fully in memory before a comparison pass and
/// discarded afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Codebase {
    pub description: SmolStr,
    pub packages: Vec<ApiPackage>,
}

impl Codebase {
    pub fn new(description: impl Into<SmolStr>) -> Self {
        Codebase {
            description: description.into(),
            packages: Vec::new(),
        }
    }

    pub fn add_package(&mut self, package: ApiPackage) -> &mut Self {
        self.packages.push(package);
        self
    }

    pub fn find_package(&self, name: &str) -> Option<&ApiPackage> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Look up a class (or nested class) by qualified name.
    pub fn find_class(&self, qualified_name: &str) -> Option<&ApiClass> {
        self.packages.iter().find_map(|p| {
            p.classes
                .iter()
                .find_map(|c| find_class_in(c, qualified_name))
        })
    }

    /// True when `class_fqn` still has `ancestor_fqn` somewhere in its
    /// superclass chain within this snapshot.
    pub fn extends(&self, class_fqn: &str, ancestor_fqn: &str) -> bool {
        let mut seen: HashSet<String> = HashSet::new();
        let mut current = class_fqn.to_string();
        loop {
            if current == ancestor_fqn {
                return true;
            }
            if !seen.insert(current.clone()) {
                return false;
            }
            match self.find_class(&current).and_then(|c| c.superclass.as_ref()) {
                Some(superclass) => current = superclass.erasure(),
                None => return false,
            }
        }
    }

    /// Debug dump of the snapshot as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Codebase> {
        Ok(serde_json::from_str(json)?)
    }

    /// Classes reachable through `class`'s superclass chain and implemented
    /// interfaces, excluding `class` itself.
    fn supertypes<'a>(&'a self, class: &'a ApiClass) -> Vec<&'a ApiClass> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: Vec<String> = Vec::new();
        let mut out = Vec::new();
        if let Some(superclass) = &class.superclass {
            queue.push(superclass.erasure());
        }
        queue.extend(class.interfaces.iter().map(|i| i.erasure()));
        while let Some(fqn) = queue.pop() {
            let Some(found) = self.find_class(&fqn) else {
                continue;
            };
            if !seen.insert(found.qualified_name.as_str()) {
                continue;
            }
            if let Some(superclass) = &found.superclass {
                queue.push(superclass.erasure());
            }
            queue.extend(found.interfaces.iter().map(|i| i.erasure()));
            out.push(found);
        }
        out
    }
}

fn find_class_in<'a>(class: &'a ApiClass, qualified_name: &str) -> Option<&'a ApiClass> {
    if class.qualified_name == qualified_name {
        return Some(class);
    }
    class
        .classes
        .iter()
        .find_map(|nested| find_class_in(nested, qualified_name))
}

impl InheritedLookup for Codebase {
    fn inherited_method(
        &self,
        container: &str,
        name: &str,
        erased_parameter_types: &[String],
    ) -> Option<&ApiMethod> {
        let class = self.find_class(container)?;
        for supertype in self.supertypes(class) {
            let found = supertype.methods.iter().find(|m| {
                m.name == name
                    && m.modifiers.visibility.is_accessible()
                    && m.erased_parameter_types() == erased_parameter_types
            });
            if found.is_some() {
                return found;
            }
        }
        None
    }

    fn inherited_field(&self, container: &str, name: &str) -> Option<&ApiField> {
        let class = self.find_class(container)?;
        for supertype in self.supertypes(class) {
            let found = supertype
                .fields
                .iter()
                .find(|f| f.name == name && f.modifiers.visibility.is_accessible());
            if found.is_some() {
                return found;
            }
        }
        None
    }
}
