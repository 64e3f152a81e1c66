pub mod annotations;
pub mod element;
pub mod modifiers;
pub mod types;

pub use annotations::Annotation;
pub use element::{ApiClass, ApiField, ApiMethod, ApiPackage, ApiParameter, ElementKind, ElementRef};
pub use modifiers::{Modifiers, Visibility};
pub use types::TypeRef;
