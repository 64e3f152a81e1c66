pub mod error;
pub mod issues;
pub mod model;
pub mod traits;

pub use error::{ApiError, Result};
pub use model::element::{
    ApiClass, ApiField, ApiMethod, ApiPackage, ApiParameter, ElementKind, ElementRef,
};
pub use model::modifiers::{Modifiers, Visibility};
pub use model::types::TypeRef;
