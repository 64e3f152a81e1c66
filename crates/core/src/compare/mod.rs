pub mod comparator;
pub mod engine;
pub mod tree;
pub mod visitor;

pub use engine::CodebaseComparator;
pub use tree::{ApiTree, build_forest};
pub use visitor::ComparisonVisitor;
