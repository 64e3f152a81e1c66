pub mod compat;
pub mod nullness;

pub use compat::CompatibilityCheck;
pub use nullness::NullnessMigration;
