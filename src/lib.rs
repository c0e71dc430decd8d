pub mod api;
pub mod catalog;
pub mod diagnostic;
pub mod scan;
pub mod workspace;

// Re-export public API: `kernel_catalog::generate()` etc.
pub use api::*;
pub use catalog::{Catalog, KernelEntry, TargetEntry};
pub use diagnostic::Diagnostic;
pub use scan::{KernelDecl, Scanner};
