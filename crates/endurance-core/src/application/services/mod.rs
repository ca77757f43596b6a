//! Application services - orchestrate use cases.
//!
//! Each service owns a boxed `Filesystem` and answers one CLI operation:
//! locate a template, materialize it, or scan for usages.

pub mod template_locator;
pub mod tree_materializer;
pub mod usage_scanner;

pub use template_locator::TemplateLocator;
pub use tree_materializer::{MaterializeMode, MaterializeSummary, TreeMaterializer};
pub use usage_scanner::UsageScanner;
