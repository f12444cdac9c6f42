//! # News Spider Common
//!
//! Shared infrastructure for the news spider crawlers.
//!
//! ## Modules
//!
//! - `logging` - Logger factory: daily-rotating file sink plus optional console sink
//! - `registry` - Process-wide single-instance registry

pub mod logging;
pub mod registry;

// Re-export commonly used types
pub use logging::{ConsoleMode, LogSetupError, Logger};
pub use registry::InstanceRegistry;
