//! Command implementations.

pub mod analyze;
pub mod config;
pub mod taxonomy;

pub use self::analyze::execute_analyze;
pub use self::config::execute_config;
pub use self::taxonomy::execute_taxonomy;
