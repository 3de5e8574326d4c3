//! Command implementations.

pub mod config;
pub mod parse;

pub use self::config::execute_config;
pub use self::parse::execute_parse;
