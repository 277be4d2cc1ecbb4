//! # turnmark Config
//!
//! Configuration management for turnmark: relocation timings, the browser
//! endpoint, the bookmark store location and logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
