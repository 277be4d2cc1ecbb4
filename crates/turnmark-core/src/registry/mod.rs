//! Platform classification and adapter lookup.

mod bindings;
mod platforms;

pub use bindings::BindingRegistry;
pub use platforms::{PlatformRegistry, PlatformRow, MATCH_PATTERNS, PLATFORMS};
