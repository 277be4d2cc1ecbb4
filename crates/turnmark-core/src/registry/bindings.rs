//! Registry of per-platform locator/router bindings.

use dashmap::DashMap;

use turnmark_protocols::{PlatformBinding, PlatformId};

use crate::error::DispatchError;

/// Maps each platform to the capability pair that serves it.
pub struct BindingRegistry {
    bindings: DashMap<PlatformId, PlatformBinding>,
}

impl BindingRegistry {
    /// Create a new binding registry.
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
        }
    }

    /// Register a binding under the platform its router reports.
    ///
    /// Returns the binding it replaced, if any.
    pub fn register(&self, binding: PlatformBinding) -> Option<PlatformBinding> {
        self.bindings.insert(binding.platform(), binding)
    }

    /// Unregister a platform.
    pub fn unregister(&self, platform: PlatformId) -> Result<(), DispatchError> {
        self.bindings
            .remove(&platform)
            .ok_or(DispatchError::UnregisteredPlatform(platform))?;
        Ok(())
    }

    /// Get the binding for a platform.
    pub fn get(&self, platform: PlatformId) -> Result<PlatformBinding, DispatchError> {
        self.bindings
            .get(&platform)
            .map(|b| b.clone())
            .ok_or(DispatchError::UnregisteredPlatform(platform))
    }

    pub fn contains(&self, platform: PlatformId) -> bool {
        self.bindings.contains_key(&platform)
    }

    /// Registered platforms, sorted.
    pub fn platforms(&self) -> Vec<PlatformId> {
        let mut ids: Vec<_> = self.bindings.iter().map(|b| *b.key()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "bindings_tests.rs"]
mod tests;
