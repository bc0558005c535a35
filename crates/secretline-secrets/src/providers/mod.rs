//! Built-in secret store backends.
//!
//! Each backend exposes a `register` hook that adds its provider to a
//! [`ProviderRegistry`]; [`register_builtin`] runs all of them.

pub mod aws;

use crate::registry::ProviderRegistry;

/// Register every built-in backend.
pub fn register_builtin(registry: &mut ProviderRegistry) {
    aws::register(registry);
}
