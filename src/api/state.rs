//! Application state for the attendance rule API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, LaborRules};

/// Shared application state.
///
/// Holds the loaded rule configuration, shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The loaded rule configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Shorthand for the loaded rules.
    pub fn rules(&self) -> &LaborRules {
        self.config.rules()
    }
}
