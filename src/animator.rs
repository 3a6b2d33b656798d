//! Animator parameter sink.
//!
//! Moves publish named parameters here once per tick; the host binds them to
//! its animation graph however it likes. Writes cannot fail, and callers skip
//! the write entirely when a parameter name is unconfigured (empty).

use bevy::prelude::*;
use bevy::utils::HashMap;

/// Named animator parameters published by the move system.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct AnimatorParams {
    bools: HashMap<String, bool>,
    floats: HashMap<String, f32>,
}

impl AnimatorParams {
    /// Create an empty parameter sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a boolean parameter.
    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.bools.insert(name.into(), value);
    }

    /// Publish a float parameter.
    pub fn set_float(&mut self, name: impl Into<String>, value: f32) {
        self.floats.insert(name.into(), value);
    }

    /// Read a boolean parameter, if it has ever been published.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    /// Read a float parameter, if it has ever been published.
    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }
}
