//! Input axis binding.
//!
//! The host polls its input devices (keyboard, gamepad, AI, replay) and
//! writes named signed axes here each frame; moves only ever read. This keeps
//! device handling entirely on the host side while moves stay driveable from
//! tests with plain floats.

use bevy::prelude::*;
use bevy::utils::HashMap;

/// Named signed input axes, conventionally in `[-1, 1]`.
///
/// An axis that was never written reads as `0.0`.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct InputAxes {
    axes: HashMap<String, f32>,
}

impl InputAxes {
    /// Create an empty axis set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an axis value.
    pub fn set_axis(&mut self, name: impl Into<String>, value: f32) {
        self.axes.insert(name.into(), value);
    }

    /// Read an axis value. Unset axes read as `0.0`.
    pub fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).copied().unwrap_or(0.0)
    }

    /// Reset all axes to `0.0`.
    pub fn clear(&mut self) {
        self.axes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_axis_reads_zero() {
        let axes = InputAxes::new();
        assert_eq!(axes.axis("Horizontal"), 0.0);
    }

    #[test]
    fn set_axis_round_trips() {
        let mut axes = InputAxes::new();
        axes.set_axis("Vertical", -0.5);
        assert_eq!(axes.axis("Vertical"), -0.5);

        axes.set_axis("Vertical", 1.0);
        assert_eq!(axes.axis("Vertical"), 1.0);
    }

    #[test]
    fn clear_resets_all_axes() {
        let mut axes = InputAxes::new();
        axes.set_axis("Horizontal", 1.0);
        axes.set_axis("Vertical", -1.0);

        axes.clear();
        assert_eq!(axes.axis("Horizontal"), 0.0);
        assert_eq!(axes.axis("Vertical"), 0.0);
    }
}
