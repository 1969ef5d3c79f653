//! Circle obstacles
//!
//! Circles live in game space: `x` spans the unit-wide play field, `y` grows
//! as the player progresses. A circle never changes after generation, so the
//! rest of the simulation passes copies around freely.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An immutable circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    /// # Panics
    ///
    /// Panics if `radius` is not a positive finite number.
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        assert!(
            radius > 0.0 && radius.is_finite(),
            "circle radius must be positive, got {radius}"
        );
        Self { x, y, radius }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Band index this circle was generated for
    #[inline]
    pub fn band(&self) -> i64 {
        self.y.floor() as i64
    }
}

/// Ordered circles sharing one band index
pub type CircleBatch = Vec<Circle>;
