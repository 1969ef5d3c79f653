//! Orbit - a grappling-hook arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player state machine, circle field, game loop)
//! - `renderer`: Viewport transform and drawing-surface scoping
//! - `settings`: Data-driven configuration
//! - `error`: Configuration errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use glam::DVec2;
use std::f64::consts::TAU;

/// Game configuration constants
pub mod consts {
    use std::f64::consts::PI;

    /// Nominal tick rate of the external timer
    pub const FPS: u32 = 60;

    /// Heading change per rotation key press (radians)
    pub const ROTATE_STEP: f64 = PI / 12.0;

    /// Per-axis distance under which an armed hook engages
    pub const HOOK_DIST_TOLERANCE: f64 = 0.01;
    /// Substituted for a heading of exactly 0 when intersecting hook lines
    pub const NATURAL_HOOK_FALLBACK_ANGLE: f64 = PI / 120.0;
    /// Orbit radius floor (player sitting on a circle center)
    pub const MIN_ORBIT_RADIUS: f64 = 1e-9;

    /// Smallest radius the field generator will draw
    pub const MIN_CIRCLE_RADIUS: f64 = 0.05;

    /// Player defaults
    pub const PLAYER_SIZE: f64 = 0.02;
    pub const PLAYER_RANGE: f64 = 0.8;
    pub const PLAYER_SPEED: f64 = 1.0 / FPS as f64;

    /// Field defaults
    pub const CIRCLES_PER_BAND: u32 = 2;
    pub const BAND_MARGIN: f64 = 0.2;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Heading unit vector for an angle measured clockwise from the vertical axis
#[inline]
pub fn heading_vector(angle: f64) -> DVec2 {
    DVec2::new(angle.sin(), -angle.cos())
}
