//! Player motion and hook targeting
//!
//! The player flies in a straight line along its heading until the hook key
//! picks a target circle. From there the hook goes through two stages:
//! - Targeting: target chosen, still flying straight toward the natural hook point
//! - Hooked: position constrained to a circle around the target every tick
//!
//! Headings are measured clockwise from the vertical axis and kept in [0, 2π).

use std::f64::consts::PI;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use crate::consts::*;
use crate::error::{ConfigError, ensure_positive};
use crate::renderer::{Scene, TransformStep};
use crate::{heading_vector, normalize_angle};

/// Fixed player tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Glyph radius (rendering only)
    pub size: f64,
    /// Maximum distance at which a circle can be hooked
    pub range: f64,
    /// Distance covered per tick
    pub speed: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: PLAYER_SIZE,
            range: PLAYER_RANGE,
            speed: PLAYER_SPEED,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("size", self.size)?;
        ensure_positive("range", self.range)?;
        ensure_positive("speed", self.speed)?;
        Ok(())
    }
}

/// Which way the player orbits a hooked circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationSign {
    Positive,
    Negative,
}

impl RotationSign {
    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            RotationSign::Positive => 1.0,
            RotationSign::Negative => -1.0,
        }
    }
}

/// Hook state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HookState {
    /// Straight flight, no target
    Free,
    /// Target armed, waiting to reach the natural hook point
    Targeting { circle: Circle, rotation: RotationSign },
    /// Orbiting the target
    Hooked { circle: Circle, rotation: RotationSign },
}

impl HookState {
    pub fn is_free(&self) -> bool {
        matches!(self, HookState::Free)
    }

    pub fn is_engaged(&self) -> bool {
        matches!(self, HookState::Hooked { .. })
    }

    /// Target circle and orbit direction, armed or engaged
    pub fn hook_data(&self) -> Option<(Circle, RotationSign)> {
        match *self {
            HookState::Free => None,
            HookState::Targeting { circle, rotation } | HookState::Hooked { circle, rotation } => {
                Some((circle, rotation))
            }
        }
    }
}

/// Read-only copy of the player handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub position: DVec2,
    pub previous_position: DVec2,
    pub angle: f64,
    pub size: f64,
    pub hook_state: HookState,
}

/// The player glyph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pos: DVec2,
    prev_pos: DVec2,
    angle: f64,
    config: PlayerConfig,
    hook: HookState,
}

impl Player {
    pub fn new(position: DVec2, angle: f64, config: PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if !position.is_finite() {
            return Err(ConfigError::NonFinite { field: "position" });
        }
        if !angle.is_finite() {
            return Err(ConfigError::NonFinite { field: "angle" });
        }
        Ok(Self {
            pos: position,
            prev_pos: position,
            angle: normalize_angle(angle),
            config,
            hook: HookState::Free,
        })
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.pos
    }

    #[inline]
    pub fn previous_position(&self) -> DVec2 {
        self.prev_pos
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn hook_state(&self) -> &HookState {
        &self.hook
    }

    /// Orbit constraint is active
    pub fn is_engaged(&self) -> bool {
        self.hook.is_engaged()
    }

    /// Band the player currently occupies
    pub fn screen_index(&self) -> i64 {
        self.pos.y.trunc() as i64
    }

    pub fn heading_vector(&self) -> DVec2 {
        heading_vector(self.angle)
    }

    fn set_angle(&mut self, angle: f64) {
        self.angle = normalize_angle(angle);
    }

    /// Rotate heading, clockwise positive
    pub fn rotate(&mut self, delta: f64) {
        debug_assert!(delta.is_finite(), "rotation delta must be finite, got {delta}");
        self.set_angle(self.angle + delta);
    }

    fn set_position(&mut self, pos: DVec2) {
        self.prev_pos = self.pos;
        self.pos = pos;
    }

    pub fn distance_to(&self, circle: &Circle) -> f64 {
        self.pos.distance(circle.center())
    }

    /// Nearest circle, first one wins on ties
    pub fn candidate_target<'a>(&self, circles: &'a [Circle]) -> Option<&'a Circle> {
        circles
            .iter()
            .min_by(|a, b| self.distance_to(a).total_cmp(&self.distance_to(b)))
    }

    /// Orbit direction the player would take around `circle`
    pub fn rotation_sign(&self, circle: &Circle) -> RotationSign {
        let offset = self.pos - circle.center();
        let heading = self.heading_vector();
        if offset.x * heading.y + offset.y * heading.x > 0.0 {
            RotationSign::Positive
        } else {
            RotationSign::Negative
        }
    }

    /// Foot of the perpendicular from the circle center onto the flight line
    pub fn natural_hook_point(&self, circle: &Circle) -> DVec2 {
        let angle = if self.angle == 0.0 {
            NATURAL_HOOK_FALLBACK_ANGLE
        } else {
            self.angle
        };

        // Flight line
        let slope = 1.0 / angle.tan();
        let intercept = self.pos.y - slope * self.pos.x;

        // Orthogonal line through the circle center
        let slope_circle = -angle.tan();
        let intercept_circle = circle.y - slope_circle * circle.x;

        let hx = (intercept_circle - intercept) / (slope - slope_circle);
        DVec2::new(hx, slope * hx + intercept)
    }

    /// Pick a hook target among `circles` and update the hook state.
    ///
    /// Does nothing while engaged. From `Free`, the nearest circle within
    /// range is armed; if its natural hook point is not on the current path
    /// the heading snaps to the tangent and the hook engages at once. An
    /// armed hook engages when the player reaches the natural hook point.
    ///
    /// # Panics
    ///
    /// Panics if `circles` is empty.
    pub fn find_target(&mut self, circles: &[Circle]) {
        assert!(
            !circles.is_empty(),
            "find_target requires at least one candidate circle"
        );
        if self.hook.is_engaged() {
            return;
        }

        if self.hook.is_free() {
            let Some(&target) = self.candidate_target(circles) else {
                return;
            };
            let rotation = self.rotation_sign(&target);

            if self.distance_to(&target) < self.config.range {
                let hook_point = self.natural_hook_point(&target);
                let along = (hook_point - self.pos).dot(self.heading_vector());

                if along <= 0.0 {
                    log::debug!(
                        "Armed hook on circle ({:.3}, {:.3}), rotation {:?}",
                        target.x,
                        target.y,
                        rotation
                    );
                    self.hook = HookState::Targeting {
                        circle: target,
                        rotation,
                    };
                } else {
                    let offset = self.pos - target.center();
                    let base = offset.y.atan2(offset.x);
                    self.set_angle(0.5 * (1.0 + rotation.factor()) * PI - base);
                    log::debug!(
                        "Re-aimed onto circle ({:.3}, {:.3}), heading {:.3}",
                        target.x,
                        target.y,
                        self.angle
                    );
                    self.hook = HookState::Hooked {
                        circle: target,
                        rotation,
                    };
                }
            }
        }

        if let HookState::Targeting { circle, rotation } = self.hook {
            let gap = (self.natural_hook_point(&circle) - self.pos).abs();
            if gap.x < HOOK_DIST_TOLERANCE && gap.y < HOOK_DIST_TOLERANCE {
                log::debug!("Hook engaged at ({:.3}, {:.3})", self.pos.x, self.pos.y);
                self.hook = HookState::Hooked { circle, rotation };
            }
        }
    }

    /// Drop any target and return to free flight
    pub fn reset_hook(&mut self) {
        if !self.hook.is_free() {
            log::debug!("Hook released");
        }
        self.hook = HookState::Free;
    }

    /// Advance one tick: orbit when engaged, straight flight otherwise
    pub fn advance(&mut self) {
        let next = match self.hook {
            HookState::Hooked { circle, rotation } => {
                let sign = rotation.factor();
                // Radius is taken before the heading update
                let dist = self.distance_to(&circle).max(MIN_ORBIT_RADIUS);
                self.rotate(sign * self.config.speed / dist);
                circle.center() + sign * dist * DVec2::new(-self.angle.cos(), self.angle.sin())
            }
            HookState::Free | HookState::Targeting { .. } => {
                self.pos + self.config.speed * DVec2::new(self.angle.sin(), self.angle.cos())
            }
        };
        self.set_position(next);
    }

    /// Circle of the armed or engaged hook
    pub fn target(&self) -> Option<Circle> {
        self.hook.hook_data().map(|(circle, _)| circle)
    }

    /// Hooked circle and current orbit radius, only while engaged
    pub fn hook_zone(&self) -> Option<(Circle, f64)> {
        match self.hook {
            HookState::Hooked { circle, .. } => Some((circle, self.distance_to(&circle))),
            _ => None,
        }
    }

    /// Segment covered during the last tick
    pub fn trail(&self) -> (DVec2, DVec2) {
        (self.prev_pos, self.pos)
    }

    /// Player-centered frame: keeps the player at the middle of the unit square
    pub fn scene(&self) -> Scene {
        Scene::new([TransformStep::Translate(DVec2::new(
            0.5 - self.pos.x,
            0.5 - self.pos.y,
        ))])
    }

    /// Outline of the glyph in game space: a half circle of radius `size`
    /// capped by two flank segments pointing away from the heading
    pub fn glyph_outline(&self, arc_points: usize) -> Vec<DVec2> {
        let size = self.config.size;
        let arc_points = arc_points.max(2);
        let mut local = Vec::with_capacity(arc_points + 2);

        local.push(DVec2::new(size, -1.5 * size));
        for i in 0..arc_points {
            let t = i as f64 / (arc_points - 1) as f64 * PI;
            local.push(DVec2::new(size * t.cos(), size * t.sin()));
        }
        local.push(DVec2::new(-size, -1.5 * size));

        let (sin, cos) = (-self.angle).sin_cos();
        local
            .into_iter()
            .map(|p| self.pos + DVec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos))
            .collect()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.pos,
            previous_position: self.prev_pos,
            angle: self.angle,
            size: self.config.size,
            hook_state: self.hook,
        }
    }
}
