//! Game state and the queries the renderer and input layer use
//!
//! The state owns the player and the circle field exclusively; the renderer
//! only ever receives copies.

use glam::DVec2;

use super::circle::Circle;
use super::field::CircleField;
use super::input::{HeldKeys, Key};
use super::player::{Player, PlayerSnapshot};
use super::tick::{TickInput, tick};
use crate::error::ConfigError;
use crate::renderer::{Rect, Scene, ViewportConfig};
use crate::settings::Settings;

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) player: Player,
    pub(crate) field: CircleField,
    held: HeldKeys,
    viewport: ViewportConfig,
    /// Completed ticks
    pub(crate) time_ticks: u64,
}

impl GameState {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let start = settings.start;
        let player = Player::new(DVec2::new(start.x, start.y), start.angle, settings.player)?;
        let field = CircleField::new(settings.field, settings.seed)?;
        log::info!(
            "New session: seed {}, {} circles per band, range {}",
            settings.seed,
            settings.field.circles_per_band,
            settings.player.range
        );

        Ok(Self {
            player,
            field,
            held: HeldKeys::new(),
            viewport: ViewportConfig::default(),
            time_ticks: 0,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn field(&self) -> &CircleField {
        &self.field
    }

    pub fn ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn player_snapshot(&self) -> PlayerSnapshot {
        self.player.snapshot()
    }

    /// Circles of the band the player is in and of both neighbours
    pub fn relevant_circles(&mut self) -> Vec<Circle> {
        let screen = self.player.screen_index();
        self.field.bands(screen - 1, screen + 1)
    }

    /// Key press from the input layer; unknown names are ignored
    pub fn on_key_press(&mut self, name: &str) {
        match Key::from_name(name) {
            Some(key) => self.press(key),
            None => log::trace!("Ignoring key press {:?}", name),
        }
    }

    /// Key release from the input layer; unknown names are ignored
    pub fn on_key_release(&mut self, name: &str) {
        match Key::from_name(name) {
            Some(key) => self.release(key),
            None => log::trace!("Ignoring key release {:?}", name),
        }
    }

    /// Rotation keys turn the player once per press; repeats of a held key do nothing
    pub fn press(&mut self, key: Key) {
        if !self.held.press(key) {
            return;
        }
        if let Some(delta) = key.rotation() {
            self.player.rotate(delta);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.release(key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.held.is_pressed(key)
    }

    pub fn held_keys(&self) -> &HeldKeys {
        &self.held
    }

    /// Window resize
    pub fn set_viewport_config(&mut self, config: ViewportConfig) {
        self.viewport = config;
    }

    pub fn viewport(&self) -> ViewportConfig {
        self.viewport
    }

    /// Screen frame: game unit square centered in the window
    pub fn viewport_scene(&self) -> Scene {
        self.viewport.scene()
    }

    /// Screen frame followed by the player-centered frame
    pub fn player_scene(&self) -> Scene {
        self.viewport_scene().then(&self.player.scene())
    }

    /// Column behind the field, in screen-frame coordinates
    pub fn safe_area(&self) -> Rect {
        Rect::new(
            DVec2::new(0.5 - self.player.x(), -1.0),
            DVec2::new(1.0, 3.0),
        )
    }

    /// Advance one tick using the currently held keys
    pub fn tick(&mut self) -> bool {
        let input = TickInput::from_held(&self.held);
        tick(self, &input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HookState;
    use std::f64::consts::{PI, TAU};

    fn state() -> GameState {
        GameState::new(&Settings::with_seed(5)).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let mut settings = Settings::default();
        settings.player.range = 0.0;
        assert!(GameState::new(&settings).is_err());
    }

    #[test]
    fn test_relevant_circles_cover_three_bands() {
        let mut s = state();
        let circles = s.relevant_circles();
        assert_eq!(circles.len(), 6);
        assert_eq!(circles[0].band(), -1);
        assert_eq!(circles[2].band(), 0);
        assert_eq!(circles[5].band(), 1);
        assert_eq!(s.field().generated_bands(), 3);
    }

    #[test]
    fn test_rotation_keys() {
        let mut s = state();
        s.on_key_press("rotate_right");
        assert!((s.player().angle() - PI / 12.0).abs() < 1e-12);
        assert!(s.is_pressed(Key::RotateRight));

        // Held key repeats are ignored
        s.on_key_press("rotate_right");
        assert!((s.player().angle() - PI / 12.0).abs() < 1e-12);

        s.on_key_release("rotate_right");
        assert!(!s.is_pressed(Key::RotateRight));

        s.on_key_press("rotate_left");
        s.on_key_release("rotate_left");
        s.on_key_press("rotate_left");
        assert!((s.player().angle() - (TAU - PI / 12.0)).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut s = state();
        let before = s.player_snapshot();
        s.on_key_press("F13");
        s.on_key_release("F13");
        assert!(s.held_keys().is_empty());
        assert_eq!(s.player_snapshot(), before);
    }

    #[test]
    fn test_hook_key_does_not_rotate() {
        let mut s = state();
        s.on_key_press("hook");
        assert_eq!(s.player().angle(), 0.0);
        assert!(s.is_pressed(Key::Hook));
        assert_eq!(*s.player().hook_state(), HookState::Free);
    }

    #[test]
    fn test_viewport_and_scenes() {
        let mut s = state();
        s.set_viewport_config(ViewportConfig::from_window(800.0, 600.0));
        assert_eq!(s.viewport(), ViewportConfig::new(100.0, 0.0, 600.0, -600.0));

        // Player sits at the middle of the window in the player frame
        let center = s
            .player_scene()
            .affine()
            .transform_point2(s.player().position());
        assert!((center - DVec2::new(400.0, 300.0)).length() < 1e-9);
        assert_eq!(s.player_scene().steps().len(), 4);
    }

    #[test]
    fn test_safe_area_follows_player() {
        let s = state();
        let area = s.safe_area();
        assert_eq!(area.origin, DVec2::new(0.0, -1.0));
        assert_eq!(area.size, DVec2::new(1.0, 3.0));
    }
}
