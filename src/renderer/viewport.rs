//! Window-to-game mapping
//!
//! The game lives in a unit square, y up. The viewport centers that square in
//! the window at 1:1 aspect and flips the vertical axis.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::scene::{Scene, TransformStep};

/// Translation and scale computed from the window size.
///
/// All zero until the first resize, like an unconfigured window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ViewportConfig {
    pub fn new(offset_x: f64, offset_y: f64, scale_x: f64, scale_y: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            scale_x,
            scale_y,
        }
    }

    /// Fit the unit square into a `width` x `height` window, centered along
    /// the longer axis
    pub fn from_window(width: f64, height: f64) -> Self {
        let min_dim = width.min(height);
        let max_dim = width.max(height);
        let margin = (max_dim - min_dim) / 2.0;

        let offset_x = if max_dim == width { margin } else { 0.0 };
        let offset_y = if max_dim == height { margin } else { 0.0 };
        Self::new(offset_x, offset_y, min_dim, -min_dim)
    }

    pub fn offset(&self) -> DVec2 {
        DVec2::new(self.offset_x, self.offset_y)
    }

    pub fn scale(&self) -> DVec2 {
        DVec2::new(self.scale_x, self.scale_y)
    }

    /// Center, scale with y flipped, then move the origin to the bottom-left corner
    pub fn scene(&self) -> Scene {
        Scene::new([
            TransformStep::Translate(self.offset()),
            TransformStep::Scale(self.scale()),
            TransformStep::Translate(DVec2::new(0.0, -1.0)),
        ])
    }

    /// Device position of a game-space point
    pub fn to_device(&self, point: DVec2) -> DVec2 {
        self.scene().affine().transform_point2(point)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(origin: DVec2, size: DVec2) -> Self {
        Self { origin, size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::scene::MatrixCanvas;

    #[test]
    fn test_landscape_window() {
        let config = ViewportConfig::from_window(800.0, 600.0);
        assert_eq!(config, ViewportConfig::new(100.0, 0.0, 600.0, -600.0));
    }

    #[test]
    fn test_portrait_window() {
        let config = ViewportConfig::from_window(600.0, 1000.0);
        assert_eq!(config, ViewportConfig::new(0.0, 200.0, 600.0, -600.0));
    }

    #[test]
    fn test_square_window() {
        let config = ViewportConfig::from_window(500.0, 500.0);
        assert_eq!(config, ViewportConfig::new(0.0, 0.0, 500.0, -500.0));
    }

    #[test]
    fn test_to_device_corners() {
        let config = ViewportConfig::from_window(800.0, 600.0);
        assert_eq!(config.to_device(DVec2::new(0.0, 0.0)), DVec2::new(100.0, 600.0));
        assert_eq!(config.to_device(DVec2::new(1.0, 1.0)), DVec2::new(700.0, 0.0));
        assert_eq!(config.to_device(DVec2::new(0.5, 0.5)), DVec2::new(400.0, 300.0));
    }

    #[test]
    fn test_distance_flips_vertical() {
        let config = ViewportConfig::from_window(800.0, 600.0);
        let mut canvas = MatrixCanvas::default();
        let d = config.scene().distance_to_device(&mut canvas, 0.1, 0.1);
        assert!((d - DVec2::new(60.0, -60.0)).length() < 1e-9);
    }
}
