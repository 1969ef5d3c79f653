//! Composable coordinate frames
//!
//! A `Scene` is an ordered list of transform steps. Applying it to a
//! `Canvas` saves the canvas state first and restores it when the returned
//! guard drops, so nested frames never leak into each other:
//!
//! ```ignore
//! let mut screen = viewport.scoped_apply(&mut canvas);
//! let player_frame = player.scene().scoped_apply(&mut screen);
//! ```

use std::ops::Deref;

use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

/// One elementary transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformStep {
    Translate(DVec2),
    Scale(DVec2),
    /// Radians, positive from +x toward +y
    Rotate(f64),
}

impl TransformStep {
    pub fn affine(&self) -> DAffine2 {
        match *self {
            TransformStep::Translate(offset) => DAffine2::from_translation(offset),
            TransformStep::Scale(factor) => DAffine2::from_scale(factor),
            TransformStep::Rotate(angle) => DAffine2::from_angle(angle),
        }
    }

    pub fn apply<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match *self {
            TransformStep::Translate(offset) => canvas.translate(offset),
            TransformStep::Scale(factor) => canvas.scale(factor),
            TransformStep::Rotate(angle) => canvas.rotate(angle),
        }
    }
}

/// Drawing surface with a save/restore state stack.
///
/// Transform calls right-multiply the current matrix: the step applied last
/// acts first on user-space points.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: DVec2);
    fn scale(&mut self, factor: DVec2);
    fn rotate(&mut self, angle: f64);
    /// Current user-to-device matrix
    fn matrix(&self) -> DAffine2;

    /// Device-space extent of a user-space vector (translation ignored)
    fn user_to_device_distance(&self, distance: DVec2) -> DVec2 {
        self.matrix().transform_vector2(distance)
    }
}

/// Software canvas that only tracks the transform stack
#[derive(Debug, Clone)]
pub struct MatrixCanvas {
    current: DAffine2,
    stack: Vec<DAffine2>,
}

impl Default for MatrixCanvas {
    fn default() -> Self {
        Self::new(DAffine2::IDENTITY)
    }
}

impl MatrixCanvas {
    pub fn new(base: DAffine2) -> Self {
        Self {
            current: base,
            stack: Vec::new(),
        }
    }

    /// Number of saved states not yet restored
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Canvas for MatrixCanvas {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(saved) => self.current = saved,
            None => log::warn!("MatrixCanvas::restore without matching save"),
        }
    }

    fn translate(&mut self, offset: DVec2) {
        self.current = self.current * DAffine2::from_translation(offset);
    }

    fn scale(&mut self, factor: DVec2) {
        self.current = self.current * DAffine2::from_scale(factor);
    }

    fn rotate(&mut self, angle: f64) {
        self.current = self.current * DAffine2::from_angle(angle);
    }

    fn matrix(&self) -> DAffine2 {
        self.current
    }
}

/// Canvas with a scene applied; restores the previous state on drop.
///
/// `restore` through the guard only pops states saved through the same guard,
/// so a frame can never unwind the state of the frame that contains it.
pub struct ScopedCanvas<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    /// Saves made through this guard and not yet restored
    saves: usize,
}

impl<C: Canvas + ?Sized> Deref for ScopedCanvas<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &*self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for ScopedCanvas<'_, C> {
    fn drop(&mut self) {
        // Pending inner saves, then the state saved by scoped_apply
        for _ in 0..=self.saves {
            self.canvas.restore();
        }
    }
}

impl<C: Canvas + ?Sized> Canvas for ScopedCanvas<'_, C> {
    fn save(&mut self) {
        self.saves += 1;
        self.canvas.save();
    }

    fn restore(&mut self) {
        if self.saves == 0 {
            log::warn!("ScopedCanvas::restore without matching save; ignored");
            return;
        }
        self.saves -= 1;
        self.canvas.restore();
    }

    fn translate(&mut self, offset: DVec2) {
        self.canvas.translate(offset);
    }

    fn scale(&mut self, factor: DVec2) {
        self.canvas.scale(factor);
    }

    fn rotate(&mut self, angle: f64) {
        self.canvas.rotate(angle);
    }

    fn matrix(&self) -> DAffine2 {
        self.canvas.matrix()
    }
}

/// Ordered transform steps describing a coordinate frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    steps: Vec<TransformStep>,
}

impl Scene {
    pub fn new(steps: impl IntoIterator<Item = TransformStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// New scene with `extra` appended; `self` is left untouched
    pub fn compose(&self, extra: impl IntoIterator<Item = TransformStep>) -> Scene {
        let mut steps = self.steps.clone();
        steps.extend(extra);
        Scene { steps }
    }

    /// Scene followed by every step of `inner`
    pub fn then(&self, inner: &Scene) -> Scene {
        self.compose(inner.steps.iter().copied())
    }

    /// Combined matrix of all steps, independent of any canvas
    pub fn affine(&self) -> DAffine2 {
        self.steps
            .iter()
            .fold(DAffine2::IDENTITY, |acc, step| acc * step.affine())
    }

    /// Save `canvas`, apply every step in order, and restore on drop
    pub fn scoped_apply<'a, C: Canvas + ?Sized>(&self, canvas: &'a mut C) -> ScopedCanvas<'a, C> {
        canvas.save();
        for step in &self.steps {
            step.apply(canvas);
        }
        ScopedCanvas { canvas, saves: 0 }
    }

    /// Device pixels spanned by a game-space vector inside this scene
    pub fn distance_to_device<C: Canvas + ?Sized>(&self, canvas: &mut C, dx: f64, dy: f64) -> DVec2 {
        let scoped = self.scoped_apply(canvas);
        scoped.user_to_device_distance(DVec2::new(dx, dy))
    }
}
