//! Rendering-side geometry
//!
//! No drawing happens here: these types describe where things go on screen,
//! and a backend implements `Canvas` to consume them.

pub mod scene;
pub mod viewport;

pub use scene::{Canvas, MatrixCanvas, Scene, ScopedCanvas, TransformStep};
pub use viewport::{Rect, ViewportConfig};
