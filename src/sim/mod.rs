//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only, one stream per band
//! - No rendering or platform dependencies

pub mod circle;
pub mod field;
pub mod input;
pub mod player;
pub mod state;
pub mod tick;

pub use circle::{Circle, CircleBatch};
pub use field::{CircleField, FieldConfig};
pub use input::{HeldKeys, Key};
pub use player::{HookState, Player, PlayerConfig, PlayerSnapshot, RotationSign};
pub use state::GameState;
pub use tick::{TickInput, tick};
