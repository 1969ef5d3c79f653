//! Fixed-rate simulation tick
//!
//! One call per timer fire. The outcome depends only on the state and the
//! tick input, so replaying the same inputs reproduces a session exactly.

use super::input::{HeldKeys, Key};
use super::state::GameState;

/// Input sampled for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Hook key held down
    pub hook: bool,
}

impl TickInput {
    pub fn from_held(held: &HeldKeys) -> Self {
        Self {
            hook: held.is_pressed(Key::Hook),
        }
    }
}

/// Advance the game state by one tick.
///
/// Returns whether the simulation should keep running; there is no terminal
/// condition, so this is always true.
pub fn tick(state: &mut GameState, input: &TickInput) -> bool {
    if input.hook {
        if !state.player.is_engaged() {
            let circles = state.relevant_circles();
            state.player.find_target(&circles);
        }
    } else {
        state.player.reset_hook();
    }

    state.player.advance();
    state.time_ticks += 1;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Circle, HookState};
    use glam::DVec2;

    fn state_with_seed(seed: u64) -> GameState {
        GameState::new(&Settings::with_seed(seed)).unwrap()
    }

    #[test]
    fn test_tick_free_flight() {
        let mut state = state_with_seed(1);
        let speed = state.player().config().speed;

        assert!(tick(&mut state, &TickInput::default()));
        assert_eq!(state.ticks(), 1);
        assert_eq!(state.player().position(), DVec2::new(0.5, speed));
        assert_eq!(*state.player().hook_state(), HookState::Free);
    }

    #[test]
    fn test_tick_hook_targets_relevant_circles() {
        let mut state = state_with_seed(1);
        let circles = state.relevant_circles();
        let nearest = *state
            .player()
            .candidate_target(&circles)
            .expect("relevant circles are never empty");

        tick(&mut state, &TickInput { hook: true });
        assert_eq!(state.player().target(), Some(nearest));
    }

    #[test]
    fn test_releasing_hook_resets() {
        let mut state = state_with_seed(1);
        tick(&mut state, &TickInput { hook: true });
        assert!(state.player().target().is_some());

        tick(&mut state, &TickInput::default());
        assert_eq!(*state.player().hook_state(), HookState::Free);
    }

    #[test]
    fn test_held_keys_drive_tick() {
        let mut state = state_with_seed(3);
        state.on_key_press("hook");
        assert!(state.tick());
        assert!(state.player().target().is_some());

        state.on_key_release("hook");
        state.tick();
        assert!(state.player().target().is_none());
    }

    #[test]
    fn test_hook_eventually_orbits() {
        let mut state = state_with_seed(8);
        let input = TickInput { hook: true };

        let mut engaged = None;
        for _ in 0..600 {
            tick(&mut state, &input);
            if let HookState::Hooked { circle, .. } = *state.player().hook_state() {
                engaged = Some(circle);
                break;
            }
        }

        let circle: Circle = engaged.expect("player should end up orbiting");
        let radius = state.player().distance_to(&circle);
        for _ in 0..120 {
            tick(&mut state, &input);
            assert!(state.player().is_engaged());
            assert!((state.player().distance_to(&circle) - radius).abs() < 1e-9);
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = state_with_seed(99999);
        let mut state2 = state_with_seed(99999);

        let inputs = [
            TickInput { hook: false },
            TickInput { hook: true },
            TickInput { hook: true },
            TickInput { hook: false },
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.ticks(), state2.ticks());
        assert_eq!(state1.player_snapshot(), state2.player_snapshot());
    }
}
