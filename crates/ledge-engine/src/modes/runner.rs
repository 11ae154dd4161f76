use crate::api::game::{Context, GameConfig, GameMode};
use crate::api::types::TimeDelta;
use crate::core::time::FixedTimestep;
use crate::input::queue::{InputEvent, InputQueue};

/// Drives a game mode from the host's frame loop.
///
/// The host pushes input as it arrives and calls `tick` once per displayed
/// frame with the real elapsed time. Queued input is handed to the mode
/// first, then the mode runs as many fixed logic steps as the elapsed time
/// covers.
pub struct GameRunner<M: GameMode> {
    mode: M,
    input: InputQueue,
    timestep: FixedTimestep,
}

impl<M: GameMode> GameRunner<M> {
    /// Wrap `mode`, stepping it every `config.fixed_dt` seconds.
    pub fn new(mode: M, config: &GameConfig) -> Self {
        Self {
            mode,
            input: InputQueue::new(),
            timestep: FixedTimestep::new(config.fixed_dt),
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame. Returns the number of logic steps taken.
    pub fn tick(&mut self, frame_dt: TimeDelta, ctx: &mut Context<'_>) -> u32 {
        for event in self.input.drain() {
            self.mode.handle_event(&event);
        }

        let steps = self.timestep.accumulate(frame_dt);
        let mut taken = 0;
        for _ in 0..steps {
            if self.mode.finished() {
                self.timestep.reset();
                break;
            }
            self.mode.update_and_render(self.timestep.dt(), ctx);
            taken += 1;
        }
        taken
    }

    /// True once the mode reports it is done.
    pub fn finished(&self) -> bool {
        self.mode.finished()
    }

    /// The wrapped mode.
    pub fn mode(&self) -> &M {
        &self.mode
    }

    pub fn mode_mut(&mut self) -> &mut M {
        &mut self.mode
    }

    /// Unwrap the mode, e.g. to release its resources.
    pub fn into_mode(self) -> M {
        self.mode
    }
}
