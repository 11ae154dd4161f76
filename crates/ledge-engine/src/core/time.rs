use crate::api::types::TimeDelta;

/// Longest stretch of frame time caught up in one go, in logic steps.
/// Anything beyond is dropped, so a stalled host does not fast-forward the game.
pub const MAX_CATCH_UP_STEPS: u32 = 10;

/// Fixed timestep accumulator.
/// Turns the host's variable frame times into a whole number of logic steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: TimeDelta,
    accumulator: TimeDelta,
}

impl FixedTimestep {
    pub fn new(dt: TimeDelta) -> Self {
        assert!(dt > 0.0, "fixed timestep must be positive");
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns how many fixed steps are due.
    pub fn accumulate(&mut self, frame_dt: TimeDelta) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * MAX_CATCH_UP_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Drop any partial step, e.g. after a level restart.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn dt(&self) -> TimeDelta {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(0.25);
        assert_eq!(ts.accumulate(0.25), 1);
    }

    #[test]
    fn accumulates_partial_frames() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_catch_up() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), MAX_CATCH_UP_STEPS);
    }

    #[test]
    fn reset_drops_partial_step() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        ts.accumulate(0.015);
        ts.reset();
        assert_eq!(ts.accumulate(0.005), 0);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(0.5);
        assert_eq!(ts.accumulate(-3.0), 0);
        assert_eq!(ts.accumulate(0.5), 1);
    }
}
