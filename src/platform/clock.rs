//! Fixed timestep accumulator
//!
//! Converts variable frame times into a whole number of simulation steps.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed one frame's elapsed time; returns how many steps to simulate.
    ///
    /// Long frames are clamped and at most `max_substeps` run per frame, so a
    /// stall never turns into a burst of catch-up ticks.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }
}
