//! Lifecycle manager: shrink and fade a retired box, then let the engine detach it.

use serde::{Deserialize, Serialize};

use crate::animator::segment_progress;

/// Scale/opacity for one fade frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FadeStep {
    pub scale: f32,
    pub opacity: f32,
    /// The window has elapsed; the box should leave the scene this tick.
    pub done: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FadeTask {
    start_ms: f64,
    duration_ms: f32,
}

impl FadeTask {
    pub fn new(start_ms: f64, duration_ms: f32) -> Self {
        Self {
            start_ms,
            duration_ms,
        }
    }

    /// Linear, no easing: both scale and opacity go 1 → 0 over the window.
    pub fn step(&self, now_ms: f64) -> FadeStep {
        let progress = segment_progress(now_ms - self.start_ms, self.duration_ms);
        let remaining = 1.0 - progress;
        FadeStep {
            scale: remaining,
            opacity: remaining,
            done: progress >= 1.0,
        }
    }
}
