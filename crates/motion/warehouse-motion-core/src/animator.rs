//! Motion animator: advances one box along a planned path.
//!
//! Per tick the task works out where it is within the current segment. A
//! finished segment rolls over to the next one at its exact end time (overshoot
//! is carried), so a long tick may consume several segments. Belt segments are
//! linear with a small rattle; lift segments are eased, arc upward and spin a
//! half turn.
//!
//! A rollover tick still emits a pose: the one inside the segment it lands in.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::math::{ease_in_out_quad, lerp_f32, Vec3};
use crate::planner::{Direction, Path, SegmentMotion};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TravelState {
    Traveling(usize),
    Arrived,
}

/// Position and yaw of a box for one frame.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub yaw: f32,
}

/// Result of one `TravelTask::step`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TravelStep {
    pub pose: Pose,
    /// Engine time at which the path was completed; set only on the arriving tick.
    pub arrived_at_ms: Option<f64>,
}

/// Fraction of a segment covered after `elapsed_ms`, clamped to [0,1].
/// Zero-length segments are complete immediately.
#[inline]
pub fn segment_progress(elapsed_ms: f64, duration_ms: f32) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / f64::from(duration_ms)).clamp(0.0, 1.0) as f32
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TravelTask {
    path: Path,
    state: TravelState,
    segment_start_ms: f64,
}

impl TravelTask {
    pub fn new(path: Path, now_ms: f64) -> Self {
        Self {
            path,
            state: TravelState::Traveling(0),
            segment_start_ms: now_ms,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> TravelState {
        self.state
    }

    /// Pose a box holds once it has arrived: snapped to the last waypoint, no rattle.
    /// Shelved boxes face forward; boxes back at the dock keep their last heading.
    pub fn resting_pose(&self) -> Pose {
        let yaw = match self.path.direction {
            Direction::Outbound => 0.0,
            Direction::Inbound => match self.path.motions.last() {
                Some(SegmentMotion::Belt { heading }) => *heading,
                _ => PI,
            },
        };
        Pose {
            position: self.path.end(),
            yaw,
        }
    }

    /// Advance to `now_ms` and return the frame pose.
    pub fn step(&mut self, now_ms: f64, motion: &MotionConfig) -> TravelStep {
        loop {
            let segment = match self.state {
                TravelState::Arrived => {
                    return TravelStep {
                        pose: self.resting_pose(),
                        arrived_at_ms: None,
                    };
                }
                TravelState::Traveling(segment) => segment,
            };

            if segment >= self.path.segment_count() {
                self.state = TravelState::Arrived;
                return TravelStep {
                    pose: self.resting_pose(),
                    arrived_at_ms: Some(self.segment_start_ms),
                };
            }

            let duration = self.path.durations_ms[segment];
            let progress = segment_progress(now_ms - self.segment_start_ms, duration);
            if progress >= 1.0 {
                self.segment_start_ms += f64::from(duration.max(0.0));
                self.state = TravelState::Traveling(segment + 1);
                continue;
            }

            return TravelStep {
                pose: self.segment_pose(segment, progress, now_ms, motion),
                arrived_at_ms: None,
            };
        }
    }

    fn segment_pose(
        &self,
        segment: usize,
        progress: f32,
        now_ms: f64,
        motion: &MotionConfig,
    ) -> Pose {
        let from = self.path.waypoints[segment];
        let to = self.path.waypoints[segment + 1];
        match self.path.motions[segment] {
            SegmentMotion::Belt { heading } => {
                let rattle = (now_ms * f64::from(motion.rattle_frequency)).sin() as f32
                    * motion.rattle_amplitude;
                Pose {
                    position: Vec3::new(
                        lerp_f32(from.x, to.x, progress),
                        from.y + rattle,
                        lerp_f32(from.z, to.z, progress),
                    ),
                    yaw: heading,
                }
            }
            SegmentMotion::Lift => {
                let ease = ease_in_out_quad(progress);
                let arc = (progress * PI).sin() * motion.lift_arc_height;
                Pose {
                    position: Vec3::new(
                        lerp_f32(from.x, to.x, ease),
                        lerp_f32(from.y, to.y, ease) + arc,
                        lerp_f32(from.z, to.z, ease),
                    ),
                    yaw: ease * PI,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped_and_monotonic() {
        let mut last = 0.0;
        for step in -5..=30 {
            let p = segment_progress(f64::from(step) * 50.0, 1000.0);
            assert!((0.0..=1.0).contains(&p));
            assert!(p >= last);
            last = p;
        }
        assert_eq!(segment_progress(2000.0, 1000.0), 1.0);
        assert_eq!(segment_progress(0.0, 0.0), 1.0);
    }
}
