//! Frame-driven settle animation for a single axis.

use std::time::Duration;

use swipehome_core::{AnimationConfig, Easing};

/// One in-flight settle animation.
///
/// Advanced by the frame clock; never blocks. Replaced wholesale when the
/// axis is retargeted, starting again from the live offset.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisAnimation {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
}

impl AxisAnimation {
    /// Animate from `from` to `to`. A zero-distance animation finishes on its first tick.
    pub fn new(from: f32, to: f32, config: &AnimationConfig) -> Self {
        let duration = if from == to {
            Duration::ZERO
        } else {
            config.duration()
        };
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing: config.easing,
        }
    }

    /// Advance by `dt` and return the new offset.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.value()
    }

    /// Offset at the current elapsed time.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn target_offset(&self) -> f32 {
        self.to
    }
}
