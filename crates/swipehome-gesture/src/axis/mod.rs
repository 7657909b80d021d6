//! Anchored drag axis.
//!
//! A [`DragAxisState`] is one continuous gesture dimension that settles at a
//! discrete set of anchors. It moves 1:1 with drag deltas (hard-clamped to
//! the anchor range, no resistance), resolves flings to an adjacent anchor,
//! and runs frame-driven settle animations that can be retargeted at any time.
//!
//! # Invariants
//!
//! - `offset` is always within `[min_offset, max_offset]`
//! - `current` and `target` are always anchor states
//! - `target == current` whenever no animation is in flight
//! - `progress().fraction == 1.0` only when `offset` sits exactly on the `to` anchor

mod animation;

pub use animation::AxisAnimation;

use std::fmt;
use std::time::Duration;

use swipehome_core::{AnimationConfig, AxisError};

/// A discrete state an axis can settle at.
pub trait AnchorState: Copy + Eq + fmt::Debug {}

impl<T: Copy + Eq + fmt::Debug> AnchorState for T {}

/// Interpolation state between the two anchors the offset lies between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeProgress<S> {
    pub from: S,
    pub to: S,
    /// 0.0 at `from`, 1.0 at `to`.
    pub fraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Anchor<S> {
    offset: f32,
    state: S,
}

/// Largest f32 below 1.0; used so an offset strictly between anchors never reports 1.0.
const JUST_BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Anchored drag state machine for one axis.
#[derive(Debug, Clone)]
pub struct DragAxisState<S> {
    /// Sorted by ascending offset.
    anchors: Vec<Anchor<S>>,
    current: S,
    target: S,
    offset: f32,
    animation: Option<AxisAnimation>,
    /// Bumped whenever an animation starts or is cancelled.
    generation: u64,
    config: AnimationConfig,
}

impl<S: AnchorState> DragAxisState<S> {
    /// Create an axis resting at `initial`.
    ///
    /// Fails when there are fewer than two anchors, when offsets repeat or are
    /// not finite, when a state appears twice, or when `initial` has no anchor.
    pub fn new(
        anchors: impl IntoIterator<Item = (f32, S)>,
        initial: S,
        config: AnimationConfig,
    ) -> Result<Self, AxisError> {
        let anchors = validate_anchors(anchors)?;
        let offset = find_offset(&anchors, initial).ok_or_else(|| unknown_state(initial))?;

        Ok(Self {
            anchors,
            current: initial,
            target: initial,
            offset,
            animation: None,
            generation: 0,
            config,
        })
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    /// The anchor the axis last settled at.
    pub fn current(&self) -> S {
        self.current
    }

    /// The anchor the axis is animating toward; equals `current` when idle.
    pub fn target(&self) -> S {
        self.target
    }

    /// Live position.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Counter identifying the latest started or cancelled animation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn min_offset(&self) -> f32 {
        self.anchors[0].offset
    }

    pub fn max_offset(&self) -> f32 {
        self.anchors[self.anchors.len() - 1].offset
    }

    /// Offset bound to `state`, if it is an anchor.
    pub fn anchor_offset(&self, state: S) -> Option<f32> {
        find_offset(&self.anchors, state)
    }

    /// Anchors in ascending offset order.
    pub fn anchors(&self) -> impl Iterator<Item = (f32, S)> + '_ {
        self.anchors.iter().map(|a| (a.offset, a.state))
    }

    /// Progress between the anchors bracketing the live offset.
    ///
    /// Direction follows the side of `current` the offset has moved to: moving
    /// away from `current` toward a larger offset reads lower -> upper,
    /// otherwise upper -> lower.
    pub fn progress(&self) -> SwipeProgress<S> {
        let (lo, hi) = self.bracket();
        if lo == hi {
            let state = self.anchors[lo].state;
            return SwipeProgress {
                from: state,
                to: state,
                fraction: 1.0,
            };
        }

        let lower = self.anchors[lo];
        let upper = self.anchors[hi];
        let moving_up = self
            .anchor_offset(self.current)
            .map(|c| self.offset > c)
            .unwrap_or(false);
        let (from, to) = if moving_up {
            (lower, upper)
        } else {
            (upper, lower)
        };

        let fraction = ((self.offset - from.offset) / (to.offset - from.offset)).clamp(0.0, 1.0);
        SwipeProgress {
            from: from.state,
            to: to.state,
            fraction: fraction.min(JUST_BELOW_ONE),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Move by `delta`, clamped to the anchor range. Returns the applied portion.
    ///
    /// A drag that moves the axis interrupts any in-flight animation.
    pub fn drag(&mut self, delta: f32) -> f32 {
        if !delta.is_finite() {
            return 0.0;
        }
        let next = (self.offset + delta).clamp(self.min_offset(), self.max_offset());
        let consumed = next - self.offset;
        if consumed == 0.0 {
            return 0.0;
        }
        if self.animation.is_some() {
            tracing::debug!(state = ?self.target, "Drag interrupted axis animation");
            self.cancel_animation();
        }
        self.offset = next;
        consumed
    }

    /// Settle toward the anchor the fling velocity points at and animate there.
    ///
    /// Returns the chosen anchor.
    pub fn resolve_fling(&mut self, velocity: f32) -> S {
        let state = self.fling_target(velocity);
        let to = self.known_offset(state);
        tracing::debug!(velocity, ?state, "Resolved fling");
        self.begin(state, to);
        state
    }

    /// Animate toward `state`. Retargets an in-flight animation from the live
    /// offset; a request for the in-flight target is a no-op.
    pub fn animate_to(&mut self, state: S) -> Result<(), AxisError> {
        let to = self.anchor_offset(state).ok_or_else(|| unknown_state(state))?;
        self.begin(state, to);
        Ok(())
    }

    /// Stop the in-flight animation where it is. The axis stays at its live
    /// offset and `target` falls back to `current`.
    pub fn cancel_animation(&mut self) {
        if self.animation.take().is_some() {
            self.generation += 1;
            self.target = self.current;
        }
    }

    /// Advance the in-flight animation by one frame. Returns true if the axis moved or settled.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let (min, max) = (self.min_offset(), self.max_offset());
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        let value = animation.advance(dt);
        let finished = animation.is_finished();
        let settled_offset = animation.target_offset();
        self.offset = value.clamp(min, max);

        if finished {
            self.offset = settled_offset;
            self.animation = None;
            self.current = self.target;
            tracing::debug!(state = ?self.current, offset = self.offset, "Axis settled");
        }
        true
    }

    /// Replace the anchor set, e.g. after the viewport was measured again.
    ///
    /// `current` and `target` must survive in the new set. A resting axis snaps
    /// to its state's new offset; an animating axis retargets from its
    /// clamped live offset.
    pub fn set_anchors(
        &mut self,
        anchors: impl IntoIterator<Item = (f32, S)>,
    ) -> Result<(), AxisError> {
        let anchors = validate_anchors(anchors)?;
        for state in [self.current, self.target] {
            if find_offset(&anchors, state).is_none() {
                return Err(unknown_state(state));
            }
        }

        self.anchors = anchors;
        self.offset = self.offset.clamp(self.min_offset(), self.max_offset());

        if self.animation.is_some() {
            let target = self.target;
            let to = self.known_offset(target);
            self.start_animation(target, to);
        } else {
            self.offset = self.known_offset(self.current);
        }
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn begin(&mut self, state: S, to: f32) {
        let redundant = if self.is_animating() {
            self.target == state
        } else {
            self.current == state && self.offset == to
        };
        if !redundant {
            self.start_animation(state, to);
        }
    }

    fn start_animation(&mut self, state: S, to: f32) {
        self.generation += 1;
        self.target = state;
        self.animation = Some(AxisAnimation::new(self.offset, to, &self.config));
        tracing::debug!(
            ?state,
            from = self.offset,
            to,
            generation = self.generation,
            "Axis animation started"
        );
    }

    /// Indices of the anchors at or around the live offset. Equal when the
    /// offset sits exactly on an anchor.
    fn bracket(&self) -> (usize, usize) {
        let last = self.anchors.len() - 1;
        match self.anchors.iter().position(|a| a.offset >= self.offset) {
            Some(i) if self.anchors[i].offset == self.offset => (i, i),
            Some(0) => (0, 0),
            Some(i) => (i - 1, i),
            None => (last, last),
        }
    }

    fn fling_target(&self, velocity: f32) -> S {
        let velocity = if velocity.is_nan() { 0.0 } else { velocity };

        if velocity > 0.0 {
            return self
                .anchors
                .iter()
                .find(|a| a.offset > self.offset)
                .unwrap_or(&self.anchors[self.anchors.len() - 1])
                .state;
        }
        if velocity < 0.0 {
            return self
                .anchors
                .iter()
                .rev()
                .find(|a| a.offset < self.offset)
                .unwrap_or(&self.anchors[0])
                .state;
        }

        let (lo, hi) = self.bracket();
        let lower = self.anchors[lo];
        let upper = self.anchors[hi];
        let to_lower = self.offset - lower.offset;
        let to_upper = upper.offset - self.offset;

        if to_lower < to_upper {
            lower.state
        } else if to_upper < to_lower {
            upper.state
        } else {
            // Midpoint tie (or exactly on an anchor): stay with where the axis is heading.
            let preferred = if self.is_animating() {
                self.target
            } else {
                self.current
            };
            if preferred == lower.state || preferred == upper.state {
                preferred
            } else {
                lower.state
            }
        }
    }

    /// Offset of a state already known to be an anchor (`current`, `target`
    /// or a fling result). Falls back to the live offset if that ever breaks.
    fn known_offset(&self, state: S) -> f32 {
        match self.anchor_offset(state) {
            Some(offset) => offset,
            None => {
                tracing::error!(?state, "Axis state is not an anchor");
                debug_assert!(false, "axis state {:?} is not an anchor", state);
                self.offset
            }
        }
    }
}

fn validate_anchors<S: AnchorState>(
    anchors: impl IntoIterator<Item = (f32, S)>,
) -> Result<Vec<Anchor<S>>, AxisError> {
    let mut anchors: Vec<Anchor<S>> = anchors
        .into_iter()
        .map(|(offset, state)| Anchor { offset, state })
        .collect();

    if anchors.len() < 2 {
        return Err(AxisError::TooFewAnchors {
            count: anchors.len(),
        });
    }
    if let Some(bad) = anchors.iter().find(|a| !a.offset.is_finite()) {
        return Err(AxisError::NonFiniteOffset { offset: bad.offset });
    }

    anchors.sort_by(|a, b| a.offset.total_cmp(&b.offset));

    for pair in anchors.windows(2) {
        if pair[0].offset == pair[1].offset {
            return Err(AxisError::DuplicateOffset {
                offset: pair[0].offset,
            });
        }
    }
    for (i, a) in anchors.iter().enumerate() {
        if anchors[i + 1..].iter().any(|b| b.state == a.state) {
            return Err(AxisError::DuplicateState {
                state: format!("{:?}", a.state),
            });
        }
    }

    Ok(anchors)
}

fn find_offset<S: AnchorState>(anchors: &[Anchor<S>], state: S) -> Option<f32> {
    anchors.iter().find(|a| a.state == state).map(|a| a.offset)
}

fn unknown_state<S: AnchorState>(state: S) -> AxisError {
    AxisError::UnknownState {
        state: format!("{:?}", state),
    }
}
