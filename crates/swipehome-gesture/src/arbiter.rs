//! Scroll vs. card-drag arbitration.
//!
//! The scroll host calls the four hooks around every scroll and fling step
//! of the content list, in order: `before_list_scroll`, (list scrolls),
//! `after_list_scroll`, and for releases `before_list_fling`, (list flings),
//! `after_list_fling`. Each hook returns how much of the delta or velocity the
//! card took, so the list only sees the rest.
//!
//! The effect: dragging the list past its top keeps moving the card, so the
//! gesture crosses the list/card boundary without a dead stop.
//!
//! Values are vertical components in the list's coordinate space: negative
//! deltas move the card toward Expanded, positive toward Collapsed.

use crate::coordinator::GestureCoordinator;

/// Scroll position of the content list.
#[cfg_attr(test, mockall::automock)]
pub trait ListPosition {
    /// Index of the first visible item.
    fn first_visible_item_index(&self) -> usize;

    /// Scroll offset within the first visible item.
    fn first_visible_item_scroll_offset(&self) -> f32;
}

/// True when the list shows its first item with no internal offset.
pub fn is_at_top(list: &dyn ListPosition) -> bool {
    list.first_visible_item_index() == 0 && list.first_visible_item_scroll_offset() == 0.0
}

/// Hands list overscroll to the coordinator's card axis.
///
/// Every hook re-checks `allow_swipe`; the drawer can open between any two
/// events.
#[derive(Debug, Default)]
pub struct ScrollGestureArbiter {
    /// `allow_swipe` as of the last `before_list_scroll`.
    swipe_allowed_at_pre_scroll: bool,

    /// The card already took this release in `before_list_fling`.
    fling_claimed: bool,
}

impl ScrollGestureArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-scroll: a negative delta goes to the card first. Returns the amount
    /// the card consumed; the list scrolls the rest.
    pub fn before_list_scroll(&mut self, coordinator: &mut GestureCoordinator, delta: f32) -> f32 {
        self.swipe_allowed_at_pre_scroll = coordinator.allow_swipe();
        if !self.swipe_allowed_at_pre_scroll || delta >= 0.0 {
            return 0.0;
        }
        coordinator.drag_vertical(delta)
    }

    /// Post-scroll: whatever the list left over goes to the card.
    pub fn after_list_scroll(
        &mut self,
        coordinator: &mut GestureCoordinator,
        consumed_by_list: f32,
        remaining: f32,
    ) -> f32 {
        if !coordinator.allow_swipe() {
            if self.swipe_allowed_at_pre_scroll {
                tracing::debug!(
                    consumed_by_list,
                    remaining,
                    "Swipe disabled mid-scroll, dropping post-scroll delta"
                );
            }
            self.swipe_allowed_at_pre_scroll = false;
            return 0.0;
        }
        coordinator.drag_vertical(remaining)
    }

    /// Pre-fling: a negative fling at the very top of the list belongs to the
    /// card. Returns the velocity taken; the whole velocity when forwarded, so
    /// the list does not also fling.
    pub fn before_list_fling(
        &mut self,
        coordinator: &mut GestureCoordinator,
        list: &dyn ListPosition,
        velocity: f32,
    ) -> f32 {
        self.fling_claimed = false;
        if !coordinator.allow_swipe() || velocity >= 0.0 || !is_at_top(list) {
            return 0.0;
        }
        match coordinator.fling_vertical(velocity) {
            Some(state) => {
                tracing::debug!(velocity, ?state, "List fling at top handed to card");
                self.fling_claimed = true;
                velocity
            }
            None => 0.0,
        }
    }

    /// Post-fling: settle the card with whatever velocity the list left.
    ///
    /// Skipped when `before_list_fling` already settled the card for this
    /// release.
    pub fn after_list_fling(&mut self, coordinator: &mut GestureCoordinator, remaining: f32) -> f32 {
        if std::mem::take(&mut self.fling_claimed) {
            return 0.0;
        }
        match coordinator.fling_vertical(remaining) {
            Some(_) => remaining,
            None => 0.0,
        }
    }
}
