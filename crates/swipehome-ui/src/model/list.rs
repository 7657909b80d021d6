//! Scroll state of the content list.

use swipehome_gesture::ListPosition;

/// How far a fling carries the list, as seconds of travel at the release velocity.
const FLING_TRAVEL_SECS: f32 = 0.25;

/// A fixed-height item list with a pixel scroll position.
///
/// Deltas use the nested-scroll convention: a negative delta moves toward
/// later items.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    item_count: usize,
    item_height: f32,
    viewport_height: f32,
    scroll_px: f32,
}

impl ListState {
    pub fn new(item_count: usize, item_height: f32, viewport_height: f32) -> Self {
        Self {
            item_count,
            item_height: item_height.max(1.0),
            viewport_height: viewport_height.max(0.0),
            scroll_px: 0.0,
        }
    }

    /// Furthest scroll position.
    pub fn max_scroll(&self) -> f32 {
        (self.item_count as f32 * self.item_height - self.viewport_height).max(0.0)
    }

    pub fn scroll_px(&self) -> f32 {
        self.scroll_px
    }

    /// Scroll by `delta`. Returns the consumed portion.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        if !delta.is_finite() {
            return 0.0;
        }
        let next = (self.scroll_px - delta).clamp(0.0, self.max_scroll());
        let consumed = self.scroll_px - next;
        self.scroll_px = next;
        consumed
    }

    /// Fling with `velocity`. Returns the velocity the list used up; the rest
    /// is what it could not travel before hitting an edge.
    pub fn fling(&mut self, velocity: f32) -> f32 {
        if velocity == 0.0 || !velocity.is_finite() {
            return 0.0;
        }
        let distance = velocity * FLING_TRAVEL_SECS;
        // Subnormal velocities underflow to no travel at all
        if distance == 0.0 {
            return 0.0;
        }
        let travelled = self.scroll_by(distance);
        velocity * (travelled / distance)
    }

    /// Apply a new viewport height, keeping the scroll position in range.
    pub fn set_viewport_height(&mut self, viewport_height: f32) {
        self.viewport_height = viewport_height.max(0.0);
        self.scroll_px = self.scroll_px.min(self.max_scroll());
    }
}

impl ListPosition for ListState {
    fn first_visible_item_index(&self) -> usize {
        ((self.scroll_px / self.item_height).floor() as usize).min(self.item_count.saturating_sub(1))
    }

    fn first_visible_item_scroll_offset(&self) -> f32 {
        self.scroll_px - self.first_visible_item_index() as f32 * self.item_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipehome_gesture::is_at_top;

    fn list() -> ListState {
        // 150 rows of 20px in a 400px viewport, like the home list
        ListState::new(150, 20.0, 400.0)
    }

    #[test]
    fn test_scroll_consumes_until_edges() {
        let mut list = list();
        assert_eq!(list.max_scroll(), 2600.0);

        // At the top, scrolling back consumes nothing
        assert_eq!(list.scroll_by(30.0), 0.0);

        assert_eq!(list.scroll_by(-50.0), -50.0);
        assert_eq!(list.scroll_px(), 50.0);
        assert_eq!(list.scroll_by(80.0), 50.0);
        assert_eq!(list.scroll_px(), 0.0);

        assert_eq!(list.scroll_by(-10_000.0), -2600.0);
    }

    #[test]
    fn test_first_visible_item() {
        let mut list = list();
        assert!(is_at_top(&list));

        list.scroll_by(-45.0);
        assert_eq!(list.first_visible_item_index(), 2);
        assert_eq!(list.first_visible_item_scroll_offset(), 5.0);
        assert!(!is_at_top(&list));

        list.scroll_by(45.0);
        assert!(is_at_top(&list));
    }

    #[test]
    fn test_fling_reports_unused_velocity() {
        let mut list = list();
        // Already at the top: nothing to travel
        assert_eq!(list.fling(800.0), 0.0);

        // 40px from the top, an 800px/s fling wants 200px
        list.scroll_by(-40.0);
        let used = list.fling(800.0);
        assert_eq!(used, 160.0);
        assert_eq!(list.scroll_px(), 0.0);

        assert_eq!(list.fling(-400.0), -400.0);
        assert_eq!(list.scroll_px(), 100.0);
    }

    #[test]
    fn test_subnormal_fling_uses_nothing() {
        let mut list = list();
        list.scroll_by(-40.0);
        // Smallest subnormal: a quarter of it rounds to zero
        let used = list.fling(-f32::from_bits(1));
        assert_eq!(used, 0.0);
        assert!(!used.is_nan());
        assert_eq!(list.scroll_px(), 40.0);
    }

    #[test]
    fn test_viewport_height_change_clamps_scroll() {
        let mut list = list();
        list.scroll_by(-2600.0);
        assert_eq!(list.scroll_px(), 2600.0);

        // Taller viewport: less content left to scroll
        list.set_viewport_height(1000.0);
        assert_eq!(list.max_scroll(), 2000.0);
        assert_eq!(list.scroll_px(), 2000.0);

        list.set_viewport_height(200.0);
        assert_eq!(list.max_scroll(), 2800.0);
        assert_eq!(list.scroll_px(), 2000.0);
    }
}
