//! One mounted home screen: coordinator, arbiter and content list.

use std::time::Duration;

use serde::Serialize;
use swipehome_core::{
    AxisError, CardState, GestureConfig, HomeScreen, MenuState, ToolbarMode, Viewport,
};
use swipehome_gesture::{GestureCoordinator, ListPosition, ScrollGestureArbiter};

use super::list::ListState;

/// Number of rows in the content list.
const LIST_ITEMS: usize = 150;

/// Row height in pixels.
const LIST_ITEM_HEIGHT: f32 = 20.0;

// =============================================================================
// Snapshot
// =============================================================================

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeSnapshot {
    pub screen: HomeScreen,
    pub menu: MenuState,
    pub menu_target: MenuState,
    pub card: CardState,
    pub card_target: CardState,
    /// Horizontal translation of the content panel.
    pub horizontal_offset: f32,
    /// Vertical translation of the content panel.
    pub vertical_offset: f32,
    pub collapse_progress: f32,
    /// Vertical offset of the menu panel.
    pub menu_offset: f32,
    pub toolbar_mode: ToolbarMode,
    pub allow_swipe: bool,
    pub animating: bool,
    pub list_scroll: f32,
}

/// Where a scroll or fling went.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOutcome {
    /// Taken by the card.
    pub card: f32,
    /// Taken by the list.
    pub list: f32,
}

// =============================================================================
// Session
// =============================================================================

/// Gesture state plus the content list it arbitrates against.
///
/// Input from the scroll host goes through [`scroll`](Self::scroll) and
/// [`fling`](Self::fling), which run the arbiter hooks around the list in
/// order.
#[derive(Debug)]
pub struct HomeSession {
    coordinator: GestureCoordinator,
    arbiter: ScrollGestureArbiter,
    list: ListState,
    viewport: Viewport,
}

impl HomeSession {
    /// Mount a screen with the default drawer and card states.
    pub fn new(
        screen: HomeScreen,
        viewport: Viewport,
        config: &GestureConfig,
    ) -> Result<Self, AxisError> {
        let coordinator = GestureCoordinator::new(screen, viewport, config)?;
        Ok(Self::from_coordinator(coordinator, viewport))
    }

    /// Wrap an already-built coordinator.
    pub fn from_coordinator(coordinator: GestureCoordinator, viewport: Viewport) -> Self {
        Self {
            coordinator,
            arbiter: ScrollGestureArbiter::new(),
            list: ListState::new(LIST_ITEMS, LIST_ITEM_HEIGHT, list_height(viewport)),
            viewport,
        }
    }

    pub fn coordinator(&self) -> &GestureCoordinator {
        &self.coordinator
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // =========================================================================
    // Input
    // =========================================================================

    pub fn toggle_menu(&mut self) {
        self.coordinator.toggle_menu();
    }

    pub fn drag_menu(&mut self, delta: f32) -> f32 {
        self.coordinator.drag_horizontal(delta)
    }

    pub fn release_menu(&mut self, velocity: f32) -> Option<MenuState> {
        self.coordinator.fling_horizontal(velocity)
    }

    /// Whether the card's own drag recognizer is enabled.
    pub fn card_drag_enabled(&self) -> bool {
        self.coordinator.allow_swipe()
            && self.list.first_visible_item_index() < self.coordinator.config().direct_drag_max_index
    }

    /// Drag the card directly (outside the list).
    pub fn drag_card(&mut self, delta: f32) -> f32 {
        if !self.card_drag_enabled() {
            return 0.0;
        }
        self.coordinator.drag_vertical(delta)
    }

    /// Release a direct card drag.
    pub fn release_card(&mut self, velocity: f32) -> Option<CardState> {
        if !self.card_drag_enabled() {
            return None;
        }
        self.coordinator.fling_vertical(velocity)
    }

    /// One scroll step from the list's scroll host.
    pub fn scroll(&mut self, delta: f32) -> ScrollOutcome {
        let pre = self
            .arbiter
            .before_list_scroll(&mut self.coordinator, delta);
        let available = delta - pre;
        let list = self.list.scroll_by(available);
        let post = self
            .arbiter
            .after_list_scroll(&mut self.coordinator, list, available - list);

        ScrollOutcome {
            card: pre + post,
            list,
        }
    }

    /// A scroll release from the list's scroll host.
    pub fn fling(&mut self, velocity: f32) -> ScrollOutcome {
        let pre = self
            .arbiter
            .before_list_fling(&mut self.coordinator, &self.list, velocity);
        let available = velocity - pre;
        let list = self.list.fling(available);
        let post = self
            .arbiter
            .after_list_fling(&mut self.coordinator, available - list);

        ScrollOutcome {
            card: pre + post,
            list,
        }
    }

    /// Advance animations by one frame.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.coordinator.tick(dt)
    }

    pub fn resize(&mut self, viewport: Viewport) -> Result<(), AxisError> {
        self.coordinator.resize(viewport)?;
        self.list.set_viewport_height(list_height(viewport));
        self.viewport = viewport;
        Ok(())
    }

    pub fn dispose(&mut self) {
        self.coordinator.dispose();
    }

    pub fn is_animating(&self) -> bool {
        self.coordinator.is_animating()
    }

    pub fn is_disposed(&self) -> bool {
        self.coordinator.is_disposed()
    }

    // =========================================================================
    // Output
    // =========================================================================

    pub fn snapshot(&self) -> HomeSnapshot {
        let c = &self.coordinator;
        HomeSnapshot {
            screen: c.screen(),
            menu: c.horizontal().current(),
            menu_target: c.horizontal().target(),
            card: c.vertical().current(),
            card_target: c.vertical().target(),
            horizontal_offset: c.horizontal().offset(),
            vertical_offset: c.vertical().offset(),
            collapse_progress: c.collapse_progress(),
            menu_offset: c.menu_offset(self.viewport.toolbar_height),
            toolbar_mode: c.toolbar_mode(),
            allow_swipe: c.allow_swipe(),
            animating: c.is_animating(),
            list_scroll: self.list.scroll_px(),
        }
    }
}

/// Height left for the list below the toolbar.
fn list_height(viewport: Viewport) -> f32 {
    (viewport.height - viewport.toolbar_height).max(0.0)
}
