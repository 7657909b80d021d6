//! Home screen gesture coordinator.
//!
//! Composes the horizontal drawer axis and the vertical card axis. Each axis
//! is an independent [`DragAxisState`]; the coordinator adds the cross-axis
//! rules:
//!
//! - **Coupling transition**: runs once per idle -> animating edge of the
//!   drawer. Opening the drawer over an expanded card collapses the card and
//!   remembers it; closing the drawer restores it.
//! - **Derived state**: swipe enablement, card collapse progress and toolbar
//!   mode are recomputed from the axes on every read, never cached.
//!
//! All mutation goes through `&mut self`, so edge detection runs right after
//! the mutation that caused it and before any derived value can be read.

use std::time::Duration;

use swipehome_core::{
    AxisError, CardState, GestureConfig, HomeScreen, MenuState, ToolbarMode, Viewport,
};

use crate::axis::DragAxisState;

/// Gesture/animation state for one mounted home screen.
#[derive(Debug)]
pub struct GestureCoordinator {
    screen: HomeScreen,
    horizontal: DragAxisState<MenuState>,
    vertical: DragAxisState<CardState>,

    /// Card state when the drawer last began opening. Only the coupling transition writes it.
    previous_card_state: CardState,

    /// `horizontal.is_animating()` as of the last edge check.
    horizontal_was_animating: bool,

    config: GestureConfig,
    disposed: bool,
}

impl GestureCoordinator {
    /// Mount a coordinator with the drawer closed and the card collapsed.
    pub fn new(
        screen: HomeScreen,
        viewport: Viewport,
        config: &GestureConfig,
    ) -> Result<Self, AxisError> {
        Self::with_initial(
            screen,
            viewport,
            config,
            MenuState::default(),
            CardState::default(),
        )
    }

    /// Mount a coordinator with explicit initial anchor states, then run the
    /// setup sequence: on Favorites the card animates to Expanded, and the
    /// drawer always animates to Closed. Both run concurrently.
    pub fn with_initial(
        screen: HomeScreen,
        viewport: Viewport,
        config: &GestureConfig,
        initial_menu: MenuState,
        initial_card: CardState,
    ) -> Result<Self, AxisError> {
        let horizontal = DragAxisState::new(
            horizontal_anchors(viewport, config),
            initial_menu,
            config.animation.clone(),
        )?;
        let vertical = DragAxisState::new(
            vertical_anchors(viewport, config),
            initial_card,
            config.animation.clone(),
        )?;

        let mut coordinator = Self {
            screen,
            horizontal,
            vertical,
            previous_card_state: initial_card,
            horizontal_was_animating: false,
            config: config.clone(),
            disposed: false,
        };

        tracing::info!(
            screen = screen.name(),
            menu = ?initial_menu,
            card = ?initial_card,
            "Gesture coordinator mounted"
        );

        if screen == HomeScreen::Favorites {
            coordinator.animate_vertical(CardState::Expanded);
        }
        coordinator.animate_horizontal(MenuState::Closed);

        Ok(coordinator)
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn screen(&self) -> HomeScreen {
        self.screen
    }

    /// The drawer axis.
    pub fn horizontal(&self) -> &DragAxisState<MenuState> {
        &self.horizontal
    }

    /// The card axis.
    pub fn vertical(&self) -> &DragAxisState<CardState> {
        &self.vertical
    }

    pub fn previous_card_state(&self) -> CardState {
        self.previous_card_state
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// True while either axis has an animation in flight.
    pub fn is_animating(&self) -> bool {
        self.horizontal.is_animating() || self.vertical.is_animating()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Vertical dragging is allowed only on Home and only while the drawer is
    /// fully closed.
    pub fn allow_swipe(&self) -> bool {
        self.horizontal.current() != MenuState::Opened && self.screen == HomeScreen::Home
    }

    /// 1.0 when the card is fully collapsed, 0.0 when fully expanded.
    pub fn collapse_progress(&self) -> f32 {
        let progress = self.vertical.progress();
        match progress.from {
            CardState::Collapsed => {
                if progress.fraction == 1.0 {
                    1.0
                } else {
                    1.0 - progress.fraction
                }
            }
            CardState::Expanded => {
                if progress.fraction == 1.0 {
                    0.0
                } else {
                    progress.fraction
                }
            }
        }
    }

    /// Toolbar variant for the drawer's destination (while animating) or
    /// resting state.
    pub fn toolbar_mode(&self) -> ToolbarMode {
        let menu = if self.horizontal.is_animating() {
            self.horizontal.target()
        } else {
            self.horizontal.current()
        };
        toolbar_mode_for(menu, self.screen)
    }

    /// Vertical offset of the menu panel, sliding with the card between
    /// `max_offset / 2` (expanded) and `max_offset` (collapsed).
    pub fn menu_offset(&self, max_offset: f32) -> f32 {
        max_offset / (2.0 - self.collapse_progress())
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Open the drawer if it is closed, close it if it is open.
    ///
    /// Keyed on the settled state, so repeating it mid-transition re-requests
    /// the same target and does nothing.
    pub fn toggle_menu(&mut self) {
        let target = self.horizontal.current().toggled();
        tracing::debug!(?target, "Toggle menu");
        self.animate_horizontal(target);
    }

    /// Drag the drawer. Returns the consumed delta.
    pub fn drag_horizontal(&mut self, delta: f32) -> f32 {
        if self.disposed {
            return 0.0;
        }
        let consumed = self.horizontal.drag(delta);
        self.sync_horizontal_edge();
        consumed
    }

    /// Release the drawer with a fling velocity.
    pub fn fling_horizontal(&mut self, velocity: f32) -> Option<MenuState> {
        if self.disposed {
            return None;
        }
        let state = self.horizontal.resolve_fling(velocity);
        self.sync_horizontal_edge();
        Some(state)
    }

    /// Drag the card. Consumes nothing while swiping is not allowed.
    pub fn drag_vertical(&mut self, delta: f32) -> f32 {
        if self.disposed || !self.allow_swipe() {
            return 0.0;
        }
        self.vertical.drag(delta)
    }

    /// Release the card with a fling velocity. Ignored while swiping is not allowed.
    pub fn fling_vertical(&mut self, velocity: f32) -> Option<CardState> {
        if self.disposed || !self.allow_swipe() {
            return None;
        }
        Some(self.vertical.resolve_fling(velocity))
    }

    /// Advance both axes by one frame. Returns true if anything moved.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.disposed {
            return false;
        }
        let moved_h = self.horizontal.tick(dt);
        let moved_v = self.vertical.tick(dt);
        self.sync_horizontal_edge();
        moved_h || moved_v
    }

    /// Recompute both anchor sets for a new viewport measurement.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), AxisError> {
        // Validate both before touching either axis
        let mut horizontal = self.horizontal.clone();
        horizontal.set_anchors(horizontal_anchors(viewport, &self.config))?;
        let mut vertical = self.vertical.clone();
        vertical.set_anchors(vertical_anchors(viewport, &self.config))?;

        self.horizontal = horizontal;
        self.vertical = vertical;
        self.sync_horizontal_edge();
        tracing::debug!(
            width = viewport.width,
            toolbar_height = viewport.toolbar_height,
            "Anchors updated"
        );
        Ok(())
    }

    /// Unmount: cancel all animations. The axes stop where they are and
    /// further input is ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.horizontal.cancel_animation();
        self.vertical.cancel_animation();
        self.horizontal_was_animating = false;
        self.disposed = true;
        tracing::info!(screen = self.screen.name(), "Gesture coordinator disposed");
    }

    // =========================================================================
    // Coupling
    // =========================================================================

    fn animate_horizontal(&mut self, state: MenuState) {
        if self.disposed {
            return;
        }
        if let Err(e) = self.horizontal.animate_to(state) {
            contract_violation(&e);
        }
        self.sync_horizontal_edge();
    }

    fn animate_vertical(&mut self, state: CardState) {
        if let Err(e) = self.vertical.animate_to(state) {
            contract_violation(&e);
        }
    }

    /// Compare the drawer's animating flag against the last check and run the
    /// coupling transition on a rising edge.
    fn sync_horizontal_edge(&mut self) {
        let animating = self.horizontal.is_animating();
        let rising = animating && !self.horizontal_was_animating;
        self.horizontal_was_animating = animating;
        if rising {
            self.run_coupling_transition();
        }
    }

    fn run_coupling_transition(&mut self) {
        let menu_target = self.horizontal.target();
        let card = self.vertical.current();

        match (menu_target, card) {
            (MenuState::Opened, CardState::Expanded) => {
                tracing::debug!("Drawer opening over expanded card, collapsing");
                self.previous_card_state = CardState::Expanded;
                self.animate_vertical(CardState::Collapsed);
            }
            (MenuState::Closed, _) if self.previous_card_state == CardState::Expanded => {
                tracing::debug!("Drawer closing, restoring expanded card");
                self.animate_vertical(CardState::Expanded);
            }
            (MenuState::Opened, CardState::Collapsed) => {
                self.previous_card_state = CardState::Collapsed;
            }
            _ => {}
        }
    }
}

/// Toolbar variant for a drawer state on a screen.
pub fn toolbar_mode_for(menu: MenuState, screen: HomeScreen) -> ToolbarMode {
    match (menu, screen) {
        (MenuState::Closed, HomeScreen::Home) => ToolbarMode::Main,
        (MenuState::Closed, HomeScreen::Favorites) => ToolbarMode::Favorites,
        (MenuState::Closed, HomeScreen::Search) => ToolbarMode::Search,
        (MenuState::Closed, HomeScreen::FavoritesSearch) => ToolbarMode::FavoritesSearch,
        (MenuState::Opened, HomeScreen::Home) => ToolbarMode::MainClosed,
        (MenuState::Opened, HomeScreen::Favorites) => ToolbarMode::Favorites,
        (MenuState::Opened, HomeScreen::Search) => ToolbarMode::MainClosed,
        (MenuState::Opened, HomeScreen::FavoritesSearch) => ToolbarMode::MainClosed,
    }
}

fn horizontal_anchors(viewport: Viewport, config: &GestureConfig) -> [(f32, MenuState); 2] {
    [
        (0.0, MenuState::Closed),
        (
            viewport.drawer_open_offset(config.drawer_open_fraction),
            MenuState::Opened,
        ),
    ]
}

fn vertical_anchors(viewport: Viewport, config: &GestureConfig) -> [(f32, CardState); 2] {
    [
        (viewport.card_collapsed_offset(), CardState::Collapsed),
        (
            viewport.card_expanded_offset(config.expanded_ratio),
            CardState::Expanded,
        ),
    ]
}

/// Loud in debug builds, a logged no-op in release.
fn contract_violation(err: &AxisError) {
    tracing::error!("Gesture contract violated: {}", err);
    debug_assert!(false, "gesture contract violated: {}", err);
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn viewport() -> Viewport {
        Viewport::new(400.0, 800.0, 240.0)
    }

    fn coordinator(screen: HomeScreen, menu: MenuState, card: CardState) -> GestureCoordinator {
        GestureCoordinator::with_initial(screen, viewport(), &GestureConfig::default(), menu, card)
            .unwrap()
    }

    fn settle(coordinator: &mut GestureCoordinator) {
        for _ in 0..1_000 {
            if !coordinator.is_animating() {
                return;
            }
            coordinator.tick(FRAME);
        }
        panic!("coordinator did not settle");
    }

    #[test]
    fn test_anchors_from_viewport() {
        let c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);
        assert_eq!(c.horizontal().anchor_offset(MenuState::Closed), Some(0.0));
        assert_eq!(c.horizontal().anchor_offset(MenuState::Opened), Some(380.0));
        assert_eq!(c.vertical().anchor_offset(CardState::Collapsed), Some(240.0));
        assert_eq!(c.vertical().anchor_offset(CardState::Expanded), Some(120.0));
    }

    #[test]
    fn test_degenerate_viewport_fails_fast() {
        let err = GestureCoordinator::new(
            HomeScreen::Home,
            Viewport::new(0.0, 800.0, 240.0),
            &GestureConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, AxisError::DuplicateOffset { offset: 0.0 });
    }

    #[test]
    fn test_home_mount_is_idle() {
        let c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);
        assert!(!c.is_animating());
        assert!(c.allow_swipe());
        assert_eq!(c.collapse_progress(), 1.0);
        assert_eq!(c.toolbar_mode(), ToolbarMode::Main);
    }

    #[test]
    fn test_scenario_a_open_drawer_over_collapsed_card() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);

        c.toggle_menu();
        assert!(c.horizontal().is_animating());
        assert_eq!(c.horizontal().target(), MenuState::Opened);
        assert_eq!(c.previous_card_state(), CardState::Collapsed);
        assert!(!c.vertical().is_animating());
        // Toolbar follows the destination while animating
        assert_eq!(c.toolbar_mode(), ToolbarMode::MainClosed);
        // Drawer not yet settled
        assert!(c.allow_swipe());

        settle(&mut c);
        assert_eq!(c.horizontal().current(), MenuState::Opened);
        assert_eq!(c.vertical().current(), CardState::Collapsed);
        assert!(!c.allow_swipe());
    }

    #[test]
    fn test_scenario_b_collapse_and_restore_card() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Expanded);
        assert_eq!(c.collapse_progress(), 0.0);

        c.toggle_menu();
        assert_eq!(c.previous_card_state(), CardState::Expanded);
        assert!(c.vertical().is_animating());
        assert_eq!(c.vertical().target(), CardState::Collapsed);

        settle(&mut c);
        assert_eq!(c.horizontal().current(), MenuState::Opened);
        assert_eq!(c.vertical().current(), CardState::Collapsed);
        assert_eq!(c.collapse_progress(), 1.0);

        c.toggle_menu();
        assert_eq!(c.horizontal().target(), MenuState::Closed);
        assert!(c.vertical().is_animating());
        assert_eq!(c.vertical().target(), CardState::Expanded);

        settle(&mut c);
        assert_eq!(c.horizontal().current(), MenuState::Closed);
        assert_eq!(c.vertical().current(), CardState::Expanded);
        assert_eq!(c.collapse_progress(), 0.0);
    }

    #[test]
    fn test_close_after_collapsed_open_does_not_expand() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);
        c.toggle_menu();
        settle(&mut c);
        c.toggle_menu();
        assert!(!c.vertical().is_animating());
        settle(&mut c);
        assert_eq!(c.vertical().current(), CardState::Collapsed);
    }

    #[test]
    fn test_scenario_d_favorites_setup() {
        let mut c = coordinator(HomeScreen::Favorites, MenuState::Closed, CardState::Collapsed);
        assert!(c.vertical().is_animating());
        assert_eq!(c.vertical().target(), CardState::Expanded);
        assert!(!c.allow_swipe());

        settle(&mut c);
        assert_eq!(c.vertical().current(), CardState::Expanded);
        assert_eq!(c.horizontal().current(), MenuState::Closed);
        assert_eq!(c.toolbar_mode(), ToolbarMode::Favorites);
    }

    #[test]
    fn test_setup_closes_initially_open_drawer() {
        let mut c = coordinator(HomeScreen::Search, MenuState::Opened, CardState::Collapsed);
        assert!(c.horizontal().is_animating());
        assert_eq!(c.toolbar_mode(), ToolbarMode::Search);

        settle(&mut c);
        assert_eq!(c.horizontal().current(), MenuState::Closed);
        assert_eq!(c.horizontal().offset(), 0.0);
    }

    #[test]
    fn test_coupling_runs_once_per_rising_edge() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Expanded);
        c.toggle_menu();
        let vertical_generation = c.vertical().generation();
        assert_eq!(c.previous_card_state(), CardState::Expanded);

        // Same (h, v) pair again: no duplicate vertical animation
        c.run_coupling_transition();
        assert_eq!(c.previous_card_state(), CardState::Expanded);
        assert_eq!(c.vertical().generation(), vertical_generation);

        // Mid-transition toggle and ticks stay on the same edge
        c.toggle_menu();
        c.tick(FRAME);
        assert_eq!(c.vertical().generation(), vertical_generation);
        assert_eq!(c.horizontal().target(), MenuState::Opened);
    }

    #[test]
    fn test_toggle_mid_transition_is_idempotent() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);
        c.toggle_menu();
        c.tick(FRAME);
        let generation = c.horizontal().generation();

        c.toggle_menu();
        assert_eq!(c.horizontal().generation(), generation);
        assert_eq!(c.horizontal().target(), MenuState::Opened);
    }

    #[test]
    fn test_horizontal_fling_triggers_coupling() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Expanded);
        c.drag_horizontal(100.0);
        assert!(!c.vertical().is_animating());

        assert_eq!(c.fling_horizontal(1_500.0), Some(MenuState::Opened));
        assert_eq!(c.vertical().target(), CardState::Collapsed);
        settle(&mut c);
        assert!(!c.allow_swipe());
    }

    #[test]
    fn test_vertical_input_gated_by_allow_swipe() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);
        c.toggle_menu();
        settle(&mut c);

        assert_eq!(c.drag_vertical(-50.0), 0.0);
        assert_eq!(c.fling_vertical(-800.0), None);
        assert_eq!(c.vertical().offset(), 240.0);

        let mut search = coordinator(HomeScreen::Search, MenuState::Closed, CardState::Collapsed);
        assert_eq!(search.drag_vertical(-50.0), 0.0);
    }

    #[test]
    fn test_collapse_progress_tracks_drag() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);

        let mut last = c.collapse_progress();
        for _ in 0..12 {
            c.drag_vertical(-10.0);
            let now = c.collapse_progress();
            assert!(now < last, "collapse progress must decrease while expanding");
            last = now;
        }
        // 120 of 120 pixels dragged
        assert_eq!(c.vertical().offset(), 120.0);
        assert_eq!(c.collapse_progress(), 0.0);
    }

    #[test]
    fn test_collapse_progress_halfway() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);
        c.drag_vertical(-60.0);
        assert!((c.collapse_progress() - 0.5).abs() < 1e-6);

        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Expanded);
        c.drag_vertical(30.0);
        assert!((c.collapse_progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_collapse_progress_continuous_at_anchors() {
        // Reaching Expanded from Collapsed and resting at Expanded read the same
        let mut dragged = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);
        dragged.drag_vertical(-120.0);
        let resting = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Expanded);
        assert_eq!(dragged.collapse_progress(), resting.collapse_progress());

        let mut dragged = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Expanded);
        dragged.drag_vertical(120.0);
        let resting = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);
        assert_eq!(dragged.collapse_progress(), resting.collapse_progress());
    }

    #[test]
    fn test_menu_offset_follows_card() {
        let c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);
        assert_eq!(c.menu_offset(300.0), 300.0);

        let c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Expanded);
        assert_eq!(c.menu_offset(300.0), 150.0);
    }

    #[test]
    fn test_toolbar_table() {
        let table = [MenuState::Closed, MenuState::Opened]
            .into_iter()
            .flat_map(|menu| {
                HomeScreen::ALL.into_iter().map(move |screen| {
                    let mode = toolbar_mode_for(menu, screen);
                    format!("{:?} {:?} => {:?}", menu, screen, mode)
                })
            })
            .collect::<Vec<_>>()
            .join("\n");

        insta::assert_snapshot!(table, @r"
        Closed Home => Main
        Closed Favorites => Favorites
        Closed Search => Search
        Closed FavoritesSearch => FavoritesSearch
        Opened Home => MainClosed
        Opened Favorites => Favorites
        Opened Search => MainClosed
        Opened FavoritesSearch => MainClosed
        ");
    }

    #[test]
    fn test_resize_moves_resting_axes() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Collapsed);
        c.resize(Viewport::new(800.0, 1200.0, 300.0)).unwrap();
        assert_eq!(c.horizontal().anchor_offset(MenuState::Opened), Some(760.0));
        assert_eq!(c.vertical().offset(), 300.0);
        assert!(!c.is_animating());

        assert!(c.resize(Viewport::new(100.0, 100.0, 0.0)).is_err());
        // A rejected resize leaves both axes untouched
        assert_eq!(c.horizontal().anchor_offset(MenuState::Opened), Some(760.0));
        assert_eq!(c.vertical().offset(), 300.0);
    }

    #[test]
    fn test_dispose_cancels_animations() {
        let mut c = coordinator(HomeScreen::Home, MenuState::Closed, CardState::Expanded);
        c.toggle_menu();
        c.tick(FRAME);
        let h = c.horizontal().offset();
        let v = c.vertical().offset();

        c.dispose();
        assert!(c.is_disposed());
        assert!(!c.is_animating());
        assert!(!c.tick(FRAME));
        c.toggle_menu();
        assert_eq!(c.drag_horizontal(10.0), 0.0);
        assert_eq!(c.horizontal().offset(), h);
        assert_eq!(c.vertical().offset(), v);
        assert!(!c.is_animating());
    }
}
