//! Gesture state machines for the SwipeHome screen.
//!
//! This crate provides:
//! - `DragAxisState`: an anchored drag axis with frame-driven settle animations
//! - `GestureCoordinator`: the drawer and card axes plus their coupling rules
//!   and derived state
//! - `ScrollGestureArbiter`: hands list overscroll and top-of-list flings to the card
//!
//! Everything here is synchronous and toolkit-independent. A frame clock
//! drives animations by calling `tick`.

pub mod arbiter;
pub mod axis;
pub mod coordinator;

pub use arbiter::{is_at_top, ListPosition, ScrollGestureArbiter};
pub use axis::{AnchorState, AxisAnimation, DragAxisState, SwipeProgress};
pub use coordinator::{toolbar_mode_for, GestureCoordinator};
