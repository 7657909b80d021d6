//! Home screen model for SwipeHome.
//!
//! This crate wires the gesture coordinator to the rest of the screen:
//! - `ListState` and `HomeSession` for the content list and the nested-scroll pipeline
//! - `ObservableHome` for broadcasting derived state to a renderer
//! - `FrameClock` for driving animations from a tokio interval
//!
//! Nothing here depends on a UI toolkit; a renderer subscribes to
//! `HomeSnapshot`s and feeds input back in.

pub mod frame_clock;
pub mod model;
pub mod observable;

pub use frame_clock::FrameClock;
pub use model::{HomeSession, HomeSnapshot, ListState, ScrollOutcome};
pub use observable::ObservableHome;
