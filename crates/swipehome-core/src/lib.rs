//! Core types for SwipeHome.
//!
//! This crate contains shared data structures that are used across all SwipeHome crates:
//! - Screen, menu, card and toolbar identifiers
//! - Viewport measurements and the anchor offsets derived from them
//! - Configuration types
//! - Error types

mod config;
mod error;
mod screen;
mod viewport;

pub use config::{config_dir, config_path, AnimationConfig, Easing, GestureConfig};
pub use error::{AxisError, ConfigError};
pub use screen::{CardState, HomeScreen, MenuState, ToolbarMode};
pub use viewport::Viewport;
