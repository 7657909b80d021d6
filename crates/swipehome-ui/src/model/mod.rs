//! State model for the home screen.
//!
//! All types are toolkit-independent for testability.

mod list;
mod session;

pub use list::ListState;
pub use session::{HomeSession, HomeSnapshot, ScrollOutcome};
