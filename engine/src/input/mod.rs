//! Input Module
//!
//! Provides the two build actions (primary = commit, secondary = remove) as
//! edge-triggered per-tick signals. This module is decoupled from any specific
//! device (mouse, VR controller) so hosts feed plain button levels.
//!
//! # Example
//!
//! ```rust,ignore
//! use snap_build_engine::input::ActionButtons;
//!
//! let mut buttons = ActionButtons::new();
//!
//! // Each frame, feed the held state of the two buttons
//! let actions = buttons.update(left_down, right_down);
//! if actions.primary {
//!     // Commit began this tick
//! }
//! ```

pub mod actions;

pub use actions::{ActionButtons, ActionState};
