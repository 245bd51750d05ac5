//! Toasty Platform Abstraction Layer
//!
//! Everything the presentation core needs from the host UI toolkit, behind
//! small traits and plain data types:
//!
//! - [`Host`] - resolves the topmost presented container and emits haptics
//! - [`ContainerId`] - opaque reference to a host surface a view attaches to
//! - [`TouchEvent`] / [`GestureRecognizer`] - raw touches in, pan and tap
//!   gestures out
//!
//! Host toolkits (UIKit, Android views, a desktop shell) implement [`Host`]
//! by walking their own window hierarchy. [`HeadlessHost`] keeps a plain
//! stack of presented surfaces for tests and headless rendering.
//!
//! # Example
//!
//! ```rust
//! use toasty_platform::{ContainerId, HeadlessHost, Host};
//!
//! let host = HeadlessHost::new();
//! assert_eq!(host.topmost_container(), None);
//!
//! host.present(ContainerId::from_raw(1));
//! host.present(ContainerId::from_raw(2));
//! assert_eq!(host.topmost_container(), Some(ContainerId::from_raw(2)));
//! ```

mod error;
mod host;
mod input;

pub use error::{PlatformError, Result};
pub use host::{ContainerId, HapticFeedback, HeadlessHost, Host};
pub use input::{Gesture, GestureRecognizer, PanGesture, PanPhase, TouchEvent, DEFAULT_TAP_SLOP};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::host::{ContainerId, HapticFeedback, HeadlessHost, Host};
    pub use crate::input::{Gesture, GestureRecognizer, PanGesture, PanPhase, TouchEvent};
}
