//! Toasty
//!
//! Transient notifications ("toasts") for mobile UI toolkits: a small overlay
//! view that slides in, hides itself after a delay, and can be dismissed by
//! dragging it upward or tapping it.
//!
//! # Overview
//!
//! - [`Toast`] - the presentation lifecycle controller
//! - [`ToastConfiguration`] - auto-hide, pan-to-close, timings, attachment target
//! - [`PresentableView`] - what a toast needs from a view
//! - [`ToastDelegate`] - will/did show and will/did close notifications
//! - [`ToastContext`] - the UI scheduler and host shared by all toasts
//!
//! The host toolkit owns a [`UiScheduler`] and drives it from its event
//! loop, implements [`Host`] to resolve the topmost container, and mirrors
//! the view's transform, opacity and origin onto its real view.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use toasty::prelude::*;
//!
//! let scheduler = UiScheduler::new();
//! let host = Rc::new(HeadlessHost::with_container(ContainerId::from_raw(1)));
//! let context = ToastContext::new(scheduler.handle(), host);
//!
//! let configuration = ToastConfiguration::new()
//!     .with_auto_hide(false)
//!     .with_pan_to_close(true);
//! let toast = Toast::default_style(&context, ToastContent::new("Copied"), configuration);
//! toast.show(Duration::ZERO).unwrap();
//!
//! scheduler.advance(Duration::from_millis(300));
//! assert_eq!(toast.state(), ToastState::Visible);
//!
//! toast.close();
//! scheduler.advance(Duration::from_millis(300));
//! assert_eq!(toast.state(), ToastState::Closed);
//! ```
//!
//! [`UiScheduler`]: toasty_animation::UiScheduler
//! [`Host`]: toasty_platform::Host

pub mod config;
pub mod context;
pub mod delegate;
pub mod error;
pub mod gesture;
pub mod toast;
pub mod view;


pub use config::{ToastConfiguration, DEFAULT_ANIMATION_TIME, DEFAULT_DISPLAY_TIME};
pub use context::ToastContext;
pub use delegate::ToastDelegate;
pub use error::{Result, ToastError};
pub use gesture::{PanOutcome, PanTracker};
pub use toast::{Toast, ToastEvent, ToastId, ToastState};
pub use view::{
    initial_transform, AppleToastStyle, AppleToastView, IconAppleToastView, PresentableView,
    ToastContent, ViewState,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ToastConfiguration;
    pub use crate::context::ToastContext;
    pub use crate::delegate::ToastDelegate;
    pub use crate::error::ToastError;
    pub use crate::toast::{Toast, ToastState};
    pub use crate::view::{AppleToastView, IconAppleToastView, PresentableView, ToastContent};

    pub use toasty_animation::UiScheduler;
    pub use toasty_platform::{ContainerId, HapticFeedback, HeadlessHost, Host, TouchEvent};
}
