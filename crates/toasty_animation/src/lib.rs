//! Toasty Animation System
//!
//! Timers and timed property animations on a single-threaded UI queue.
//!
//! # Features
//!
//! - **UiScheduler**: one-shot timers and timed animations, run in due order
//! - **Cancellation**: every scheduled item is cancellable by id, idempotently
//! - **Easing**: the small curve set toast presentation needs
//! - **Interpolation**: `Interpolate` for scalars and affine transforms
//!
//! The scheduler does not own a thread. The host drives it from its event
//! loop with [`UiScheduler::tick`], or with [`UiScheduler::advance`] when it
//! keeps its own clock (headless hosts, tests).

pub mod easing;
pub mod scheduler;
pub mod values;

pub use easing::Easing;
pub use scheduler::{AnimationId, AnimationSpec, SchedulerHandle, TimerId, UiScheduler};
pub use values::{Interpolate, Tween};
