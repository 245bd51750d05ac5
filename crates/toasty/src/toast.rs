//! Toast lifecycle controller
//!
//! A [`Toast`] owns one presentable view and walks it through
//!
//! ```text
//! Idle --show--> Showing --enter done--> Visible --close--> Closing --exit done--> Closed
//!                   |                                          ^
//!                   +------------------close-------------------+
//! ```
//!
//! Everything runs on the UI thread through the [`UiScheduler`]: the show
//! delay, the enter and exit animations, the settle animation after a pan and
//! the auto-hide timer. Any step that can end or re-arm the auto-hide timer
//! cancels the armed one first, so at most one timer is ever live and a timer
//! can never fire into a toast that is already closing.
//!
//! In-flight scheduler work keeps the toast alive, so showing a toast and
//! dropping the handle is fine: it closes on its own and is freed once the
//! exit animation has run.
//!
//! [`UiScheduler`]: toasty_animation::UiScheduler

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use smallvec::SmallVec;
use toasty_animation::scheduler::CompletionCallback;
use toasty_animation::{AnimationId, AnimationSpec, Easing, SchedulerHandle, TimerId, Tween};
use toasty_core::{Affine2D, StateTransitions};
use toasty_platform::{
    Gesture, GestureRecognizer, HapticFeedback, Host, PanGesture, PanPhase, TouchEvent,
};

use crate::config::ToastConfiguration;
use crate::context::ToastContext;
use crate::delegate::ToastDelegate;
use crate::error::{Result, ToastError};
use crate::gesture::{PanOutcome, PanTracker};
use crate::view::{
    initial_transform, AppleToastView, IconAppleToastView, PresentableView, ToastContent,
};

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a toast
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    fn next() -> Self {
        Self(NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID
    pub fn id(&self) -> u64 {
        self.0
    }
}

// =============================================================================
// State machine
// =============================================================================

/// Lifecycle state of a toast
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ToastState {
    /// Constructed, not shown yet
    #[default]
    Idle,
    /// Attached, enter animation pending or playing
    Showing,
    /// Fully presented and interactive
    Visible,
    /// Exit animation is playing
    Closing,
    /// Detached; terminal
    Closed,
}

impl ToastState {
    /// Whether the view is attached to a container
    pub fn is_presented(&self) -> bool {
        matches!(
            self,
            ToastState::Showing | ToastState::Visible | ToastState::Closing
        )
    }

    /// Whether an enter or exit animation is in progress
    pub fn is_animating(&self) -> bool {
        matches!(self, ToastState::Showing | ToastState::Closing)
    }

    /// Whether the toast is gone for good
    pub fn is_terminal(&self) -> bool {
        matches!(self, ToastState::Closed)
    }
}

/// Events driving [`ToastState`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToastEvent {
    /// `show` called on a fresh toast
    Show,
    /// Enter animation completed
    EnterFinished,
    /// Close requested by the caller, timer or a gesture
    Close,
    /// Exit animation completed
    ExitFinished,
}

impl StateTransitions for ToastState {
    type Event = ToastEvent;

    fn on_event(&self, event: ToastEvent) -> Option<Self> {
        use ToastEvent::*;
        use ToastState::*;

        match (self, event) {
            (Idle, Show) => Some(Showing),
            (Showing, EnterFinished) => Some(Visible),
            // Closing may interrupt the enter animation
            (Showing, Close) | (Visible, Close) => Some(Closing),
            (Closing, ExitFinished) => Some(Closed),
            _ => None,
        }
    }
}

// =============================================================================
// Toast
// =============================================================================

struct ToastShared {
    id: ToastId,
    configuration: ToastConfiguration,
    view: RefCell<Box<dyn PresentableView>>,
    state: Cell<ToastState>,
    /// The single armed auto-hide timer
    close_timer: Cell<Option<TimerId>>,
    /// Enter, settle or exit animation in flight
    animation: Cell<Option<AnimationId>>,
    /// View origin once fully presented
    resting_origin: Cell<Option<f32>>,
    pan: Cell<PanTracker>,
    recognizer: RefCell<GestureRecognizer>,
    tap_to_close: Cell<bool>,
    /// Completions waiting for the exit animation
    pending_completions: RefCell<SmallVec<[CompletionCallback; 1]>>,
    delegate: RefCell<Option<Weak<dyn ToastDelegate>>>,
    scheduler: SchedulerHandle,
    host: Rc<dyn Host>,
}

/// A transient notification and its presentation lifecycle
///
/// Cloning gives another handle to the same toast.
///
/// ```rust
/// use std::rc::Rc;
/// use std::time::Duration;
/// use toasty::prelude::*;
///
/// let scheduler = UiScheduler::new();
/// let host = Rc::new(HeadlessHost::with_container(ContainerId::from_raw(1)));
/// let context = ToastContext::new(scheduler.handle(), host);
///
/// let toast = Toast::default_style(
///     &context,
///     ToastContent::new("Saved").subtitle("Draft synced"),
///     ToastConfiguration::default(),
/// );
/// toast.show(Duration::ZERO).unwrap();
/// assert_eq!(toast.state(), ToastState::Showing);
///
/// scheduler.run_until_idle(Duration::from_millis(16), Duration::from_secs(5));
/// assert_eq!(toast.state(), ToastState::Closed);
/// ```
#[derive(Clone)]
pub struct Toast {
    shared: Rc<ToastShared>,
}

impl Toast {
    /// Toast with the default chrome showing an image, title and subtitle
    pub fn default_style(
        context: &ToastContext,
        content: ToastContent,
        configuration: ToastConfiguration,
    ) -> Self {
        let view = AppleToastView::new(IconAppleToastView::new(content));
        Self::custom(context, view, configuration)
    }

    /// Toast presenting an arbitrary view
    ///
    /// The view is moved to the hidden state (scaled down, offset upward,
    /// transparent) whatever it looked like before.
    pub fn custom(
        context: &ToastContext,
        view: impl PresentableView + 'static,
        configuration: ToastConfiguration,
    ) -> Self {
        let mut view: Box<dyn PresentableView> = Box::new(view);
        view.set_transform(initial_transform());
        view.set_opacity(0.0);

        let id = ToastId::next();
        tracing::debug!("Toast {:?}: created with {:?}", id, configuration);

        Self {
            shared: Rc::new(ToastShared {
                id,
                configuration,
                view: RefCell::new(view),
                state: Cell::new(ToastState::Idle),
                close_timer: Cell::new(None),
                animation: Cell::new(None),
                resting_origin: Cell::new(None),
                pan: Cell::new(PanTracker::Idle),
                recognizer: RefCell::new(GestureRecognizer::new()),
                tap_to_close: Cell::new(false),
                pending_completions: RefCell::new(SmallVec::new()),
                delegate: RefCell::new(None),
                scheduler: context.scheduler().clone(),
                host: context.host().clone(),
            }),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Process-unique identity of this toast
    pub fn id(&self) -> ToastId {
        self.shared.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> ToastState {
        self.shared.state.get()
    }

    /// Configuration captured at construction
    pub fn configuration(&self) -> &ToastConfiguration {
        &self.shared.configuration
    }

    /// Inspect the view
    ///
    /// `f` must not call back into the toast.
    pub fn with_view<R>(&self, f: impl FnOnce(&dyn PresentableView) -> R) -> R {
        let view = self.shared.view.borrow();
        f(&**view)
    }

    /// Whether an auto-hide timer is currently armed
    pub fn has_armed_timer(&self) -> bool {
        self.shared
            .close_timer
            .get()
            .is_some_and(|id| self.shared.scheduler.is_timer_armed(id))
    }

    /// Whether an enter, exit or settle animation is running
    pub fn is_animating(&self) -> bool {
        self.shared
            .animation
            .get()
            .is_some_and(|id| self.shared.scheduler.is_animating(id))
    }

    /// Register the delegate, held weakly
    pub fn set_delegate<D: ToastDelegate + 'static>(&self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        self.set_delegate_weak(weak);
    }

    /// Register an already downgraded delegate
    ///
    /// Use this when the host only holds an `Rc<dyn ToastDelegate>`.
    pub fn set_delegate_weak(&self, delegate: Weak<dyn ToastDelegate>) {
        *self.shared.delegate.borrow_mut() = Some(delegate);
    }

    /// Drop the registered delegate; later transitions notify nobody
    pub fn clear_delegate(&self) {
        self.shared.delegate.borrow_mut().take();
    }

    // =========================================================================
    // Show
    // =========================================================================

    /// Attach the view and play the enter animation after `delay`
    ///
    /// Fails without side effects when the toast already left `Idle`, when
    /// no container can be resolved, or when the scheduler is gone.
    pub fn show(&self, delay: Duration) -> Result<()> {
        let state = self.state();
        if !state.accepts(ToastEvent::Show) {
            return Err(ToastError::InvalidState(state));
        }
        if !self.shared.scheduler.is_alive() {
            return Err(ToastError::SchedulerUnavailable);
        }

        let container = match self.shared.configuration.attach_to() {
            Some(container) => container,
            None => self.shared.host.require_container().map_err(|err| {
                tracing::debug!("Toast {:?}: not shown, {}", self.shared.id, err);
                err
            })?,
        };

        {
            let mut view = self.shared.view.borrow_mut();
            view.attach(container);
            view.will_present(container);
        }
        self.transition(ToastEvent::Show);
        tracing::debug!(
            "Toast {:?}: attached to {:?}, entering after {:?}",
            self.shared.id,
            container,
            delay
        );

        self.notify(|delegate, toast| delegate.will_show(toast));
        // The delegate may have closed us already
        if self.state() == ToastState::Showing {
            self.animate_enter(delay);
        }
        Ok(())
    }

    /// Emit haptic feedback, then [`Toast::show`]
    ///
    /// Hosts without haptics still show the toast.
    pub fn show_with_haptic(&self, feedback: HapticFeedback, delay: Duration) -> Result<()> {
        let state = self.state();
        if !state.accepts(ToastEvent::Show) {
            return Err(ToastError::InvalidState(state));
        }
        if let Err(err) = self.shared.host.haptic_feedback(feedback) {
            tracing::debug!("Toast {:?}: no haptics, {}", self.shared.id, err);
        }
        self.show(delay)
    }

    fn animate_enter(&self, delay: Duration) {
        let (transform, opacity) = {
            let view = self.shared.view.borrow();
            (
                Tween::new(view.transform(), Affine2D::IDENTITY),
                Tween::new(view.opacity(), 1.0),
            )
        };
        let spec = AnimationSpec::new(self.shared.configuration.animation_time(), Easing::EaseOut)
            .delay(delay);

        self.run_animation(
            spec,
            move |toast, t| {
                let mut view = toast.shared.view.borrow_mut();
                view.set_transform(transform.at(t));
                view.set_opacity(opacity.at(t));
            },
            |toast| toast.finish_show(),
        );
    }

    fn finish_show(&self) {
        let origin_y = self.shared.view.borrow().origin_y();
        self.shared.resting_origin.set(Some(origin_y));
        if !self.transition(ToastEvent::EnterFinished) {
            return;
        }

        self.notify(|delegate, toast| delegate.did_show(toast));
        if self.state() == ToastState::Visible {
            self.arm_close_timer();
        }
    }

    // =========================================================================
    // Close
    // =========================================================================

    /// Play the exit animation and detach the view
    ///
    /// No-op unless showing or visible. Closing an already closing toast
    /// changes nothing.
    pub fn close(&self) {
        self.begin_close(None);
    }

    /// [`Toast::close`], running `completion` once the view is detached
    ///
    /// If the toast is already closing, `completion` runs when that close
    /// finishes. If it is idle or closed, `completion` is dropped.
    pub fn close_with<F>(&self, completion: F)
    where
        F: FnOnce() + 'static,
    {
        self.begin_close(Some(Box::new(completion)));
    }

    fn begin_close(&self, completion: Option<CompletionCallback>) {
        match self.state() {
            ToastState::Showing | ToastState::Visible => {}
            ToastState::Closing => {
                if let Some(completion) = completion {
                    self.shared.pending_completions.borrow_mut().push(completion);
                }
                tracing::trace!("Toast {:?}: already closing", self.shared.id);
                return;
            }
            state => {
                tracing::trace!("Toast {:?}: close ignored in {:?}", self.shared.id, state);
                return;
            }
        }

        self.cancel_close_timer();
        self.cancel_animation();
        self.shared.pan.set(PanTracker::Idle);
        if let Some(completion) = completion {
            self.shared.pending_completions.borrow_mut().push(completion);
        }

        self.transition(ToastEvent::Close);
        self.notify(|delegate, toast| delegate.will_close(toast));
        self.animate_exit();
    }

    fn animate_exit(&self) {
        let (transform, opacity) = {
            let view = self.shared.view.borrow();
            (
                Tween::new(view.transform(), initial_transform()),
                Tween::new(view.opacity(), 0.0),
            )
        };
        let spec = AnimationSpec::new(self.shared.configuration.animation_time(), Easing::EaseIn);

        self.run_animation(
            spec,
            move |toast, t| {
                let mut view = toast.shared.view.borrow_mut();
                view.set_transform(transform.at(t));
                view.set_opacity(opacity.at(t));
            },
            |toast| toast.finish_close(),
        );
    }

    fn finish_close(&self) {
        {
            let mut view = self.shared.view.borrow_mut();
            view.detach();
            view.set_transform(Affine2D::IDENTITY);
            view.set_opacity(1.0);
        }
        if !self.transition(ToastEvent::ExitFinished) {
            return;
        }

        let completions = std::mem::take(&mut *self.shared.pending_completions.borrow_mut());
        for completion in completions {
            completion();
        }
        self.notify(|delegate, toast| delegate.did_close(toast));
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    /// Close on tap from now on
    pub fn enable_tap_to_close(&self) {
        self.shared.tap_to_close.set(true);
    }

    /// Handle a tap on the toast
    ///
    /// Returns true if the tap started closing the toast.
    pub fn handle_tap(&self) -> bool {
        if !self.shared.tap_to_close.get() {
            return false;
        }
        self.cancel_close_timer();
        let will_close = self.state().accepts(ToastEvent::Close);
        self.close();
        will_close
    }

    /// Handle one step of a pan gesture
    ///
    /// Ignored unless pan-to-close is enabled and the toast is visible.
    pub fn handle_pan(&self, gesture: PanGesture) {
        if !self.shared.configuration.pan_to_close() {
            return;
        }
        let touch_y = gesture.location.y;
        match gesture.phase {
            PanPhase::Began => self.pan_began(touch_y),
            PanPhase::Changed => self.pan_changed(touch_y),
            PanPhase::Ended | PanPhase::Cancelled => self.pan_ended(),
        }
    }

    /// Dispatch a recognized gesture
    pub fn handle_gesture(&self, gesture: Gesture) {
        match gesture {
            Gesture::Tap { .. } => {
                self.handle_tap();
            }
            Gesture::Pan(pan) => self.handle_pan(pan),
        }
    }

    /// Feed a raw touch through the toast's own gesture recognizer
    pub fn handle_touch(&self, event: &TouchEvent) {
        let gesture = self.shared.recognizer.borrow_mut().process(event);
        if let Some(gesture) = gesture {
            self.handle_gesture(gesture);
        }
    }

    fn pan_began(&self, touch_y: f32) {
        if self.state() != ToastState::Visible {
            return;
        }
        // The user holds the toast now, no auto-hide and no settling
        self.cancel_close_timer();
        self.cancel_animation();

        let origin_y = self.shared.view.borrow().origin_y();
        self.shared.pan.set(PanTracker::begin(origin_y, touch_y));
        tracing::trace!(
            "Toast {:?}: pan began at origin {} touch {}",
            self.shared.id,
            origin_y,
            touch_y
        );
    }

    fn pan_changed(&self, touch_y: f32) {
        if self.state() != ToastState::Visible {
            return;
        }
        if let Some(y) = self.shared.pan.get().update(touch_y) {
            self.shared.view.borrow_mut().set_origin_y(y);
        }
    }

    fn pan_ended(&self) {
        let tracker = self.shared.pan.replace(PanTracker::Idle);
        if self.state() != ToastState::Visible {
            return;
        }

        let origin_y = self.shared.view.borrow().origin_y();
        let resting_y = self.shared.resting_origin.get().unwrap_or(origin_y);
        let hidden_ty = initial_transform().ty();

        match tracker.end(origin_y, resting_y, hidden_ty) {
            Some(PanOutcome::Dismiss) => {
                tracing::debug!("Toast {:?}: dismissed by pan at {}", self.shared.id, origin_y);
                self.close();
            }
            Some(PanOutcome::Settle { resting_y }) => self.settle(resting_y),
            None => {}
        }
    }

    /// Animate back to the resting origin, then re-arm auto-hide
    fn settle(&self, resting_y: f32) {
        let origin = Tween::new(self.shared.view.borrow().origin_y(), resting_y);
        let spec = AnimationSpec::new(self.shared.configuration.animation_time(), Easing::EaseOut);

        self.run_animation(
            spec,
            move |toast, t| toast.shared.view.borrow_mut().set_origin_y(origin.at(t)),
            |toast| {
                if toast.state() == ToastState::Visible {
                    toast.arm_close_timer();
                }
            },
        );
    }

    // =========================================================================
    // Timer and animation plumbing
    // =========================================================================

    /// Replace the armed auto-hide timer, if auto-hide is enabled
    fn arm_close_timer(&self) {
        self.cancel_close_timer();
        if !self.shared.configuration.auto_hide() {
            return;
        }

        let toast = self.clone();
        let timer = self.shared.scheduler.schedule_timer(
            self.shared.configuration.display_time(),
            move || {
                toast.shared.close_timer.set(None);
                tracing::debug!("Toast {:?}: display time elapsed", toast.shared.id);
                toast.close();
            },
        );
        self.shared.close_timer.set(timer);
    }

    fn cancel_close_timer(&self) {
        if let Some(timer) = self.shared.close_timer.take() {
            if self.shared.scheduler.cancel_timer(timer) {
                tracing::trace!("Toast {:?}: cancelled timer {:?}", self.shared.id, timer);
            }
        }
    }

    fn cancel_animation(&self) {
        if let Some(animation) = self.shared.animation.take() {
            self.shared.scheduler.cancel_animation(animation);
        }
    }

    /// Start the toast's one animation, replacing any in flight
    ///
    /// Without a scheduler the animation jumps to its end immediately.
    fn run_animation<F, C>(&self, spec: AnimationSpec, mut on_frame: F, on_complete: C)
    where
        F: FnMut(&Toast, f32) + 'static,
        C: FnOnce(&Toast) + 'static,
    {
        self.cancel_animation();

        if !self.shared.scheduler.is_alive() {
            tracing::debug!("Toast {:?}: scheduler gone, skipping animation", self.shared.id);
            on_frame(self, 1.0);
            on_complete(self);
            return;
        }

        let frame_toast = self.clone();
        let complete_toast = self.clone();
        let animation = self.shared.scheduler.animate(
            spec,
            move |t| on_frame(&frame_toast, t),
            move || {
                complete_toast.shared.animation.set(None);
                on_complete(&complete_toast);
            },
        );
        self.shared.animation.set(animation);
    }

    fn transition(&self, event: ToastEvent) -> bool {
        let current = self.state();
        match current.on_event(event) {
            Some(next) => {
                tracing::debug!(
                    "Toast {:?}: {:?} -> {:?} on {:?}",
                    self.shared.id,
                    current,
                    next,
                    event
                );
                self.shared.state.set(next);
                true
            }
            None => {
                tracing::trace!(
                    "Toast {:?}: {:?} ignored in {:?}",
                    self.shared.id,
                    event,
                    current
                );
                false
            }
        }
    }

    /// Call the delegate if it is still alive
    fn notify(&self, f: impl FnOnce(&dyn ToastDelegate, &Toast)) {
        let delegate = self
            .shared
            .delegate
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade());
        if let Some(delegate) = delegate {
            f(&*delegate, self);
        }
    }
}

impl fmt::Debug for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toast")
            .field("id", &self.shared.id)
            .field("state", &self.state())
            .field("configuration", &self.shared.configuration)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use ToastEvent::*;
        use ToastState::*;

        assert_eq!(Idle.on_event(Show), Some(Showing));
        assert_eq!(Showing.on_event(EnterFinished), Some(Visible));
        assert_eq!(Showing.on_event(Close), Some(Closing));
        assert_eq!(Visible.on_event(Close), Some(Closing));
        assert_eq!(Closing.on_event(ExitFinished), Some(Closed));

        assert!(!Idle.accepts(Close));
        assert!(!Closing.accepts(Close));
        assert!(!Visible.accepts(Show));
        for event in [Show, EnterFinished, Close, ExitFinished] {
            assert_eq!(Closed.on_event(event), None);
        }
    }

    #[test]
    fn test_state_predicates() {
        assert!(!ToastState::Idle.is_presented());
        assert!(ToastState::Closing.is_presented());
        assert!(ToastState::Showing.is_animating());
        assert!(!ToastState::Visible.is_animating());
        assert!(ToastState::Closed.is_terminal());
    }

    #[test]
    fn test_ids_unique() {
        let a = ToastId::next();
        let b = ToastId::next();
        assert_ne!(a, b);
        assert!(b.id() > a.id());
    }
}
