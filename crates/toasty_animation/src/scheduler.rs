//! UI scheduler
//!
//! A single-threaded queue of one-shot timers and timed animations.
//! Everything runs on the thread that drives the scheduler, so callbacks may
//! freely schedule or cancel other work while they execute.
//!
//! - Timers fire once, after their delay, then are forgotten.
//! - Animations report eased progress each frame while running, then run
//!   their completion exactly once.
//! - Cancelling removes the item; its callbacks never run afterwards.
//!   Cancelling an unknown, fired, or already cancelled id is a no-op.
//!
//! Work that becomes due during one [`UiScheduler::advance`] call runs in
//! due-time order, ties broken by scheduling order. Work scheduled by a
//! callback that is already due runs within the same call.

use crate::easing::Easing;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

new_key_type! {
    /// Handle to an armed one-shot timer
    pub struct TimerId;
    /// Handle to a running animation
    pub struct AnimationId;
}

/// Frame callback, receives eased progress in 0.0..=1.0
pub type FrameCallback = Box<dyn FnMut(f32)>;

/// Callback run once when a timer fires or an animation completes
pub type CompletionCallback = Box<dyn FnOnce()>;

/// Timing parameters for an animation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AnimationSpec {
    /// Wait before the first frame
    pub delay: Duration,
    /// Length of the animation once started
    pub duration: Duration,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            delay: Duration::ZERO,
            duration,
            easing,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

struct Timer {
    due: Duration,
    seq: u64,
    callback: CompletionCallback,
}

struct Animation {
    start: Duration,
    spec: AnimationSpec,
    seq: u64,
    /// Taken while the callback runs, so it can reschedule without aliasing
    on_frame: Option<FrameCallback>,
    on_complete: Option<CompletionCallback>,
}

impl Animation {
    fn end(&self) -> Duration {
        self.start.saturating_add(self.spec.duration)
    }

    fn eased_progress(&self, now: Duration) -> f32 {
        if self.spec.duration.is_zero() {
            return self.spec.easing.apply(1.0);
        }
        let elapsed = now.saturating_sub(self.start).as_secs_f32();
        self.spec
            .easing
            .apply(elapsed / self.spec.duration.as_secs_f32())
    }
}

/// Internal state of the scheduler
struct SchedulerInner {
    timers: SlotMap<TimerId, Timer>,
    animations: SlotMap<AnimationId, Animation>,
    /// Virtual clock, time since the scheduler was created
    now: Duration,
    next_seq: u64,
    last_tick: Option<Instant>,
}

impl SchedulerInner {
    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

enum DueWork {
    Timer(TimerId, CompletionCallback),
    Animation(AnimationId, Animation),
}

/// The scheduler that owns all pending timers and animations
///
/// Held by the host event loop; components receive a [`SchedulerHandle`].
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use toasty_animation::UiScheduler;
///
/// let scheduler = UiScheduler::new();
/// let fired = Rc::new(Cell::new(false));
///
/// let flag = fired.clone();
/// scheduler
///     .handle()
///     .schedule_timer(Duration::from_millis(500), move || flag.set(true));
///
/// scheduler.advance(Duration::from_millis(499));
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
pub struct UiScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl UiScheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                timers: SlotMap::with_key(),
                animations: SlotMap::with_key(),
                now: Duration::ZERO,
                next_seq: 0,
                last_tick: None,
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Advance using the wall clock
    ///
    /// The first call only records the reference instant. Returns true if
    /// work is still pending.
    pub fn tick(&self) -> bool {
        let now = Instant::now();
        let dt = {
            let mut inner = self.inner.borrow_mut();
            let dt = inner
                .last_tick
                .map(|last| now.saturating_duration_since(last))
                .unwrap_or_default();
            inner.last_tick = Some(now);
            dt
        };
        self.advance(dt)
    }

    /// Move the clock forward by `dt`, emitting frames and running due work
    ///
    /// Returns true if work is still pending.
    pub fn advance(&self, dt: Duration) -> bool {
        let now = {
            let mut inner = self.inner.borrow_mut();
            inner.now = inner.now.saturating_add(dt);
            inner.now
        };

        self.emit_frames(now);

        while let Some(work) = self.pop_due(now) {
            match work {
                DueWork::Timer(id, callback) => {
                    tracing::trace!("UiScheduler: timer {:?} fired at {:?}", id, now);
                    callback();
                }
                DueWork::Animation(id, mut animation) => {
                    tracing::trace!("UiScheduler: animation {:?} completed at {:?}", id, now);
                    if let Some(mut on_frame) = animation.on_frame.take() {
                        on_frame(animation.spec.easing.apply(1.0));
                    }
                    if let Some(on_complete) = animation.on_complete.take() {
                        on_complete();
                    }
                }
            }
        }

        self.has_pending()
    }

    /// Call the frame callback of every running, unfinished animation
    fn emit_frames(&self, now: Duration) {
        let running: SmallVec<[AnimationId; 8]> = self
            .inner
            .borrow()
            .animations
            .iter()
            .filter(|(_, a)| a.start <= now && now < a.end())
            .map(|(id, _)| id)
            .collect();

        for id in running {
            let frame = {
                let mut inner = self.inner.borrow_mut();
                inner.animations.get_mut(id).and_then(|a| {
                    let progress = a.eased_progress(now);
                    a.on_frame.take().map(|f| (f, progress))
                })
            };

            if let Some((mut on_frame, progress)) = frame {
                on_frame(progress);
                // Put the callback back unless it cancelled its own animation
                if let Some(animation) = self.inner.borrow_mut().animations.get_mut(id) {
                    animation.on_frame = Some(on_frame);
                }
            }
        }
    }

    /// Remove and return the earliest item due at `now`
    fn pop_due(&self, now: Duration) -> Option<DueWork> {
        let mut inner = self.inner.borrow_mut();

        let timer = inner
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .map(|(id, t)| ((t.due, t.seq), id))
            .min_by_key(|(key, _)| *key);
        let animation = inner
            .animations
            .iter()
            .filter(|(_, a)| a.end() <= now)
            .map(|(id, a)| ((a.end(), a.seq), id))
            .min_by_key(|(key, _)| *key);

        match (timer, animation) {
            (Some((tk, tid)), Some((ak, _))) if tk <= ak => inner
                .timers
                .remove(tid)
                .map(|t| DueWork::Timer(tid, t.callback)),
            (_, Some((_, aid))) => inner
                .animations
                .remove(aid)
                .map(|a| DueWork::Animation(aid, a)),
            (Some((_, tid)), None) => inner
                .timers
                .remove(tid)
                .map(|t| DueWork::Timer(tid, t.callback)),
            (None, None) => None,
        }
    }

    /// Whether any timer or animation is pending
    pub fn has_pending(&self) -> bool {
        let inner = self.inner.borrow();
        !inner.timers.is_empty() || !inner.animations.is_empty()
    }

    /// Number of armed timers
    pub fn timer_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Number of running (or delayed) animations
    pub fn animation_count(&self) -> usize {
        self.inner.borrow().animations.len()
    }

    /// Advance in `step` increments until nothing is pending or `limit` elapsed
    ///
    /// Returns the virtual time spent. A zero `step` cannot make progress and
    /// returns immediately.
    pub fn run_until_idle(&self, step: Duration, limit: Duration) -> Duration {
        if step.is_zero() {
            return Duration::ZERO;
        }
        let started = self.now();
        while self.has_pending() && self.now() - started < limit {
            self.advance(step);
        }
        self.now() - started
    }
}

impl Default for UiScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the scheduler
///
/// It won't keep the scheduler alive. Scheduling through a handle whose
/// scheduler is gone returns `None`.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Current virtual time of the scheduler
    pub fn now(&self) -> Option<Duration> {
        self.inner.upgrade().map(|inner| inner.borrow().now)
    }

    // =========================================================================
    // Timer Operations
    // =========================================================================

    /// Arm a one-shot timer
    pub fn schedule_timer<F>(&self, delay: Duration, callback: F) -> Option<TimerId>
    where
        F: FnOnce() + 'static,
    {
        self.inner.upgrade().map(|inner| {
            let mut inner = inner.borrow_mut();
            let due = inner.now.saturating_add(delay);
            let seq = inner.next_seq();
            let id = inner.timers.insert(Timer {
                due,
                seq,
                callback: Box::new(callback),
            });
            tracing::trace!("UiScheduler: armed timer {:?} due at {:?}", id, due);
            id
        })
    }

    /// Cancel a timer, returns true if it was still armed
    pub fn cancel_timer(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow_mut().timers.remove(id).is_some())
            .unwrap_or(false)
    }

    /// Check if a timer is still armed
    pub fn is_timer_armed(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().timers.contains_key(id))
            .unwrap_or(false)
    }

    // =========================================================================
    // Animation Operations
    // =========================================================================

    /// Start an animation
    ///
    /// `on_frame` receives eased progress while the animation runs and a
    /// final 1.0 right before `on_complete`.
    pub fn animate<F, C>(
        &self,
        spec: AnimationSpec,
        on_frame: F,
        on_complete: C,
    ) -> Option<AnimationId>
    where
        F: FnMut(f32) + 'static,
        C: FnOnce() + 'static,
    {
        self.inner.upgrade().map(|inner| {
            let mut inner = inner.borrow_mut();
            let start = inner.now.saturating_add(spec.delay);
            let seq = inner.next_seq();
            let id = inner.animations.insert(Animation {
                start,
                spec,
                seq,
                on_frame: Some(Box::new(on_frame)),
                on_complete: Some(Box::new(on_complete)),
            });
            tracing::trace!(
                "UiScheduler: animation {:?} starts at {:?} for {:?}",
                id,
                start,
                spec.duration
            );
            id
        })
    }

    /// Cancel an animation without running its completion
    ///
    /// Properties keep whatever value the last frame gave them.
    pub fn cancel_animation(&self, id: AnimationId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow_mut().animations.remove(id).is_some())
            .unwrap_or(false)
    }

    /// Check if an animation is still running
    pub fn is_animating(&self, id: AnimationId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().animations.contains_key(id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_timer_fires_once_when_due() {
        let scheduler = UiScheduler::new();
        let count = Rc::new(Cell::new(0));

        let c = count.clone();
        let id = scheduler
            .handle()
            .schedule_timer(ms(100), move || c.set(c.get() + 1))
            .unwrap();

        assert!(scheduler.handle().is_timer_armed(id));
        scheduler.advance(ms(99));
        assert_eq!(count.get(), 0);

        scheduler.advance(ms(1));
        assert_eq!(count.get(), 1);
        assert!(!scheduler.handle().is_timer_armed(id));

        scheduler.advance(ms(1000));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let scheduler = UiScheduler::new();
        let handle = scheduler.handle();
        let fired = Rc::new(Cell::new(false));

        let f = fired.clone();
        let id = handle.schedule_timer(ms(10), move || f.set(true)).unwrap();

        assert!(handle.cancel_timer(id));
        assert!(!handle.cancel_timer(id));

        scheduler.advance(ms(20));
        assert!(!fired.get());
        assert!(!handle.cancel_timer(id));
    }

    #[test]
    fn test_due_order_with_ties() {
        let scheduler = UiScheduler::new();
        let handle = scheduler.handle();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(30, "c"), (10, "a"), (10, "b")] {
            let log = log.clone();
            handle.schedule_timer(ms(delay), move || log.borrow_mut().push(name));
        }

        scheduler.advance(ms(50));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_callback_can_schedule_due_work() {
        let scheduler = UiScheduler::new();
        let handle = scheduler.handle();
        let fired = Rc::new(Cell::new(false));

        let inner_handle = handle.clone();
        let f = fired.clone();
        handle.schedule_timer(ms(10), move || {
            inner_handle.schedule_timer(Duration::ZERO, move || f.set(true));
        });

        scheduler.advance(ms(10));
        assert!(fired.get());
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_animation_frames_and_completion() {
        let scheduler = UiScheduler::new();
        let frames = Rc::new(RefCell::new(Vec::new()));
        let done = Rc::new(Cell::new(0));

        let fr = frames.clone();
        let d = done.clone();
        scheduler.handle().animate(
            AnimationSpec::new(ms(100), Easing::Linear),
            move |p| fr.borrow_mut().push(p),
            move || d.set(d.get() + 1),
        );

        scheduler.advance(ms(50));
        assert_eq!(frames.borrow().len(), 1);
        assert!((frames.borrow()[0] - 0.5).abs() < 1e-4);
        assert_eq!(done.get(), 0);

        scheduler.advance(ms(50));
        assert_eq!(*frames.borrow().last().unwrap(), 1.0);
        assert_eq!(done.get(), 1);
        assert_eq!(scheduler.animation_count(), 0);
    }

    #[test]
    fn test_delayed_animation_waits() {
        let scheduler = UiScheduler::new();
        let frames = Rc::new(Cell::new(0));

        let fr = frames.clone();
        scheduler.handle().animate(
            AnimationSpec::new(ms(100), Easing::Linear).delay(ms(200)),
            move |_| fr.set(fr.get() + 1),
            || {},
        );

        scheduler.advance(ms(150));
        assert_eq!(frames.get(), 0);
        scheduler.advance(ms(100));
        assert_eq!(frames.get(), 1);
        assert!(scheduler.has_pending());
        scheduler.advance(ms(100));
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_cancelled_animation_never_completes() {
        let scheduler = UiScheduler::new();
        let handle = scheduler.handle();
        let done = Rc::new(Cell::new(false));

        let d = done.clone();
        let id = handle
            .animate(
                AnimationSpec::new(ms(100), Easing::EaseOut),
                |_| {},
                move || d.set(true),
            )
            .unwrap();

        scheduler.advance(ms(40));
        assert!(handle.is_animating(id));
        assert!(handle.cancel_animation(id));
        scheduler.advance(ms(100));

        assert!(!done.get());
        assert!(!handle.cancel_animation(id));
    }

    #[test]
    fn test_handle_outlives_scheduler() {
        let scheduler = UiScheduler::new();
        let handle = scheduler.handle();
        drop(scheduler);

        assert!(!handle.is_alive());
        assert!(handle.schedule_timer(ms(1), || {}).is_none());
        assert!(handle.now().is_none());
    }

    #[test]
    fn test_run_until_idle() {
        let scheduler = UiScheduler::new();
        scheduler.handle().schedule_timer(ms(250), || {});

        let spent = scheduler.run_until_idle(ms(16), Duration::from_secs(5));
        assert!(spent >= ms(250));
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_run_until_idle_zero_step() {
        let scheduler = UiScheduler::new();
        scheduler.handle().schedule_timer(ms(250), || {});

        let spent = scheduler.run_until_idle(Duration::ZERO, Duration::from_secs(5));
        assert_eq!(spent, Duration::ZERO);
        assert_eq!(scheduler.timer_count(), 1);
    }

    #[test]
    fn test_unbounded_delays_saturate() {
        let scheduler = UiScheduler::new();
        let handle = scheduler.handle();
        let fired = Rc::new(Cell::new(false));

        scheduler.advance(ms(10));
        let f = fired.clone();
        let timer = handle
            .schedule_timer(Duration::MAX, move || f.set(true))
            .unwrap();
        let animation = handle
            .animate(
                AnimationSpec::new(Duration::MAX, Easing::Linear).delay(Duration::MAX),
                |_| {},
                || {},
            )
            .unwrap();

        scheduler.advance(Duration::from_secs(3600));
        assert!(!fired.get());
        assert!(handle.is_timer_armed(timer));
        assert!(handle.is_animating(animation));

        assert!(handle.cancel_timer(timer));
        assert!(handle.cancel_animation(animation));
        assert!(!scheduler.has_pending());
    }
}
