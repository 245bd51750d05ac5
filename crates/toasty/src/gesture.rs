//! Pan-to-close tracking
//!
//! A pan is modeled as its own small state machine: [`PanTracker::Idle`]
//! until a pan begins, then [`PanTracker::Tracking`] with the baseline
//! recorded at pan-begin. The downward clamp and the dismissal threshold are
//! plain functions so they can be checked without a toast.

/// Fraction of the way from hidden to resting below which a release closes
pub const DISMISS_FRACTION: f32 = 2.0 / 3.0;

/// Vertical position a released toast must be above to close
///
/// Two thirds of the way from the hidden offset to the resting position.
pub fn dismiss_threshold(resting_y: f32, hidden_ty: f32) -> f32 {
    hidden_ty + (resting_y - hidden_ty) * DISMISS_FRACTION
}

/// Position for a drag of the touch from `start_touch_y` to `touch_y`
///
/// Only upward (or zero) displacement moves the view. A downward drag
/// returns `None` and the view keeps its position.
pub fn drag_position(start_offset: f32, start_touch_y: f32, touch_y: f32) -> Option<f32> {
    let delta = touch_y - start_touch_y;
    (delta <= 0.0).then_some(start_offset + delta)
}

/// What to do when a pan is released
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanOutcome {
    /// Dragged past the threshold, close the toast
    Dismiss,
    /// Animate back to the resting position
    Settle { resting_y: f32 },
}

/// Pan tracking state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PanTracker {
    #[default]
    Idle,
    Tracking {
        /// View origin when the pan began
        start_offset: f32,
        /// Touch position when the pan began
        start_touch_y: f32,
    },
}

impl PanTracker {
    /// Start tracking from the view's current origin and the touch position
    pub fn begin(origin_y: f32, touch_y: f32) -> Self {
        PanTracker::Tracking {
            start_offset: origin_y,
            start_touch_y: touch_y,
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, PanTracker::Tracking { .. })
    }

    /// New view position for a touch at `touch_y`
    ///
    /// `None` when not tracking or when the drag points downward.
    pub fn update(&self, touch_y: f32) -> Option<f32> {
        match *self {
            PanTracker::Idle => None,
            PanTracker::Tracking {
                start_offset,
                start_touch_y,
            } => drag_position(start_offset, start_touch_y, touch_y),
        }
    }

    /// Decide the release outcome for a view currently at `origin_y`
    ///
    /// The threshold is measured between `hidden_ty` and `resting_y`, and a
    /// toast that stays below it settles back to `resting_y`.
    pub fn end(&self, origin_y: f32, resting_y: f32, hidden_ty: f32) -> Option<PanOutcome> {
        if !self.is_tracking() {
            return None;
        }
        if origin_y < dismiss_threshold(resting_y, hidden_ty) {
            Some(PanOutcome::Dismiss)
        } else {
            Some(PanOutcome::Settle { resting_y })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_two_thirds() {
        let threshold = dismiss_threshold(100.0, -100.0);
        assert!((threshold - 33.333_332).abs() < 1e-3);
    }

    #[test]
    fn test_release_above_threshold_dismisses() {
        let tracker = PanTracker::begin(100.0, 400.0);
        assert_eq!(tracker.end(30.0, 100.0, -100.0), Some(PanOutcome::Dismiss));
    }

    #[test]
    fn test_release_below_threshold_settles() {
        let tracker = PanTracker::begin(100.0, 400.0);
        assert_eq!(
            tracker.end(40.0, 100.0, -100.0),
            Some(PanOutcome::Settle { resting_y: 100.0 })
        );
    }

    #[test]
    fn test_upward_drag_moves_view() {
        let tracker = PanTracker::begin(100.0, 400.0);
        assert_eq!(tracker.update(350.0), Some(50.0));
        assert_eq!(tracker.update(400.0), Some(100.0));
    }

    #[test]
    fn test_downward_drag_clamped() {
        let tracker = PanTracker::begin(100.0, 400.0);
        assert_eq!(tracker.update(450.0), None);
    }

    #[test]
    fn test_idle_tracker_ignores_input() {
        let tracker = PanTracker::default();
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.update(10.0), None);
        assert_eq!(tracker.end(10.0, 100.0, -100.0), None);
    }
}
