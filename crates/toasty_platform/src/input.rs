//! Touch input and gesture recognition
//!
//! Hosts forward raw touches in container coordinates. The recognizer turns
//! a single-finger touch sequence into either one tap or a pan
//! (began / changed* / ended-or-cancelled).

use toasty_core::Point;

/// Movement in logical pixels before a touch stops being a tap and starts a pan
pub const DEFAULT_TAP_SLOP: f32 = 10.0;

// ============================================================================
// Touch Events
// ============================================================================

/// Touch events for touchscreens
#[derive(Clone, Debug, PartialEq)]
pub enum TouchEvent {
    /// A touch started
    Started {
        /// Unique identifier for this touch
        id: u64,
        /// X position in container coordinates
        x: f32,
        /// Y position in container coordinates
        y: f32,
    },
    /// A touch moved
    Moved { id: u64, x: f32, y: f32 },
    /// A touch ended
    Ended { id: u64, x: f32, y: f32 },
    /// A touch was cancelled (e.g., by system gesture)
    Cancelled { id: u64 },
}

impl TouchEvent {
    /// Get the touch ID
    pub fn id(&self) -> u64 {
        match self {
            TouchEvent::Started { id, .. } => *id,
            TouchEvent::Moved { id, .. } => *id,
            TouchEvent::Ended { id, .. } => *id,
            TouchEvent::Cancelled { id } => *id,
        }
    }

    /// Get the position (returns None for Cancelled)
    pub fn position(&self) -> Option<Point> {
        match self {
            TouchEvent::Started { x, y, .. } => Some(Point::new(*x, *y)),
            TouchEvent::Moved { x, y, .. } => Some(Point::new(*x, *y)),
            TouchEvent::Ended { x, y, .. } => Some(Point::new(*x, *y)),
            TouchEvent::Cancelled { .. } => None,
        }
    }
}

// ============================================================================
// Gestures
// ============================================================================

/// Phase of a pan gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One step of a pan gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanGesture {
    pub phase: PanPhase,
    /// Current touch location in container coordinates
    pub location: Point,
}

impl PanGesture {
    pub fn new(phase: PanPhase, location: Point) -> Self {
        Self { phase, location }
    }
}

/// Recognized gestures
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// Single tap
    Tap { location: Point },
    /// Pan/drag gesture step
    Pan(PanGesture),
}

#[derive(Clone, Copy, Debug)]
struct TrackedTouch {
    id: u64,
    start: Point,
    last: Point,
    panning: bool,
}

/// Single-touch tap and pan recognizer
///
/// Additional fingers are ignored while one touch is tracked.
#[derive(Debug)]
pub struct GestureRecognizer {
    tracked: Option<TrackedTouch>,
    slop: f32,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::with_slop(DEFAULT_TAP_SLOP)
    }

    /// Create a recognizer with a custom tap slop
    pub fn with_slop(slop: f32) -> Self {
        Self {
            tracked: None,
            slop,
        }
    }

    /// Whether a touch is currently being tracked
    pub fn is_tracking(&self) -> bool {
        self.tracked.is_some()
    }

    /// Process a touch event and return the gesture it completes or continues
    pub fn process(&mut self, event: &TouchEvent) -> Option<Gesture> {
        match *event {
            TouchEvent::Started { id, x, y } => {
                if self.tracked.is_none() {
                    let p = Point::new(x, y);
                    self.tracked = Some(TrackedTouch {
                        id,
                        start: p,
                        last: p,
                        panning: false,
                    });
                }
                None
            }
            TouchEvent::Moved { id, x, y } => {
                let slop = self.slop;
                let touch = self.tracked.as_mut().filter(|t| t.id == id)?;
                let p = Point::new(x, y);
                touch.last = p;

                if touch.panning {
                    return Some(Gesture::Pan(PanGesture::new(PanPhase::Changed, p)));
                }

                let dx = p.x - touch.start.x;
                let dy = p.y - touch.start.y;
                if dx * dx + dy * dy > slop * slop {
                    touch.panning = true;
                    tracing::trace!("GestureRecognizer: touch {} began panning", id);
                    return Some(Gesture::Pan(PanGesture::new(PanPhase::Began, p)));
                }
                None
            }
            TouchEvent::Ended { id, x, y } => {
                let touch = self.take_if(id)?;
                let p = Point::new(x, y);
                if touch.panning {
                    Some(Gesture::Pan(PanGesture::new(PanPhase::Ended, p)))
                } else {
                    Some(Gesture::Tap { location: p })
                }
            }
            TouchEvent::Cancelled { id } => {
                let touch = self.take_if(id)?;
                touch.panning.then(|| {
                    Gesture::Pan(PanGesture::new(PanPhase::Cancelled, touch.last))
                })
            }
        }
    }

    fn take_if(&mut self, id: u64) -> Option<TrackedTouch> {
        if self.tracked.is_some_and(|t| t.id == id) {
            self.tracked.take()
        } else {
            None
        }
    }
}
