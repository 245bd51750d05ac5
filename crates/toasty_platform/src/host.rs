//! Host capability and container references

use std::cell::RefCell;

use crate::error::{PlatformError, Result};

/// Opaque reference to a host surface views can be attached to
///
/// The host decides what the id points at (a `UIView`, an Android
/// `ViewGroup`, an overlay layer). The presentation core only compares and
/// forwards it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Reconstruct a container reference from a raw host id
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Notification-style haptic feedback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticFeedback {
    Success,
    Warning,
    Error,
}

/// Host environment capability
///
/// Implemented once per host toolkit. All calls happen on the UI thread.
pub trait Host {
    /// The topmost currently presented surface, if any
    ///
    /// On UIKit this walks from the key window's root controller through
    /// presented controllers; other hosts resolve their own equivalent.
    fn topmost_container(&self) -> Option<ContainerId>;

    /// Emit haptic feedback
    fn haptic_feedback(&self, feedback: HapticFeedback) -> Result<()> {
        Err(PlatformError::Unsupported(format!(
            "haptic feedback ({feedback:?})"
        )))
    }

    /// Like [`Host::topmost_container`], failing with [`PlatformError::NoContainer`]
    fn require_container(&self) -> Result<ContainerId> {
        self.topmost_container().ok_or(PlatformError::NoContainer)
    }
}

/// A host without a windowing system
///
/// Keeps a stack of presented surfaces; the last presented one is topmost.
/// Haptic requests are recorded instead of played.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    presented: RefCell<Vec<ContainerId>>,
    haptics: RefCell<Vec<HapticFeedback>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with one presented surface
    pub fn with_container(container: ContainerId) -> Self {
        let host = Self::new();
        host.present(container);
        host
    }

    /// Present a surface on top of the stack
    pub fn present(&self, container: ContainerId) {
        tracing::debug!("HeadlessHost: presenting {:?}", container);
        self.presented.borrow_mut().push(container);
    }

    /// Dismiss the topmost surface
    pub fn dismiss_top(&self) -> Option<ContainerId> {
        let dismissed = self.presented.borrow_mut().pop();
        tracing::debug!("HeadlessHost: dismissed {:?}", dismissed);
        dismissed
    }

    /// Haptic feedback requested so far, oldest first
    pub fn haptics(&self) -> Vec<HapticFeedback> {
        self.haptics.borrow().clone()
    }
}

impl Host for HeadlessHost {
    fn topmost_container(&self) -> Option<ContainerId> {
        self.presented.borrow().last().copied()
    }

    fn haptic_feedback(&self, feedback: HapticFeedback) -> Result<()> {
        self.haptics.borrow_mut().push(feedback);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareHost;

    impl Host for BareHost {
        fn topmost_container(&self) -> Option<ContainerId> {
            None
        }
    }

    #[test]
    fn test_headless_stack() {
        let host = HeadlessHost::with_container(ContainerId::from_raw(7));
        host.present(ContainerId::from_raw(8));
        assert_eq!(host.require_container(), Ok(ContainerId::from_raw(8)));

        assert_eq!(host.dismiss_top(), Some(ContainerId::from_raw(8)));
        assert_eq!(host.topmost_container(), Some(ContainerId::from_raw(7)));

        host.dismiss_top();
        assert_eq!(host.require_container(), Err(PlatformError::NoContainer));
    }

    #[test]
    fn test_haptics_default_unsupported() {
        assert!(matches!(
            BareHost.haptic_feedback(HapticFeedback::Success),
            Err(PlatformError::Unsupported(_))
        ));

        let host = HeadlessHost::new();
        host.haptic_feedback(HapticFeedback::Warning).unwrap();
        assert_eq!(host.haptics(), vec![HapticFeedback::Warning]);
    }
}
