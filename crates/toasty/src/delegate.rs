//! Lifecycle notifications

use crate::toast::Toast;

/// Receives toast lifecycle notifications
///
/// Every method has an empty default, implement only what you need. Calls
/// happen on the UI thread and may call back into the toast (closing it
/// from `did_show`, for example).
///
/// A toast holds its delegate weakly; keep the `Rc` alive for as long as
/// you want notifications.
pub trait ToastDelegate {
    /// The view was attached and the enter animation is about to start
    fn will_show(&self, _toast: &Toast) {}

    /// The enter animation finished
    fn did_show(&self, _toast: &Toast) {}

    /// The exit animation is about to start
    fn will_close(&self, _toast: &Toast) {}

    /// The view was detached
    fn did_close(&self, _toast: &Toast) {}
}
