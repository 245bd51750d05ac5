//! Presentable views
//!
//! The lifecycle controller never renders anything. It drives a
//! [`PresentableView`]: a retained view model that a host toolkit mirrors
//! onto its real view (a `UIView`, an Android `View`, a GPU layer).
//!
//! Two concrete views ship with the crate:
//! - [`AppleToastView`] - the pill-shaped container chrome, laid out at the
//!   top of its container, wrapping any child content
//! - [`IconAppleToastView`] - image, title and optional subtitle content

use toasty_core::Affine2D;
use toasty_platform::ContainerId;

/// Vertical offset of the hidden (initial) state
pub const HIDDEN_OFFSET_Y: f32 = -100.0;

/// Uniform scale of the hidden (initial) state
pub const HIDDEN_SCALE: f32 = 0.9;

/// Transform a toast starts from and returns to when closing
///
/// Scaled down to [`HIDDEN_SCALE`] and moved up by [`HIDDEN_OFFSET_Y`]. The
/// offset is applied after the scale, so the vertical translation is exactly
/// [`HIDDEN_OFFSET_Y`].
pub fn initial_transform() -> Affine2D {
    Affine2D::translation(0.0, HIDDEN_OFFSET_Y).then(&Affine2D::scale(HIDDEN_SCALE, HIDDEN_SCALE))
}

/// Capability the lifecycle controller needs from a view
///
/// All calls happen on the UI thread. Implementations only store values;
/// animation is driven by the toast through the scheduler.
pub trait PresentableView {
    /// Add the view to `container`
    fn attach(&mut self, container: ContainerId);

    /// Remove the view from its container
    fn detach(&mut self);

    /// Container the view is currently attached to
    fn container(&self) -> Option<ContainerId>;

    fn transform(&self) -> Affine2D;

    fn set_transform(&mut self, transform: Affine2D);

    fn opacity(&self) -> f32;

    fn set_opacity(&mut self, opacity: f32);

    /// Vertical position of the view's frame in container coordinates
    fn origin_y(&self) -> f32;

    fn set_origin_y(&mut self, y: f32);

    /// Lay the view out inside `container`, called right after attaching
    fn will_present(&mut self, _container: ContainerId) {}
}

/// Geometry and attachment every view carries
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub container: Option<ContainerId>,
    pub transform: Affine2D,
    pub opacity: f32,
    pub origin_y: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            container: None,
            transform: Affine2D::IDENTITY,
            opacity: 1.0,
            origin_y: 0.0,
        }
    }
}

impl PresentableView for ViewState {
    fn attach(&mut self, container: ContainerId) {
        self.container = Some(container);
    }

    fn detach(&mut self) {
        self.container = None;
    }

    fn container(&self) -> Option<ContainerId> {
        self.container
    }

    fn transform(&self) -> Affine2D {
        self.transform
    }

    fn set_transform(&mut self, transform: Affine2D) {
        self.transform = transform;
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn origin_y(&self) -> f32 {
        self.origin_y
    }

    fn set_origin_y(&mut self, y: f32) {
        self.origin_y = y;
    }
}

// ============================================================================
// Content
// ============================================================================

/// Image, title and optional subtitle shown by the default toast
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ToastContent {
    /// Host image name or asset id
    pub image: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
}

impl ToastContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            image: None,
            title: title.into(),
            subtitle: None,
        }
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// Icon + title + subtitle content view
#[derive(Clone, Debug, PartialEq)]
pub struct IconAppleToastView {
    content: ToastContent,
}

impl IconAppleToastView {
    pub fn new(content: ToastContent) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &ToastContent {
        &self.content
    }

    pub fn set_content(&mut self, content: ToastContent) {
        self.content = content;
    }

    /// Whether the image slot is shown
    pub fn shows_image(&self) -> bool {
        self.content.image.is_some()
    }

    /// Whether the subtitle line is shown
    pub fn shows_subtitle(&self) -> bool {
        self.content.subtitle.is_some()
    }

    /// Title and subtitle joined for screen readers
    pub fn accessibility_label(&self) -> String {
        match &self.content.subtitle {
            Some(subtitle) => format!("{}, {}", self.content.title, subtitle),
            None => self.content.title.clone(),
        }
    }
}

// ============================================================================
// Container chrome
// ============================================================================

/// Layout metrics of [`AppleToastView`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppleToastStyle {
    pub min_height: f32,
    pub min_width: f32,
    /// Distance from the container's top layout margin
    pub top_margin: f32,
    /// Minimum distance from the container's leading and trailing edges
    pub side_margin: f32,
}

impl Default for AppleToastStyle {
    fn default() -> Self {
        Self {
            min_height: 48.0,
            min_width: 120.0,
            top_margin: 24.0,
            side_margin: 12.0,
        }
    }
}

impl AppleToastStyle {
    /// Fully rounded ends
    pub fn corner_radius(&self) -> f32 {
        self.min_height / 2.0
    }
}

/// Default toast chrome wrapping a child view
///
/// Once attached it sits horizontally centered, `top_margin` below the top
/// of its container.
#[derive(Clone, Debug, PartialEq)]
pub struct AppleToastView<C = IconAppleToastView> {
    child: C,
    style: AppleToastStyle,
    state: ViewState,
}

impl<C> AppleToastView<C> {
    pub fn new(child: C) -> Self {
        Self::with_style(child, AppleToastStyle::default())
    }

    pub fn with_style(child: C, style: AppleToastStyle) -> Self {
        Self {
            child,
            style,
            state: ViewState::default(),
        }
    }

    pub fn child(&self) -> &C {
        &self.child
    }

    pub fn child_mut(&mut self) -> &mut C {
        &mut self.child
    }

    pub fn style(&self) -> &AppleToastStyle {
        &self.style
    }
}

impl<C> PresentableView for AppleToastView<C> {
    fn attach(&mut self, container: ContainerId) {
        self.state.attach(container);
    }

    fn detach(&mut self) {
        self.state.detach();
    }

    fn container(&self) -> Option<ContainerId> {
        self.state.container()
    }

    fn transform(&self) -> Affine2D {
        self.state.transform()
    }

    fn set_transform(&mut self, transform: Affine2D) {
        self.state.set_transform(transform);
    }

    fn opacity(&self) -> f32 {
        self.state.opacity()
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.state.set_opacity(opacity);
    }

    fn origin_y(&self) -> f32 {
        self.state.origin_y()
    }

    fn set_origin_y(&mut self, y: f32) {
        self.state.set_origin_y(y);
    }

    fn will_present(&mut self, container: ContainerId) {
        tracing::trace!(
            "AppleToastView: laying out in {:?} at y={}",
            container,
            self.style.top_margin
        );
        self.state.set_origin_y(self.style.top_margin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_transform() {
        let t = initial_transform();
        assert_eq!(t.ty(), HIDDEN_OFFSET_Y);
        assert_eq!(t.scale_factors(), (HIDDEN_SCALE, HIDDEN_SCALE));
    }

    #[test]
    fn test_view_state_opacity_clamped() {
        let mut state = ViewState::default();
        state.set_opacity(1.5);
        assert_eq!(state.opacity(), 1.0);
        state.set_opacity(-0.2);
        assert_eq!(state.opacity(), 0.0);
    }

    #[test]
    fn test_icon_view_content() {
        let view = IconAppleToastView::new(ToastContent::new("Saved").image("checkmark"));
        assert!(view.shows_image());
        assert!(!view.shows_subtitle());
        assert_eq!(view.accessibility_label(), "Saved");

        let view = IconAppleToastView::new(ToastContent::new("Copied").subtitle("3 items"));
        assert_eq!(view.accessibility_label(), "Copied, 3 items");
    }

    #[test]
    fn test_apple_view_layout_on_present() {
        let style = AppleToastStyle {
            top_margin: 100.0,
            ..AppleToastStyle::default()
        };
        let mut view = AppleToastView::with_style(
            IconAppleToastView::new(ToastContent::new("Hello")),
            style,
        );
        let container = ContainerId::from_raw(1);

        view.attach(container);
        view.will_present(container);

        assert_eq!(view.container(), Some(container));
        assert_eq!(view.origin_y(), 100.0);
        assert_eq!(view.style().corner_radius(), 24.0);

        view.detach();
        assert_eq!(view.container(), None);
    }
}
