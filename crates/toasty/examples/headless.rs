//! Headless Toast Demo
//!
//! Drives two toasts on a virtual clock without any windowing system:
//! - an auto-hiding toast that closes itself after its display time
//! - a sticky toast dismissed by dragging it upward with raw touches
//!
//! Configuration for the sticky toast is read from TOML.
//!
//! Run with: RUST_LOG=toasty=debug cargo run -p toasty --example headless

use std::rc::Rc;
use std::time::Duration;

use toasty::prelude::*;
use toasty::Result;

struct LoggingDelegate;

impl ToastDelegate for LoggingDelegate {
    fn did_show(&self, toast: &Toast) {
        tracing::info!("toast {} is visible", toast.id().id());
    }

    fn did_close(&self, toast: &Toast) {
        tracing::info!("toast {} is gone", toast.id().id());
    }
}

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let scheduler = UiScheduler::new();
    let host = Rc::new(HeadlessHost::with_container(ContainerId::from_raw(1)));
    let context = ToastContext::new(scheduler.handle(), host.clone());
    let delegate = Rc::new(LoggingDelegate);

    // Auto-hiding toast, shown and forgotten
    let saved = Toast::default_style(
        &context,
        ToastContent::new("Saved").image("checkmark.circle"),
        ToastConfiguration::default(),
    );
    saved.set_delegate(&delegate);
    saved.show_with_haptic(HapticFeedback::Success, Duration::ZERO)?;
    drop(saved);

    let elapsed = scheduler.run_until_idle(FRAME, Duration::from_secs(10));
    tracing::info!("auto-hide finished after {:?}", elapsed);

    // Sticky toast, dragged away
    let configuration = ToastConfiguration::from_toml_str(
        r#"
        auto_hide = false
        enable_pan_to_close = true
        animation_time = 0.25
        "#,
    )?;
    let sticky = Toast::default_style(
        &context,
        ToastContent::new("Offline").subtitle("Changes will sync later"),
        configuration,
    );
    sticky.set_delegate(&delegate);
    sticky.show(Duration::from_millis(200))?;
    scheduler.advance(Duration::from_secs(1));

    let mut y = 60.0;
    sticky.handle_touch(&TouchEvent::Started { id: 1, x: 180.0, y });
    while y > -40.0 {
        y -= 20.0;
        sticky.handle_touch(&TouchEvent::Moved { id: 1, x: 180.0, y });
        scheduler.advance(FRAME);
    }
    sticky.handle_touch(&TouchEvent::Ended { id: 1, x: 180.0, y });

    scheduler.run_until_idle(FRAME, Duration::from_secs(10));
    tracing::info!(
        "sticky toast ended {:?}, haptics played: {:?}",
        sticky.state(),
        host.haptics()
    );

    Ok(())
}
