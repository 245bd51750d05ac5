//! Environment a toast runs in

use std::rc::Rc;

use toasty_animation::SchedulerHandle;
use toasty_platform::Host;

/// Scheduler and host shared by every toast of an application
///
/// Cheap to clone. The scheduler is held weakly; the host event loop owns
/// the [`toasty_animation::UiScheduler`] itself.
#[derive(Clone)]
pub struct ToastContext {
    scheduler: SchedulerHandle,
    host: Rc<dyn Host>,
}

impl ToastContext {
    pub fn new(scheduler: SchedulerHandle, host: Rc<dyn Host>) -> Self {
        Self { scheduler, host }
    }

    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }

    pub fn host(&self) -> &Rc<dyn Host> {
        &self.host
    }
}

impl std::fmt::Debug for ToastContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastContext")
            .field("scheduler_alive", &self.scheduler.is_alive())
            .finish_non_exhaustive()
    }
}
