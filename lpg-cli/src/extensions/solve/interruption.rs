//! Interruption handler.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/interruption_test.rs"]
mod interruption_test;

use lpg_core::prelude::{InfoLogger, Quota};
use lpg_core::utils::TimeQuota;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Creates interruption quota: the search stops on Ctrl-C or when optional time limit (in seconds)
/// is exceeded. If the signal handler cannot be installed, only time limit is respected.
pub fn create_interruption_quota(max_time: Option<usize>, logger: &InfoLogger) -> Arc<dyn Quota> {
    let inner = max_time.map::<Arc<dyn Quota>, _>(|time| Arc::new(TimeQuota::new(time as f64)));
    let should_interrupt = Arc::new(AtomicBool::new(false));

    let result = ctrlc::set_handler({
        let should_interrupt = should_interrupt.clone();
        move || {
            should_interrupt.store(true, Ordering::Relaxed);
        }
    });

    if let Err(err) = result {
        logger(format!("cannot set interruption handler: '{err}'").as_str());
    }

    Arc::new(InterruptionQuota { inner, should_interrupt })
}

struct InterruptionQuota {
    inner: Option<Arc<dyn Quota>>,
    should_interrupt: Arc<AtomicBool>,
}

impl Quota for InterruptionQuota {
    fn is_reached(&self) -> bool {
        self.inner.as_ref().is_some_and(|inner| inner.is_reached()) || self.should_interrupt.load(Ordering::Relaxed)
    }
}
