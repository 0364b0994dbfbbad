use deno_core::v8::IsolateHandle;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

/// Terminates an isolate that is still busy after a deadline.
///
/// Synchronous loops never yield to the async timeout, so this runs on its own
/// thread. Dropping the watchdog disarms it.
pub(crate) struct Watchdog {
    _disarm: mpsc::Sender<()>,
    fired: Arc<AtomicBool>,
}

impl Watchdog {
    pub(crate) fn arm(isolate: IsolateHandle, after: Duration) -> Self {
        let (disarm, rx) = mpsc::channel::<()>();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        std::thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = rx.recv_timeout(after) {
                flag.store(true, Ordering::SeqCst);
                isolate.terminate_execution();
            }
        });

        Self {
            _disarm: disarm,
            fired,
        }
    }

    pub(crate) fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}
