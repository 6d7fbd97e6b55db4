//! Advisory cancellation
//!
//! A cloneable flag threaded through push requests down to the remote
//! target. Nothing in this crate aborts work in flight because of it; the
//! navigation provider only checks it before issuing the remote call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

/// Cancellation flag that can be cloned and shared across tasks
#[derive(Clone, Debug, Default)]
pub struct CancellationSignal {
    triggered: Arc<AtomicBool>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    pub fn cancel(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            info!("Cancellation requested");
        }
    }
}
