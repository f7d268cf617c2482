//! Cooperative cancellation token.
//!
//! No teacher file does anything like this (halo2's `create_proof` runs
//! to completion or errors out), so this is enrichment authored
//! directly from `spec.md` §5's own wording: cancellation is checked
//! only at stage boundaries, never inside a tight inner loop, so a
//! cancelled run still finishes whatever MSM/FFT chunk is already
//! in flight rather than leaving `mnt-curves`'s thread pool holding a
//! half-written accumulator.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Error;

/// A cheaply-cloneable handle that lets a caller ask a running
/// [`crate::pipeline::prove`] call to stop at the next stage boundary.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken(Arc::new(AtomicBool::new(false)))
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns `Err(Error::Cancelled)` if cancellation has been
    /// requested. Call only between stages, never inside a parallel
    /// inner loop.
    pub fn check(&self) -> Result<(), Error> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_passes_until_cancelled() {
        let token = CancelToken::new();
        assert!(token.check().is_ok());
        token.cancel();
        assert!(token.check().is_err());
    }
}
