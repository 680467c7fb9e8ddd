//! Cross-thread graph-change flag
//!
//! The JACK notification thread may fire at any time, including while the
//! UI thread is blocked waiting for a keypress. The only state allowed to
//! cross that boundary is this one flag; everything graph-shaped is owned
//! by the UI thread and rebuilt there after the flag is observed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle to the shared "graph changed" flag.
///
/// The notification context calls [`raise`](ChangeSignal::raise); the UI
/// loop calls [`take`](ChangeSignal::take) exactly once per iteration and
/// rebuilds when it returns true.
#[derive(Clone, Default)]
pub struct ChangeSignal {
    changed: Arc<AtomicBool>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the graph as changed. Safe to call from any thread.
    pub fn raise(&self) {
        self.changed.store(true, Ordering::Release);
    }

    /// Read and clear the flag in one atomic step.
    ///
    /// Returns true at most once per raise, no matter how many handles
    /// observe the signal.
    pub fn take(&self) -> bool {
        self.changed.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn take_clears_the_flag() {
        let signal = ChangeSignal::new();
        assert!(!signal.take());

        signal.raise();
        assert!(signal.take());
        assert!(!signal.take());
    }

    #[test]
    fn raises_coalesce_into_one_take() {
        let signal = ChangeSignal::new();
        signal.raise();
        signal.raise();
        signal.raise();
        assert!(signal.take());
        assert!(!signal.take());
    }

    #[test]
    fn raise_from_another_thread_is_observed() {
        let signal = ChangeSignal::new();
        let remote = signal.clone();

        let handle = thread::spawn(move || {
            remote.raise();
        });
        handle.join().unwrap();

        assert!(signal.take());
    }
}
