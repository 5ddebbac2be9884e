//! Leader predicate.
//!
//! Only the leader unit of an application may write the local application bag.

use std::sync::Arc;

/// Answers whether this unit currently leads its application.
pub trait Leadership: Send + Sync {
    fn is_leader(&self) -> bool;
}

impl Leadership for bool {
    fn is_leader(&self) -> bool {
        *self
    }
}

impl<L: Leadership + ?Sized> Leadership for Arc<L> {
    fn is_leader(&self) -> bool {
        (**self).is_leader()
    }
}

impl<L: Leadership + ?Sized> Leadership for &L {
    fn is_leader(&self) -> bool {
        (**self).is_leader()
    }
}

/// Leadership decided by a closure, re-evaluated on every call.
#[derive(Clone, Copy)]
pub struct LeaderFn<F>(F);

impl<F> std::fmt::Debug for LeaderFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LeaderFn")
    }
}

impl<F: Fn() -> bool + Send + Sync> Leadership for LeaderFn<F> {
    fn is_leader(&self) -> bool {
        (self.0)()
    }
}

/// Wraps a closure as a [`Leadership`] predicate.
///
/// ```rust
/// use feast_kernel::leadership::{Leadership, leader_fn};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let probe = Arc::clone(&flag);
/// let leadership = leader_fn(move || probe.load(Ordering::SeqCst));
///
/// assert!(!leadership.is_leader());
/// flag.store(true, Ordering::SeqCst);
/// assert!(leadership.is_leader());
/// ```
pub const fn leader_fn<F: Fn() -> bool + Send + Sync>(f: F) -> LeaderFn<F> {
    LeaderFn(f)
}
