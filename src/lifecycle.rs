//! End-of-traversal actions attached to a sequence handle.
//!
//! Every [`Seq`](crate::Seq) pairs its source with a [`Lifecycle`]. Consumers invoke
//! [`Lifecycle::release`] exactly once per traversal, after the producer reports termination
//! or when they stop early.
//!
//! - [`Inert`] does nothing. Pure sources use it; they can be driven any number of times.
//! - [`Reset`] re-initializes a shared resource so the sequence can be driven again.
//! - [`Finalize`] releases a resource once. Further calls are ignored.
//! - [`Both`] runs two actions in order, for combinators over two handles.
//! - [`Spent`] wraps the action of a handle whose traversal has already begun.

use tracing::trace;

/// Whether a handle may be driven again after its lifecycle action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleKind {
    /// Driving again reproduces the same elements
    Replayable,
    /// The backing resource is used up after one traversal
    Depleting,
}

/// Action run once at the end of every traversal.
pub trait Lifecycle {
    /// Run the action.
    fn release(&mut self);

    /// Whether the handle can be driven again afterwards.
    fn kind(&self) -> LifecycleKind;
}

impl<L> Lifecycle for &'_ mut L
where
    L: Lifecycle + ?Sized,
{
    fn release(&mut self) {
        (**self).release()
    }

    fn kind(&self) -> LifecycleKind {
        (**self).kind()
    }
}

/// Run the action that ends a traversal which observed `values` produced values.
pub(crate) fn end_traversal<L>(lifecycle: &mut L, values: usize)
where
    L: Lifecycle + ?Sized,
{
    trace!(kind = ?lifecycle.kind(), values, "sequence released");
    lifecycle.release();
}

/// No-op action of sources with no external state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inert;

impl Lifecycle for Inert {
    fn release(&mut self) {}

    fn kind(&self) -> LifecycleKind {
        LifecycleKind::Replayable
    }
}

/// Re-initializes shared state after every traversal.
#[derive(Clone)]
pub struct Reset<F>(F);

impl<F> Reset<F>
where
    F: FnMut(),
{
    /// Run `reset` after every traversal.
    ///
    /// ```rust
    /// use std::cell::Cell;
    /// use pullseq::{Lifecycle, LifecycleKind, Reset};
    ///
    /// let resets = Cell::new(0);
    /// let mut reset = Reset::new(|| resets.set(resets.get() + 1));
    /// reset.release();
    /// reset.release();
    /// assert_eq!(resets.get(), 2);
    /// assert_eq!(reset.kind(), LifecycleKind::Replayable);
    /// ```
    pub fn new(reset: F) -> Self {
        Reset(reset)
    }
}

impl<F> Lifecycle for Reset<F>
where
    F: FnMut(),
{
    fn release(&mut self) {
        trace!("resetting replayable sequence");
        (self.0)()
    }

    fn kind(&self) -> LifecycleKind {
        LifecycleKind::Replayable
    }
}

/// Releases a resource at most once.
///
/// The first [`release`](Lifecycle::release) runs the finalizer; later calls are no-ops.
///
/// ```rust
/// use std::cell::Cell;
/// use pullseq::{Finalize, Lifecycle};
///
/// let closed = Cell::new(0);
/// let mut finalize = Finalize::new(|| closed.set(closed.get() + 1));
/// finalize.release();
/// finalize.release();
/// assert_eq!(closed.get(), 1);
/// assert!(finalize.is_finalized());
/// ```
pub struct Finalize<F = fn()>(Option<F>);

impl<F> Finalize<F>
where
    F: FnOnce(),
{
    /// Run `finalize` on the first release only.
    pub fn new(finalize: F) -> Self {
        Finalize(Some(finalize))
    }

    /// Returns `true` once the finalizer has run.
    pub fn is_finalized(&self) -> bool {
        self.0.is_none()
    }
}

impl<F> std::fmt::Debug for Finalize<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Finalize")
            .field("finalized", &self.0.is_none())
            .finish()
    }
}

impl Finalize {
    /// A depleting action with nothing to release.
    pub fn noop() -> Self {
        fn nothing() {}
        Finalize(Some(nothing as fn()))
    }
}

impl<F> Lifecycle for Finalize<F>
where
    F: FnOnce(),
{
    fn release(&mut self) {
        match self.0.take() {
            Some(finalize) => {
                trace!("finalizing depleting sequence");
                finalize()
            }
            None => trace!("finalizer already ran; ignoring repeated release"),
        }
    }

    fn kind(&self) -> LifecycleKind {
        LifecycleKind::Depleting
    }
}

/// Two actions run in order, first then second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Both<A, B>(pub A, pub B);

impl<A, B> Lifecycle for Both<A, B>
where
    A: Lifecycle,
    B: Lifecycle,
{
    fn release(&mut self) {
        self.0.release();
        self.1.release();
    }

    fn kind(&self) -> LifecycleKind {
        match (self.0.kind(), self.1.kind()) {
            (LifecycleKind::Replayable, LifecycleKind::Replayable) => LifecycleKind::Replayable,
            _ => LifecycleKind::Depleting,
        }
    }
}

/// The action of a continuation whose source was partly consumed already.
///
/// Releasing delegates to the wrapped action, but the handle never replays: its kind is
/// always [`LifecycleKind::Depleting`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spent<L>(pub L);

impl<L> Lifecycle for Spent<L>
where
    L: Lifecycle,
{
    fn release(&mut self) {
        self.0.release()
    }

    fn kind(&self) -> LifecycleKind {
        LifecycleKind::Depleting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_reset_runs_every_time() {
        let resets = Rc::new(RefCell::new(0));
        let mut reset = Reset::new({
            let resets = Rc::clone(&resets);
            move || *resets.borrow_mut() += 1
        });

        reset.release();
        reset.release();
        assert_eq!(*resets.borrow(), 2);
        assert_eq!(reset.kind(), LifecycleKind::Replayable);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let closes = Rc::new(RefCell::new(0));
        let mut finalize = Finalize::new({
            let closes = Rc::clone(&closes);
            move || *closes.borrow_mut() += 1
        });

        assert!(!finalize.is_finalized());
        finalize.release();
        finalize.release();
        finalize.release();
        assert_eq!(*closes.borrow(), 1);
        assert!(finalize.is_finalized());
        assert_eq!(finalize.kind(), LifecycleKind::Depleting);
    }

    #[test]
    fn test_both_releases_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = Finalize::new({
            let log = Rc::clone(&log);
            move || log.borrow_mut().push("first")
        });
        let second = Reset::new({
            let log = Rc::clone(&log);
            move || log.borrow_mut().push("second")
        });

        let mut both = Both(first, second);
        both.release();
        assert_eq!(&*log.borrow(), &["first", "second"]);
        assert_eq!(both.kind(), LifecycleKind::Depleting);
        assert_eq!(Both(Inert, Inert).kind(), LifecycleKind::Replayable);
    }

    #[test]
    fn test_noop_finalize_is_still_depleting() {
        let mut finalize = Finalize::noop();
        finalize.release();
        assert!(finalize.is_finalized());
        assert_eq!(finalize.kind(), LifecycleKind::Depleting);
    }

    #[test]
    fn test_spent_delegates_release_but_never_replays() {
        let resets = Rc::new(RefCell::new(0));
        let mut spent = Spent(Reset::new({
            let resets = Rc::clone(&resets);
            move || *resets.borrow_mut() += 1
        }));

        spent.release();
        assert_eq!(*resets.borrow(), 1);
        assert_eq!(spent.kind(), LifecycleKind::Depleting);
        assert_eq!(Spent(Inert).kind(), LifecycleKind::Depleting);
    }
}
