//! Sources driven by caller state.
//!
//! [`unfold`] threads a value through a pure step function and is replayable. The rest wrap
//! state that lives outside the engine (a file handle, a socket, a cursor into a database)
//! and are depleting: their lifecycle is a [`Finalize`] that releases the state once.

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use crate::{
    lifecycle::{Finalize, Inert},
    seq::Seq,
    step::Step,
    Producer, Source,
};

/// Threads a state value through a step function.
#[derive(Clone, Debug)]
pub struct Unfold<St, F> {
    state: Option<St>,
    step: F,
}

impl<T, St, F> Producer for Unfold<St, F>
where
    F: FnMut(St) -> Option<(T, St)>,
{
    type Item = T;
    type Error = Infallible;

    fn step(&mut self) -> Step<T> {
        let Some(state) = self.state.take() else {
            return Step::Exhausted;
        };
        match (self.step)(state) {
            Some((value, next)) => {
                self.state = Some(next);
                Step::Produced(value)
            }
            None => Step::Exhausted,
        }
    }
}

impl<T, St, F> Source for Unfold<St, F>
where
    St: Clone,
    F: FnMut(St) -> Option<(T, St)> + Clone,
{
    type Item = T;
    type Error = Infallible;
    type Producer = Self;

    fn producer(&mut self) -> Self {
        self.clone()
    }
}

/// Apply `step` to `seed`, then to each returned state, until it returns `None`.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut powers = unfold(1u32, |n| (n < 100).then_some((n, n * 3)));
/// assert_eq!(powers.to_vec(), vec![1, 3, 9, 27, 81]);
/// ```
pub fn unfold<T, St, F>(seed: St, step: F) -> Seq<Unfold<St, F>>
where
    St: Clone,
    F: FnMut(St) -> Option<(T, St)> + Clone,
{
    Seq::new(
        Unfold {
            state: Some(seed),
            step,
        },
        Inert,
    )
}

/// Pulls from a closure over external state.
///
/// All producers share the closure. It is dropped once it reports the end, so a second
/// traversal finds nothing.
pub struct External<F> {
    step: Rc<RefCell<Option<F>>>,
}

impl<F> Clone for External<F> {
    fn clone(&self) -> Self {
        External {
            step: Rc::clone(&self.step),
        }
    }
}

impl<T, F> Producer for External<F>
where
    F: FnMut() -> Option<T>,
{
    type Item = T;
    type Error = Infallible;

    fn step(&mut self) -> Step<T> {
        let mut slot = self.step.borrow_mut();
        let Some(step) = slot.as_mut() else {
            return Step::Exhausted;
        };
        match step() {
            Some(value) => Step::Produced(value),
            None => {
                *slot = None;
                Step::Exhausted
            }
        }
    }
}

impl<T, F> Source for External<F>
where
    F: FnMut() -> Option<T>,
{
    type Item = T;
    type Error = Infallible;
    type Producer = Self;

    fn producer(&mut self) -> Self {
        self.clone()
    }
}

/// A depleting sequence pulled from a stateful closure.
///
/// Finalizing drops the closure, and with it whatever it captured.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut lines = "a\nb".lines();
/// let mut seq = unfold_external(move || lines.next());
/// assert_eq!(seq.to_vec(), vec!["a", "b"]);
/// assert!(seq.to_vec().is_empty());
/// ```
pub fn unfold_external<T, F>(step: F) -> Seq<External<F>, Finalize<impl FnOnce()>>
where
    F: FnMut() -> Option<T>,
{
    let step = Rc::new(RefCell::new(Some(step)));
    let owned = Rc::clone(&step);
    Seq::new(
        External { step },
        Finalize::new(move || drop(owned.borrow_mut().take())),
    )
}

/// Pulls from an owned resource until it is released.
pub struct Resource<R, F> {
    shared: Rc<RefCell<(Option<R>, F)>>,
}

impl<R, F> Clone for Resource<R, F> {
    fn clone(&self) -> Self {
        Resource {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T, R, F> Producer for Resource<R, F>
where
    F: FnMut(&mut R) -> Option<T>,
{
    type Item = T;
    type Error = Infallible;

    fn step(&mut self) -> Step<T> {
        let mut shared = self.shared.borrow_mut();
        let (resource, step) = &mut *shared;
        match resource.as_mut() {
            Some(resource) => step(resource).map_or(Step::Exhausted, Step::Produced),
            None => Step::Exhausted,
        }
    }
}

impl<T, R, F> Source for Resource<R, F>
where
    F: FnMut(&mut R) -> Option<T>,
{
    type Item = T;
    type Error = Infallible;
    type Producer = Self;

    fn producer(&mut self) -> Self {
        self.clone()
    }
}

/// A depleting sequence that owns `resource` and hands it to `release` once done.
///
/// `release` runs once, after the first traversal ends or stops early. Later traversals
/// find the resource gone and produce nothing.
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
/// use pullseq::prelude::*;
///
/// let closed = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&closed);
/// let seq = from_resource(
///     vec![3, 2, 1],
///     |stack: &mut Vec<i32>| stack.pop(),
///     move |_stack| flag.set(true),
/// );
/// assert_eq!(seq.take(2).to_vec(), vec![1, 2]);
/// assert!(closed.get());
/// ```
pub fn from_resource<T, R, F, G>(
    resource: R,
    step: F,
    release: G,
) -> Seq<Resource<R, F>, Finalize<impl FnOnce()>>
where
    F: FnMut(&mut R) -> Option<T>,
    G: FnOnce(R),
{
    let shared = Rc::new(RefCell::new((Some(resource), step)));
    let owned = Rc::clone(&shared);
    Seq::new(
        Resource { shared },
        Finalize::new(move || {
            let taken = owned.borrow_mut().0.take();
            if let Some(resource) = taken {
                release(resource)
            }
        }),
    )
}

/// Pulls through a "has more" test and a "next" accessor.
///
/// The accessors are dropped when `has_more` first returns `false` or when the lifecycle
/// runs, whichever comes first; after that every traversal is exhausted.
pub struct Cursor<H, N> {
    shared: Rc<RefCell<Option<(H, N)>>>,
}

impl<H, N> Clone for Cursor<H, N> {
    fn clone(&self) -> Self {
        Cursor {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T, H, N> Producer for Cursor<H, N>
where
    H: FnMut() -> bool,
    N: FnMut() -> T,
{
    type Item = T;
    type Error = Infallible;

    fn step(&mut self) -> Step<T> {
        let mut shared = self.shared.borrow_mut();
        let Some((has_more, next)) = shared.as_mut() else {
            return Step::Exhausted;
        };
        if has_more() {
            Step::Produced(next())
        } else {
            *shared = None;
            Step::Exhausted
        }
    }
}

impl<T, H, N> Source for Cursor<H, N>
where
    H: FnMut() -> bool,
    N: FnMut() -> T,
{
    type Item = T;
    type Error = Infallible;
    type Producer = Self;

    fn producer(&mut self) -> Self {
        self.clone()
    }
}

/// Wrap an arbitrary external iteration protocol.
///
/// `next` is only called after `has_more` returned `true`. `release` runs once when the
/// first traversal ends or stops early; the accessors are never called after it.
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
/// use pullseq::prelude::*;
///
/// let n = Rc::new(Cell::new(0));
/// let (a, b) = (Rc::clone(&n), Rc::clone(&n));
/// let mut seq = from_cursor(move || a.get() < 5, move || { b.set(b.get() + 1); b.get() }, || {})
///     .take(2);
/// assert_eq!(seq.to_vec(), vec![1, 2]);
/// assert!(seq.to_vec().is_empty());
/// ```
pub fn from_cursor<T, H, N, G>(
    has_more: H,
    next: N,
    release: G,
) -> Seq<Cursor<H, N>, Finalize<impl FnOnce()>>
where
    H: FnMut() -> bool,
    N: FnMut() -> T,
    G: FnOnce(),
{
    let shared = Rc::new(RefCell::new(Some((has_more, next))));
    let owned = Rc::clone(&shared);
    Seq::new(
        Cursor { shared },
        Finalize::new(move || {
            drop(owned.borrow_mut().take());
            release()
        }),
    )
}
