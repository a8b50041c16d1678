//! Core traits for pulling values on demand.
//!
//! A [`Producer`] is the stateful, single-use half of a sequence: each call to
//! [`Producer::step`] returns one [`Step`]. A [`Source`] is the factory half: each call to
//! [`Source::producer`] hands out a fresh producer with its own state.
//!
//! Combinator structs in [`compose`](crate::compose) play both roles. `Map<S, F>` is a
//! `Source` when `S` is a source and a `Producer` when `S` is a producer; the source builds
//! its producer by asking the inner source for one and cloning its own configuration.
//!
//! # Examples
//!
//! ```rust
//! use pullseq::prelude::*;
//!
//! let mut n = 0;
//! let mut counter = from_fn(move || {
//!     n += 1;
//!     if n <= 2 { Step::<i32>::Produced(n) } else { Step::Exhausted }
//! });
//! assert_eq!(counter.step(), Step::Produced(1));
//! assert_eq!(counter.step(), Step::Produced(2));
//! assert_eq!(counter.step(), Step::Exhausted);
//! ```

use std::{cell::RefCell, rc::Rc};

use either::Either;

use crate::step::Step;

/// A stateful producer of step outcomes.
///
/// Producers are not shared between threads. Once a producer returns a terminal step
/// ([`Step::Exhausted`] or [`Step::Failed`]) callers must stop invoking it.
pub trait Producer {
    /// Type of produced values
    type Item;
    /// Type of failures; [`Infallible`](std::convert::Infallible) for pure producers
    type Error;

    /// Advance by one step.
    fn step(&mut self) -> Step<Self::Item, Self::Error>;

    /// Erase the producer type behind a box.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// let mut countdown = 2;
    /// let mut producer = from_fn(move || -> Step<i32> {
    ///     countdown -= 1;
    ///     if countdown < 0 { Step::Exhausted } else { Step::Produced(countdown) }
    /// })
    /// .boxed();
    /// assert_eq!(producer.step(), Step::Produced(1));
    /// assert_eq!(producer.step(), Step::Produced(0));
    /// assert_eq!(producer.step(), Step::Exhausted);
    /// ```
    fn boxed<'a>(self) -> Box<dyn Producer<Item = Self::Item, Error = Self::Error> + 'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

/// A factory of fresh producers.
pub trait Source {
    /// Type of produced values
    type Item;
    /// Type of failures
    type Error;
    /// The producer handed out by [`Source::producer`]
    type Producer: Producer<Item = Self::Item, Error = Self::Error>;

    /// Create a producer bound to fresh internal state.
    fn producer(&mut self) -> Self::Producer;
}

/// A producer driven by a closure.
#[derive(Clone)]
pub struct FromFn<F>(F);

/// Create a producer from a closure returning one step per call.
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<T, E, F> Producer for FromFn<F>
where
    F: FnMut() -> Step<T, E>,
{
    type Item = T;
    type Error = E;

    fn step(&mut self) -> Step<T, E> {
        (self.0)()
    }
}

/// A source driven by a closure returning fresh producers.
#[derive(Clone)]
pub struct Factory<F>(F);

/// Create a source from a closure that builds a new producer on each call.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut source = factory(|| {
///     let mut left = 2;
///     from_fn(move || {
///         if left == 0 {
///             return Step::<u8>::Exhausted;
///         }
///         left -= 1;
///         Step::Produced(left)
///     })
/// });
/// let mut first = source.producer();
/// let mut second = source.producer();
/// assert_eq!(first.step(), Step::Produced(1));
/// assert_eq!(second.step(), Step::Produced(1));
/// ```
pub fn factory<F>(f: F) -> Factory<F> {
    Factory(f)
}

impl<P, F> Source for Factory<F>
where
    F: FnMut() -> P,
    P: Producer,
{
    type Item = P::Item;
    type Error = P::Error;
    type Producer = P;

    fn producer(&mut self) -> P {
        (self.0)()
    }
}

impl<P> Producer for &'_ mut P
where
    P: Producer + ?Sized,
{
    type Item = P::Item;
    type Error = P::Error;

    fn step(&mut self) -> Step<Self::Item, Self::Error> {
        (**self).step()
    }
}

impl<T, E> Producer for Box<dyn Producer<Item = T, Error = E> + '_> {
    type Item = T;
    type Error = E;

    fn step(&mut self) -> Step<T, E> {
        (**self).step()
    }
}

/// A missing producer is an exhausted one.
impl<P> Producer for Option<P>
where
    P: Producer,
{
    type Item = P::Item;
    type Error = P::Error;

    fn step(&mut self) -> Step<Self::Item, Self::Error> {
        match self {
            Some(p) => p.step(),
            None => Step::Exhausted,
        }
    }
}

impl<P> Producer for Rc<RefCell<P>>
where
    P: Producer,
{
    type Item = P::Item;
    type Error = P::Error;

    fn step(&mut self) -> Step<Self::Item, Self::Error> {
        self.borrow_mut().step()
    }
}

impl<L, R> Producer for Either<L, R>
where
    L: Producer,
    R: Producer<Item = L::Item, Error = L::Error>,
{
    type Item = L::Item;
    type Error = L::Error;

    fn step(&mut self) -> Step<Self::Item, Self::Error> {
        match self {
            Either::Left(l) => l.step(),
            Either::Right(r) => r.step(),
        }
    }
}

impl<L, R> Source for Either<L, R>
where
    L: Source,
    R: Source<Item = L::Item, Error = L::Error>,
{
    type Item = L::Item;
    type Error = L::Error;
    type Producer = Either<L::Producer, R::Producer>;

    fn producer(&mut self) -> Self::Producer {
        match self {
            Either::Left(l) => Either::Left(l.producer()),
            Either::Right(r) => Either::Right(r.producer()),
        }
    }
}
