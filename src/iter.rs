//! Iterator adapters over sequence handles.
//!
//! [`Iter`] walks a pure sequence and [`TryIter`] a failure-aware one. Both hide
//! [`Step::Skipped`], stop at the first terminal step, and run the handle's lifecycle action
//! exactly once: when termination is observed, or when the adapter is dropped early.
//!
//! # Examples
//!
//! ```rust
//! use pullseq::prelude::*;
//!
//! let mut evens = range(0, 100).filter(|x| x % 2 == 0);
//! let firsts: Vec<_> = evens.iter().take(3).collect();
//! assert_eq!(firsts, vec![0, 2, 4]);
//!
//! let mut total = 0;
//! for x in &mut evens {
//!     total += x;
//! }
//! assert_eq!(total, 2450);
//! ```
//!
//! Failures end a [`TryIter`] after being reported once:
//! ```rust
//! use pullseq::prelude::*;
//!
//! let mut parsed = from_vec(vec!["1", "x", "3"])
//!     .fallible::<std::num::ParseIntError>()
//!     .try_map(|s| s.parse::<i32>());
//! let mut iter = parsed.try_iter();
//! assert_eq!(iter.next().map(Result::ok), Some(Some(1)));
//! assert!(matches!(iter.next(), Some(Err(failure)) if failure.position == 1));
//! assert!(iter.next().is_none());
//! ```

use std::{convert::Infallible, iter::FusedIterator};

use tracing::debug;

use crate::{
    error::Failure,
    lifecycle::{end_traversal, Lifecycle},
    producer::{Producer, Source},
    seq::Seq,
    step::Step,
};

/// A producer paired with the lifecycle it owes.
struct Drive<P, L>
where
    P: Producer,
    L: Lifecycle,
{
    producer: P,
    lifecycle: L,
    finished: bool,
    position: usize,
}

impl<P, L> Drive<P, L>
where
    P: Producer,
    L: Lifecycle,
{
    fn new(producer: P, lifecycle: L) -> Self {
        Drive {
            producer,
            lifecycle,
            finished: false,
            position: 0,
        }
    }

    fn pull(&mut self) -> Option<Result<P::Item, Failure<P::Error>>> {
        if self.finished {
            return None;
        }
        loop {
            match self.producer.step() {
                Step::Skipped => continue,
                Step::Produced(item) => {
                    self.position += 1;
                    return Some(Ok(item));
                }
                Step::Exhausted => {
                    self.finish();
                    return None;
                }
                Step::Failed(error) => {
                    debug!(position = self.position, "sequence stopped on failure");
                    self.finish();
                    return Some(Err(Failure::new(error, self.position)));
                }
            }
        }
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            end_traversal(&mut self.lifecycle, self.position);
        }
    }
}

impl<P, L> Drop for Drive<P, L>
where
    P: Producer,
    L: Lifecycle,
{
    fn drop(&mut self) {
        self.finish();
    }
}

/// Iterator over the values of a pure sequence.
pub struct Iter<P, L>
where
    P: Producer,
    L: Lifecycle,
{
    drive: Drive<P, L>,
}

impl<P, L> Iter<P, L>
where
    P: Producer<Error = Infallible>,
    L: Lifecycle,
{
    pub fn new(producer: P, lifecycle: L) -> Self {
        Iter {
            drive: Drive::new(producer, lifecycle),
        }
    }

    /// Number of values returned so far.
    pub fn position(&self) -> usize {
        self.drive.position
    }
}

impl<P, L> Iterator for Iter<P, L>
where
    P: Producer<Error = Infallible>,
    L: Lifecycle,
{
    type Item = P::Item;

    fn next(&mut self) -> Option<P::Item> {
        match self.drive.pull()? {
            Ok(item) => Some(item),
            Err(failure) => match failure.error {},
        }
    }
}

impl<P, L> FusedIterator for Iter<P, L>
where
    P: Producer<Error = Infallible>,
    L: Lifecycle,
{
}

/// Iterator over the values of a failure-aware sequence.
///
/// Yields `Ok` values until the sequence ends, or one `Err` followed by `None`.
pub struct TryIter<P, L>
where
    P: Producer,
    L: Lifecycle,
{
    drive: Drive<P, L>,
}

impl<P, L> TryIter<P, L>
where
    P: Producer,
    L: Lifecycle,
{
    pub fn new(producer: P, lifecycle: L) -> Self {
        TryIter {
            drive: Drive::new(producer, lifecycle),
        }
    }

    /// Number of `Ok` values returned so far.
    pub fn position(&self) -> usize {
        self.drive.position
    }
}

impl<P, L> Iterator for TryIter<P, L>
where
    P: Producer,
    L: Lifecycle,
{
    type Item = Result<P::Item, Failure<P::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.drive.pull()
    }
}

impl<P, L> FusedIterator for TryIter<P, L>
where
    P: Producer,
    L: Lifecycle,
{
}

impl<S, L> Seq<S, L>
where
    S: Source,
    L: Lifecycle,
{
    /// Iterate over a failure-aware sequence, borrowing the handle.
    pub fn try_iter(&mut self) -> TryIter<S::Producer, &mut L> {
        let (producer, lifecycle) = self.drive();
        TryIter::new(producer, lifecycle)
    }
}

impl<S, L> Seq<S, L>
where
    S: Source<Error = Infallible>,
    L: Lifecycle,
{
    /// Iterate over the values, borrowing the handle.
    ///
    /// Replayable handles can be iterated again afterwards.
    pub fn iter(&mut self) -> Iter<S::Producer, &mut L> {
        let (producer, lifecycle) = self.drive();
        Iter::new(producer, lifecycle)
    }
}

impl<S, L> IntoIterator for Seq<S, L>
where
    S: Source<Error = Infallible>,
    L: Lifecycle,
{
    type Item = S::Item;
    type IntoIter = Iter<S::Producer, L>;

    fn into_iter(self) -> Self::IntoIter {
        let (mut source, lifecycle) = self.into_parts();
        Iter::new(source.producer(), lifecycle)
    }
}

impl<'a, S, L> IntoIterator for &'a mut Seq<S, L>
where
    S: Source<Error = Infallible>,
    L: Lifecycle,
{
    type Item = S::Item;
    type IntoIter = Iter<S::Producer, &'a mut L>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
