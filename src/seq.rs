//! The sequence handle.
//!
//! A [`Seq`] owns a [`Source`] (the producer factory) and a [`Lifecycle`] (the action run at
//! the end of each traversal). Combinators take a handle by value and return a new one whose
//! source wraps the old source; the lifecycle is carried over unchanged, or paired with the
//! other input's lifecycle for two-input combinators. Nothing is produced until a consumer
//! drives the handle.
//!
//! ```rust
//! use pullseq::prelude::*;
//!
//! let mut evens = range(0, 10).filter(|x| x % 2 == 0).map(|x| x * 10);
//! assert_eq!(evens.to_vec(), vec![0, 20, 40, 60, 80]);
//! // pure sources can be driven again
//! assert_eq!(evens.count(), 5);
//! ```

use std::convert::Infallible;

use either::Either;

use crate::{
    build::Empty,
    compose::{
        Append, Choose, Cons, Fallible, Filter, Map, MapAccum, Skip, SkipWhile, Slice, Take,
        TakeWhile, TryMap, ZipWith, pair,
    },
    lifecycle::{Both, Inert, Lifecycle, LifecycleKind},
    producer::Source,
};

/// A lazy sequence: a producer factory plus the action that ends each traversal.
#[derive(Clone, Debug)]
pub struct Seq<S, L = Inert> {
    source: S,
    lifecycle: L,
}

impl<S, L> Seq<S, L> {
    /// Pair a source with a lifecycle action. Any pair is accepted.
    pub fn new(source: S, lifecycle: L) -> Self {
        Seq { source, lifecycle }
    }

    /// Split the handle back into its source and lifecycle action.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// let (source, lifecycle) = range(0, 3).into_parts();
    /// let mut rebuilt = Seq::new(source, lifecycle).take(2);
    /// assert_eq!(rebuilt.to_vec(), vec![0, 1]);
    /// ```
    pub fn into_parts(self) -> (S, L) {
        (self.source, self.lifecycle)
    }

    /// The action run at the end of each traversal.
    pub fn lifecycle(&self) -> &L {
        &self.lifecycle
    }

    /// Wrap the source as the left arm of an [`Either`], so that two differently built
    /// pipelines can be returned from the same branch.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// fn evens_or_odds(evens: bool) -> Vec<i32> {
    ///     let numbers = range(0, 6);
    ///     let mut picked = if evens {
    ///         numbers.filter(|x| x % 2 == 0).left()
    ///     } else {
    ///         numbers.filter(|x| x % 2 == 1).right()
    ///     };
    ///     picked.to_vec()
    /// }
    /// assert_eq!(evens_or_odds(true), vec![0, 2, 4]);
    /// assert_eq!(evens_or_odds(false), vec![1, 3, 5]);
    /// ```
    pub fn left<R>(self) -> Seq<Either<S, R>, L> {
        Seq::new(Either::Left(self.source), self.lifecycle)
    }

    /// Wrap the source as the right arm of an [`Either`].
    pub fn right<R>(self) -> Seq<Either<R, S>, L> {
        Seq::new(Either::Right(self.source), self.lifecycle)
    }
}

impl<S, L> Seq<S, L>
where
    S: Source,
    L: Lifecycle,
{
    /// Build a fresh producer and hand it out together with the lifecycle action.
    ///
    /// The caller owns the obligation to run the action once it stops pulling. Prefer the
    /// terminal consumers and [`iter`](Seq::iter), which do this on every exit path.
    pub fn drive(&mut self) -> (S::Producer, &mut L) {
        (self.source.producer(), &mut self.lifecycle)
    }

    /// Whether the handle can be driven again after a traversal.
    pub fn kind(&self) -> LifecycleKind {
        self.lifecycle.kind()
    }

    /// Keep the lifecycle action but produce nothing.
    pub fn truncate(self) -> Seq<Empty<S::Item, S::Error>, L> {
        Seq::new(Empty::new(), self.lifecycle)
    }

    /// Transform every produced value.
    pub fn map<B, F>(self, f: F) -> Seq<Map<S, F>, L>
    where
        F: FnMut(S::Item) -> B + Clone,
    {
        Seq::new(Map::new(self.source, f), self.lifecycle)
    }

    /// Thread an accumulator through the produced values.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// let mut running = from_vec(vec![1, 2, 3, 4]).map_accum(0, |total: &mut i32, x| {
    ///     *total += x;
    ///     *total
    /// });
    /// assert_eq!(running.to_vec(), vec![1, 3, 6, 10]);
    /// ```
    pub fn map_accum<A, B, F>(self, seed: A, f: F) -> Seq<MapAccum<S, F, A>, L>
    where
        A: Clone,
        F: FnMut(&mut A, S::Item) -> B + Clone,
    {
        Seq::new(MapAccum::new(self.source, f, seed), self.lifecycle)
    }

    /// Pair each value with a counter starting at `start`.
    ///
    /// Skips do not advance the counter. Past `usize::MAX` it wraps around to zero.
    #[allow(clippy::type_complexity)]
    pub fn index_from(
        self,
        start: usize,
    ) -> Seq<MapAccum<S, fn(&mut usize, S::Item) -> (usize, S::Item), usize>, L> {
        self.map_accum(
            start,
            tag_index::<S::Item> as fn(&mut usize, S::Item) -> (usize, S::Item),
        )
    }

    /// Pair each value with its position among the produced values.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// let mut tagged = from_vec(vec!["x", "y"]).enumerate();
    /// assert_eq!(tagged.to_vec(), vec![(0, "x"), (1, "y")]);
    /// ```
    #[allow(clippy::type_complexity)]
    pub fn enumerate(
        self,
    ) -> Seq<MapAccum<S, fn(&mut usize, S::Item) -> (usize, S::Item), usize>, L> {
        self.index_from(0)
    }

    /// Turn values rejected by `pred` into skips.
    pub fn filter<P>(self, pred: P) -> Seq<Filter<S, P>, L>
    where
        P: FnMut(&S::Item) -> bool + Clone,
    {
        Seq::new(Filter::new(self.source, pred), self.lifecycle)
    }

    /// Map and filter at once; `None` becomes a skip.
    pub fn choose<B, F>(self, f: F) -> Seq<Choose<S, F>, L>
    where
        F: FnMut(S::Item) -> Option<B> + Clone,
    {
        Seq::new(Choose::new(self.source, f), self.lifecycle)
    }

    /// Stop after `n` produced values. `take(0)` never pulls from the input.
    pub fn take(self, n: usize) -> Seq<Take<S>, L> {
        Seq::new(Take::new(self.source, n), self.lifecycle)
    }

    /// Stop at the first value rejected by `pred`; the input is abandoned there.
    pub fn take_while<P>(self, pred: P) -> Seq<TakeWhile<S, P>, L>
    where
        P: FnMut(&S::Item) -> bool + Clone,
    {
        Seq::new(TakeWhile::new(self.source, pred), self.lifecycle)
    }

    /// Suppress the first `n` produced values.
    pub fn skip(self, n: usize) -> Seq<Skip<S>, L> {
        Seq::new(Skip::new(self.source, n), self.lifecycle)
    }

    /// Suppress values while `pred` holds; everything after the first rejection passes.
    pub fn skip_while<P>(self, pred: P) -> Seq<SkipWhile<S, P>, L>
    where
        P: FnMut(&S::Item) -> bool + Clone,
    {
        Seq::new(SkipWhile::new(self.source, pred), self.lifecycle)
    }

    /// Keep the values at positions `start..end`. Empty when `start >= end`.
    pub fn slice(self, start: usize, end: usize) -> Seq<Slice<S>, L> {
        Seq::new(Slice::new(self.source, start, end), self.lifecycle)
    }

    /// Produce `head` before every value of this sequence.
    pub fn cons(self, head: S::Item) -> Seq<Cons<S, S::Item>, L>
    where
        S::Item: Clone,
    {
        crate::compose::cons(head, self)
    }

    /// Drain this sequence, then continue with `other`.
    pub fn append<R, M>(self, other: Seq<R, M>) -> Seq<Append<S, R>, Both<L, M>>
    where
        R: Source<Item = S::Item, Error = S::Error>,
        M: Lifecycle,
    {
        crate::compose::append(self, other)
    }

    /// Combine aligned values of two sequences; ends with the shorter one.
    pub fn zip_with<R, M, C, F>(self, other: Seq<R, M>, f: F) -> Seq<ZipWith<S, R, F>, Both<L, M>>
    where
        R: Source<Error = S::Error>,
        M: Lifecycle,
        F: FnMut(S::Item, R::Item) -> C + Clone,
    {
        crate::compose::zip_with(f, self, other)
    }

    #[allow(clippy::type_complexity)]
    pub fn zip<R, M>(
        self,
        other: Seq<R, M>,
    ) -> Seq<ZipWith<S, R, fn(S::Item, R::Item) -> (S::Item, R::Item)>, Both<L, M>>
    where
        R: Source<Error = S::Error>,
        M: Lifecycle,
    {
        self.zip_with(other, pair::<S::Item, R::Item> as fn(_, _) -> _)
    }

    /// Transform every value with a fallible function; `Err` becomes [`Step::Failed`](crate::Step::Failed).
    pub fn try_map<B, F>(self, f: F) -> Seq<TryMap<S, F>, L>
    where
        F: FnMut(S::Item) -> Result<B, S::Error> + Clone,
    {
        Seq::new(TryMap::new(self.source, f), self.lifecycle)
    }
}

impl<S, L> Seq<S, L>
where
    S: Source<Error = Infallible>,
    L: Lifecycle,
{
    /// Lift a pure sequence into one that may fail with `E`.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// let mut parsed = from_vec(vec!["1", "2", "x"])
    ///     .fallible::<String>()
    ///     .try_map(|s| s.parse::<i32>().map_err(|e| e.to_string()));
    /// let failure = parsed.try_to_vec().unwrap_err();
    /// assert_eq!(failure.position, 2);
    /// ```
    pub fn fallible<E>(self) -> Seq<Fallible<S, E>, L> {
        Seq::new(Fallible::new(self.source), self.lifecycle)
    }
}

fn tag_index<T>(next: &mut usize, item: T) -> (usize, T) {
    let index = *next;
    *next = index.wrapping_add(1);
    (index, item)
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use crate::{
        build::{from_vec, range},
        lifecycle::Finalize,
        producer::Producer,
        step::Step,
    };

    use super::*;

    #[test]
    fn test_drive_hands_out_independent_producers() {
        let mut seq = range(0, 3);
        let (mut first, _) = seq.drive();
        assert_eq!(first.step(), Step::Produced(0));
        assert_eq!(first.step(), Step::Produced(1));

        let (mut second, _) = seq.drive();
        assert_eq!(second.step(), Step::Produced(0));
        assert_eq!(first.step(), Step::Produced(2));
        assert_eq!(first.step(), Step::Exhausted);
    }

    #[test]
    fn test_truncate_keeps_lifecycle() {
        let closed = Rc::new(Cell::new(0));
        let seq = Seq::new(
            range(0, 100).into_parts().0,
            Finalize::new({
                let closed = Rc::clone(&closed);
                move || closed.set(closed.get() + 1)
            }),
        );

        let mut truncated = seq.truncate();
        assert_eq!(truncated.kind(), LifecycleKind::Depleting);
        assert!(truncated.to_vec().is_empty());
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn test_combinators_are_lazy() {
        let calls = Rc::new(Cell::new(0));
        let mut seq = range(0, 5).map({
            let calls = Rc::clone(&calls);
            move |x| {
                calls.set(calls.get() + 1);
                x
            }
        });
        assert_eq!(calls.get(), 0);

        let (mut producer, _) = seq.drive();
        assert_eq!(producer.step(), Step::Produced(0));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_index_from_counts_produced_values() {
        let mut seq = from_vec(vec!['a', 'b', 'c']).index_from(5);
        assert_eq!(seq.to_vec(), vec![(5, 'a'), (6, 'b'), (7, 'c')]);

        let mut seq = from_vec(vec![1, 2, 3, 4]).filter(|x| x % 2 == 0).enumerate();
        assert_eq!(seq.to_vec(), vec![(0, 2), (1, 4)]);
    }

    #[test]
    fn test_index_from_wraps_at_the_top() {
        let mut seq = from_vec(vec!['a', 'b']).index_from(usize::MAX);
        assert_eq!(seq.to_vec(), vec![(usize::MAX, 'a'), (0, 'b')]);
    }

    #[test]
    fn test_either_arms_share_a_type() {
        let build = |doubled: bool| {
            if doubled {
                range(1, 4).map(|x| x * 2).left()
            } else {
                range(1, 4).take(1).right()
            }
        };
        assert_eq!(build(true).to_vec(), vec![2, 4, 6]);
        assert_eq!(build(false).to_vec(), vec![1]);
    }
}
