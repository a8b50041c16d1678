//! Terminal consumers of pure sequences.
//!
//! Each consumer drives the handle once, folds or collects the produced values, and runs
//! the lifecycle action exactly once before returning, including when it stops early.
//! Failure-aware counterparts live in [`result`](crate::result).

use std::{convert::Infallible, iter::Sum};

use crate::{
    lifecycle::{Lifecycle, Spent},
    producer::Source,
    result::Resume,
    seq::Seq,
};

/// Numbers [`Seq::average`] can take the mean of.
///
/// Wide integers are converted with `as`, so values beyond 2^53 lose precision.
pub trait AsF64 {
    fn as_f64(self) -> f64;
}

macro_rules! as_f64 {
    ($($t:ty),*) => {
        $(
            impl AsF64 for $t {
                #[inline]
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

as_f64!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<S, L> Seq<S, L>
where
    S: Source<Error = Infallible>,
    L: Lifecycle,
{
    /// Strict left fold over the produced values.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// let result = from_vec(vec![1, 2, 3]).fold(100, |acc, x| (acc - x) * (x % 2 + 1));
    /// assert_eq!(result, 386);
    /// ```
    pub fn fold<A, F>(&mut self, init: A, f: F) -> A
    where
        F: FnMut(A, S::Item) -> A,
    {
        self.iter().fold(init, f)
    }

    /// Collect the produced values in order.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// assert_eq!(range(0, 5).filter(|x| x % 2 == 1).to_vec(), vec![1, 3]);
    /// ```
    pub fn to_vec(&mut self) -> Vec<S::Item> {
        self.iter().collect()
    }

    pub fn for_each<F>(&mut self, f: F)
    where
        F: FnMut(S::Item),
    {
        self.iter().for_each(f)
    }

    /// Number of produced values. Skips are not counted.
    pub fn count(&mut self) -> usize {
        self.iter().count()
    }

    /// Sum of the produced values; zero when empty.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// assert_eq!(range(1u64, 5).sum::<u64>(), 10);
    /// ```
    pub fn sum<A>(&mut self) -> A
    where
        A: Sum<S::Item>,
    {
        self.iter().sum()
    }

    /// Arithmetic mean, or `None` for an empty sequence.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// assert_eq!(range(0i64, 5).average(), Some(2.0));
    /// assert_eq!(empty::<usize>().average(), None);
    /// ```
    pub fn average(&mut self) -> Option<f64>
    where
        S::Item: AsF64,
    {
        let (total, n) = self.fold((0.0, 0usize), |(total, n), x| (total + x.as_f64(), n + 1));
        (n > 0).then(|| total / n as f64)
    }

    /// Largest produced value; the last one on ties.
    pub fn maximum(&mut self) -> Option<S::Item>
    where
        S::Item: Ord,
    {
        self.iter().max()
    }

    /// Smallest produced value; the first one on ties.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// assert_eq!(from_vec(vec![3, 1, 2]).minimum(), Some(1));
    /// ```
    pub fn minimum(&mut self) -> Option<S::Item>
    where
        S::Item: Ord,
    {
        self.iter().min()
    }

    /// Map every value to zero or more outputs and concatenate them all.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// let words = from_vec(vec!["3", "", "x", "12"]).collect_all(|s| s.parse::<u32>().ok());
    /// assert_eq!(words, vec![3, 12]);
    /// ```
    pub fn collect_all<B, I, F>(&mut self, f: F) -> Vec<B>
    where
        F: FnMut(S::Item) -> I,
        I: IntoIterator<Item = B>,
    {
        self.iter().flat_map(f).collect()
    }

    /// Map every value with `f`, stopping at the first `None`.
    pub fn traverse_until_failure<B, F>(&mut self, f: F) -> Option<Vec<B>>
    where
        F: FnMut(S::Item) -> Option<B>,
    {
        self.iter().map(f).collect()
    }

    /// Split off the first value.
    ///
    /// The returned handle continues from the already advanced producer and keeps the
    /// lifecycle action; it yields the rest once and is empty afterwards, so its kind is
    /// [`Depleting`](crate::LifecycleKind::Depleting). On an empty sequence the action runs
    /// here and `None` is returned.
    ///
    /// ```rust
    /// use pullseq::prelude::*;
    ///
    /// let (head, mut rest) = range(1, 4).view().unwrap();
    /// assert_eq!(head, 1);
    /// assert_eq!(rest.to_vec(), vec![2, 3]);
    /// assert!(empty::<i32>().view().is_none());
    /// ```
    #[allow(clippy::type_complexity)]
    pub fn view(self) -> Option<(S::Item, Seq<Resume<S::Producer>, Spent<L>>)> {
        match self.try_view() {
            Ok(view) => view,
            Err(failure) => match failure.error {},
        }
    }

    /// `true` when both sequences produce equal values in the same order.
    pub fn same_elements<R, M>(&mut self, other: &mut Seq<R, M>) -> bool
    where
        R: Source<Error = Infallible>,
        M: Lifecycle,
        S::Item: PartialEq<R::Item>,
    {
        crate::compose::same_elements(self, other)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use crate::{
        build::{empty, from_resource, from_vec, range, unfold, unfold_external},
        lifecycle::Finalize,
        LifecycleKind,
    };

    use super::*;

    fn tracked<S: Source>(source: S, releases: &Rc<Cell<u32>>) -> Seq<S, Finalize<impl FnOnce()>> {
        let releases = Rc::clone(releases);
        Seq::new(source, Finalize::new(move || releases.set(releases.get() + 1)))
    }

    #[test]
    fn test_fold_scenario() {
        let mut seq = from_vec(vec![1, 2, 3]);
        assert_eq!(seq.fold(100, |acc, x| (acc - x) * (x % 2 + 1)), 386);
    }

    #[test]
    fn test_range_to_vec() {
        assert_eq!(range(1, 4).to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_numeric_reductions() {
        let mut seq = from_vec(vec![4u32, 9, 2, 7]);
        assert_eq!(seq.count(), 4);
        assert_eq!(seq.sum::<u32>(), 22);
        assert_eq!(seq.average(), Some(5.5));
        assert_eq!(seq.maximum(), Some(9));
        assert_eq!(seq.minimum(), Some(2));

        let mut nothing = empty::<u32>();
        assert_eq!(nothing.average(), None);
        assert_eq!(nothing.maximum(), None);
        assert_eq!(nothing.sum::<u32>(), 0);
    }

    #[test]
    fn test_average_over_wide_integers() {
        assert_eq!(range(0i64, 5).average(), Some(2.0));
        assert_eq!(range(1u64, 4).average(), Some(2.0));
        assert_eq!(from_vec(vec![1usize, 2]).average(), Some(1.5));
        assert_eq!(from_vec(vec![-3isize, 3, 6]).average(), Some(2.0));
        assert_eq!(from_vec(vec![0.5f32, 1.5]).average(), Some(1.0));
    }

    #[test]
    fn test_for_each_sees_every_value() {
        let mut seen = Vec::new();
        range(0, 20).filter(|x| x % 5 == 0).for_each(|x| seen.push(x));
        assert_eq!(seen, vec![0, 5, 10, 15]);
    }

    #[test]
    fn test_collect_all_keeps_going_past_empty_outputs() {
        let mut seq = range(0, 4);
        let out = seq.collect_all(|x| vec![x; x as usize]);
        assert_eq!(out, vec![1, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn test_traverse_until_failure_short_circuits_and_releases() {
        let releases = Rc::new(Cell::new(0));
        let calls = Rc::new(Cell::new(0));
        let mut seq = tracked(range(0, 100).into_parts().0, &releases);
        let out = seq.traverse_until_failure(|x| {
            calls.set(calls.get() + 1);
            (x < 3).then_some(x * 2)
        });
        assert_eq!(out, None);
        assert_eq!(calls.get(), 4);
        assert_eq!(releases.get(), 1);

        let mut small = range(0, 3);
        assert_eq!(small.traverse_until_failure(|x| Some(x + 1)), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_every_consumer_releases_once() {
        let releases = Rc::new(Cell::new(0));
        let fresh = || tracked(range(0, 5).into_parts().0, &releases);

        fresh().to_vec();
        fresh().count();
        fresh().fold(0, |a, x| a + x);
        fresh().for_each(drop);
        fresh().maximum();
        fresh().collect_all(Some);
        fresh().iter().take(1).for_each(drop);
        assert_eq!(releases.get(), 7);
    }

    #[test]
    fn test_view_continues_without_restarting() {
        let pulls = Rc::new(Cell::new(0));
        let seq = unfold(0, {
            let pulls = Rc::clone(&pulls);
            move |n| {
                pulls.set(pulls.get() + 1);
                (n < 3).then_some((n, n + 1))
            }
        });

        let (head, mut rest) = seq.view().unwrap();
        assert_eq!(head, 0);
        assert_eq!(pulls.get(), 1);
        assert_eq!(rest.to_vec(), vec![1, 2]);
        assert!(rest.to_vec().is_empty());
    }

    #[test]
    fn test_view_rest_of_pure_source_is_depleting() {
        let replayable = range(0, 3);
        assert_eq!(replayable.kind(), LifecycleKind::Replayable);

        let (head, mut rest) = replayable.view().unwrap();
        assert_eq!(head, 0);
        assert_eq!(rest.kind(), LifecycleKind::Depleting);
        assert_eq!(rest.to_vec(), vec![1, 2]);
        assert!(rest.to_vec().is_empty());
    }

    #[test]
    fn test_view_on_empty_releases() {
        let releases = Rc::new(Cell::new(0));
        let seq = tracked(range(0, 0).into_parts().0, &releases);
        assert!(seq.view().is_none());
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_view_hands_over_the_lifecycle() {
        let releases = Rc::new(Cell::new(0));
        let seq = tracked(range(0, 2).into_parts().0, &releases);
        let (_, mut rest) = seq.view().unwrap();
        assert_eq!(releases.get(), 0);
        assert_eq!(rest.kind(), LifecycleKind::Depleting);
        assert_eq!(rest.to_vec(), vec![1]);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_depleting_source_does_not_replay() {
        let mut lines = "alpha\nbeta".lines();
        let mut seq = unfold_external(move || lines.next());
        assert_eq!(seq.to_vec(), vec!["alpha", "beta"]);
        assert!(seq.to_vec().is_empty());
        assert_eq!(seq.count(), 0);

        let mut stack = from_resource(vec![1, 2], |v: &mut Vec<i32>| v.pop(), drop);
        assert_eq!(stack.iter().next(), Some(2));
        assert!(stack.to_vec().is_empty());
    }

    #[test]
    fn test_same_elements_method() {
        let mut a = from_vec(vec![1, 2, 3]);
        let mut b = range(0, 4).skip(1);
        assert!(a.same_elements(&mut b));
        assert!(!a.same_elements(&mut range(1, 3)));
    }
}
