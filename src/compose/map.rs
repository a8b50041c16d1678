use std::{convert::Infallible, marker::PhantomData};

use crate::{
    producer::{Producer, Source},
    step::Step,
};

/// Transforms produced values.
///
/// Created by [`Seq::map`](crate::Seq::map).
#[derive(Clone, Debug)]
pub struct Map<S, F> {
    inner: S,
    f: F,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(inner: S, f: F) -> Self {
        Map { inner, f }
    }
}

impl<B, P, F> Producer for Map<P, F>
where
    P: Producer,
    F: FnMut(P::Item) -> B,
{
    type Item = B;
    type Error = P::Error;

    fn step(&mut self) -> Step<B, P::Error> {
        self.inner.step().map(&mut self.f)
    }
}

impl<B, S, F> Source for Map<S, F>
where
    S: Source,
    F: FnMut(S::Item) -> B + Clone,
{
    type Item = B;
    type Error = S::Error;
    type Producer = Map<S::Producer, F>;

    fn producer(&mut self) -> Self::Producer {
        Map::new(self.inner.producer(), self.f.clone())
    }
}

/// Threads an accumulator through produced values.
///
/// Every producer starts from its own copy of the seed.
#[derive(Clone, Debug)]
pub struct MapAccum<S, F, A> {
    inner: S,
    f: F,
    acc: A,
}

impl<S, F, A> MapAccum<S, F, A> {
    pub(crate) fn new(inner: S, f: F, seed: A) -> Self {
        MapAccum { inner, f, acc: seed }
    }
}

impl<B, P, F, A> Producer for MapAccum<P, F, A>
where
    P: Producer,
    F: FnMut(&mut A, P::Item) -> B,
{
    type Item = B;
    type Error = P::Error;

    fn step(&mut self) -> Step<B, P::Error> {
        let acc = &mut self.acc;
        let f = &mut self.f;
        self.inner.step().map(|item| f(acc, item))
    }
}

impl<B, S, F, A> Source for MapAccum<S, F, A>
where
    S: Source,
    F: FnMut(&mut A, S::Item) -> B + Clone,
    A: Clone,
{
    type Item = B;
    type Error = S::Error;
    type Producer = MapAccum<S::Producer, F, A>;

    fn producer(&mut self) -> Self::Producer {
        MapAccum::new(self.inner.producer(), self.f.clone(), self.acc.clone())
    }
}

/// Skips produced values rejected by a predicate.
#[derive(Clone, Debug)]
pub struct Filter<S, P> {
    inner: S,
    pred: P,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(inner: S, pred: P) -> Self {
        Filter { inner, pred }
    }
}

impl<Q, P> Producer for Filter<Q, P>
where
    Q: Producer,
    P: FnMut(&Q::Item) -> bool,
{
    type Item = Q::Item;
    type Error = Q::Error;

    fn step(&mut self) -> Step<Q::Item, Q::Error> {
        self.inner.step().filter(&mut self.pred)
    }
}

impl<S, P> Source for Filter<S, P>
where
    S: Source,
    P: FnMut(&S::Item) -> bool + Clone,
{
    type Item = S::Item;
    type Error = S::Error;
    type Producer = Filter<S::Producer, P>;

    fn producer(&mut self) -> Self::Producer {
        Filter::new(self.inner.producer(), self.pred.clone())
    }
}

/// Maps and filters at once; `None` is reported as a skip.
#[derive(Clone, Debug)]
pub struct Choose<S, F> {
    inner: S,
    f: F,
}

impl<S, F> Choose<S, F> {
    pub(crate) fn new(inner: S, f: F) -> Self {
        Choose { inner, f }
    }
}

impl<B, P, F> Producer for Choose<P, F>
where
    P: Producer,
    F: FnMut(P::Item) -> Option<B>,
{
    type Item = B;
    type Error = P::Error;

    fn step(&mut self) -> Step<B, P::Error> {
        match self.inner.step() {
            Step::Produced(item) => Step::from((self.f)(item)),
            Step::Skipped => Step::Skipped,
            Step::Exhausted => Step::Exhausted,
            Step::Failed(e) => Step::Failed(e),
        }
    }
}

impl<B, S, F> Source for Choose<S, F>
where
    S: Source,
    F: FnMut(S::Item) -> Option<B> + Clone,
{
    type Item = B;
    type Error = S::Error;
    type Producer = Choose<S::Producer, F>;

    fn producer(&mut self) -> Self::Producer {
        Choose::new(self.inner.producer(), self.f.clone())
    }
}

/// Reinterprets a pure sequence as one that may fail with `E`.
pub struct Fallible<S, E> {
    inner: S,
    _error: PhantomData<fn() -> E>,
}

impl<S, E> Fallible<S, E> {
    pub(crate) fn new(inner: S) -> Self {
        Fallible {
            inner,
            _error: PhantomData,
        }
    }
}

impl<S: Clone, E> Clone for Fallible<S, E> {
    fn clone(&self) -> Self {
        Fallible::new(self.inner.clone())
    }
}

impl<P, E> Producer for Fallible<P, E>
where
    P: Producer<Error = Infallible>,
{
    type Item = P::Item;
    type Error = E;

    fn step(&mut self) -> Step<P::Item, E> {
        self.inner.step().widen()
    }
}

impl<S, E> Source for Fallible<S, E>
where
    S: Source<Error = Infallible>,
{
    type Item = S::Item;
    type Error = E;
    type Producer = Fallible<S::Producer, E>;

    fn producer(&mut self) -> Self::Producer {
        Fallible::new(self.inner.producer())
    }
}

/// Transforms produced values with a fallible function.
#[derive(Clone, Debug)]
pub struct TryMap<S, F> {
    inner: S,
    f: F,
}

impl<S, F> TryMap<S, F> {
    pub(crate) fn new(inner: S, f: F) -> Self {
        TryMap { inner, f }
    }
}

impl<B, P, F> Producer for TryMap<P, F>
where
    P: Producer,
    F: FnMut(P::Item) -> Result<B, P::Error>,
{
    type Item = B;
    type Error = P::Error;

    fn step(&mut self) -> Step<B, P::Error> {
        match self.inner.step() {
            Step::Produced(item) => match (self.f)(item) {
                Ok(b) => Step::Produced(b),
                Err(e) => Step::Failed(e),
            },
            Step::Skipped => Step::Skipped,
            Step::Exhausted => Step::Exhausted,
            Step::Failed(e) => Step::Failed(e),
        }
    }
}

impl<B, S, F> Source for TryMap<S, F>
where
    S: Source,
    F: FnMut(S::Item) -> Result<B, S::Error> + Clone,
{
    type Item = B;
    type Error = S::Error;
    type Producer = TryMap<S::Producer, F>;

    fn producer(&mut self) -> Self::Producer {
        TryMap::new(self.inner.producer(), self.f.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        build::{from_vec, range},
        producer::from_fn,
    };

    use super::*;

    fn scripted(steps: Vec<Step<i32, &'static str>>) -> impl Producer<Item = i32, Error = &'static str> {
        let mut steps = steps.into_iter();
        from_fn(move || steps.next().unwrap_or(Step::Exhausted))
    }

    #[test]
    fn test_map_preserves_skips_and_failures() {
        let mut mapped = Map::new(
            scripted(vec![Step::Produced(1), Step::Skipped, Step::Failed("bad")]),
            |x: i32| x * 10,
        );
        assert_eq!(mapped.step(), Step::Produced(10));
        assert_eq!(mapped.step(), Step::Skipped);
        assert_eq!(mapped.step(), Step::Failed("bad"));
    }

    #[test]
    fn test_map_accum_restarts_per_producer() {
        let mut seq = range(1, 4).map_accum(100, |acc: &mut i32, x| {
            *acc -= x;
            *acc
        });
        assert_eq!(seq.to_vec(), vec![99, 97, 94]);
        assert_eq!(seq.to_vec(), vec![99, 97, 94]);
    }

    #[test]
    fn test_filter_reports_skips() {
        let mut filtered = Filter::new(
            scripted(vec![Step::Produced(1), Step::Produced(2), Step::Produced(3)]),
            |x: &i32| x % 2 == 1,
        );
        assert_eq!(filtered.step(), Step::Produced(1));
        assert_eq!(filtered.step(), Step::Skipped);
        assert_eq!(filtered.step(), Step::Produced(3));
        assert_eq!(filtered.step(), Step::Exhausted);
    }

    #[test]
    fn test_filter_all_true_reproduces_input() {
        let mut seq = from_vec(vec![5, 3, 8]).filter(|_| true);
        assert_eq!(seq.to_vec(), vec![5, 3, 8]);
    }

    #[test]
    fn test_choose_parses_what_it_can() {
        let mut seq = from_vec(vec!["4", "four", "2"]).choose(|s| s.parse::<u8>().ok());
        assert_eq!(seq.to_vec(), vec![4, 2]);
    }

    #[test]
    fn test_try_map_turns_errors_into_failures() {
        let mut mapped = TryMap::new(
            scripted(vec![Step::Produced(2), Step::Produced(0)]),
            |x: i32| if x == 0 { Err("zero") } else { Ok(10 / x) },
        );
        assert_eq!(mapped.step(), Step::Produced(5));
        assert_eq!(mapped.step(), Step::Failed("zero"));
    }

    #[test]
    fn test_fallible_widens_error_type() {
        let mut widened: Fallible<_, String> = Fallible::new(from_fn(|| Step::<u8>::Produced(1)));
        assert_eq!(widened.step(), Step::Produced(1));
    }
}
