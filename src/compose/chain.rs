use crate::{
    lifecycle::{Both, Lifecycle},
    producer::{Producer, Source},
    seq::Seq,
    step::Step,
};

/// Produce `head`, then every value of `seq`.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut seq = cons(0, range(5, 7));
/// assert_eq!(seq.to_vec(), vec![0, 5, 6]);
/// ```
pub fn cons<S, L>(head: S::Item, seq: Seq<S, L>) -> Seq<Cons<S, S::Item>, L>
where
    S: Source,
    S::Item: Clone,
{
    let (source, lifecycle) = seq.into_parts();
    Seq::new(
        Cons {
            head: Some(head),
            inner: source,
        },
        lifecycle,
    )
}

/// A value in front of a sequence.
#[derive(Clone, Debug)]
pub struct Cons<S, T> {
    head: Option<T>,
    inner: S,
}

impl<P, T> Producer for Cons<P, T>
where
    P: Producer<Item = T>,
{
    type Item = P::Item;
    type Error = P::Error;

    fn step(&mut self) -> Step<P::Item, P::Error> {
        match self.head.take() {
            Some(head) => Step::Produced(head),
            None => self.inner.step(),
        }
    }
}

impl<S, T> Source for Cons<S, T>
where
    S: Source<Item = T>,
    T: Clone,
{
    type Item = S::Item;
    type Error = S::Error;
    type Producer = Cons<S::Producer, T>;

    fn producer(&mut self) -> Self::Producer {
        Cons {
            head: self.head.clone(),
            inner: self.inner.producer(),
        }
    }
}

/// Drain the first sequence, then continue with the second.
///
/// The step on which the first input reports exhaustion is reported as a skip. The combined
/// lifecycle releases the first input, then the second.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut seq = append(range(0, 2), from_vec(vec![7, 8]));
/// assert_eq!(seq.to_vec(), vec![0, 1, 7, 8]);
/// ```
pub fn append<A, LA, B, LB>(
    first: Seq<A, LA>,
    second: Seq<B, LB>,
) -> Seq<Append<A, B>, Both<LA, LB>>
where
    A: Source,
    B: Source<Item = A::Item, Error = A::Error>,
    LA: Lifecycle,
    LB: Lifecycle,
{
    let (first, first_lifecycle) = first.into_parts();
    let (second, second_lifecycle) = second.into_parts();
    Seq::new(
        Append {
            first: Some(first),
            second,
        },
        Both(first_lifecycle, second_lifecycle),
    )
}

/// Two sequences back to back.
///
/// The first input is dropped once it is exhausted.
#[derive(Clone, Debug)]
pub struct Append<A, B> {
    first: Option<A>,
    second: B,
}

impl<A, B> Producer for Append<A, B>
where
    A: Producer,
    B: Producer<Item = A::Item, Error = A::Error>,
{
    type Item = A::Item;
    type Error = A::Error;

    fn step(&mut self) -> Step<A::Item, A::Error> {
        match self.first {
            Some(ref mut first) => match first.step() {
                Step::Exhausted => {
                    self.first = None;
                    Step::Skipped
                }
                step => step,
            },
            None => self.second.step(),
        }
    }
}

impl<A, B> Source for Append<A, B>
where
    A: Source,
    B: Source<Item = A::Item, Error = A::Error>,
{
    type Item = A::Item;
    type Error = A::Error;
    type Producer = Append<A::Producer, B::Producer>;

    fn producer(&mut self) -> Self::Producer {
        Append {
            first: self.first.as_mut().map(Source::producer),
            second: self.second.producer(),
        }
    }
}
