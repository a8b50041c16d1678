//! Pairwise alignment of two producers.
//!
//! Every combined step pulls both inputs once. When exactly one side skips, only that side
//! is pulled again until it yields or ends; the value already taken from the other side is
//! held meanwhile. Inputs that skip often (filters, `skip_while`) stay aligned by position.

use std::convert::Infallible;

use crate::{
    error::Failure,
    lifecycle::{end_traversal, Both, Lifecycle},
    producer::{Producer, Source},
    seq::Seq,
    step::Step,
};

/// Pull until the producer yields, ends or fails. Never returns [`Step::Skipped`].
pub(crate) fn settle<P>(producer: &mut P) -> Step<P::Item, P::Error>
where
    P: Producer,
{
    loop {
        match producer.step() {
            Step::Skipped => continue,
            step => return step,
        }
    }
}

pub(crate) fn pair<A, B>(a: A, b: B) -> (A, B) {
    (a, b)
}

/// Combine aligned values of two sequences with `f`.
///
/// The result ends as soon as either input ends. The combined lifecycle releases the left
/// input, then the right.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let evens = range(0, 10).filter(|x| x % 2 == 0);
/// let odds = range(0, 10).filter(|x| x % 2 == 1);
/// let mut sums = zip_with(|a, b| a + b, evens, odds);
/// assert_eq!(sums.to_vec(), vec![1, 5, 9, 13, 17]);
/// ```
pub fn zip_with<A, LA, B, LB, C, F>(
    f: F,
    left: Seq<A, LA>,
    right: Seq<B, LB>,
) -> Seq<ZipWith<A, B, F>, Both<LA, LB>>
where
    A: Source,
    B: Source<Error = A::Error>,
    LA: Lifecycle,
    LB: Lifecycle,
    F: FnMut(A::Item, B::Item) -> C + Clone,
{
    let (left, left_lifecycle) = left.into_parts();
    let (right, right_lifecycle) = right.into_parts();
    Seq::new(
        ZipWith {
            left,
            right,
            f,
            done: false,
        },
        Both(left_lifecycle, right_lifecycle),
    )
}

/// Pair aligned values of two sequences.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut pairs = zip(from_vec(vec![1, 3, 5, 7]), from_vec(vec![2, 4, 6, 8]));
/// assert_eq!(pairs.to_vec(), vec![(1, 2), (3, 4), (5, 6), (7, 8)]);
/// ```
#[allow(clippy::type_complexity)]
pub fn zip<A, LA, B, LB>(
    left: Seq<A, LA>,
    right: Seq<B, LB>,
) -> Seq<ZipWith<A, B, fn(A::Item, B::Item) -> (A::Item, B::Item)>, Both<LA, LB>>
where
    A: Source,
    B: Source<Error = A::Error>,
    LA: Lifecycle,
    LB: Lifecycle,
{
    left.zip(right)
}

/// Two inputs combined position by position.
#[derive(Clone, Debug)]
pub struct ZipWith<A, B, F> {
    left: A,
    right: B,
    f: F,
    done: bool,
}

impl<A, B, C, F> Producer for ZipWith<A, B, F>
where
    A: Producer,
    B: Producer<Error = A::Error>,
    F: FnMut(A::Item, B::Item) -> C,
{
    type Item = C;
    type Error = A::Error;

    fn step(&mut self) -> Step<C, A::Error> {
        if self.done {
            return Step::Exhausted;
        }
        let step = match (self.left.step(), self.right.step()) {
            (Step::Failed(e), _) | (_, Step::Failed(e)) => Step::Failed(e),
            (Step::Exhausted, _) | (_, Step::Exhausted) => Step::Exhausted,
            (Step::Produced(a), Step::Produced(b)) => Step::Produced((self.f)(a, b)),
            // hold `a`, catch the right side up
            (Step::Produced(a), Step::Skipped) => {
                let f = &mut self.f;
                settle(&mut self.right).map(|b| f(a, b))
            }
            (Step::Skipped, Step::Produced(b)) => {
                let f = &mut self.f;
                settle(&mut self.left).map(|a| f(a, b))
            }
            (Step::Skipped, Step::Skipped) => Step::Skipped,
        };
        if step.is_terminal() {
            self.done = true;
        }
        step
    }
}

impl<A, B, C, F> Source for ZipWith<A, B, F>
where
    A: Source,
    B: Source<Error = A::Error>,
    F: FnMut(A::Item, B::Item) -> C + Clone,
{
    type Item = C;
    type Error = A::Error;
    type Producer = ZipWith<A::Producer, B::Producer, F>;

    fn producer(&mut self) -> Self::Producer {
        ZipWith {
            left: self.left.producer(),
            right: self.right.producer(),
            f: self.f.clone(),
            done: false,
        }
    }
}

/// Walk two producers in alignment and compare the values.
///
/// `Ok(true)` only when both sides end with every aligned pair equal. `matched` counts the
/// equal pairs seen so far.
fn align<P, Q>(left: &mut P, right: &mut Q, matched: &mut usize) -> Result<bool, Failure<P::Error>>
where
    P: Producer,
    Q: Producer<Error = P::Error>,
    P::Item: PartialEq<Q::Item>,
{
    loop {
        let (a, b) = match (left.step(), right.step()) {
            (Step::Failed(e), _) | (_, Step::Failed(e)) => return Err(Failure::new(e, *matched)),
            (Step::Exhausted, Step::Exhausted) => return Ok(true),
            (Step::Exhausted, Step::Produced(_)) | (Step::Produced(_), Step::Exhausted) => {
                return Ok(false);
            }
            // the idle side may still end without producing anything
            (Step::Exhausted, Step::Skipped) => return ended(settle(right), *matched),
            (Step::Skipped, Step::Exhausted) => return ended(settle(left), *matched),
            (Step::Skipped, Step::Skipped) => continue,
            (Step::Produced(a), Step::Produced(b)) => (a, b),
            (Step::Produced(a), Step::Skipped) => match settle(right) {
                Step::Produced(b) => (a, b),
                Step::Failed(e) => return Err(Failure::new(e, *matched)),
                Step::Exhausted | Step::Skipped => return Ok(false),
            },
            (Step::Skipped, Step::Produced(b)) => match settle(left) {
                Step::Produced(a) => (a, b),
                Step::Failed(e) => return Err(Failure::new(e, *matched)),
                Step::Exhausted | Step::Skipped => return Ok(false),
            },
        };
        if a != b {
            return Ok(false);
        }
        *matched += 1;
    }
}

fn ended<T, E>(settled: Step<T, E>, matched: usize) -> Result<bool, Failure<E>> {
    match settled {
        Step::Exhausted => Ok(true),
        Step::Failed(e) => Err(Failure::new(e, matched)),
        Step::Produced(_) | Step::Skipped => Ok(false),
    }
}

/// Compare two failure-aware sequences element by element.
///
/// Both lifecycles are released, left then right, before the outcome is returned.
pub fn try_same_elements<A, LA, B, LB>(
    left: &mut Seq<A, LA>,
    right: &mut Seq<B, LB>,
) -> Result<bool, Failure<A::Error>>
where
    A: Source,
    B: Source<Error = A::Error>,
    LA: Lifecycle,
    LB: Lifecycle,
    A::Item: PartialEq<B::Item>,
{
    let (mut l, left_lifecycle) = left.drive();
    let (mut r, right_lifecycle) = right.drive();
    let mut matched = 0;
    let outcome = align(&mut l, &mut r, &mut matched);
    end_traversal(left_lifecycle, matched);
    end_traversal(right_lifecycle, matched);
    outcome
}

/// Compare two sequences element by element.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut listed = from_vec(vec![0, 2, 4]);
/// let mut filtered = range(0, 5).filter(|x| x % 2 == 0);
/// assert!(same_elements(&mut listed, &mut filtered));
/// assert!(!same_elements(&mut listed, &mut range(0, 3)));
/// ```
pub fn same_elements<A, LA, B, LB>(left: &mut Seq<A, LA>, right: &mut Seq<B, LB>) -> bool
where
    A: Source<Error = Infallible>,
    B: Source<Error = Infallible>,
    LA: Lifecycle,
    LB: Lifecycle,
    A::Item: PartialEq<B::Item>,
{
    match try_same_elements(left, right) {
        Ok(same) => same,
        Err(failure) => match failure.error {},
    }
}
