//! Terminal consumers of failure-aware sequences.
//!
//! A sequence whose error type is inhabited may report [`Step::Failed`]. The consumers here
//! stop at the first failure, either from the sequence itself or from the callback, run the
//! lifecycle action, and then return the error wrapped in a [`Failure`] that records how many
//! values were consumed successfully. The failed producer is never invoked again.
//!
//! # Examples
//!
//! ```
//! use pullseq::prelude::*;
//!
//! let mut readings = from_vec(vec![12, 15, -1, 14]).fallible::<String>();
//! let total = readings.try_fold(0, |sum, x| {
//!     if x < 0 { Err(format!("bad reading {x}")) } else { Ok(sum + x) }
//! });
//! let failure = total.unwrap_err();
//! assert_eq!(failure.position, 2);
//! assert_eq!(failure.into_inner(), "bad reading -1");
//! ```

use tracing::debug;

use crate::{
    compose::settle,
    error::Failure,
    lifecycle::{end_traversal, Lifecycle, Spent},
    producer::{Producer, Source},
    seq::Seq,
    step::Step,
};

/// The remainder of a sequence after [`Seq::view`] or [`Seq::try_view`].
///
/// Hands the advanced producer to the first traversal; later traversals find it empty.
#[derive(Debug)]
pub struct Resume<P>(Option<P>);

impl<P> Source for Resume<P>
where
    P: Producer,
{
    type Item = P::Item;
    type Error = P::Error;
    type Producer = Option<P>;

    fn producer(&mut self) -> Option<P> {
        self.0.take()
    }
}

impl<S, L> Seq<S, L>
where
    S: Source,
    L: Lifecycle,
{
    /// Fold with a fallible function, stopping at the first error of either the sequence
    /// or `f`.
    pub fn try_fold<A, F>(&mut self, init: A, mut f: F) -> Result<A, Failure<S::Error>>
    where
        F: FnMut(A, S::Item) -> Result<A, S::Error>,
    {
        let mut acc = init;
        for (index, item) in self.try_iter().enumerate() {
            acc = f(acc, item?).map_err(|error| {
                debug!(position = index, "fold callback failed");
                Failure::new(error, index)
            })?;
        }
        Ok(acc)
    }

    /// Collect the values, or the first failure.
    pub fn try_to_vec(&mut self) -> Result<Vec<S::Item>, Failure<S::Error>> {
        self.try_iter().collect()
    }

    pub fn try_for_each<F>(&mut self, mut f: F) -> Result<(), Failure<S::Error>>
    where
        F: FnMut(S::Item) -> Result<(), S::Error>,
    {
        self.try_fold((), |(), item| f(item))
    }

    /// Map every value with a fallible function and collect the results, stopping at the
    /// first error.
    ///
    /// ```
    /// use pullseq::prelude::*;
    ///
    /// let mut words = from_vec(vec!["7", "8", "nine"]).fallible();
    /// let parsed = words.collect_until_failure(|s| s.parse::<u8>());
    /// assert_eq!(parsed.unwrap_err().position, 2);
    /// ```
    pub fn collect_until_failure<B, F>(&mut self, mut f: F) -> Result<Vec<B>, Failure<S::Error>>
    where
        F: FnMut(S::Item) -> Result<B, S::Error>,
    {
        self.try_fold(Vec::new(), |mut out, item| {
            out.push(f(item)?);
            Ok(out)
        })
    }

    /// Split off the first value of a failure-aware sequence.
    ///
    /// The lifecycle action runs here when the sequence turns out empty or fails before its
    /// first value; otherwise the returned handle owes it. That handle is always depleting.
    #[allow(clippy::type_complexity)]
    pub fn try_view(
        self,
    ) -> Result<Option<(S::Item, Seq<Resume<S::Producer>, Spent<L>>)>, Failure<S::Error>> {
        let (mut source, mut lifecycle) = self.into_parts();
        let mut producer = source.producer();
        match settle(&mut producer) {
            Step::Produced(head) => {
                let rest = Seq::new(Resume(Some(producer)), Spent(lifecycle));
                Ok(Some((head, rest)))
            }
            Step::Failed(error) => {
                debug!("sequence failed before its first value");
                end_traversal(&mut lifecycle, 0);
                Err(Failure::new(error, 0))
            }
            Step::Exhausted | Step::Skipped => {
                end_traversal(&mut lifecycle, 0);
                Ok(None)
            }
        }
    }

    /// Compare with another failure-aware sequence element by element.
    pub fn try_same_elements<R, M>(&mut self, other: &mut Seq<R, M>) -> Result<bool, Failure<S::Error>>
    where
        R: Source<Error = S::Error>,
        M: Lifecycle,
        S::Item: PartialEq<R::Item>,
    {
        crate::compose::try_same_elements(self, other)
    }
}
