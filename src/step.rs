use std::convert::Infallible;

/// Outcome of a single producer invocation.
///
/// `Step` is the vocabulary every producer and combinator speaks. A producer returns
/// exactly one `Step` per call to [`Producer::step`](crate::Producer::step):
///
/// - [`Step::Exhausted`]: nothing more will ever come from this producer.
/// - [`Step::Skipped`]: no value this time, but the producer is not finished.
/// - [`Step::Produced`]: a value is available.
/// - [`Step::Failed`]: the producer hit an error and must not be invoked again.
///
/// The error parameter defaults to [`Infallible`], which makes `Failed` uninhabited.
/// `Step<T>` is therefore the pure outcome and `Step<T, E>` the failure-aware one.
///
/// # Examples
///
/// ```rust
/// use pullseq::Step;
///
/// let step: Step<i32> = Step::Produced(21);
/// assert_eq!(step.map(|x| x * 2), Step::Produced(42));
///
/// let idle: Step<i32> = Step::Skipped;
/// assert!(!idle.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step<T, E = Infallible> {
    /// The producer is finished
    Exhausted,
    /// No value this invocation; ask again
    Skipped,
    /// A value is available
    Produced(T),
    /// The producer failed and is terminated
    Failed(E),
}

impl<T, E> Step<T, E> {
    /// Returns `true` if the step is `Exhausted`.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Step::Exhausted)
    }

    /// Returns `true` if the step is `Skipped`.
    #[inline]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Step::Skipped)
    }

    /// Returns `true` if the step is `Produced`.
    #[inline]
    pub const fn is_produced(&self) -> bool {
        matches!(self, Step::Produced(_))
    }

    /// Returns `true` if the step is `Failed`.
    #[inline]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Step::Failed(_))
    }

    /// Returns `true` if the producer that returned this step must not be invoked again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullseq::Step;
    ///
    /// assert!(Step::<i32, &str>::Exhausted.is_terminal());
    /// assert!(Step::<i32, &str>::Failed("boom").is_terminal());
    /// assert!(!Step::<i32, &str>::Skipped.is_terminal());
    /// ```
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Step::Exhausted | Step::Failed(_))
    }

    /// Converts from `Step<T, E>` to `Option<T>`, discarding every other outcome.
    #[inline]
    pub fn produced(self) -> Option<T> {
        match self {
            Step::Produced(t) => Some(t),
            _ => None,
        }
    }

    /// Converts from `Step<T, E>` to `Option<E>`, discarding every other outcome.
    #[inline]
    pub fn failed(self) -> Option<E> {
        match self {
            Step::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Maps a `Step<T, E>` to `Step<U, E>` by applying a function to a produced value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullseq::Step;
    ///
    /// let x: Step<i32> = Step::Produced(3);
    /// assert_eq!(x.map(|v| v + 1), Step::Produced(4));
    ///
    /// let y: Step<i32> = Step::Skipped;
    /// assert_eq!(y.map(|v| v + 1), Step::Skipped);
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Step<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Step::Exhausted => Step::Exhausted,
            Step::Skipped => Step::Skipped,
            Step::Produced(t) => Step::Produced(f(t)),
            Step::Failed(e) => Step::Failed(e),
        }
    }

    /// Maps a `Step<T, E>` to `Step<T, E2>` by applying a function to the error.
    #[inline]
    pub fn map_failed<E2, F>(self, f: F) -> Step<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Step::Exhausted => Step::Exhausted,
            Step::Skipped => Step::Skipped,
            Step::Produced(t) => Step::Produced(t),
            Step::Failed(e) => Step::Failed(f(e)),
        }
    }

    /// Replaces a produced value rejected by `pred` with `Skipped`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullseq::Step;
    ///
    /// let even: Step<i32> = Step::Produced(4);
    /// let odd: Step<i32> = Step::Produced(5);
    /// assert_eq!(even.filter(|x| x % 2 == 0), Step::Produced(4));
    /// assert_eq!(odd.filter(|x| x % 2 == 0), Step::Skipped);
    /// ```
    #[inline]
    pub fn filter<P>(self, pred: P) -> Step<T, E>
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Step::Produced(t) if !pred(&t) => Step::Skipped,
            other => other,
        }
    }

    /// Converts from `&Step<T, E>` to `Step<&T, &E>`.
    #[inline]
    pub const fn as_ref(&self) -> Step<&T, &E> {
        match self {
            Step::Exhausted => Step::Exhausted,
            Step::Skipped => Step::Skipped,
            Step::Produced(t) => Step::Produced(t),
            Step::Failed(e) => Step::Failed(e),
        }
    }

    /// Converts from `&mut Step<T, E>` to `Step<&mut T, &mut E>`.
    #[inline]
    pub fn as_mut(&mut self) -> Step<&mut T, &mut E> {
        match self {
            Step::Exhausted => Step::Exhausted,
            Step::Skipped => Step::Skipped,
            Step::Produced(t) => Step::Produced(t),
            Step::Failed(e) => Step::Failed(e),
        }
    }

    /// Returns the produced value, consuming the `self` value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the step is not `Produced`.
    #[inline]
    pub fn expect_produced(self, msg: &str) -> T {
        match self {
            Step::Produced(t) => t,
            _ => panic!("{}", msg),
        }
    }

    /// Returns the produced value, consuming the `self` value.
    ///
    /// # Panics
    ///
    /// Panics if the step is not `Produced`.
    #[inline]
    pub fn unwrap_produced(self) -> T {
        match self {
            Step::Produced(t) => t,
            _ => panic!("called `Step::unwrap_produced()` on a step without a value"),
        }
    }
}

impl<T> Step<T, Infallible> {
    /// Lifts a pure step into the failure-aware vocabulary.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pullseq::Step;
    ///
    /// let pure: Step<i32> = Step::Produced(1);
    /// let lifted: Step<i32, String> = pure.widen();
    /// assert_eq!(lifted, Step::Produced(1));
    /// ```
    #[inline]
    pub fn widen<E>(self) -> Step<T, E> {
        match self {
            Step::Exhausted => Step::Exhausted,
            Step::Skipped => Step::Skipped,
            Step::Produced(t) => Step::Produced(t),
            Step::Failed(never) => match never {},
        }
    }
}

/// `None` is a skip, not an end: the producer may still yield later.
impl<T, E> From<Option<T>> for Step<T, E> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(t) => Step::Produced(t),
            None => Step::Skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let exhausted: Step<i32, &str> = Step::Exhausted;
        let skipped: Step<i32, &str> = Step::Skipped;
        let produced: Step<i32, &str> = Step::Produced(1);
        let failed: Step<i32, &str> = Step::Failed("bad");

        assert!(exhausted.is_exhausted() && exhausted.is_terminal());
        assert!(skipped.is_skipped() && !skipped.is_terminal());
        assert!(produced.is_produced() && !produced.is_terminal());
        assert!(failed.is_failed() && failed.is_terminal());
    }

    #[test]
    fn test_produced_and_failed_extractors() {
        let produced: Step<i32, &str> = Step::Produced(7);
        let failed: Step<i32, &str> = Step::Failed("bad");

        assert_eq!(produced.produced(), Some(7));
        assert_eq!(produced.failed(), None);
        assert_eq!(failed.produced(), None);
        assert_eq!(failed.failed(), Some("bad"));
        assert_eq!(Step::<i32, &str>::Skipped.produced(), None);
    }

    #[test]
    fn test_map_preserves_outcome_kind() {
        assert_eq!(Step::<i32>::Exhausted.map(|x| x * 2), Step::Exhausted);
        assert_eq!(Step::<i32>::Skipped.map(|x| x * 2), Step::Skipped);
        assert_eq!(Step::<i32>::Produced(4).map(|x| x * 2), Step::Produced(8));

        let failed: Step<i32, &str> = Step::Failed("bad");
        assert_eq!(failed.map(|x| x * 2), Step::Failed("bad"));
        assert_eq!(failed.map_failed(str::len), Step::Failed(3));
    }

    #[test]
    fn test_filter_only_touches_produced() {
        assert_eq!(Step::<i32>::Produced(3).filter(|x| *x > 5), Step::Skipped);
        assert_eq!(Step::<i32>::Produced(9).filter(|x| *x > 5), Step::Produced(9));
        assert_eq!(Step::<i32>::Exhausted.filter(|_| false), Step::Exhausted);
    }

    #[test]
    fn test_as_mut() {
        let mut step: Step<i32> = Step::Produced(1);
        if let Step::Produced(v) = step.as_mut() {
            *v = 10;
        }
        assert_eq!(step, Step::Produced(10));
        assert_eq!(step.as_ref(), Step::Produced(&10));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Step::<i32>::from(Some(2)), Step::Produced(2));
        assert_eq!(Step::<i32>::from(None), Step::Skipped);
    }

    #[test]
    fn test_widen() {
        let lifted: Step<i32, String> = Step::<i32>::Skipped.widen();
        assert_eq!(lifted, Step::Skipped);
    }

    #[test]
    #[should_panic(expected = "called `Step::unwrap_produced()` on a step without a value")]
    fn test_unwrap_produced_panics() {
        Step::<i32>::Exhausted.unwrap_produced();
    }

    #[test]
    #[should_panic(expected = "needs a value")]
    fn test_expect_produced_panics() {
        Step::<i32>::Skipped.expect_produced("needs a value");
    }
}
