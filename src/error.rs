use thiserror::Error;

/// A failure-aware sequence stopped on [`Step::Failed`](crate::Step::Failed), or a consumer
/// callback returned an error.
///
/// The engine never inspects `error`; it only records where the traversal stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sequence failed after {position} value(s): {error}")]
pub struct Failure<E> {
    /// The caller's error
    pub error: E,
    /// Number of values consumed successfully before the failure
    pub position: usize,
}

impl<E> Failure<E> {
    /// Record `error` reported after `position` successfully consumed values.
    pub fn new(error: E, position: usize) -> Self {
        Failure { error, position }
    }

    /// Discard the position and return the caller's error.
    ///
    /// ```rust
    /// use pullseq::Failure;
    ///
    /// let failure = Failure::new("checksum mismatch", 4);
    /// assert_eq!(failure.into_inner(), "checksum mismatch");
    /// ```
    pub fn into_inner(self) -> E {
        self.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_position() {
        let failure = Failure::new("disk unplugged", 3);
        assert_eq!(failure.to_string(), "sequence failed after 3 value(s): disk unplugged");
        assert_eq!(failure.into_inner(), "disk unplugged");
    }

    #[test]
    fn test_failure_is_a_std_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(Failure::new(String::from("x"), 0));
        assert!(boxed.source().is_none());
    }
}
