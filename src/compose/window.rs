use crate::{
    producer::{Producer, Source},
    step::Step,
};

/// Ends after a fixed number of produced values.
///
/// Once the budget is spent the input is never invoked again, so `Take` with a budget of
/// zero behaves like a truncated handle.
#[derive(Clone, Debug)]
pub struct Take<S> {
    inner: S,
    remaining: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(inner: S, n: usize) -> Self {
        Take {
            inner,
            remaining: n,
        }
    }
}

impl<P> Producer for Take<P>
where
    P: Producer,
{
    type Item = P::Item;
    type Error = P::Error;

    fn step(&mut self) -> Step<P::Item, P::Error> {
        if self.remaining == 0 {
            return Step::Exhausted;
        }
        let step = self.inner.step();
        match step {
            Step::Produced(_) => self.remaining -= 1,
            Step::Exhausted | Step::Failed(_) => self.remaining = 0,
            Step::Skipped => {}
        }
        step
    }
}

impl<S> Source for Take<S>
where
    S: Source,
{
    type Item = S::Item;
    type Error = S::Error;
    type Producer = Take<S::Producer>;

    fn producer(&mut self) -> Self::Producer {
        Take::new(self.inner.producer(), self.remaining)
    }
}

/// Ends at the first produced value rejected by a predicate.
#[derive(Clone, Debug)]
pub struct TakeWhile<S, P> {
    inner: S,
    pred: P,
    done: bool,
}

impl<S, P> TakeWhile<S, P> {
    pub(crate) fn new(inner: S, pred: P) -> Self {
        TakeWhile {
            inner,
            pred,
            done: false,
        }
    }
}

impl<Q, P> Producer for TakeWhile<Q, P>
where
    Q: Producer,
    P: FnMut(&Q::Item) -> bool,
{
    type Item = Q::Item;
    type Error = Q::Error;

    fn step(&mut self) -> Step<Q::Item, Q::Error> {
        if self.done {
            return Step::Exhausted;
        }
        match self.inner.step() {
            Step::Produced(item) if (self.pred)(&item) => Step::Produced(item),
            Step::Skipped => Step::Skipped,
            // a rejected value abandons the input, it does not pause it
            Step::Produced(_) | Step::Exhausted => {
                self.done = true;
                Step::Exhausted
            }
            Step::Failed(e) => {
                self.done = true;
                Step::Failed(e)
            }
        }
    }
}

impl<S, P> Source for TakeWhile<S, P>
where
    S: Source,
    P: FnMut(&S::Item) -> bool + Clone,
{
    type Item = S::Item;
    type Error = S::Error;
    type Producer = TakeWhile<S::Producer, P>;

    fn producer(&mut self) -> Self::Producer {
        TakeWhile::new(self.inner.producer(), self.pred.clone())
    }
}

/// Reports the first `n` produced values as skips.
#[derive(Clone, Debug)]
pub struct Skip<S> {
    inner: S,
    remaining: usize,
}

impl<S> Skip<S> {
    pub(crate) fn new(inner: S, n: usize) -> Self {
        Skip {
            inner,
            remaining: n,
        }
    }
}

impl<P> Producer for Skip<P>
where
    P: Producer,
{
    type Item = P::Item;
    type Error = P::Error;

    fn step(&mut self) -> Step<P::Item, P::Error> {
        match self.inner.step() {
            Step::Produced(_) if self.remaining > 0 => {
                self.remaining -= 1;
                Step::Skipped
            }
            step => step,
        }
    }
}

impl<S> Source for Skip<S>
where
    S: Source,
{
    type Item = S::Item;
    type Error = S::Error;
    type Producer = Skip<S::Producer>;

    fn producer(&mut self) -> Self::Producer {
        Skip::new(self.inner.producer(), self.remaining)
    }
}

/// Reports produced values as skips until the predicate first rejects one.
#[derive(Clone, Debug)]
pub struct SkipWhile<S, P> {
    inner: S,
    pred: P,
    skipping: bool,
}

impl<S, P> SkipWhile<S, P> {
    pub(crate) fn new(inner: S, pred: P) -> Self {
        SkipWhile {
            inner,
            pred,
            skipping: true,
        }
    }
}

impl<Q, P> Producer for SkipWhile<Q, P>
where
    Q: Producer,
    P: FnMut(&Q::Item) -> bool,
{
    type Item = Q::Item;
    type Error = Q::Error;

    fn step(&mut self) -> Step<Q::Item, Q::Error> {
        match self.inner.step() {
            Step::Produced(item) if self.skipping => {
                if (self.pred)(&item) {
                    Step::Skipped
                } else {
                    self.skipping = false;
                    Step::Produced(item)
                }
            }
            step => step,
        }
    }
}

impl<S, P> Source for SkipWhile<S, P>
where
    S: Source,
    P: FnMut(&S::Item) -> bool + Clone,
{
    type Item = S::Item;
    type Error = S::Error;
    type Producer = SkipWhile<S::Producer, P>;

    fn producer(&mut self) -> Self::Producer {
        SkipWhile::new(self.inner.producer(), self.pred.clone())
    }
}

/// Keeps the produced values whose position falls in `start..end`.
///
/// Positions count produced values only. Values before `start` are reported as skips; once
/// the position reaches `end` the input is abandoned.
#[derive(Clone, Debug)]
pub struct Slice<S> {
    inner: S,
    position: usize,
    start: usize,
    end: usize,
}

impl<S> Slice<S> {
    pub(crate) fn new(inner: S, start: usize, end: usize) -> Self {
        Slice {
            inner,
            position: 0,
            start,
            end,
        }
    }
}

impl<P> Producer for Slice<P>
where
    P: Producer,
{
    type Item = P::Item;
    type Error = P::Error;

    fn step(&mut self) -> Step<P::Item, P::Error> {
        if self.start >= self.end || self.position >= self.end {
            return Step::Exhausted;
        }
        match self.inner.step() {
            Step::Produced(item) => {
                let position = self.position;
                self.position += 1;
                if position < self.start {
                    Step::Skipped
                } else {
                    Step::Produced(item)
                }
            }
            step => step,
        }
    }
}

impl<S> Source for Slice<S>
where
    S: Source,
{
    type Item = S::Item;
    type Error = S::Error;
    type Producer = Slice<S::Producer>;

    fn producer(&mut self) -> Self::Producer {
        Slice::new(self.inner.producer(), self.start, self.end)
    }
}
