use std::{convert::Infallible, marker::PhantomData, ops::Add, rc::Rc};

use crate::{lifecycle::Inert, seq::Seq, step::Step, Producer, Source};

/// Immediately exhausted.
pub struct Empty<T, E = Infallible>(PhantomData<fn() -> (T, E)>);

impl<T, E> Empty<T, E> {
    pub fn new() -> Self {
        Empty(PhantomData)
    }
}

impl<T, E> Default for Empty<T, E> {
    fn default() -> Self {
        Empty::new()
    }
}

impl<T, E> Clone for Empty<T, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, E> Copy for Empty<T, E> {}

impl<T, E> std::fmt::Debug for Empty<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Empty")
    }
}

impl<T, E> Producer for Empty<T, E> {
    type Item = T;
    type Error = E;

    fn step(&mut self) -> Step<T, E> {
        Step::Exhausted
    }
}

impl<T, E> Source for Empty<T, E> {
    type Item = T;
    type Error = E;
    type Producer = Self;

    fn producer(&mut self) -> Self {
        *self
    }
}

/// A sequence with no elements.
pub fn empty<T>() -> Seq<Empty<T>> {
    Seq::new(Empty::new(), Inert)
}

/// Produces one value, then ends.
#[derive(Clone, Debug)]
pub struct Single<T>(Option<T>);

impl<T> Producer for Single<T> {
    type Item = T;
    type Error = Infallible;

    fn step(&mut self) -> Step<T> {
        match self.0.take() {
            Some(value) => Step::Produced(value),
            None => Step::Exhausted,
        }
    }
}

impl<T: Clone> Source for Single<T> {
    type Item = T;
    type Error = Infallible;
    type Producer = Self;

    fn producer(&mut self) -> Self {
        self.clone()
    }
}

/// A sequence of exactly one value.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// assert_eq!(single("only").to_vec(), vec!["only"]);
/// ```
pub fn single<T: Clone>(value: T) -> Seq<Single<T>> {
    Seq::new(Single(Some(value)), Inert)
}

/// Counts up from `next` to `end`, exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range<T> {
    next: T,
    end: T,
}

impl<T> Producer for Range<T>
where
    T: Copy + PartialOrd + Add<Output = T> + From<u8>,
{
    type Item = T;
    type Error = Infallible;

    fn step(&mut self) -> Step<T> {
        if self.next < self.end {
            let value = self.next;
            self.next = value + T::from(1);
            Step::Produced(value)
        } else {
            Step::Exhausted
        }
    }
}

impl<T> Source for Range<T>
where
    T: Copy + PartialOrd + Add<Output = T> + From<u8>,
{
    type Item = T;
    type Error = Infallible;
    type Producer = Self;

    fn producer(&mut self) -> Self {
        *self
    }
}

/// The integers `lo, lo + 1, ..., hi - 1`. Empty when `lo >= hi`.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// assert_eq!(range(1, 4).to_vec(), vec![1, 2, 3]);
/// assert!(range(4u64, 1).to_vec().is_empty());
/// ```
pub fn range<T>(lo: T, hi: T) -> Seq<Range<T>>
where
    T: Copy + PartialOrd + Add<Output = T> + From<u8>,
{
    Seq::new(Range { next: lo, end: hi }, Inert)
}

/// Produces the same value a fixed number of times.
#[derive(Clone, Debug)]
pub struct Repeat<T> {
    value: T,
    remaining: usize,
}

impl<T: Clone> Producer for Repeat<T> {
    type Item = T;
    type Error = Infallible;

    fn step(&mut self) -> Step<T> {
        if self.remaining == 0 {
            return Step::Exhausted;
        }
        self.remaining -= 1;
        Step::Produced(self.value.clone())
    }
}

impl<T: Clone> Source for Repeat<T> {
    type Item = T;
    type Error = Infallible;
    type Producer = Self;

    fn producer(&mut self) -> Self {
        self.clone()
    }
}

/// `value`, `n` times.
pub fn repeat<T: Clone>(value: T, n: usize) -> Seq<Repeat<T>> {
    Seq::new(Repeat { value, remaining: n }, Inert)
}

/// Walks a shared container by index.
///
/// Every producer starts over at the position its source was created with; the items
/// themselves are shared, never copied per producer.
#[derive(Debug)]
pub struct Container<T> {
    items: Rc<[T]>,
    index: usize,
}

impl<T> Clone for Container<T> {
    fn clone(&self) -> Self {
        Container {
            items: Rc::clone(&self.items),
            index: self.index,
        }
    }
}

impl<T: Clone> Producer for Container<T> {
    type Item = T;
    type Error = Infallible;

    fn step(&mut self) -> Step<T> {
        match self.items.get(self.index) {
            Some(item) => {
                self.index += 1;
                Step::Produced(item.clone())
            }
            None => Step::Exhausted,
        }
    }
}

impl<T: Clone> Source for Container<T> {
    type Item = T;
    type Error = Infallible;
    type Producer = Self;

    fn producer(&mut self) -> Self {
        self.clone()
    }
}

/// The items of a vector, in order.
///
/// ```rust
/// use pullseq::prelude::*;
///
/// let mut words = from_vec(vec!["a", "b"]);
/// assert_eq!(words.to_vec(), vec!["a", "b"]);
/// assert_eq!(words.count(), 2);
/// ```
pub fn from_vec<T: Clone>(items: Vec<T>) -> Seq<Container<T>> {
    Seq::new(
        Container {
            items: items.into(),
            index: 0,
        },
        Inert,
    )
}

/// The items of a slice, in order. The slice is copied once, up front.
pub fn from_slice<T: Clone>(items: &[T]) -> Seq<Container<T>> {
    Seq::new(
        Container {
            items: items.into(),
            index: 0,
        },
        Inert,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LifecycleKind;

    #[test]
    fn test_empty_and_single() {
        assert!(empty::<u8>().to_vec().is_empty());
        let mut once = single(7);
        assert_eq!(once.to_vec(), vec![7]);
        assert_eq!(once.to_vec(), vec![7]);
    }

    #[test]
    fn test_range_bounds() {
        assert_eq!(range(1, 4).to_vec(), vec![1, 2, 3]);
        assert_eq!(range(-2i64, 1).to_vec(), vec![-2, -1, 0]);
        assert!(range(3, 3).to_vec().is_empty());
        assert!(range(5, 3).to_vec().is_empty());
        assert_eq!(range(0usize, 1000).count(), 1000);
    }

    #[test]
    fn test_repeat_counts() {
        assert_eq!(repeat('x', 3).to_vec(), vec!['x', 'x', 'x']);
        assert!(repeat('x', 0).to_vec().is_empty());
    }

    #[test]
    fn test_container_is_replayable() {
        let mut seq = from_slice(&[3, 1, 2]);
        assert_eq!(seq.kind(), LifecycleKind::Replayable);
        assert_eq!(seq.to_vec(), vec![3, 1, 2]);
        assert_eq!(seq.to_vec(), vec![3, 1, 2]);
    }

    #[test]
    fn test_container_producers_share_items() {
        let (mut source, _) = from_vec(vec![String::from("a"), String::from("b")]).into_parts();
        let mut first = source.producer();
        let mut second = source.producer();
        assert!(Rc::ptr_eq(&first.items, &second.items));
        assert_eq!(first.step(), Step::Produced(String::from("a")));
        assert_eq!(first.step(), Step::Produced(String::from("b")));
        assert_eq!(second.step(), Step::Produced(String::from("a")));
        assert_eq!(first.step(), Step::Exhausted);
    }
}
