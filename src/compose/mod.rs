//! Transforming and combining sequences
//!
//! Every combinator here is a struct that is both a [`Source`](crate::Source) over an inner
//! source and a [`Producer`](crate::Producer) over an inner producer. The handle-level entry
//! points live on [`Seq`](crate::Seq).

mod chain;
mod map;
mod window;
mod zip;

// Re-export combinators
pub use chain::{append, cons, Append, Cons};
pub use map::{Choose, Fallible, Filter, Map, MapAccum, TryMap};
pub use window::{Skip, SkipWhile, Slice, Take, TakeWhile};
pub use zip::{same_elements, try_same_elements, zip, zip_with, ZipWith};

pub(crate) use zip::{pair, settle};
