//! # Pullseq: Lazy Pull-Based Sequences
//!
//! Build sequences out of sources and combinators, then drive them with a terminal consumer.
//! Nothing is computed until a consumer pulls.
//!
//! ## Core Types
//!
//! - **[`Step`]**: the outcome of one pull: `Exhausted`, `Skipped`, `Produced(value)` or
//!   `Failed(error)`
//! - **[`Producer`]**: a stateful, single-use puller returning one [`Step`] per call
//! - **[`Source`]**: a factory of fresh producers
//! - **[`Lifecycle`]**: the action run once at the end of every traversal
//! - **[`Seq`]**: the handle pairing a source with a lifecycle
//!
//! ## Key Features
//!
//! - **Pure and failure-aware in one engine**: `Step<T>` has an uninhabited `Failed` arm;
//!   `Step<T, E>` can fail with `E`
//! - **Skip-aware alignment**: `zip` and `same_elements` stay aligned when their inputs
//!   skip, as filtered inputs do
//! - **Resource discipline**: every consumer runs the lifecycle action exactly once, on
//!   exhaustion, failure or early stop
//!
//! ## Example
//!
//! ```
//! use pullseq::prelude::*;
//!
//! let odd = range(0, 20).filter(|x| x % 2 == 1);
//! let tail = from_vec(vec![4, 6, -3, 11, -5]).skip_while(|x| *x > 3);
//! let mut pairs = odd.zip(tail);
//! assert_eq!(pairs.to_vec(), vec![(1, -3), (3, 11), (5, -5)]);
//! ```
//!
//! ## Common Functions
//!
//! **Building Sequences:**
//! - [`range(lo, hi)`](range), [`from_vec(items)`](from_vec), [`single(x)`](single),
//!   [`repeat(x, n)`](repeat), [`empty()`](empty)
//! - [`unfold(seed, step)`](unfold) - replayable state threading
//! - [`unfold_external(step)`](unfold_external), [`from_resource`], [`from_cursor`] -
//!   depleting sources over external state
//!
//! **Consuming:**
//! - [`Seq::to_vec`], [`Seq::fold`], [`Seq::iter`] and friends for pure sequences
//! - [`Seq::try_fold`], [`Seq::try_to_vec`], [`Seq::try_iter`] for failure-aware ones

pub mod build;
pub mod compose;
mod consume;
mod error;
mod iter;
mod lifecycle;
pub mod prelude;
mod producer;
pub mod result;
mod seq;
mod step;

pub use build::*;
pub use compose::*;
pub use consume::AsF64;
pub use error::*;
pub use iter::*;
pub use lifecycle::*;
pub use producer::*;
pub use seq::*;
pub use step::*;
