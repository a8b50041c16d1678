//! Commonly used imports
//!
//! Use `use pullseq::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Failure, Lifecycle, LifecycleKind, Producer, Seq, Source, Step};

// Lifecycle actions
pub use crate::{Both, Finalize, Inert, Reset, Spent};

// Constructors
pub use crate::build::{
    empty, from_cursor, from_resource, from_slice, from_vec, range, repeat, single, unfold,
    unfold_external,
};

// Raw building blocks
pub use crate::{factory, from_fn};

// Two-input combinators
pub use crate::compose::{append, cons, same_elements, try_same_elements, zip, zip_with};
