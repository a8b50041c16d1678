//! Building sequences from scratch
//!
//! Pure constructors return handles with the [`Inert`](crate::Inert) lifecycle and can be
//! driven any number of times. Constructors over external state return depleting handles.

mod source;
mod unfold;

// Re-export constructors
pub use source::{empty, from_slice, from_vec, range, repeat, single, Container, Empty, Range, Repeat, Single};
pub use unfold::{from_cursor, from_resource, unfold, unfold_external, Cursor, External, Resource, Unfold};
