//! Foundation types for the GraphiQL workbench.
//!
//! This crate provides the value types shared by the resolver, the explorer
//! bridge and the state coordinator. It has zero external dependencies,
//! making it suitable as a foundation layer.
//!
//! # Type Categories
//!
//! - **Offset types**: [`OffsetRange`], [`CursorSpan`]
//! - **Editor coordinates**: [`Position`], [`LineIndex`]

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{CursorSpan, OffsetRange, Position};
