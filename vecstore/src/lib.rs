//! Exact nearest-neighbour search over dense `f32` vectors.
//!
//! [`FlatIndex`] stores vectors contiguously in insertion order and answers
//! queries by brute-force squared Euclidean distance. Vectors are addressed
//! by their position, so callers that keep a parallel table (labels, ids)
//! can rely on position `i` always meaning the `i`-th vector added.
//!
//! [`save`] and [`load`] serialize an index to a little-endian binary
//! format; see [`flat_io`] for the layout.

pub mod error;
pub mod flat;
pub mod flat_io;
pub mod l2;

pub use error::VecError;
pub use flat::{FlatIndex, Match};
pub use flat_io::{load, save};
pub use l2::{l2_norm, l2_squared};
