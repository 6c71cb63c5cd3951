//! Grid occupancy model.
//!
//! ## Error Handling
//!
//! Mutations that could break the occupancy invariants return
//! `PlacementResult<T>`. Lookups of unknown ids are not errors; they return
//! `None` or `false`.

mod error;
mod model;
mod sizing;

pub use error::*;
pub use model::*;
pub use sizing::*;
