//! Data model for filter composition.
//!
//! Everything here is plain data with value semantics: groups and their
//! constraints, the three selection dimensions, the host context, the field
//! catalogue, and the emitted [`Criteria`]. Filter maps are `BTreeMap`s so two
//! drafts with the same content compare and hash identically regardless of
//! the order in which entries were added.

mod catalogue;
mod context;
mod criteria;
mod dimension;
mod group;
mod numeric;

pub use catalogue::*;
pub use context::*;
pub use criteria::*;
pub use dimension::*;
pub use group::*;
pub use numeric::*;
