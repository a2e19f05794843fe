//! Directed relationship storage for the veto conflict engine.
//!
//! A relationship is an ordered pair `(from, to)` meaning "from points at
//! to". The [`RelationStore`] trait is the full contract the conflict engine
//! consumes; [`GraphStore`] is the default backing structure. Any other
//! structure (hash multimap, sorted edge list) can stand in by implementing
//! the trait.

pub mod graph;
pub mod store;

pub use graph::GraphStore;
pub use store::RelationStore;
