//! Symmetric conflict relationships between objects, with optional cascading
//! (transitive) evaluation.
//!
//! A conflict relates two distinct objects that cannot coexist. The engine
//! stores one directed pair per conflict in a [`veto_relations`] store and
//! gives it symmetric meaning; in cascading mode, conflict is additionally
//! treated as transitively closed over the direct-conflict graph.

pub mod engine;
pub mod error;

pub use engine::Conflicts;
pub use error::{ConflictError, ConflictResult};
