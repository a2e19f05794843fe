//! The ordered-pair storage contract consumed by the conflict engine.

/// Storage of directed relationships between values of type `T`.
///
/// A store holds ordered pairs `(from, to)`. It makes no judgement about what
/// a pair means: symmetric interpretation, duplicate rejection and self-pair
/// rejection are the caller's job. Enumeration order of neighbors and pairs
/// is unspecified but must be deterministic for a fixed insertion sequence.
pub trait RelationStore<T> {
    /// Insert the ordered pair `(from, to)`.
    fn add(&mut self, from: T, to: T);

    /// True iff the exact ordered pair `(from, to)` is present.
    fn exists(&self, from: &T, to: &T) -> bool;

    /// All `y` such that `(of, y)` is present (out-neighbors).
    fn requirements(&self, of: &T) -> Vec<T>;

    /// All `y` such that `(y, of)` is present (in-neighbors).
    fn dependents(&self, of: &T) -> Vec<T>;

    /// True iff `of` has at least one out-neighbor.
    fn has_requirements(&self, of: &T) -> bool;

    /// True iff `of` has at least one in-neighbor.
    fn has_dependents(&self, of: &T) -> bool;

    /// Delete the exact ordered pair `(from, to)`. Absent pairs are a no-op.
    fn remove(&mut self, from: &T, to: &T);

    /// Delete every pair where `object` appears as either endpoint.
    fn remove_all(&mut self, object: &T);

    /// Snapshot of all stored pairs, in enumeration order.
    fn pairs(&self) -> Vec<(T, T)>;

    /// Delete all pairs.
    fn clear(&mut self);

    /// Number of stored pairs.
    fn len(&self) -> usize;

    /// True iff no pair is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
