//! The conflict engine: insertion invariants, symmetric queries, and the
//! cascading reachability search.

use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;

use veto_relations::{GraphStore, RelationStore};

use crate::error::{ConflictError, ConflictResult};

/// A container of symmetric conflict relationships between objects.
///
/// Each conflict relates two distinct objects; duplicates are rejected. In
/// cascading mode, conflict is treated as transitively closed: if A conflicts
/// with B and B conflicts with C, then A conflicts with C. The mode is fixed
/// at construction — changing it afterwards would silently invalidate pairs
/// admitted under the other semantics.
///
/// One ordered pair per conflict is kept in a [`RelationStore`]; the stored
/// direction carries no meaning to callers.
pub struct Conflicts<T, S = GraphStore<T>> {
    store: S,
    cascading: bool,
    _object: PhantomData<T>,
}

impl<T: Eq + Hash + Clone> Conflicts<T> {
    /// An empty engine over the default [`GraphStore`].
    pub fn new(cascading: bool) -> Self {
        Self::with_store(GraphStore::new(), cascading)
    }
}

impl<T, S> Conflicts<T, S>
where
    T: Eq + Hash + Clone,
    S: RelationStore<T>,
{
    /// An empty engine over a caller-supplied store.
    ///
    /// The store is emptied first: an engine always starts without conflicts,
    /// and pre-existing pairs could violate the insertion invariants.
    pub fn with_store(mut store: S, cascading: bool) -> Self {
        store.clear();
        Self {
            store,
            cascading,
            _object: PhantomData,
        }
    }

    /// Whether transitive (cascading) evaluation is on.
    pub fn cascading(&self) -> bool {
        self.cascading
    }

    /// Number of direct conflicts.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True iff no conflict has been recorded.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Remove every conflict.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Record a conflict between two distinct objects.
    ///
    /// Fails with [`ConflictError::SelfConflict`] if the objects are equal,
    /// and with [`ConflictError::DuplicateConflict`] if they are already in
    /// conflict under the current mode — in cascading mode that also rejects
    /// pairs already implied transitively.
    pub fn add(&mut self, object1: T, object2: T) -> ConflictResult<()> {
        if object1 == object2 {
            return Err(ConflictError::SelfConflict);
        }
        if self.in_conflict(&object1, &object2) {
            return Err(ConflictError::DuplicateConflict);
        }
        self.store.add(object1, object2);
        tracing::debug!("conflict recorded ({} total)", self.store.len());
        Ok(())
    }

    /// Remove the direct conflict between two objects, whichever direction
    /// it was stored in. Fails with [`ConflictError::ConflictNotFound`] if no
    /// direct conflict exists between them.
    ///
    /// Cascading consequences are not validated: dropping a direct conflict
    /// may flip previously-true transitive queries, which is expected.
    pub fn remove(&mut self, object1: &T, object2: &T) -> ConflictResult<()> {
        let mut found = false;
        if self.store.exists(object1, object2) {
            self.store.remove(object1, object2);
            found = true;
        }
        if self.store.exists(object2, object1) {
            self.store.remove(object2, object1);
            found = true;
        }
        if !found {
            return Err(ConflictError::ConflictNotFound);
        }
        tracing::debug!("conflict removed ({} total)", self.store.len());
        Ok(())
    }

    /// Remove every direct conflict involving `object`. Fails with
    /// [`ConflictError::ConflictNotFound`] if the object has none.
    pub fn remove_all(&mut self, object: &T) -> ConflictResult<()> {
        if !self.has_conflict(object) {
            return Err(ConflictError::ConflictNotFound);
        }
        self.store.remove_all(object);
        tracing::debug!("object conflicts removed ({} total)", self.store.len());
        Ok(())
    }

    /// True iff `object` participates in at least one direct conflict.
    pub fn has_conflict(&self, object: &T) -> bool {
        self.store.has_requirements(object) || self.store.has_dependents(object)
    }

    /// True iff the two objects are in conflict.
    ///
    /// A direct conflict in either stored direction always counts. In
    /// cascading mode a connecting chain of direct conflicts also counts,
    /// found by a depth-first reachability search with a visited set, so the
    /// query terminates on any finite graph.
    pub fn in_conflict(&self, object1: &T, object2: &T) -> bool {
        if self.store.exists(object1, object2) || self.store.exists(object2, object1) {
            return true;
        }
        if !self.cascading {
            return false;
        }
        // The search expands both stored directions at every step, so
        // reachability is symmetric and one seed suffices.
        let mut visited: HashSet<T> = HashSet::new();
        visited.insert(object1.clone());
        let mut stack = self.conflicts(object1);
        while let Some(current) = stack.pop() {
            if &current == object2 {
                return true;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            stack.extend(self.conflicts(&current));
        }
        false
    }

    /// Objects in direct conflict with `object`: out-neighbors of the stored
    /// pairs first, then in-neighbors, in store enumeration order.
    pub fn conflicts(&self, object: &T) -> Vec<T> {
        let mut result = self.store.requirements(object);
        result.extend(self.store.dependents(object));
        result
    }

    /// Objects in conflict with `object`, expanded transitively when
    /// cascading is on (otherwise identical to [`Conflicts::conflicts`]).
    ///
    /// Each reachable object appears exactly once, in depth-first
    /// first-visit order; `object` itself is never included.
    pub fn all_conflicts(&self, object: &T) -> Vec<T> {
        if !self.cascading {
            return self.conflicts(object);
        }
        let mut visited = HashSet::new();
        visited.insert(object.clone());
        let mut result = Vec::new();
        self.expand(object, &mut visited, &mut result);
        result
    }

    fn expand(&self, object: &T, visited: &mut HashSet<T>, out: &mut Vec<T>) {
        for neighbor in self.conflicts(object) {
            if visited.insert(neighbor.clone()) {
                out.push(neighbor.clone());
                self.expand(&neighbor, visited, out);
            }
        }
    }

    /// All direct conflicts as stored pairs. The pair direction is an
    /// implementation detail; feeding the snapshot back through
    /// [`Conflicts::set`] reproduces the same conflict set.
    pub fn pairs(&self) -> Vec<(T, T)> {
        self.store.pairs()
    }

    /// Replace all conflicts with the given pairs. Equivalent to [`clear`]
    /// followed by [`merge`], with the same failure behavior as `merge`.
    ///
    /// [`clear`]: Conflicts::clear
    /// [`merge`]: Conflicts::merge
    pub fn set<I>(&mut self, pairs: I) -> ConflictResult<()>
    where
        I: IntoIterator<Item = (T, T)>,
    {
        self.clear();
        self.merge(pairs)
    }

    /// Record every pair via [`Conflicts::add`], in input order.
    ///
    /// Not atomic: the first failing pair aborts the merge and the engine
    /// keeps everything added before it.
    pub fn merge<I>(&mut self, pairs: I) -> ConflictResult<()>
    where
        I: IntoIterator<Item = (T, T)>,
    {
        for (object1, object2) in pairs {
            self.add(object1, object2)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let engine: Conflicts<&str> = Conflicts::new(false);
        assert!(engine.is_empty());
        assert_eq!(engine.len(), 0);
        assert!(!engine.cascading());
        assert!(Conflicts::<&str>::new(true).cascading());
    }

    #[test]
    fn add_rejects_self_conflict() {
        let mut engine = Conflicts::new(false);
        assert_eq!(engine.add("a", "a"), Err(ConflictError::SelfConflict));
        assert!(engine.is_empty());
    }

    #[test]
    fn add_rejects_duplicates_in_both_directions() {
        let mut engine = Conflicts::new(false);
        engine.add("a", "b").unwrap();
        assert_eq!(engine.add("a", "b"), Err(ConflictError::DuplicateConflict));
        assert_eq!(engine.add("b", "a"), Err(ConflictError::DuplicateConflict));
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn cascading_add_rejects_implied_pairs() {
        let mut engine = Conflicts::new(true);
        engine.add("a", "b").unwrap();
        engine.add("b", "c").unwrap();
        assert_eq!(engine.add("c", "a"), Err(ConflictError::DuplicateConflict));
    }

    #[test]
    fn non_cascading_add_allows_closing_a_cycle() {
        let mut engine = Conflicts::new(false);
        engine.add("a", "b").unwrap();
        engine.add("b", "c").unwrap();
        engine.add("c", "a").unwrap();
        assert_eq!(engine.len(), 3);
    }

    #[test]
    fn conflict_is_symmetric() {
        let mut engine = Conflicts::new(false);
        engine.add("a", "b").unwrap();
        assert!(engine.in_conflict(&"a", &"b"));
        assert!(engine.in_conflict(&"b", &"a"));
        assert!(engine.conflicts(&"a").contains(&"b"));
        assert!(engine.conflicts(&"b").contains(&"a"));
    }

    #[test]
    fn remove_works_against_either_direction() {
        let mut engine = Conflicts::new(false);
        engine.add("a", "b").unwrap();
        // The pair was stored as (a, b); remove with the arguments flipped.
        engine.remove(&"b", &"a").unwrap();
        assert!(engine.is_empty());
        assert!(!engine.in_conflict(&"a", &"b"));
    }

    #[test]
    fn remove_unknown_pair_fails() {
        let mut engine = Conflicts::new(false);
        engine.add("a", "b").unwrap();
        assert_eq!(
            engine.remove(&"a", &"c"),
            Err(ConflictError::ConflictNotFound)
        );
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn remove_all_requires_a_participant() {
        let mut engine = Conflicts::new(false);
        engine.add("a", "b").unwrap();
        assert_eq!(
            engine.remove_all(&"ghost"),
            Err(ConflictError::ConflictNotFound)
        );
        engine.remove_all(&"a").unwrap();
        assert!(engine.is_empty());
        assert!(!engine.has_conflict(&"b"));
    }

    #[test]
    fn in_conflict_respects_mode() {
        let mut direct = Conflicts::new(false);
        let mut transitive = Conflicts::new(true);
        for engine in [&mut direct, &mut transitive] {
            engine.add("a", "b").unwrap();
            engine.add("b", "c").unwrap();
        }
        assert!(!direct.in_conflict(&"a", &"c"));
        assert!(transitive.in_conflict(&"a", &"c"));
        assert!(transitive.in_conflict(&"c", &"a"));
        assert!(!transitive.in_conflict(&"a", &"ghost"));
    }

    #[test]
    fn all_conflicts_expands_only_when_cascading() {
        let mut direct = Conflicts::new(false);
        let mut transitive = Conflicts::new(true);
        for engine in [&mut direct, &mut transitive] {
            engine.add("a", "b").unwrap();
            engine.add("b", "c").unwrap();
            engine.add("d", "c").unwrap();
        }

        assert_eq!(direct.all_conflicts(&"a"), vec!["b"]);

        let reach = transitive.all_conflicts(&"a");
        assert_eq!(reach.len(), 3);
        for other in ["b", "c", "d"] {
            assert!(reach.contains(&other));
        }
        // No duplicates and no self-entry.
        assert!(!reach.contains(&"a"));
    }

    #[test]
    fn all_conflicts_terminates_on_cycles() {
        // Cycles can only exist in non-cascading engines (cascading rejects
        // the closing edge), where queries stay direct-only; the transitive
        // search still has to survive a cyclic store via in_conflict.
        let mut engine = Conflicts::new(false);
        engine.add("a", "b").unwrap();
        engine.add("b", "c").unwrap();
        engine.add("c", "a").unwrap();
        assert_eq!(engine.all_conflicts(&"a").len(), 2);
        assert!(engine.in_conflict(&"a", &"c"));
    }

    #[test]
    fn merge_is_not_atomic() {
        let mut engine = Conflicts::new(false);
        let result = engine.merge([("a", "b"), ("c", "c"), ("d", "e")]);
        assert_eq!(result, Err(ConflictError::SelfConflict));
        // The pair before the failure stays applied; the one after is never
        // attempted.
        assert_eq!(engine.len(), 1);
        assert!(engine.in_conflict(&"a", &"b"));
        assert!(!engine.in_conflict(&"d", &"e"));
    }

    #[test]
    fn set_replaces_existing_conflicts() {
        let mut engine = Conflicts::new(false);
        engine.add("old1", "old2").unwrap();
        engine.set([("a", "b"), ("c", "d")]).unwrap();
        assert_eq!(engine.len(), 2);
        assert!(!engine.in_conflict(&"old1", &"old2"));
        assert!(engine.in_conflict(&"a", &"b"));
        assert!(engine.in_conflict(&"c", &"d"));
    }

    #[test]
    fn pairs_round_trip() {
        let mut engine = Conflicts::new(false);
        engine.add("a", "b").unwrap();
        engine.add("c", "d").unwrap();

        let mut replica = Conflicts::new(false);
        replica.set(engine.pairs()).unwrap();

        let mut original = engine.pairs();
        let mut copied = replica.pairs();
        original.sort();
        copied.sort();
        assert_eq!(original, copied);
    }

    #[test]
    fn with_store_empties_the_injected_store() {
        let mut seeded = GraphStore::new();
        seeded.add("x", "x");
        let engine: Conflicts<&str> = Conflicts::with_store(seeded, true);
        assert!(engine.is_empty());
    }
}
