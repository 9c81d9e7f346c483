//! Insertion-ordered, id-keyed collections and the reducer that drives
//! their elements.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::cancel::{CancelId, KeySegment};
use super::effect::Effect;
use super::reducer::Reducer;
use super::scope::{CasePath, StatePath};
use super::Action;

/// Element with a stable identity independent of its position.
pub trait Identifiable {
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

/// Ordered collection with O(1) lookup by id. Ids are unique.
#[derive(Clone)]
pub struct IdentifiedVec<T: Identifiable> {
    elements: Vec<T>,
    index: HashMap<T::Id, usize>,
}

impl<T: Identifiable> IdentifiedVec<T> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append an element. Returns `false` (and leaves the collection alone)
    /// if its id is already present.
    pub fn push(&mut self, element: T) -> bool {
        let id = element.id();
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id, self.elements.len());
        self.elements.push(element);
        true
    }

    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let position = self.index.remove(id)?;
        let removed = self.elements.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.index.get(id).map(|&i| &self.elements[i])
    }

    /// Mutable access by id. Callers must not change the element's id.
    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        let position = *self.index.get(id)?;
        self.elements.get_mut(position)
    }

    pub fn get_index(&self, position: usize) -> Option<&T> {
        self.elements.get(position)
    }

    pub fn index_of(&self, id: &T::Id) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = T::Id> + '_ {
        self.elements.iter().map(Identifiable::id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T: Identifiable> Default for IdentifiedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable> FromIterator<T> for IdentifiedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for element in iter {
            collection.push(element);
        }
        collection
    }
}

impl<'a, T: Identifiable> IntoIterator for &'a IdentifiedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Identifiable + PartialEq> PartialEq for IdentifiedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Identifiable + fmt::Debug> fmt::Debug for IdentifiedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.elements).finish()
    }
}

impl<T: Identifiable + Serialize> Serialize for IdentifiedVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.elements.len()))?;
        for element in &self.elements {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

/// Action addressed to one element of an identified collection.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifiedAction<Id, A> {
    pub id: Id,
    pub action: A,
}

impl<Id, A> IdentifiedAction<Id, A> {
    pub fn new(id: Id, action: A) -> Self {
        Self { id, action }
    }
}

impl<Id, A> Action for IdentifiedAction<Id, A>
where
    Id: Clone + fmt::Debug + Send + 'static,
    A: Action,
{
}

/// Runs `element` on the addressed element, then the parent reducer.
///
/// Element effects are namespaced by `(name, id)`. Whenever an element
/// leaves the collection, every effect in its namespace is cancelled and the
/// effect its own action just produced is discarded.
pub struct ForEach<P: Reducer, R: Reducer>
where
    R::State: Identifiable,
{
    parent: P,
    name: &'static str,
    elements: StatePath<P::State, IdentifiedVec<R::State>>,
    action: CasePath<P::Action, IdentifiedAction<<R::State as Identifiable>::Id, R::Action>>,
    element: R,
}

impl<P: Reducer, R: Reducer> ForEach<P, R>
where
    R::State: Identifiable,
{
    pub fn new(
        parent: P,
        name: &'static str,
        elements: StatePath<P::State, IdentifiedVec<R::State>>,
        action: CasePath<P::Action, IdentifiedAction<<R::State as Identifiable>::Id, R::Action>>,
        element: R,
    ) -> Self {
        Self {
            parent,
            name,
            elements,
            action,
            element,
        }
    }

    fn namespace(&self, id: &<R::State as Identifiable>::Id) -> CancelId {
        CancelId::from_segments([KeySegment::Name(self.name), KeySegment::Id(id.to_string())])
    }

    fn ids(&self, state: &mut P::State) -> Vec<<R::State as Identifiable>::Id> {
        self.elements
            .get_mut(state)
            .map(|elements| elements.ids().collect())
            .unwrap_or_default()
    }
}

impl<P: Reducer, R: Reducer> Reducer for ForEach<P, R>
where
    R::State: Identifiable,
{
    type State = P::State;
    type Action = P::Action;

    fn reduce(&self, state: &mut P::State, action: P::Action) -> Effect<P::Action> {
        let before = self.ids(state);

        let mut touched = None;
        let element_effect = match self.action.extract(action.clone()) {
            Some(IdentifiedAction { id, action: child }) => {
                match self.elements.get_mut(state).and_then(|e| e.get_mut(&id)) {
                    Some(element) => {
                        touched = Some(id.clone());
                        let embed = self.action.embed_fn();
                        let tag = id.clone();
                        self.element
                            .reduce(element, child)
                            .map(move |action| embed(IdentifiedAction::new(tag.clone(), action)))
                            .namespaced(KeySegment::Id(id.to_string()))
                            .namespaced(KeySegment::Name(self.name))
                    }
                    None => {
                        tracing::debug!(collection = self.name, id = %id, action = ?child, "no element with this id, ignoring action");
                        Effect::none()
                    }
                }
            }
            None => Effect::none(),
        };

        let parent_effect = self.parent.reduce(state, action);

        let after: HashSet<_> = self.ids(state).into_iter().collect();
        let removed: Vec<_> = before.into_iter().filter(|id| !after.contains(id)).collect();
        let element_effect = match touched {
            Some(id) if removed.contains(&id) => Effect::none(),
            _ => element_effect,
        };
        let teardown = Effect::merge(
            removed
                .iter()
                .map(|id| Effect::cancel_under(self.namespace(id))),
        );

        Effect::merge([teardown, element_effect, parent_effect])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        label: &'static str,
    }

    impl Identifiable for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn rows() -> IdentifiedVec<Row> {
        [
            Row { id: 1, label: "a" },
            Row { id: 2, label: "b" },
            Row { id: 3, label: "c" },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn preserves_insertion_order() {
        let rows = rows();
        assert_eq!(rows.ids().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(rows.get_index(1).map(|r| r.label), Some("b"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut rows = rows();
        assert!(!rows.push(Row { id: 2, label: "dup" }));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.get(&2).map(|r| r.label), Some("b"));
    }

    #[test]
    fn remove_reindexes_followers() {
        let mut rows = rows();
        assert_eq!(rows.remove(&1).map(|r| r.label), Some("a"));
        assert_eq!(rows.index_of(&3), Some(1));
        assert_eq!(rows.get(&3).map(|r| r.label), Some("c"));
        assert!(!rows.contains(&1));
        assert!(rows.remove(&1).is_none());
    }

    #[test]
    fn get_mut_by_id() {
        let mut rows = rows();
        if let Some(row) = rows.get_mut(&2) {
            row.label = "B";
        }
        assert_eq!(rows.get(&2).map(|r| r.label), Some("B"));
    }

    #[test]
    fn serializes_as_sequence() {
        #[derive(serde::Serialize)]
        struct Named {
            id: u8,
        }
        impl Identifiable for Named {
            type Id = u8;
            fn id(&self) -> u8 {
                self.id
            }
        }
        let list: IdentifiedVec<Named> = [Named { id: 4 }, Named { id: 2 }].into_iter().collect();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"id":4},{"id":2}]"#);
    }
}
