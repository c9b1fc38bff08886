use crate::editable_binary_heap::HeapIndex;
use indexmap::map::{Entry as IMEntry, IndexMap};
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

/// Wrapper around slot number of a key in the position index.
/// Used to avoid mix up with heap index,
/// and to make sure that `Mediator` indexed only with MediatorIndex.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub(crate) struct MediatorIndex(pub(crate) usize);

/// Key to heap position map.
///
/// Keys live here exactly once; heap entries refer to them by `MediatorIndex`.
/// Slots stay dense: removal moves the last key into the freed slot.
#[derive(Clone)]
pub(crate) struct Mediator<TKey: Hash + Eq, S: BuildHasher> {
    map: IndexMap<TKey, HeapIndex, S>,
}

/// Outcome of looking a key up with intent to insert it.
pub(crate) enum KeyLocation {
    /// Key was absent and now occupies a fresh slot.
    Inserted(MediatorIndex),
    /// Key already present at given heap position.
    Present(HeapIndex),
}

#[inline(always)]
fn with_copied_heap_index<'a, T>((k, &i): (&'a T, &HeapIndex)) -> (&'a T, HeapIndex) {
    (k, i)
}

impl<TKey, S> Mediator<TKey, S>
where
    TKey: Hash + Eq,
    S: BuildHasher,
{
    #[inline(always)]
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            map: IndexMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    #[inline(always)]
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional)
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline(always)]
    pub(crate) fn clear(&mut self) {
        self.map.clear()
    }

    /// Single hash lookup for both branches of push.
    /// New keys get `position` recorded; sifting will correct it.
    #[inline(always)]
    pub(crate) fn locate_or_insert(&mut self, key: TKey, position: HeapIndex) -> KeyLocation {
        match self.map.entry(key) {
            IMEntry::Occupied(entry) => KeyLocation::Present(*entry.get()),
            IMEntry::Vacant(entry) => {
                let index = MediatorIndex(entry.index());
                entry.insert(position);
                KeyLocation::Inserted(index)
            }
        }
    }

    #[inline(always)]
    pub(crate) fn get_index(&self, MediatorIndex(position): MediatorIndex) -> (&TKey, HeapIndex) {
        self.map
            .get_index(position)
            .map(with_copied_heap_index)
            .expect("All mediator indexes must be valid")
    }

    #[inline(always)]
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<HeapIndex>
    where
        TKey: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    #[inline(always)]
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        TKey: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Removes key at slot; last key moves into the freed slot.
    #[inline(always)]
    pub(crate) fn swap_remove_index(
        &mut self,
        MediatorIndex(index): MediatorIndex,
    ) -> (TKey, HeapIndex) {
        self.map
            .swap_remove_index(index)
            .expect("All mediator indexes must be valid")
    }

    #[inline(always)]
    pub(crate) fn get_index_mut(&mut self, MediatorIndex(index): MediatorIndex) -> &mut HeapIndex {
        self.map
            .get_index_mut(index)
            .expect("All mediator indexes must be valid")
            .1
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&TKey, HeapIndex)> {
        self.map.iter().map(with_copied_heap_index)
    }
}
