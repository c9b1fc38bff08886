use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

use log::trace;
use thiserror::Error;

use crate::editable_binary_heap::{BinaryHeap, HeapIndex};
use crate::mediator::{KeyLocation, Mediator, MediatorIndex};

/// A min-priority queue with decrease-key, addressable by key.
///
/// Lower `TPriority` values are popped first.
/// Priorities are compared only with `<`, so floating point numbers work directly,
/// as long as no `NaN` gets in: incomparable priorities break ordering silently.
///
/// Pushing an existing key never raises its priority: the stored priority is replaced
/// only by a strictly smaller one, otherwise the push is ignored.
///
/// It is logic error if key values changes somehow while in queue.
/// This changes normally possible only through `Cell`, `RefCell`, global state, IO, or unsafe code.
///
/// Order of keys with equal priorities is unspecified.
///
/// # Examples
///
/// ```
/// use indexed_min_heap::IndexedMinHeap;
///
/// let mut heap = IndexedMinHeap::new();
/// assert_eq!(heap.pop(), None);
///
/// heap.push("A".to_string(), 10.0);
/// heap.push("B".to_string(), 5.0);
/// heap.push("C".to_string(), 7.5);
/// assert_eq!(heap.size(), 3);
///
/// // "A" is already queued, so this is decrease-key.
/// heap.push("A".to_string(), 1.0);
/// // And this is ignored: priorities never grow.
/// heap.push("B".to_string(), 100.0);
/// assert_eq!(heap.size(), 3);
///
/// assert_eq!(heap.pop().as_deref(), Some("A"));
/// assert_eq!(heap.pop().as_deref(), Some("B"));
/// assert_eq!(heap.pop().as_deref(), Some("C"));
/// assert_eq!(heap.pop(), None);
/// ```
#[derive(Clone)]
pub struct IndexedMinHeap<TKey = String, TPriority = f64, S = RandomState>
where
    TKey: Hash + Eq,
    TPriority: PartialOrd,
    S: BuildHasher,
{
    heap: BinaryHeap<TPriority>,
    key_to_pos: Mediator<TKey, S>,
}

/// Reasons why [`IndexedMinHeap::decrease_priority`] left the heap untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DecreasePriorityError {
    /// The key is not in the heap.
    #[error("key is not present in the heap")]
    KeyNotFound,
    /// The new priority is equal to or greater than the stored one.
    #[error("new priority is not lower than the stored one")]
    NotDecreased,
}

impl<TKey: Hash + Eq, TPriority: PartialOrd> IndexedMinHeap<TKey, TPriority, RandomState> {
    /// Creates an empty heap
    ///
    /// ### Examples
    ///
    /// ```
    /// use indexed_min_heap::IndexedMinHeap;
    /// let mut heap = IndexedMinHeap::new();
    /// heap.push("Key", 4);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(0, RandomState::default())
    }

    /// Creates an empty heap with allocated memory enough
    /// to keep `capacity` elements without reallocation.
    ///
    /// ### Examples
    ///
    /// ```
    /// use indexed_min_heap::IndexedMinHeap;
    /// let mut heap = IndexedMinHeap::with_capacity(10);
    /// heap.push("Key", 4);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }
}

impl<TKey: Hash + Eq, TPriority: PartialOrd, S: BuildHasher> IndexedMinHeap<TKey, TPriority, S> {
    /// Creates an empty heap with specific Hasher for the key index
    ///
    /// ### Examples
    ///
    /// ```
    /// use indexed_min_heap::IndexedMinHeap;
    /// use std::collections::hash_map::RandomState;
    /// let mut heap = IndexedMinHeap::with_hasher(RandomState::default());
    /// heap.push("Key", 4);
    /// ```
    #[inline]
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates an empty heap with allocated memory enough
    /// to keep `capacity` elements without reallocation.
    /// Also useful when Hasher cannot be defaulted.
    #[inline]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            key_to_pos: Mediator::with_capacity_and_hasher(capacity, hasher),
        }
    }

    /// Reserves space for at least `additional` new elements.
    ///
    /// ### Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.heap.reserve(additional);
        self.key_to_pos.reserve(additional);
    }

    /// Adds new key to heap, or lowers priority of already queued key.
    ///
    /// Existing key keeps its priority if new one is not strictly smaller.
    ///
    /// ### Examples
    ///
    /// ```
    /// use indexed_min_heap::IndexedMinHeap;
    /// let mut heap = IndexedMinHeap::new();
    /// heap.push("First", 5);
    /// heap.push("First", 10);
    /// assert_eq!(heap.peek(), Some((&"First", &5)));
    /// heap.push("First", 1);
    /// assert_eq!(heap.peek(), Some((&"First", &1)));
    /// assert_eq!(heap.len(), 1);
    /// ```
    ///
    /// ### Time complexity
    ///
    /// ***O(log n)*** at most; ***O(1)*** when the priority is ignored.
    pub fn push(&mut self, key: TKey, priority: TPriority) {
        let position = self.heap.len();
        match self.key_to_pos.locate_or_insert(key, position) {
            KeyLocation::Inserted(mediator_index) => {
                // Borrow checker treats borrowing a field as borrowing whole structure
                // so we need to get references to fields to borrow them individually.
                let key_to_pos = &mut self.key_to_pos;
                self.heap.push(mediator_index, priority, |index, heap_idx| {
                    *key_to_pos.get_index_mut(index) = heap_idx
                });
            }
            KeyLocation::Present(heap_idx) => {
                self.decrease_at(heap_idx, priority);
            }
        }
    }

    /// Removes the key with the lowest priority and returns it.
    ///
    /// ### Examples
    ///
    /// ```
    /// use indexed_min_heap::IndexedMinHeap;
    /// let mut heap: IndexedMinHeap<&str, i32> = [("c", 3), ("a", 1), ("b", 2)].into_iter().collect();
    /// assert_eq!(heap.pop(), Some("a"));
    /// assert_eq!(heap.pop(), Some("b"));
    /// assert_eq!(heap.pop(), Some("c"));
    /// assert_eq!(heap.pop(), None);
    /// ```
    ///
    /// ### Time complexity
    ///
    /// Cost of pop is always ***O(log n)***
    #[inline]
    pub fn pop(&mut self) -> Option<TKey> {
        self.pop_entry().map(|(key, _)| key)
    }

    /// Same as [`pop`] but returns priority along with the key.
    ///
    /// ```
    /// use indexed_min_heap::IndexedMinHeap;
    /// let mut heap: IndexedMinHeap<&str, i32> = [("c", 3), ("a", 1)].into_iter().collect();
    /// assert_eq!(heap.pop_entry(), Some(("a", 1)));
    /// ```
    ///
    /// [`pop`]: IndexedMinHeap::pop
    pub fn pop_entry(&mut self) -> Option<(TKey, TPriority)> {
        let key_to_pos = &mut self.key_to_pos;
        let heap = &mut self.heap;

        let (removed_idx, priority) = heap.pop(|index, heap_idx| {
            *key_to_pos.get_index_mut(index) = heap_idx
        })?;

        let (removed_key, _) = key_to_pos.swap_remove_index(removed_idx);
        // Last key took the freed slot, its heap entry must follow.
        if MediatorIndex(key_to_pos.len()) != removed_idx {
            let (_, heap_idx_of_moved) = key_to_pos.get_index(removed_idx);
            heap.change_outer_pos(removed_idx, heap_idx_of_moved);
        }
        trace!("popped heap root, {} entries left", heap.usize_len());

        Some((removed_key, priority))
    }

    /// Get reference to the pair with the lowest priority.
    ///
    /// ```
    /// use indexed_min_heap::IndexedMinHeap;
    /// let heap: IndexedMinHeap<i32, i32> = (0..5).map(|x| (x, x)).collect();
    /// assert_eq!(heap.peek(), Some((&0, &0)));
    /// ```
    ///
    /// ### Time complexity
    ///
    /// Always ***O(1)***
    pub fn peek(&self) -> Option<(&TKey, &TPriority)> {
        let (first_idx, heap_idx) = self.heap.most_prioritized_idx()?;
        let (key, _) = self.key_to_pos.get_index(first_idx);
        let (_, priority) = self
            .heap
            .look_into(heap_idx)
            .expect("Checked using most_prioritized_idx");
        Some((key, priority))
    }

    /// Get reference to the priority by key.
    ///
    /// ```
    /// use indexed_min_heap::IndexedMinHeap;
    /// let mut heap = IndexedMinHeap::new();
    /// heap.push("node".to_string(), 2.5);
    /// assert_eq!(heap.get_priority("node"), Some(&2.5));
    /// assert_eq!(heap.get_priority("other"), None);
    /// ```
    ///
    /// ### Time complexity
    ///
    /// ***O(1)*** in average (limited by hash map key lookup).
    pub fn get_priority<Q>(&self, key: &Q) -> Option<&TPriority>
    where
        TKey: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let heap_idx = self.key_to_pos.get(key)?;
        Some(
            self.heap
                .look_into(heap_idx)
                .expect("Must contain if key_to_pos contain")
                .1,
        )
    }

    /// Returns true if key is queued.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        TKey: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.key_to_pos.contains_key(key)
    }

    /// Lowers priority of queued key and returns the old one.
    ///
    /// Unlike [`push`] this reports why nothing happened.
    ///
    /// ```
    /// use indexed_min_heap::{DecreasePriorityError, IndexedMinHeap};
    /// let mut heap: IndexedMinHeap<&str, i32> = [("a", 5), ("b", 3)].into_iter().collect();
    /// assert_eq!(heap.decrease_priority("a", 1), Ok(5));
    /// assert_eq!(heap.decrease_priority("a", 1), Err(DecreasePriorityError::NotDecreased));
    /// assert_eq!(heap.decrease_priority("z", 0), Err(DecreasePriorityError::KeyNotFound));
    /// assert_eq!(heap.pop(), Some("a"));
    /// ```
    ///
    /// ### Time complexity
    ///
    /// ***O(log n)***
    ///
    /// [`push`]: IndexedMinHeap::push
    pub fn decrease_priority<Q>(
        &mut self,
        key: &Q,
        priority: TPriority,
    ) -> Result<TPriority, DecreasePriorityError>
    where
        TKey: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let heap_idx = self
            .key_to_pos
            .get(key)
            .ok_or(DecreasePriorityError::KeyNotFound)?;
        self.decrease_at(heap_idx, priority)
            .ok_or(DecreasePriorityError::NotDecreased)
    }

    /// Get the number of elements in heap.
    ///
    /// ```
    /// use indexed_min_heap::IndexedMinHeap;
    /// let heap: IndexedMinHeap<i32, i32> = (0..5).map(|x| (x, x)).collect();
    /// assert_eq!(heap.len(), 5);
    /// ```
    ///
    /// ### Time complexity
    ///
    /// Always ***O(1)***
    #[doc(alias = "size")]
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.key_to_pos.len(), self.heap.usize_len());
        self.key_to_pos.len()
    }

    /// Number of queued keys, same as [`len`].
    ///
    /// [`len`]: IndexedMinHeap::len
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns true if heap is empty.
    ///
    /// ```
    /// let mut heap = indexed_min_heap::IndexedMinHeap::new();
    /// assert!(heap.is_empty());
    /// heap.push(0, 5);
    /// assert!(!heap.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.heap.is_empty(), self.key_to_pos.is_empty());
        self.key_to_pos.is_empty()
    }

    /// Make the heap empty.
    ///
    /// ### Time complexity
    ///
    /// Always ***O(n)***
    #[inline]
    pub fn clear(&mut self) {
        self.heap.clear();
        self.key_to_pos.clear();
    }

    // Sifts entry up if priority is strictly lower, returns replaced priority
    fn decrease_at(&mut self, heap_idx: HeapIndex, priority: TPriority) -> Option<TPriority> {
        let key_to_pos = &mut self.key_to_pos;
        let old = self
            .heap
            .decrease_priority(heap_idx, priority, |index, heap_idx| {
                *key_to_pos.get_index_mut(index) = heap_idx
            });
        if old.is_none() {
            trace!(
                "kept stored priority at heap position {}",
                heap_idx.as_usize()
            );
        } else {
            trace!(
                "decreased priority at heap position {}",
                heap_idx.as_usize()
            );
        }
        old
    }
}

impl<TKey: Hash + Eq + Debug, TPriority: PartialOrd + Debug, S: BuildHasher> Debug
    for IndexedMinHeap<TKey, TPriority, S>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.debug_map()
            .entries(
                self.heap
                    .iter()
                    .map(|(index, priority)| (self.key_to_pos.get_index(index).0, priority)),
            )
            .finish()
    }
}

impl<TKey: Hash + Eq, TPriority: PartialOrd, S: BuildHasher + Default> Default
    for IndexedMinHeap<TKey, TPriority, S>
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity_and_hasher(0, S::default())
    }
}

impl<TKey: Hash + Eq, TPriority: PartialOrd, S: BuildHasher + Default>
    FromIterator<(TKey, TPriority)> for IndexedMinHeap<TKey, TPriority, S>
{
    /// Allows building heap from iterator using `collect()`.
    /// Repeated keys keep the lowest priority seen.
    ///
    /// ```
    /// use indexed_min_heap::IndexedMinHeap;
    /// let heap: IndexedMinHeap<&str, i32> = [("a", 3), ("a", 1), ("a", 2)].into_iter().collect();
    /// assert_eq!(heap.len(), 1);
    /// assert_eq!(heap.get_priority("a"), Some(&1));
    /// ```
    fn from_iter<T: IntoIterator<Item = (TKey, TPriority)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let (min_size, _) = iter.size_hint();
        let mut heap = Self::with_capacity_and_hasher(min_size, S::default());
        heap.extend(iter);
        heap
    }
}

impl<TKey: Hash + Eq, TPriority: PartialOrd, S: BuildHasher> Extend<(TKey, TPriority)>
    for IndexedMinHeap<TKey, TPriority, S>
{
    fn extend<T: IntoIterator<Item = (TKey, TPriority)>>(&mut self, iter: T) {
        for (key, priority) in iter {
            self.push(key, priority);
        }
    }
}
