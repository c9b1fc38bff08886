use std::fmt::Debug;
use std::vec::Vec;

use crate::mediator::MediatorIndex;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub(crate) struct HeapIndex(usize);

impl HeapIndex {
    #[cfg(test)]
    #[inline(always)]
    pub(crate) fn new(v: usize) -> Self {
        Self(v)
    }

    #[inline(always)]
    pub(crate) fn as_usize(self) -> usize {
        self.0
    }
}

pub(crate) struct HeapEntry<TPriority> {
    outer_pos: MediatorIndex,
    priority: TPriority,
}

/// Min-ordered binary heap over positions of an outer key storage.
///
/// Every time an entry lands on a new position the change handler receives
/// the entry's outer position and its new heap index.
/// Entries that did not move are not reported, except the one being sifted.
pub(crate) struct BinaryHeap<TPriority>
where
    TPriority: PartialOrd,
{
    data: Vec<HeapEntry<TPriority>>,
}

impl<TPriority: PartialOrd> BinaryHeap<TPriority> {
    #[cfg(test)]
    #[inline(always)]
    pub(crate) fn new() -> Self {
        Self { data: Vec::new() }
    }

    #[inline(always)]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Puts outer position and priority in heap
    /// Calls change_handler for every move, including the final place of the new entry
    #[inline(always)]
    pub(crate) fn push<TChangeHandler: std::ops::FnMut(MediatorIndex, HeapIndex)>(
        &mut self,
        outer_pos: MediatorIndex,
        priority: TPriority,
        change_handler: TChangeHandler,
    ) {
        self.data.push(HeapEntry {
            outer_pos,
            priority,
        });
        self.sift_up(HeapIndex(self.data.len() - 1), change_handler);
    }

    /// Removes item with the lowest priority.
    /// The last entry takes the root place and sinks down.
    /// Time complexity - O(log n) swaps and change_handler calls
    pub(crate) fn pop<TChangeHandler: std::ops::FnMut(MediatorIndex, HeapIndex)>(
        &mut self,
        change_handler: TChangeHandler,
    ) -> Option<(MediatorIndex, TPriority)> {
        let last = self.data.pop()?;
        if self.data.is_empty() {
            return Some((last.outer_pos, last.priority));
        }
        let root = std::mem::replace(&mut self.data[0], last);
        self.sift_down(HeapIndex(0), change_handler);
        Some((root.outer_pos, root.priority))
    }

    #[inline(always)]
    pub(crate) fn most_prioritized_idx(&self) -> Option<(MediatorIndex, HeapIndex)> {
        self.data.first().map(|entry| (entry.outer_pos, HeapIndex(0)))
    }

    #[inline(always)]
    pub(crate) fn look_into(&self, position: HeapIndex) -> Option<(MediatorIndex, &TPriority)> {
        let entry = self.data.get(position.0)?;
        Some((entry.outer_pos, &entry.priority))
    }

    /// Lowers priority of the entry at position.
    /// Returns old priority if `updated` is strictly less than the stored one,
    /// otherwise leaves heap untouched and returns None.
    pub(crate) fn decrease_priority<TChangeHandler: std::ops::FnMut(MediatorIndex, HeapIndex)>(
        &mut self,
        position: HeapIndex,
        updated: TPriority,
        change_handler: TChangeHandler,
    ) -> Option<TPriority> {
        if position >= self.len() {
            panic!("Out of index during decreasing priority");
        }

        if updated < self.data[position.0].priority {
            let old = std::mem::replace(&mut self.data[position.0].priority, updated);
            self.sift_up(position, change_handler);
            Some(old)
        } else {
            None
        }
    }

    /// Points entry at heap position to another outer position.
    /// Needed when outer storage relocates a key.
    pub(crate) fn change_outer_pos(&mut self, outer_pos: MediatorIndex, position: HeapIndex) {
        if position >= self.len() {
            panic!("Out of index during changing outer position");
        }

        self.data[position.0].outer_pos = outer_pos;
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> HeapIndex {
        HeapIndex(self.data.len())
    }

    #[inline(always)]
    pub(crate) fn usize_len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub(crate) fn clear(&mut self) {
        self.data.clear()
    }

    /// Entries in storage order, root first.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (MediatorIndex, &TPriority)> {
        self.data
            .iter()
            .map(|entry| (entry.outer_pos, &entry.priority))
    }

    fn sift_up<TChangeHandler: std::ops::FnMut(MediatorIndex, HeapIndex)>(
        &mut self,
        position: HeapIndex,
        mut change_handler: TChangeHandler,
    ) {
        debug_assert!(position.0 < self.data.len(), "Out of index in sift_up");
        let mut position = position.0;
        while position > 0 {
            let parent_pos = (position - 1) / 2;
            if self.data[position].priority < self.data[parent_pos].priority {
                self.swap_items(parent_pos, position);
                change_handler(self.data[position].outer_pos, HeapIndex(position));
                position = parent_pos;
            } else {
                break;
            }
        }
        change_handler(self.data[position].outer_pos, HeapIndex(position));
    }

    fn sift_down<TChangeHandler: std::ops::FnMut(MediatorIndex, HeapIndex)>(
        &mut self,
        position: HeapIndex,
        mut change_handler: TChangeHandler,
    ) {
        debug_assert!(position.0 < self.data.len(), "Out of index in sift_down");
        let mut position = position.0;
        loop {
            let left = position * 2 + 1;
            let right = left + 1;
            let mut smallest = position;
            if left < self.data.len() && self.data[left].priority < self.data[smallest].priority {
                smallest = left;
            }
            if right < self.data.len() && self.data[right].priority < self.data[smallest].priority
            {
                smallest = right;
            }

            if smallest == position {
                break;
            }
            self.swap_items(position, smallest);
            change_handler(self.data[position].outer_pos, HeapIndex(position));
            position = smallest;
        }
        change_handler(self.data[position].outer_pos, HeapIndex(position));
    }

    #[inline(always)]
    fn swap_items(&mut self, pos1: usize, pos2: usize) {
        debug_assert!(pos1 < self.data.len(), "Out of index in first pos in swap");
        debug_assert!(pos2 < self.data.len(), "Out of index in second pos in swap");
        self.data.swap(pos1, pos2);
    }
}

// Default implementations

impl<TPriority: Clone> Clone for HeapEntry<TPriority> {
    fn clone(&self) -> Self {
        Self {
            outer_pos: self.outer_pos,
            priority: self.priority.clone(),
        }
    }
}

impl<TPriority: Debug> Debug for HeapEntry<TPriority> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "{{outer_pos: {:?}, priority: {:?}}}",
            &self.outer_pos, &self.priority
        )
    }
}

impl<TPriority: Clone + PartialOrd> Clone for BinaryHeap<TPriority> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl<TPriority: Debug + PartialOrd> Debug for BinaryHeap<TPriority> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.data.fmt(f)
    }
}
