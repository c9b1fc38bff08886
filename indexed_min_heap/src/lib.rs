//! This is a min-priority queue with decrease-key, addressed by key.
//!
//! It uses IndexMap and own implementation of binary heap to achieve this.
//!
//! Each entry has associated *key* and *priority*.
//! Keys must be unique and hashable; priorities must be comparable with `<`,
//! so plain `f64` distances work.
//!
//! Popping returns key with the lowest priority.
//! Pushing adds a key, or lowers the priority of a key already in the heap.
//! Priorities never grow: pushing a worse priority for a queued key changes nothing.
//!
//! Push, pop and decrease-key have ***O(log n)*** time complexity;
//! peek and lookup by key are ***O(1)***.
//!
//! The heap keeps every key's position in its storage, so decrease-key
//! does not need to search for the key.
//!
//! # Examples
//!
//! This is implementation of [Dijkstra's algorithm][dijkstra] over a small road map.
//!
//! Each time a shorter path to a queued node is found, pushing it again
//! lowers its distance in place, so every node is queued at most once.
//!
//! [dijkstra]: https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
//!
//! ```
//! use indexed_min_heap::IndexedMinHeap;
//! use std::collections::{HashMap, HashSet};
//!
//! fn shortest_distance(
//!     roads: &HashMap<&str, Vec<(&str, f64)>>,
//!     start: &str,
//!     target: &str,
//! ) -> Option<f64> {
//!     // Nodes whose distance is final
//!     let mut visited: HashSet<String> = HashSet::new();
//!     let mut frontier: IndexedMinHeap = IndexedMinHeap::new();
//!     frontier.push(start.to_string(), 0.0);
//!
//!     while let Some((node, distance)) = frontier.pop_entry() {
//!         if node == target {
//!             return Some(distance);
//!         }
//!         for &(next, length) in roads.get(node.as_str()).into_iter().flatten() {
//!             if !visited.contains(next) {
//!                 // Either queues `next` or keeps the shorter of two distances.
//!                 frontier.push(next.to_string(), distance + length);
//!             }
//!         }
//!         visited.insert(node);
//!     }
//!     None
//! }
//!
//! let mut roads = HashMap::new();
//! roads.insert("home", vec![("bakery", 4.0), ("park", 1.0)]);
//! roads.insert("park", vec![("bakery", 2.0), ("office", 5.0)]);
//! roads.insert("bakery", vec![("office", 1.0)]);
//!
//! assert_eq!(shortest_distance(&roads, "home", "office"), Some(4.0));
//! assert_eq!(shortest_distance(&roads, "office", "home"), None);
//! ```
//!

mod editable_binary_heap;
mod indexed_min_heap;
mod mediator;

pub use crate::indexed_min_heap::{DecreasePriorityError, IndexedMinHeap};

#[doc = include_str!("../../Readme.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
