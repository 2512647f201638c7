//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the block that has not been accessed for the longest
//! time. Recency is kept as a doubly-linked list of tags ordered from most
//! recently used (head) to least recently used (tail), plus a map from tag to
//! the list node holding it.
//!
//! Nodes live in an arena and link to each other by index, so removing and
//! reinserting a tag never invalidates the handles of other tags. Freed
//! slots are recycled.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(1)
//!   - `remove()`: O(1)
//!   - `pop_lru()`: O(1)
//! - **Space Complexity:** O(N) where N is the number of resident tags

use std::collections::HashMap;

/// Arena handle of a list node.
type Handle = usize;

#[derive(Clone, Debug)]
struct Node {
    tag: u32,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// LRU recency tracker for a fully-associative cache.
///
/// The list and the map always change together: every tag in the list has
/// exactly one map entry pointing at its node, and vice versa.
#[derive(Clone, Debug, Default)]
pub struct LruTracker {
    nodes: Vec<Node>,
    free: Vec<Handle>,
    head: Option<Handle>,
    tail: Option<Handle>,
    handles: HashMap<u32, Handle>,
}

impl LruTracker {
    /// Creates a tracker with room for `capacity` tags before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            handles: HashMap::with_capacity(capacity),
        }
    }

    /// Number of tracked tags.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` if no tag is tracked.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Returns `true` if `tag` is tracked.
    pub fn contains(&self, tag: u32) -> bool {
        self.handles.contains_key(&tag)
    }

    /// Marks `tag` as most recently used, inserting it if absent.
    pub fn touch(&mut self, tag: u32) {
        if let Some(&handle) = self.handles.get(&tag) {
            self.unlink(handle);
            self.link_front(handle);
            return;
        }
        let node = Node {
            tag,
            prev: None,
            next: None,
        };
        let handle = match self.free.pop() {
            Some(handle) => {
                self.nodes[handle] = node;
                handle
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.link_front(handle);
        self.handles.insert(tag, handle);
    }

    /// Stops tracking `tag`. Returns `false` if it was not tracked.
    pub fn remove(&mut self, tag: u32) -> bool {
        match self.handles.remove(&tag) {
            Some(handle) => {
                self.unlink(handle);
                self.free.push(handle);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the least recently used tag.
    pub fn pop_lru(&mut self) -> Option<u32> {
        let tag = self.nodes[self.tail?].tag;
        self.remove(tag);
        Some(tag)
    }

    /// Returns the least recently used tag without removing it.
    pub fn peek_lru(&self) -> Option<u32> {
        self.tail.map(|handle| self.nodes[handle].tag)
    }

    /// Returns the most recently used tag.
    pub fn peek_mru(&self) -> Option<u32> {
        self.head.map(|handle| self.nodes[handle].tag)
    }

    /// Iterates tags from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = &self.nodes[cursor?];
            cursor = node.next;
            Some(node.tag)
        })
    }

    fn unlink(&mut self, handle: Handle) {
        let Node { prev, next, .. } = self.nodes[handle];
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[handle].prev = None;
        self.nodes[handle].next = None;
    }

    fn link_front(&mut self, handle: Handle) {
        self.nodes[handle].prev = None;
        self.nodes[handle].next = self.head;
        if let Some(old) = self.head {
            self.nodes[old].prev = Some(handle);
        }
        self.head = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
    }
}
