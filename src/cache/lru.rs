//! LRU List Module
//!
//! Implements Least Recently Used ordering for cache eviction.

// == Node Handle ==
/// Stable reference to a node in an [`LruList`].
///
/// Handles stay valid until the node is removed or popped. After that the
/// slot may be reused, so owners must drop the handle together with the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(usize);

#[derive(Debug)]
struct Node<K> {
    key: K,
    /// Next older node
    prev: Option<usize>,
    /// Next newer node
    next: Option<usize>,
}

// == LRU List ==
/// Doubly-linked recency list stored in a slot arena.
///
/// - Oldest end = least recently used (next eviction candidate)
/// - Newest end = most recently used
///
/// Push, touch, remove and pop are all O(1): reordering relinks two
/// neighbours and never moves keys.
#[derive(Debug)]
pub struct LruList<K> {
    slots: Vec<Option<Node<K>>>,
    /// Vacant slot indices available for reuse
    free: Vec<usize>,
    oldest: Option<usize>,
    newest: Option<usize>,
    len: usize,
}

impl<K> Default for LruList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> LruList<K> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            oldest: None,
            newest: None,
            len: 0,
        }
    }

    // == Push ==
    /// Inserts `key` as the most recently used node.
    pub fn push_newest(&mut self, key: K) -> NodeHandle {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.link_newest(idx);
        self.len += 1;
        NodeHandle(idx)
    }

    // == Touch ==
    /// Marks a node as most recently used.
    ///
    /// Unknown handles are ignored.
    pub fn touch(&mut self, handle: NodeHandle) {
        if !self.is_live(handle) || self.newest == Some(handle.0) {
            return;
        }
        self.unlink(handle.0);
        self.link_newest(handle.0);
    }

    // == Remove ==
    /// Removes a node and returns its key.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<K> {
        if !self.is_live(handle) {
            return None;
        }
        self.unlink(handle.0);
        let node = self.slots[handle.0].take()?;
        self.free.push(handle.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_oldest(&mut self) -> Option<K> {
        let idx = self.oldest?;
        self.remove(NodeHandle(idx))
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.oldest.and_then(|idx| self.node(idx)).map(|node| &node.key)
    }

    /// Returns the most recently used key.
    pub fn peek_newest(&self) -> Option<&K> {
        self.newest.and_then(|idx| self.node(idx)).map(|node| &node.key)
    }

    // == Iteration ==
    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            cursor: self.oldest,
        }
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.oldest = None;
        self.newest = None;
        self.len = 0;
    }

    fn node(&self, idx: usize) -> Option<&Node<K>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<K>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn is_live(&self, handle: NodeHandle) -> bool {
        self.node(handle.0).is_some()
    }

    /// Detaches a node from its neighbours, patching the list ends.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.oldest = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.newest = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Attaches a detached node at the newest end.
    fn link_newest(&mut self, idx: usize) {
        let prev = self.newest;
        if let Some(node) = self.node_mut(idx) {
            node.prev = prev;
            node.next = None;
        }
        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = Some(idx);
                }
            }
            None => self.oldest = Some(idx),
        }
        self.newest = Some(idx);
    }
}

// == Iterator ==
/// Oldest-to-newest iterator over an [`LruList`].
pub struct Iter<'a, K> {
    list: &'a LruList<K>,
    cursor: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &LruList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_lru_new() {
        let lru: LruList<&str> = LruList::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.peek_oldest(), None);
    }

    #[test]
    fn test_lru_push_order() {
        let mut lru = LruList::new();

        lru.push_newest("key1");
        lru.push_newest("key2");
        lru.push_newest("key3");

        assert_eq!(lru.len(), 3);
        // key1 is oldest (added first)
        assert_eq!(lru.peek_oldest(), Some(&"key1"));
        assert_eq!(lru.peek_newest(), Some(&"key3"));
        assert_eq!(keys(&lru), vec!["key1", "key2", "key3"]);
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut lru = LruList::new();

        let h1 = lru.push_newest("key1");
        lru.push_newest("key2");
        lru.push_newest("key3");

        lru.touch(h1);

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some(&"key2"));
        assert_eq!(keys(&lru), vec!["key2", "key3", "key1"]);
    }

    #[test]
    fn test_lru_touch_middle_and_newest() {
        let mut lru = LruList::new();

        lru.push_newest("a");
        let hb = lru.push_newest("b");
        let hc = lru.push_newest("c");

        lru.touch(hc);
        assert_eq!(keys(&lru), vec!["a", "b", "c"]);

        lru.touch(hb);
        assert_eq!(keys(&lru), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_lru_pop_oldest() {
        let mut lru = LruList::new();

        lru.push_newest("key1");
        lru.push_newest("key2");
        lru.push_newest("key3");

        assert_eq!(lru.pop_oldest(), Some("key1"));
        assert_eq!(lru.len(), 2);
        assert_eq!(lru.pop_oldest(), Some("key2"));
        assert_eq!(lru.pop_oldest(), Some("key3"));
        assert_eq!(lru.pop_oldest(), None);
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruList::new();

        lru.push_newest("key1");
        let h2 = lru.push_newest("key2");
        lru.push_newest("key3");

        assert_eq!(lru.remove(h2), Some("key2"));
        assert_eq!(lru.len(), 2);
        assert_eq!(keys(&lru), vec!["key1", "key3"]);

        // Second remove through the same handle is a no-op
        assert_eq!(lru.remove(h2), None);
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn test_lru_remove_ends() {
        let mut lru = LruList::new();

        let h1 = lru.push_newest("a");
        lru.push_newest("b");
        let h3 = lru.push_newest("c");

        lru.remove(h1);
        lru.remove(h3);

        assert_eq!(lru.peek_oldest(), Some(&"b"));
        assert_eq!(lru.peek_newest(), Some(&"b"));
    }

    #[test]
    fn test_lru_slot_reuse() {
        let mut lru = LruList::new();

        let h1 = lru.push_newest("a");
        lru.push_newest("b");
        lru.remove(h1);

        // Freed slot is reused, order still follows insertion
        let h3 = lru.push_newest("c");
        assert_eq!(h3, h1);
        assert_eq!(keys(&lru), vec!["b", "c"]);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruList::new();

        let ha = lru.push_newest("a");
        let hb = lru.push_newest("b");
        let hc = lru.push_newest("c");

        lru.touch(ha);
        lru.touch(hc);
        lru.touch(hb);

        assert_eq!(lru.pop_oldest(), Some("a"));
        assert_eq!(lru.pop_oldest(), Some("c"));
        assert_eq!(lru.pop_oldest(), Some("b"));
    }

    #[test]
    fn test_lru_clear() {
        let mut lru = LruList::new();
        lru.push_newest(1);
        lru.push_newest(2);

        lru.clear();

        assert!(lru.is_empty());
        assert_eq!(lru.iter().count(), 0);
    }
}
