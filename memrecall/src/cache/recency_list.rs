/// Stable address of a node stored in a [`RecencyList`].
///
/// Handles stay valid until the node they point at is removed. The slot may be
/// reused afterwards, so holding on to a handle past [`RecencyList::remove`] is
/// a caller bug.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(usize);

struct Node<T> {
    payload: T,
    prev: Option<NodeHandle>,
    next: Option<NodeHandle>,
}

/// Doubly linked list ordered by access recency.
///
/// Head is the most recently used node, tail the least recently used one.
/// Nodes live in an arena and link to each other by [`NodeHandle`], every
/// operation is O(1).
pub struct RecencyList<T> {
    nodes: Vec<Option<Node<T>>>,
    free_slots: Vec<usize>,
    head: Option<NodeHandle>,
    tail: Option<NodeHandle>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    pub fn new() -> RecencyList<T> {
        RecencyList::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> RecencyList<T> {
        RecencyList {
            nodes: Vec::with_capacity(capacity),
            free_slots: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<NodeHandle> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeHandle> {
        self.tail
    }

    /// Stores `payload` in a new node and links it in front of the current head.
    pub fn add_first(&mut self, payload: T) -> NodeHandle {
        let node = Node {
            payload,
            prev: None,
            next: None,
        };
        let handle = match self.free_slots.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeHandle(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeHandle(self.nodes.len() - 1)
            }
        };
        self.link_front(handle);
        self.len += 1;
        handle
    }

    /// Moves the node to the head. Promoting the current head does nothing.
    pub fn promote(&mut self, handle: NodeHandle) {
        // validates the handle even when it is already the head
        let _ = self.node(handle);
        if self.head == Some(handle) {
            return;
        }
        self.unlink(handle);
        self.link_front(handle);
    }

    /// Unlinks the node and returns its payload.
    pub fn remove(&mut self, handle: NodeHandle) -> T {
        self.unlink(handle);
        let node = match self.nodes[handle.0].take() {
            Some(node) => node,
            None => stale_handle(handle),
        };
        self.free_slots.push(handle.0);
        self.len -= 1;
        node.payload
    }

    /// Least recently used node, the next one to evict.
    pub fn item_to_evict(&self) -> Option<NodeHandle> {
        self.tail
    }

    pub fn get(&self, handle: NodeHandle) -> &T {
        &self.node(handle).payload
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> &mut T {
        &mut self.node_mut(handle).payload
    }

    pub fn prev(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.node(handle).prev
    }

    pub fn next(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.node(handle).next
    }

    /// Payloads from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn link_front(&mut self, handle: NodeHandle) {
        let old_head = self.head;
        {
            let node = self.node_mut(handle);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => self.node_mut(old_head).prev = Some(handle),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    fn unlink(&mut self, handle: NodeHandle) {
        let (prev, next) = {
            let node = self.node_mut(handle);
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    fn node(&self, handle: NodeHandle) -> &Node<T> {
        match self.nodes.get(handle.0) {
            Some(Some(node)) => node,
            _ => stale_handle(handle),
        }
    }

    fn node_mut(&mut self, handle: NodeHandle) -> &mut Node<T> {
        match self.nodes.get_mut(handle.0) {
            Some(Some(node)) => node,
            _ => stale_handle(handle),
        }
    }
}

fn stale_handle(handle: NodeHandle) -> ! {
    panic!("recency list handle {:?} does not refer to a live node", handle)
}

pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<NodeHandle>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let node = self.list.node(handle);
        self.cursor = node.next;
        Some(&node.payload)
    }
}
