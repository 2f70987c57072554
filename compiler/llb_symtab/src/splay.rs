//! Self-adjusting binary search tree keyed by [`Key`].
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`], so the
//! parent/child links are plain indices and rotations are index swaps.
//! Every successful search and every insertion splays the touched node to
//! the root, keeping recently used keys shallow.
//!
//! There is no balance invariant beyond the amortized splay bound. Inserting
//! keys in sorted order yields a path as deep as the tree is large, so the
//! recursive walks grow the stack on demand.

use crate::error::to_u32;
use crate::{Key, SymtabError};

/// Minimum stack to keep free before recursing further (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Stack added each time the red zone is hit (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Index of a node in its [`SplayTree`].
///
/// Ids stay valid until the tree is cleared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Node<V> {
    key: Key,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
    value: V,
}

/// Splay tree owning one `V` per distinct key.
#[derive(Clone, Debug)]
pub struct SplayTree<V> {
    nodes: Vec<Node<V>>,
    root: Option<NodeId>,
}

impl<V> SplayTree<V> {
    pub fn new() -> Self {
        SplayTree {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn key(&self, id: NodeId) -> Key {
        self.node(id).key
    }

    #[inline]
    pub fn value(&self, id: NodeId) -> &V {
        &self.node(id).value
    }

    #[inline]
    pub fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.node_mut(id).value
    }

    #[inline]
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    #[inline]
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Find the node for `key`, splaying it to the root on a hit.
    ///
    /// A miss leaves the tree shape untouched.
    pub fn search(&mut self, key: Key) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            if key < node.key {
                cursor = node.left;
            } else if node.key < key {
                cursor = node.right;
            } else {
                self.splay(id);
                return Some(id);
            }
        }
        None
    }

    /// Attach a new leaf for `key` and splay it to the root.
    ///
    /// Equal keys descend to the right, so the descent never stops early on
    /// an existing key. Callers that want one node per key go through
    /// [`SplayTree::try_get_or_insert_with`].
    pub fn try_insert(&mut self, key: Key, value: V) -> Result<NodeId, SymtabError> {
        let id = NodeId(to_u32(self.nodes.len(), "splay tree nodes")?);
        self.nodes
            .try_reserve(1)
            .map_err(|_| SymtabError::NodeAllocation {
                nodes: self.nodes.len() + 1,
            })?;

        let mut parent = None;
        let mut cursor = self.root;
        while let Some(at) = cursor {
            parent = Some(at);
            let node = self.node(at);
            cursor = if key < node.key { node.left } else { node.right };
        }

        self.nodes.push(Node {
            key,
            left: None,
            right: None,
            parent,
            value,
        });
        match parent {
            None => self.root = Some(id),
            Some(p) => {
                let p = self.node_mut(p);
                if key < p.key {
                    p.left = Some(id);
                } else {
                    p.right = Some(id);
                }
            }
        }

        self.splay(id);
        Ok(id)
    }

    /// Node for `key`, inserting one built by `make` if absent. Either way
    /// the node ends up at the root.
    pub fn try_get_or_insert_with(
        &mut self,
        key: Key,
        make: impl FnOnce() -> V,
    ) -> Result<NodeId, SymtabError> {
        match self.search(key) {
            Some(id) => Ok(id),
            None => self.try_insert(key, make()),
        }
    }

    /// Node ids in ascending key order.
    pub fn in_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        if let Some(root) = self.root {
            self.collect_in_order(root, &mut out);
        }
        out
    }

    /// Empty the tree, handing each node's key and value to `free` children
    /// first (post-order). Returns the number of nodes released.
    pub fn drain_post_order(&mut self, mut free: impl FnMut(Key, V)) -> usize {
        let mut order = Vec::with_capacity(self.nodes.len());
        if let Some(root) = self.root {
            self.collect_post_order(root, &mut order);
        }
        debug_assert_eq!(order.len(), self.nodes.len(), "unreachable splay nodes");

        let mut slots: Vec<Option<Node<V>>> = self.nodes.drain(..).map(Some).collect();
        self.root = None;
        for id in &order {
            if let Some(node) = slots[id.index()].take() {
                free(node.key, node.value);
            }
        }
        order.len()
    }

    /// Drop every node, post-order.
    pub fn clear(&mut self) -> usize {
        self.drain_post_order(|_, _| {})
    }

    /// Promote `x` above its parent `p`.
    ///
    /// ```text
    ///       u            u
    ///       |            |
    ///       p            x
    ///      / \    =>    / \
    ///     x   n        m   p
    ///    / \              / \
    ///   m   v            v   n
    /// ```
    ///
    /// Mirrored when `x` is the right child. `v` changes parents; in-order
    /// sequence is unchanged.
    fn rotate(&mut self, x: NodeId, p: NodeId) {
        let grand = self.node(p).parent;

        let moved = if self.node(p).left == Some(x) {
            let moved = self.node(x).right;
            self.node_mut(p).left = moved;
            self.node_mut(x).right = Some(p);
            moved
        } else {
            let moved = self.node(x).left;
            self.node_mut(p).right = moved;
            self.node_mut(x).left = Some(p);
            moved
        };
        self.node_mut(p).parent = Some(x);

        if let Some(v) = moved {
            self.node_mut(v).parent = Some(p);
        }

        if let Some(u) = grand {
            let u = self.node_mut(u);
            if u.left == Some(p) {
                u.left = Some(x);
            } else {
                u.right = Some(x);
            }
        }
        self.node_mut(x).parent = grand;
    }

    /// Rotate `x` up until it is the root.
    fn splay(&mut self, x: NodeId) {
        while let Some(p) = self.node(x).parent {
            match self.node(p).parent {
                // zig
                None => self.rotate(x, p),
                Some(pp) => {
                    let x_is_left = self.node(p).left == Some(x);
                    let p_is_left = self.node(pp).left == Some(p);
                    if x_is_left == p_is_left {
                        // zig-zig
                        self.rotate(p, pp);
                        self.rotate(x, p);
                    } else {
                        // zig-zag
                        self.rotate(x, p);
                        self.rotate(x, pp);
                    }
                }
            }
        }
        self.root = Some(x);
    }

    fn collect_in_order(&self, id: NodeId, out: &mut Vec<NodeId>) {
        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
            let node = self.node(id);
            if let Some(left) = node.left {
                self.collect_in_order(left, out);
            }
            out.push(id);
            if let Some(right) = node.right {
                self.collect_in_order(right, out);
            }
        });
    }

    fn collect_post_order(&self, id: NodeId, out: &mut Vec<NodeId>) {
        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
            let node = self.node(id);
            if let Some(left) = node.left {
                self.collect_post_order(left, out);
            }
            if let Some(right) = node.right {
                self.collect_post_order(right, out);
            }
            out.push(id);
        });
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<V> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
        &mut self.nodes[id.index()]
    }
}

impl<V> Default for SplayTree<V> {
    fn default() -> Self {
        Self::new()
    }
}
