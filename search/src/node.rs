//! Move-chain tree stored in a generational arena.
//!
//! Each node stands for "the start configuration with this move chain
//! applied". Nodes store only their parent handle and the edge move; the
//! chain is rebuilt by walking to the root.
//!
//! # Ownership
//!
//! The tree is the sole owner of its nodes: a parent's child list owns the
//! children. Anything else (the duplicate-state table) holds a [`NodeId`],
//! which is an index plus the generation of the slot when the node was
//! allocated. Releasing a node bumps its slot generation, so every
//! outstanding handle to it stops resolving. A stale handle reads as absent;
//! it can never alias a newer node that reuses the slot.

/// Generation-checked handle to a node in a [`MoveTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// One node of the move-chain tree.
#[derive(Debug, Clone)]
pub struct MoveNode<M> {
    parent: Option<NodeId>,
    edge: Option<M>,
    depth: u32,
    visited: bool,
    finished: bool,
    children: Vec<NodeId>,
}

impl<M> MoveNode<M> {
    /// Tree depth (root = 0), equal to the move-chain length.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The node's configuration has been derived and evaluated.
    #[must_use]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// The node is proven to contribute no solution in this iteration.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug)]
struct Slot<M> {
    generation: u32,
    node: Option<MoveNode<M>>,
}

/// Arena-backed move-chain tree with a root at depth 0.
#[derive(Debug)]
pub struct MoveTree<M> {
    slots: Vec<Slot<M>>,
    free: Vec<u32>,
    root: NodeId,
    live: usize,
    high_water: usize,
    allocated: u64,
}

impl<M: Clone> Default for MoveTree<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> MoveTree<M> {
    /// A tree holding only an unvisited root (empty move chain).
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            live: 0,
            high_water: 0,
            allocated: 0,
        };
        tree.root = tree.allocate(MoveNode {
            parent: None,
            edge: None,
            depth: 0,
            visited: false,
            finished: false,
            children: Vec::new(),
        });
        tree
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Resolve a handle. `None` if the node has been released.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&MoveNode<M>> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut MoveNode<M>> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    /// Whether the handle still resolves to a node in the tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Largest number of simultaneously live nodes seen.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Total nodes ever allocated, root included.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.allocated
    }

    /// Append an unvisited child reached from `parent` by `mv`.
    ///
    /// Returns `None` if `parent` has been released.
    pub fn add_child(&mut self, parent: NodeId, mv: M) -> Option<NodeId> {
        let depth = self.get(parent)?.depth.saturating_add(1);
        let child = self.allocate(MoveNode {
            parent: Some(parent),
            edge: Some(mv),
            depth,
            visited: false,
            finished: false,
            children: Vec::new(),
        });
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        Some(child)
    }

    /// The move chain from the root to `id`, or `None` if `id` is stale.
    #[must_use]
    pub fn move_chain(&self, id: NodeId) -> Option<Vec<M>> {
        let mut node = self.get(id)?;
        let mut chain = Vec::with_capacity(node.depth as usize);
        while let (Some(edge), Some(parent)) = (node.edge.as_ref(), node.parent) {
            chain.push(edge.clone());
            node = self.get(parent)?;
        }
        chain.reverse();
        Some(chain)
    }

    pub fn mark_visited(&mut self, id: NodeId) {
        if let Some(n) = self.get_mut(id) {
            n.visited = true;
        }
    }

    pub fn mark_finished(&mut self, id: NodeId) {
        if let Some(n) = self.get_mut(id) {
            n.finished = true;
        }
    }

    /// Finished, or no longer in the tree at all.
    #[must_use]
    pub fn is_finished(&self, id: NodeId) -> bool {
        self.get(id).is_none_or(MoveNode::is_finished)
    }

    /// Snapshot of the current child handles.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).map(|n| n.children.clone()).unwrap_or_default()
    }

    /// Replace the child list of `id` (used after pruning finished children).
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        if let Some(n) = self.get_mut(id) {
            n.children = children;
        }
    }

    /// Free `id` and its whole subtree. Returns the number of nodes freed.
    ///
    /// The parent's child list is not touched; callers drop the handle from
    /// it themselves.
    pub fn release(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut freed = 0;
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.index as usize)
                .filter(|s| s.generation == current.generation)
            else {
                continue;
            };
            let Some(node) = slot.node.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
            self.live -= 1;
            freed += 1;
            stack.extend(node.children);
        }
        freed
    }

    fn allocate(&mut self, node: MoveNode<M>) -> NodeId {
        self.live += 1;
        self.allocated += 1;
        self.high_water = self.high_water.max(self.live);
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        #[allow(clippy::cast_possible_truncation)]
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }
}
