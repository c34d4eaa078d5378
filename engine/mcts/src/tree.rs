//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices.

use engine_core::ActionId;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<S> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S> MctsTree<S> {
    /// Create a new tree with the given root state.
    pub fn new(root_state: S, legal_actions: Vec<ActionId>, is_terminal: bool) -> Self {
        let root_node = MctsNode::new_root(root_state, legal_actions, is_terminal);
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether every legal action of the node already has a child.
    #[inline]
    pub fn is_fully_expanded(&self, node_id: NodeId) -> bool {
        self.get(node_id).is_fully_expanded()
    }

    /// Select the best child of a node using UCB1.
    ///
    /// Ties go to the child inserted first. Returns `None` for a childless node.
    pub fn select_best_child(&self, node_id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // ln(0) is -inf; treat an unvisited parent as visited once
        let parent_visits_ln = (node.visits.max(1) as f64).ln();

        let mut best: Option<(NodeId, f64)> = None;
        for &(_, child_id) in &node.children {
            let score = self
                .get(child_id)
                .ucb_score(parent_visits_ln, exploration_constant);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Add a child to a parent node.
    ///
    /// If the parent already has a child for `action`, that child is returned
    /// and no node is allocated.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        action: ActionId,
        state: S,
        legal_actions: Vec<ActionId>,
        is_terminal: bool,
    ) -> NodeId {
        if let Some(existing) = self.get(parent_id).child_for(action) {
            return existing;
        }

        let child = MctsNode::new_child(parent_id, action, state, legal_actions, is_terminal);
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push((action, child_id));

        child_id
    }

    /// Backpropagate a reward from a node up to the root.
    ///
    /// Every node on the path receives the same reward, already expressed
    /// from the root player's perspective.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visits += 1;
            node.reward += reward;
            current_id = node.parent;
        }
    }

    /// Get the best action from root based on visit counts.
    /// Returns (action, visits) or None if root has no children.
    pub fn best_action(&self) -> Option<(ActionId, u32)> {
        let root = self.get(self.root);
        let mut best: Option<(ActionId, u32)> = None;
        for &(action, id) in &root.children {
            let visits = self.get(id).visits;
            match best {
                Some((_, best_visits)) if visits <= best_visits => {}
                _ => best = Some((action, visits)),
            }
        }
        best
    }

    /// Per-child statistics of the root in insertion order.
    pub fn root_children(&self) -> Vec<ChildStats> {
        self.get(self.root)
            .children
            .iter()
            .map(|&(action, id)| {
                let child = self.get(id);
                ChildStats {
                    action,
                    visits: child.visits,
                    reward: child.reward,
                }
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_reward: root.mean_reward(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Visit statistics of one root child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildStats {
    pub action: ActionId,
    pub visits: u32,
    pub reward: f64,
}

impl ChildStats {
    /// Mean reward per visit, 0.0 if never visited.
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / self.visits as f64
        }
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    /// Mean reward at the root
    pub root_reward: f64,
    pub max_depth: u32,
}
