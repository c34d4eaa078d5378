//! MCTS tree node representation.
//!
//! Each node represents a game state reached by taking an action from the parent.
//! Nodes store visit statistics used for UCB selection and move extraction.

use engine_core::ActionId;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent (None only for root)
    pub action: Option<ActionId>,

    /// Game state at this node
    pub state: S,

    /// Legal actions at this state, cached at creation
    pub legal_actions: Vec<ActionId>,

    /// Children: (action, NodeId) pairs in insertion order
    pub children: Vec<(ActionId, NodeId)>,

    /// Number of rollouts that passed through this node
    pub visits: u32,

    /// Sum of rollout rewards backpropagated through this node
    pub reward: f64,

    /// Whether this is a terminal state (game over)
    pub is_terminal: bool,
}

impl<S> MctsNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S, legal_actions: Vec<ActionId>, is_terminal: bool) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            legal_actions,
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
            is_terminal,
        }
    }

    /// Create a new child node.
    pub fn new_child(
        parent: NodeId,
        action: ActionId,
        state: S,
        legal_actions: Vec<ActionId>,
        is_terminal: bool,
    ) -> Self {
        Self {
            parent,
            action: Some(action),
            state,
            legal_actions,
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
            is_terminal,
        }
    }

    /// Mean reward per visit. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / self.visits as f64
        }
    }

    /// UCB1 score used when the parent selects among its children.
    ///
    /// `reward / (visits + 1) + c * sqrt(2 * ln(N_parent) / (visits + 1))`
    ///
    /// The `+1` keeps unvisited children finite. Takes the pre-computed
    /// `ln(N_parent)` so it is evaluated once per selection step.
    #[inline]
    pub fn ucb_score(&self, parent_visits_ln: f64, exploration_constant: f64) -> f64 {
        let n = self.visits as f64 + 1.0;
        let exploitation = self.reward / n;
        let exploration = exploration_constant * (2.0 * parent_visits_ln / n).sqrt();
        exploitation + exploration
    }

    /// Check if this node has children.
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if every legal action has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() == self.legal_actions.len()
    }

    /// Child reached by `action`, if already created.
    pub fn child_for(&self, action: ActionId) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, id)| *id)
    }

    /// Legal actions that do not have a child yet, in legal-action order.
    pub fn untried_actions(&self) -> Vec<ActionId> {
        self.legal_actions
            .iter()
            .copied()
            .filter(|&a| self.child_for(a).is_none())
            .collect()
    }
}
