use super::game::CfrGame;
use super::history::History;
use super::info::CfrInfo;
use crate::Probability;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// A visited state plus what the traversal learned about it.
#[derive(Debug, Clone)]
pub struct Frame<G, I> {
    pub game: G,
    pub history: History,
    pub info: Option<I>,
    pub strategy: Vec<Probability>,
}

impl<G, I> Frame<G, I> {
    pub fn new(game: G, history: History) -> Self {
        Self {
            game,
            history,
            info: None,
            strategy: Vec::new(),
        }
    }
}

/// Index-addressed traversal arena.
///
/// Nodes are only ever appended below an existing parent, so every child
/// has a larger index than its parent. Walking indices backwards is a
/// valid post-order for backing values up; walking forwards pushes reach
/// probabilities down. Edge weights are menu slots.
#[derive(Debug)]
pub struct Tree<G, I>(DiGraph<Frame<G, I>, usize>);

impl<G: CfrGame, I: CfrInfo> Tree<G, I> {
    pub fn new(root: G) -> (Self, NodeIndex) {
        let mut graph = DiGraph::new();
        let root = graph.add_node(Frame::new(root, History::default()));
        (Self(graph), root)
    }
    pub fn grow(&mut self, parent: NodeIndex, slot: usize, frame: Frame<G, I>) -> NodeIndex {
        let child = self.0.add_node(frame);
        self.0.add_edge(parent, child, slot);
        child
    }
    pub fn annotate(&mut self, index: NodeIndex, info: I, strategy: Vec<Probability>) {
        let frame = &mut self.0[index];
        frame.info = Some(info);
        frame.strategy = strategy;
    }
    pub fn at(&self, index: NodeIndex) -> &Frame<G, I> {
        &self.0[index]
    }
    pub fn len(&self) -> usize {
        self.0.node_count()
    }
    pub fn is_empty(&self) -> bool {
        self.0.node_count() == 0
    }
    /// (slot, child) pairs in slot order
    pub fn children(&self, index: NodeIndex) -> Vec<(usize, NodeIndex)> {
        let mut children = self
            .0
            .edges(index)
            .map(|e| (*e.weight(), e.target()))
            .collect::<Vec<_>>();
        children.sort();
        children
    }
    pub fn indices(&self) -> impl DoubleEndedIterator<Item = NodeIndex> {
        self.0.node_indices()
    }
}
