//! An explicit game tree that implements [`Position`].
//!
//! Every node stores its static evaluation (from White's point of view),
//! check status, game phase and draw flag; every edge stores the move, the
//! moving piece, the captured piece and a precomputed exchange value. The
//! search core sees it exactly as it would see a real board, which makes the
//! tree useful both for scripted tests and for deterministic benchmarks.

use std::fmt;

use tracing::{debug, warn};

use crate::chess_move::{Move, PromotionPiece};
use crate::error::TreeError;
use crate::piece::{Color, PieceKind};
use crate::position::Position;
use crate::square::Square;

const SEED: u64 = 0x4b45_5354_5245_4c21; // "KESTREL!"

/// Key bit flipped when Black is to move.
const SIDE_KEY: u64 = 0x9e37_79b9_7f4a_7c15;

/// Xorshift64 PRNG. Returns (value, next_state).
const fn xorshift64(mut state: u64) -> (u64, u64) {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    (state, state)
}

/// Handle to a node of a [`GameTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Index of the node inside its tree.
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Edge {
    mv: Move,
    piece: PieceKind,
    captured: Option<PieceKind>,
    see: i32,
    legal: bool,
    child: usize,
}

#[derive(Debug, Clone)]
struct Node {
    key: u64,
    eval: i32,
    in_check: bool,
    phase: f32,
    draw: bool,
    edges: Vec<Edge>,
}

/// What the last make pushed, so unmake can restore it.
#[derive(Debug, Clone, Copy)]
enum Step {
    Move { from: usize, mv: Move },
    Null,
}

/// A finite game tree walked with make/unmake.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<Node>,
    rng: u64,
    current: usize,
    side: Color,
    steps: Vec<Step>,
}

impl GameTree {
    /// Create a tree holding only a root with the given side to move and
    /// White-relative evaluation.
    pub fn new(side: Color, root_eval: i32) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            rng: SEED,
            current: 0,
            side,
            steps: Vec::new(),
        };
        tree.push_node(root_eval, 0.0);
        tree
    }

    /// Build a pseudo-random tree: every node above `depth` gets `branching`
    /// moves, roughly a quarter of them captures.
    ///
    /// Identical arguments always produce an identical tree.
    pub fn random(seed: u64, branching: usize, depth: usize) -> Self {
        let branching = branching.clamp(1, Square::COUNT);
        let mut tree = Self::new(Color::White, 0);
        tree.rng = seed | 1;

        let mut frontier = vec![0usize];
        for level in 0..depth {
            let phase = (level + 1) as f32 / depth.max(1) as f32;
            let mut next = Vec::with_capacity(frontier.len() * branching);
            for &parent in &frontier {
                for slot in 0..branching {
                    let r = tree.next_random();
                    let child_eval = (tree.nodes[parent].eval + (r % 121) as i32 - 60).clamp(-1500, 1500);
                    let child = tree.push_node(child_eval, phase);
                    tree.nodes[child].in_check = r % 17 == 0;

                    let edge = random_edge(slot, r, child);
                    tree.nodes[parent].edges.push(edge);
                    next.push(child);
                }
            }
            frontier = next;
        }

        // Leaves have no moves, so none of them may be in check.
        for &leaf in &frontier {
            tree.nodes[leaf].in_check = false;
        }

        debug!(nodes = tree.nodes.len(), branching, depth, "generated random game tree");
        tree
    }

    /// The root node.
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The node the walk currently stands on.
    pub const fn current(&self) -> NodeId {
        NodeId(self.current)
    }

    /// Number of moves (including null moves) applied since the root.
    pub fn ply(&self) -> usize {
        self.steps.len()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a quiet or promoting move from `parent` leading to a new node.
    pub fn add_move(&mut self, parent: NodeId, mv: Move, piece: PieceKind, eval: i32) -> Result<NodeId, TreeError> {
        self.add_edge(parent, mv, piece, None, eval)
    }

    /// Add a capture of `victim` from `parent`. Its exchange value defaults
    /// to the victim's value; override with [`set_see`](Self::set_see).
    pub fn add_capture(
        &mut self,
        parent: NodeId,
        mv: Move,
        piece: PieceKind,
        victim: PieceKind,
        eval: i32,
    ) -> Result<NodeId, TreeError> {
        self.add_edge(parent, mv, piece, Some(victim), eval)
    }

    /// Override the exchange value of an existing edge.
    pub fn set_see(&mut self, parent: NodeId, mv: Move, see: i32) -> Result<(), TreeError> {
        self.edge_mut(parent, mv)?.see = see;
        Ok(())
    }

    /// Mark an edge as pseudo-legal but leaving the mover in check.
    pub fn set_illegal(&mut self, parent: NodeId, mv: Move) -> Result<(), TreeError> {
        self.edge_mut(parent, mv)?.legal = false;
        Ok(())
    }

    /// Mark whether the side to move at `node` is in check.
    pub fn set_in_check(&mut self, node: NodeId, in_check: bool) -> Result<(), TreeError> {
        self.node_mut(node)?.in_check = in_check;
        Ok(())
    }

    /// Set the game phase reported at `node`.
    pub fn set_phase(&mut self, node: NodeId, phase: f32) -> Result<(), TreeError> {
        self.node_mut(node)?.phase = phase.clamp(0.0, 1.0);
        Ok(())
    }

    /// Mark `node` as drawn by rule.
    pub fn set_draw(&mut self, node: NodeId, draw: bool) -> Result<(), TreeError> {
        self.node_mut(node)?.draw = draw;
        Ok(())
    }

    fn next_random(&mut self) -> u64 {
        let (value, next) = xorshift64(self.rng);
        self.rng = next;
        value
    }

    fn push_node(&mut self, eval: i32, phase: f32) -> usize {
        let key = self.next_random();
        self.nodes.push(Node {
            key,
            eval,
            in_check: false,
            phase,
            draw: false,
            edges: Vec::new(),
        });
        self.nodes.len() - 1
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes
            .get_mut(node.0)
            .ok_or(TreeError::UnknownNode { node: node.0 })
    }

    fn edge_mut(&mut self, parent: NodeId, mv: Move) -> Result<&mut Edge, TreeError> {
        self.node_mut(parent)?
            .edges
            .iter_mut()
            .find(|e| e.mv == mv)
            .ok_or(TreeError::UnknownMove { node: parent.0, mv })
    }

    fn add_edge(
        &mut self,
        parent: NodeId,
        mv: Move,
        piece: PieceKind,
        captured: Option<PieceKind>,
        eval: i32,
    ) -> Result<NodeId, TreeError> {
        if mv.is_null() {
            return Err(TreeError::NullMove);
        }
        let parent_node = self
            .nodes
            .get(parent.0)
            .ok_or(TreeError::UnknownNode { node: parent.0 })?;
        if parent_node.edges.iter().any(|e| e.mv == mv) {
            return Err(TreeError::DuplicateMove { node: parent.0, mv });
        }

        let phase = parent_node.phase;
        let child = self.push_node(eval, phase);
        let see = captured.map_or(0, PieceKind::value) + promotion_gain(mv);
        self.nodes[parent.0].edges.push(Edge {
            mv,
            piece,
            captured,
            see,
            legal: true,
            child,
        });
        Ok(NodeId(child))
    }

    fn edge(&self, mv: Move) -> Option<&Edge> {
        self.nodes[self.current].edges.iter().find(|e| e.mv == mv)
    }
}

/// Material a promotion adds on top of whatever it captures.
fn promotion_gain(mv: Move) -> i32 {
    mv.promotion_piece()
        .map_or(0, |p| p.to_piece_kind().value() - PieceKind::Pawn.value())
}

fn random_edge(slot: usize, r: u64, child: usize) -> Edge {
    let source = Square::from_index_unchecked(slot as u8);
    let mut dest_index = ((r >> 8) % 64) as u8;
    if dest_index as usize == slot {
        dest_index = (dest_index + 1) % 64;
    }
    let dest = Square::from_index_unchecked(dest_index);
    let piece = PieceKind::ALL[((r >> 16) % 5) as usize];

    let (mv, captured) = match (r >> 24) % 16 {
        0..=3 => {
            let victim = PieceKind::ALL[((r >> 32) % 5) as usize];
            (Move::capture(source, dest), Some(victim))
        }
        4 if piece == PieceKind::Pawn => (Move::promotion(source, dest, PromotionPiece::Queen, false), None),
        _ => (Move::quiet(source, dest), None),
    };

    let defended = (r >> 40) % 3 == 0;
    let see = match captured {
        Some(victim) if defended => victim.value() - piece.value(),
        Some(victim) => victim.value(),
        None => promotion_gain(mv),
    };

    Edge {
        mv,
        piece,
        captured,
        see,
        legal: (r >> 48) % 23 != 0,
        child,
    }
}

impl Position for GameTree {
    fn side_to_move(&self) -> Color {
        self.side
    }

    fn key(&self) -> u64 {
        let key = self.nodes[self.current].key;
        match self.side {
            Color::White => key,
            Color::Black => key ^ SIDE_KEY,
        }
    }

    fn generate_moves(&self) -> Vec<Move> {
        self.nodes[self.current].edges.iter().map(|e| e.mv).collect()
    }

    fn is_pseudo_legal(&self, mv: Move) -> bool {
        !mv.is_null() && self.edge(mv).is_some()
    }

    fn moved_piece(&self, mv: Move) -> Option<PieceKind> {
        self.edge(mv).map(|e| e.piece)
    }

    fn captured_piece(&self, mv: Move) -> Option<PieceKind> {
        self.edge(mv).and_then(|e| e.captured)
    }

    fn make_move(&mut self, mv: Move) -> bool {
        let from = self.current;
        self.steps.push(Step::Move { from, mv });
        self.side = !self.side;
        match self.edge_at(from, mv) {
            Some((child, legal)) => {
                self.current = child;
                legal
            }
            None => {
                warn!(%mv, node = from, "make_move called with a move the node does not have");
                false
            }
        }
    }

    fn unmake_move(&mut self, mv: Move) {
        let last = self.steps.last().copied();
        debug_assert!(
            matches!(last, Some(Step::Move { .. })),
            "unmake_move({mv}) does not match last step {last:?}"
        );
        let Some(Step::Move { from, mv: made }) = last else {
            return;
        };
        debug_assert_eq!(made, mv, "unmake_move out of order");
        self.steps.pop();
        self.current = from;
        self.side = !self.side;
    }

    fn make_null_move(&mut self) {
        self.steps.push(Step::Null);
        self.side = !self.side;
    }

    fn unmake_null_move(&mut self) {
        let last = self.steps.last().copied();
        debug_assert!(
            matches!(last, Some(Step::Null)),
            "unmake_null_move does not match last step {last:?}"
        );
        if !matches!(last, Some(Step::Null)) {
            return;
        }
        self.steps.pop();
        self.side = !self.side;
    }

    fn in_check(&self) -> bool {
        // Passing the turn hands the move to the side that was not in check.
        !matches!(self.steps.last(), Some(Step::Null)) && self.nodes[self.current].in_check
    }

    fn phase(&self) -> f32 {
        self.nodes[self.current].phase
    }

    fn evaluate(&self) -> i32 {
        let eval = self.nodes[self.current].eval;
        match self.side {
            Color::White => eval,
            Color::Black => -eval,
        }
    }

    fn see(&self, mv: Move) -> i32 {
        self.edge(mv).map_or(0, |e| e.see)
    }

    fn greatest_tactical_gain(&self) -> i32 {
        self.nodes[self.current]
            .edges
            .iter()
            .filter(|e| e.mv.is_tactical())
            .map(|e| e.captured.map_or(0, PieceKind::value) + promotion_gain(e.mv))
            .max()
            .unwrap_or(0)
    }

    fn is_draw(&self) -> bool {
        self.nodes[self.current].draw
    }
}

impl GameTree {
    fn edge_at(&self, node: usize, mv: Move) -> Option<(usize, bool)> {
        self.nodes[node]
            .edges
            .iter()
            .find(|e| e.mv == mv)
            .map(|e| (e.child, e.legal))
    }
}

impl fmt::Display for GameTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {} ({} to move), path:", self.current, self.side)?;
        if self.steps.is_empty() {
            write!(f, " (root)")?;
        }
        for step in &self.steps {
            match step {
                Step::Move { mv, .. } => write!(f, " {mv}")?,
                Step::Null => write!(f, " null")?,
            }
        }
        let node = &self.nodes[self.current];
        write!(f, "; eval {} check {} phase {:.2}", node.eval, node.in_check, node.phase)
    }
}
