use std::collections::BTreeMap;
use std::fmt;

use linkstate_core::{Distance, NodeId};
use serde::Serialize;

/// State of one destination in one round of the computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Cell {
    /// Best known distance so far and the node it was reached through.
    Tentative {
        distance: Distance,
        predecessor: NodeId,
    },
    /// No finite path known yet. `predecessor` is the node last examined.
    Unreached { predecessor: NodeId },
    /// Confirmed in an earlier round; no longer updated.
    Settled,
}

impl Cell {
    /// Finite tentative distance, if any.
    pub fn distance(&self) -> Option<Distance> {
        match self {
            Cell::Tentative { distance, .. } => Some(*distance),
            _ => None,
        }
    }

    pub fn predecessor(&self) -> Option<NodeId> {
        match self {
            Cell::Tentative { predecessor, .. } | Cell::Unreached { predecessor } => {
                Some(*predecessor)
            }
            Cell::Settled => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Cell::Settled)
    }
}

/// `distance,predecessor`, `INF,predecessor`, or empty once settled.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Tentative {
                distance,
                predecessor,
            } => write!(f, "{distance},{predecessor}"),
            Cell::Unreached { predecessor } => write!(f, "INF,{predecessor}"),
            Cell::Settled => Ok(()),
        }
    }
}

/// One round of the table: a cell per destination, keyed by node id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Round {
    cells: BTreeMap<NodeId, Cell>,
}

impl Round {
    pub(crate) fn insert(&mut self, node: NodeId, cell: Cell) {
        self.cells.insert(node, cell);
    }

    pub fn get(&self, node: NodeId) -> Option<&Cell> {
        self.cells.get(&node)
    }

    /// Cells in ascending destination order.
    pub fn cells(&self) -> impl Iterator<Item = (NodeId, &Cell)> {
        self.cells.iter().map(|(node, cell)| (*node, cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Every round of a run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StepTable {
    rounds: Vec<Round>,
}

impl StepTable {
    pub(crate) fn push(&mut self, round: Round) {
        self.rounds.push(round);
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    /// Cell of `node` in round `index`.
    pub fn cell(&self, index: usize, node: NodeId) -> Option<&Cell> {
        self.round(index).and_then(|r| r.get(node))
    }

    /// Cells of `node` across all rounds.
    pub fn column(&self, node: NodeId) -> impl Iterator<Item = Option<&Cell>> + '_ {
        self.rounds.iter().map(move |r| r.get(node))
    }

    /// First round in which `node` reads as settled.
    pub fn settled_at(&self, node: NodeId) -> Option<usize> {
        self.column(node)
            .position(|cell| cell.is_some_and(Cell::is_settled))
    }
}
