//! Trail-making: connect `1, A, 2, B, …` in order on a scattered board.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{PendingStep, SolvedRule, Status, Tally, fresh_rng};
use crate::catalog::ProblemKind;
use crate::result::GameResult;

pub const SOLVED_RULE: SolvedRule = SolvedRule::Completion;
pub const PAIR_COUNT: usize = 10;
pub const MIN_DISTANCE: f64 = 0.12;
pub const X_RANGE: (u32, u32) = (10, 90);
pub const Y_RANGE: (u32, u32) = (15, 85);
const ATTEMPTS_PER_NODE: u32 = 100;
const LAYOUT_ATTEMPTS: u32 = 20;
const LATTICE_COLS: usize = 5;
const LATTICE_ROWS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NodeState {
    #[default]
    Normal,
    Correct,
    Wrong,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub state: NodeState,
}

/// `1, A, 2, B, …, 10, J`.
pub fn trail_sequence() -> Vec<String> {
    (0..PAIR_COUNT)
        .flat_map(|idx| {
            let letter = char::from(b'A' + idx as u8);
            [(idx + 1).to_string(), letter.to_string()]
        })
        .collect()
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn random_layout(rng: &mut impl Rng, count: usize) -> Option<Vec<(f64, f64)>> {
    let mut placed: Vec<(f64, f64)> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut spot = None;
        for _ in 0..ATTEMPTS_PER_NODE {
            let candidate = (
                rng.random_range(X_RANGE.0..=X_RANGE.1) as f64 / 100.0,
                rng.random_range(Y_RANGE.0..=Y_RANGE.1) as f64 / 100.0,
            );
            if placed.iter().all(|other| distance(*other, candidate) >= MIN_DISTANCE) {
                spot = Some(candidate);
                break;
            }
        }
        placed.push(spot?);
    }
    Some(placed)
}

/// Shuffled cells of a lattice spanning the placement bounds. Its spacing
/// is wider than `MIN_DISTANCE`, so it always succeeds.
fn lattice_layout(rng: &mut impl Rng, count: usize) -> Vec<(f64, f64)> {
    let (x0, x1) = (X_RANGE.0 as f64 / 100.0, X_RANGE.1 as f64 / 100.0);
    let (y0, y1) = (Y_RANGE.0 as f64 / 100.0, Y_RANGE.1 as f64 / 100.0);
    let step_x = (x1 - x0) / (LATTICE_COLS - 1) as f64;
    let step_y = (y1 - y0) / (LATTICE_ROWS - 1) as f64;
    let mut cells: Vec<(f64, f64)> = (0..LATTICE_ROWS)
        .flat_map(|row| {
            (0..LATTICE_COLS).map(move |col| {
                (
                    (x0 + col as f64 * step_x).min(x1),
                    (y0 + row as f64 * step_y).min(y1),
                )
            })
        })
        .collect();
    cells.shuffle(rng);
    cells.truncate(count);
    cells
}

/// Places one node per label, no two closer than `MIN_DISTANCE`.
pub fn generate_nodes(rng: &mut impl Rng, labels: &[String]) -> Vec<PathNode> {
    let positions = (0..LAYOUT_ATTEMPTS)
        .find_map(|_| random_layout(&mut *rng, labels.len()))
        .unwrap_or_else(|| {
            tracing::warn!("random node placement failed, using lattice layout");
            lattice_layout(&mut *rng, labels.len())
        });
    labels
        .iter()
        .zip(positions)
        .map(|(label, (x, y))| PathNode {
            label: label.clone(),
            x,
            y,
            state: NodeState::Normal,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Advanced,
    Solved,
    Missed,
    Ignored,
}

pub struct PathfinderGame {
    rng: StdRng,
    status: Status,
    sequence: Vec<String>,
    nodes: Vec<PathNode>,
    path: Vec<usize>,
    misses: u32,
    elapsed: u32,
    result: Option<GameResult>,
}

impl PathfinderGame {
    pub fn new() -> Self {
        Self::with_rng(fresh_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        PathfinderGame {
            rng,
            status: Status::Idle,
            sequence: trail_sequence(),
            nodes: Vec::new(),
            path: Vec::new(),
            misses: 0,
            elapsed: 0,
            result: None,
        }
    }

    pub fn start(&mut self) {
        self.nodes = generate_nodes(&mut self.rng, &self.sequence);
        self.path.clear();
        self.misses = 0;
        self.elapsed = 0;
        self.result = None;
        self.status = Status::Active;
        tracing::info!(nodes = self.nodes.len(), "pathfinder run started");
    }

    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.nodes.clear();
        self.path.clear();
        self.misses = 0;
        self.elapsed = 0;
        self.result = None;
    }

    pub fn tap(&mut self, index: usize) -> TapOutcome {
        if self.status != Status::Active {
            return TapOutcome::Ignored;
        }
        let Some(node) = self.nodes.get(index) else {
            return TapOutcome::Ignored;
        };
        if node.state == NodeState::Correct {
            return TapOutcome::Ignored;
        }
        let Some(expected) = self.sequence.get(self.path.len()) else {
            return TapOutcome::Ignored;
        };

        if node.label != *expected {
            self.misses = self.misses.saturating_add(1);
            self.nodes[index].state = NodeState::Wrong;
            return TapOutcome::Missed;
        }

        for node in &mut self.nodes {
            if node.state == NodeState::Wrong {
                node.state = NodeState::Normal;
            }
        }
        self.nodes[index].state = NodeState::Correct;
        self.path.push(index);

        if self.path.len() == self.sequence.len() {
            self.status = Status::Ended;
            let result = GameResult::new(
                ProblemKind::Pathfinder,
                Tally::from_counts(1, 0),
                u64::from(self.elapsed),
            );
            tracing::info!(seconds = self.elapsed, misses = self.misses, "pathfinder solved");
            self.result = Some(result);
            return TapOutcome::Solved;
        }
        TapOutcome::Advanced
    }

    /// Stopwatch: counts up while the trail is open.
    pub fn tick(&mut self) {
        if self.status == Status::Active {
            self.elapsed = self.elapsed.saturating_add(1);
        }
    }

    pub fn next_label(&self) -> Option<&str> {
        self.sequence.get(self.path.len()).map(String::as_str)
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Node indices in the order they were connected.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn time_elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tally(&self) -> Tally {
        if self.status == Status::Ended {
            Tally::from_counts(1, 0)
        } else {
            Tally::default()
        }
    }

    pub fn pending_step(&self) -> Option<PendingStep> {
        None
    }

    pub fn run_step(&mut self, _id: u64) {}

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }
}

impl Default for PathfinderGame {
    fn default() -> Self {
        Self::new()
    }
}
