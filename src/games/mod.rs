//! Mini-game controllers.
//!
//! Every controller is a synchronous state machine: `Idle → Active → Ended`.
//! Controllers never own a timer. The shell calls [`Controller::tick`] once a
//! second while a run is active and fires each [`PendingStep`] after its
//! delay; a step whose id no longer matches is ignored.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::ProblemKind;
use crate::result::GameResult;

pub mod cards;
pub mod math;
pub mod nback;
pub mod pathfinder;
pub mod puzzle;
pub mod swift;

pub use cards::CardGame;
pub use math::MathGame;
pub use nback::NBackGame;
pub use pathfinder::PathfinderGame;
pub use puzzle::PuzzleGame;
pub use swift::SwiftVisionGame;

/// Length of a countdown run.
pub const ROUND_SECONDS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Active,
    Ended,
}

/// Correct/incorrect counters of a run. The total is always derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Tally {
    correct: u32,
    incorrect: u32,
}

impl Tally {
    pub fn from_counts(correct: u32, incorrect: u32) -> Self {
        Tally { correct, incorrect }
    }

    pub fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.correct = self.correct.saturating_add(1);
        } else {
            self.incorrect = self.incorrect.saturating_add(1);
        }
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn total(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }
}

/// Condition a finished run must meet for its problem to be marked solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolvedRule {
    /// More correct than incorrect answers, and more than `min_correct` correct.
    Majority { min_correct: u32 },
    /// At least `percent` of all rounds answered correctly (floored).
    Share { percent: u32 },
    /// Finishing the run is enough.
    Completion,
}

impl SolvedRule {
    pub fn is_met(self, result: &GameResult) -> bool {
        match self {
            SolvedRule::Majority { min_correct } => {
                result.correct_answers > result.incorrect_answers
                    && result.correct_answers > min_correct
            }
            SolvedRule::Share { percent } => {
                let needed = result.total_problems.saturating_mul(percent) / 100;
                result.correct_answers >= needed
            }
            SolvedRule::Completion => true,
        }
    }
}

/// A scripted phase delay the shell must fire with [`Controller::run_step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingStep {
    pub id: u64,
    pub delay: Duration,
}

/// Single-slot step scheduler; scheduling replaces whatever was pending.
#[derive(Debug, Default)]
pub(crate) struct Steps {
    next_id: u64,
    pending: Option<PendingStep>,
}

impl Steps {
    pub(crate) fn schedule(&mut self, delay_ms: u64) -> u64 {
        self.next_id = self.next_id.wrapping_add(1);
        self.pending = Some(PendingStep {
            id: self.next_id,
            delay: Duration::from_millis(delay_ms),
        });
        self.next_id
    }

    /// Consumes the pending step if `id` is the one waiting.
    pub(crate) fn take(&mut self, id: u64) -> bool {
        if self.pending.is_some_and(|step| step.id == id) {
            self.pending = None;
            return true;
        }
        false
    }

    pub(crate) fn clear(&mut self) {
        self.pending = None;
    }

    pub(crate) fn pending(&self) -> Option<PendingStep> {
        self.pending
    }
}

/// Seconds left in a countdown run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Countdown { remaining: seconds }
    }

    /// Returns `true` on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Countdown::new(ROUND_SECONDS)
    }
}

pub(crate) fn fresh_rng() -> StdRng {
    StdRng::from_os_rng()
}

pub enum Controller {
    Math(MathGame),
    Puzzle(PuzzleGame),
    Cards(CardGame),
    NBack(NBackGame),
    Swift(SwiftVisionGame),
    Pathfinder(PathfinderGame),
}

macro_rules! each_game {
    ($controller:expr, $game:ident => $body:expr) => {
        match $controller {
            Controller::Math($game) => $body,
            Controller::Puzzle($game) => $body,
            Controller::Cards($game) => $body,
            Controller::NBack($game) => $body,
            Controller::Swift($game) => $body,
            Controller::Pathfinder($game) => $body,
        }
    };
}

impl Controller {
    pub fn for_kind(kind: ProblemKind) -> Self {
        Self::with_rng(kind, fresh_rng())
    }

    pub fn seeded(kind: ProblemKind, seed: u64) -> Self {
        Self::with_rng(kind, StdRng::seed_from_u64(seed))
    }

    fn with_rng(kind: ProblemKind, rng: StdRng) -> Self {
        match kind {
            ProblemKind::Math => Controller::Math(MathGame::with_rng(rng)),
            ProblemKind::Puzzle => Controller::Puzzle(PuzzleGame::with_rng(rng)),
            ProblemKind::Card => Controller::Cards(CardGame::with_rng(rng)),
            ProblemKind::NBack => Controller::NBack(NBackGame::with_rng(rng)),
            ProblemKind::SwiftVision => Controller::Swift(SwiftVisionGame::with_rng(rng)),
            ProblemKind::Pathfinder => Controller::Pathfinder(PathfinderGame::with_rng(rng)),
        }
    }

    pub fn kind(&self) -> ProblemKind {
        match self {
            Controller::Math(_) => ProblemKind::Math,
            Controller::Puzzle(_) => ProblemKind::Puzzle,
            Controller::Cards(_) => ProblemKind::Card,
            Controller::NBack(_) => ProblemKind::NBack,
            Controller::Swift(_) => ProblemKind::SwiftVision,
            Controller::Pathfinder(_) => ProblemKind::Pathfinder,
        }
    }

    pub fn solved_rule(&self) -> SolvedRule {
        match self {
            Controller::Math(_) => math::SOLVED_RULE,
            Controller::Puzzle(_) => puzzle::SOLVED_RULE,
            Controller::Cards(_) => cards::SOLVED_RULE,
            Controller::NBack(_) => nback::SOLVED_RULE,
            Controller::Swift(_) => swift::SOLVED_RULE,
            Controller::Pathfinder(_) => pathfinder::SOLVED_RULE,
        }
    }

    pub fn start(&mut self) {
        each_game!(self, game => game.start())
    }

    pub fn reset(&mut self) {
        each_game!(self, game => game.reset())
    }

    pub fn status(&self) -> Status {
        each_game!(self, game => game.status())
    }

    pub fn tally(&self) -> Tally {
        each_game!(self, game => game.tally())
    }

    /// One second of wall-clock time has passed.
    pub fn tick(&mut self) {
        each_game!(self, game => game.tick())
    }

    pub fn pending_step(&self) -> Option<PendingStep> {
        each_game!(self, game => game.pending_step())
    }

    pub fn run_step(&mut self, id: u64) {
        each_game!(self, game => game.run_step(id))
    }

    pub fn result(&self) -> Option<&GameResult> {
        each_game!(self, game => game.result())
    }

    /// Seconds shown in the header: remaining for countdown games, elapsed
    /// for the stopwatch, `None` for round-based games.
    pub fn clock_seconds(&self) -> Option<u32> {
        match self {
            Controller::Math(game) => Some(game.time_remaining()),
            Controller::Puzzle(game) => Some(game.time_remaining()),
            Controller::Cards(game) => Some(game.time_remaining()),
            Controller::Swift(game) => Some(game.time_remaining()),
            Controller::Pathfinder(game) => Some(game.time_elapsed()),
            Controller::NBack(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(correct: u32, incorrect: u32) -> GameResult {
        GameResult::at(ProblemKind::Math, Tally::from_counts(correct, incorrect), 0, 0)
    }

    #[test]
    fn tally_total_is_sum() {
        let mut tally = Tally::default();
        tally.record(true);
        tally.record(false);
        tally.record(true);
        assert_eq!((tally.correct(), tally.incorrect(), tally.total()), (2, 1, 3));
    }

    #[test]
    fn majority_rule() {
        let rule = SolvedRule::Majority { min_correct: 0 };
        assert!(rule.is_met(&result(1, 0)));
        assert!(!rule.is_met(&result(0, 0)));
        assert!(!rule.is_met(&result(3, 3)));

        let strict = SolvedRule::Majority { min_correct: 5 };
        assert!(!strict.is_met(&result(5, 0)));
        assert!(strict.is_met(&result(6, 5)));
    }

    #[test]
    fn share_rule_floors_threshold() {
        let rule = SolvedRule::Share { percent: 70 };
        assert!(rule.is_met(&result(7, 3)));
        assert!(!rule.is_met(&result(6, 4)));
    }

    #[test]
    fn countdown_reports_expiry_once() {
        let mut countdown = Countdown::new(2);
        assert!(!countdown.tick());
        assert!(countdown.tick());
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn steps_replace_and_reject_stale_ids() {
        let mut steps = Steps::default();
        let first = steps.schedule(100);
        let second = steps.schedule(200);
        assert!(!steps.take(first));
        assert_eq!(steps.pending().map(|step| step.delay), Some(Duration::from_millis(200)));
        assert!(steps.take(second));
        assert!(!steps.take(second));
    }

    #[test]
    fn controller_reports_kind_and_rule() {
        for kind in ProblemKind::ALL {
            let controller = Controller::seeded(kind, 1);
            assert_eq!(controller.kind(), kind);
            assert_eq!(controller.status(), Status::Idle);
        }
        assert_eq!(
            Controller::seeded(ProblemKind::Pathfinder, 1).solved_rule(),
            SolvedRule::Completion
        );
    }
}
