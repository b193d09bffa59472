use rand::Rng;
use rand::rngs::StdRng;

use super::{PendingStep, SolvedRule, Status, Steps, Tally, fresh_rng};
use crate::catalog::ProblemKind;
use crate::result::GameResult;

pub const SOLVED_RULE: SolvedRule = SolvedRule::Share { percent: 70 };
pub const GRID_SIZE: usize = 3;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;
pub const MAX_ROUNDS: u32 = 10;
const SHOW_MS: u64 = 1000;
const GAP_MS: u64 = 200;
const FEEDBACK_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    ShowFirst,
    Gap,
    ShowSecond,
    Input,
    Feedback { correct: bool },
}

impl Phase {
    pub fn message(self) -> &'static str {
        match self {
            Phase::Input => "Select where the square FIRST appeared",
            Phase::Feedback { correct: true } => "Correct!",
            Phase::Feedback { correct: false } => "Incorrect!",
            _ => "",
        }
    }
}

pub struct NBackGame {
    rng: StdRng,
    status: Status,
    phase: Phase,
    round: u32,
    first: usize,
    second: usize,
    tally: Tally,
    steps: Steps,
    result: Option<GameResult>,
}

impl NBackGame {
    pub fn new() -> Self {
        Self::with_rng(fresh_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        NBackGame {
            rng,
            status: Status::Idle,
            phase: Phase::ShowFirst,
            round: 1,
            first: 0,
            second: 0,
            tally: Tally::default(),
            steps: Steps::default(),
            result: None,
        }
    }

    pub fn start(&mut self) {
        self.round = 1;
        self.tally = Tally::default();
        self.result = None;
        self.status = Status::Active;
        self.start_round();
        tracing::info!("2-back run started");
    }

    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.phase = Phase::ShowFirst;
        self.round = 1;
        self.tally = Tally::default();
        self.steps.clear();
        self.result = None;
    }

    fn start_round(&mut self) {
        self.first = self.rng.random_range(0..CELL_COUNT);
        self.second = (self.first + self.rng.random_range(1..CELL_COUNT)) % CELL_COUNT;
        self.phase = Phase::ShowFirst;
        self.steps.schedule(SHOW_MS);
        tracing::debug!(round = self.round, "2-back round started");
    }

    pub fn run_step(&mut self, id: u64) {
        if self.status != Status::Active || !self.steps.take(id) {
            return;
        }
        match self.phase {
            Phase::ShowFirst => {
                self.phase = Phase::Gap;
                self.steps.schedule(GAP_MS);
            }
            Phase::Gap => {
                self.phase = Phase::ShowSecond;
                self.steps.schedule(SHOW_MS);
            }
            Phase::ShowSecond => self.phase = Phase::Input,
            Phase::Feedback { .. } => {
                if self.round >= MAX_ROUNDS {
                    self.finish();
                } else {
                    self.round += 1;
                    self.start_round();
                }
            }
            Phase::Input => {}
        }
    }

    pub fn select(&mut self, cell: usize) {
        if self.status != Status::Active || self.phase != Phase::Input {
            return;
        }
        let correct = cell == self.first;
        self.tally.record(correct);
        self.phase = Phase::Feedback { correct };
        self.steps.schedule(FEEDBACK_MS);
    }

    fn finish(&mut self) {
        self.status = Status::Ended;
        let result = GameResult::new(ProblemKind::NBack, self.tally, 0);
        tracing::info!(score = result.correct_answers, "2-back run ended");
        self.result = Some(result);
    }

    /// Round-based: the clock does not drive this game.
    pub fn tick(&mut self) {}

    /// Cell currently lit, if any.
    pub fn lit_cell(&self) -> Option<usize> {
        match self.phase {
            Phase::ShowFirst if self.status == Status::Active => Some(self.first),
            Phase::ShowSecond if self.status == Status::Active => Some(self.second),
            _ => None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn score(&self) -> u32 {
        self.tally.correct()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn pending_step(&self) -> Option<PendingStep> {
        self.steps.pending()
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }
}

impl Default for NBackGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;

    use super::*;

    fn fire(game: &mut NBackGame) -> Duration {
        let step = game.pending_step().expect("a step is pending");
        game.run_step(step.id);
        step.delay
    }

    fn play_round(game: &mut NBackGame, answer_correctly: bool) {
        let first = game.lit_cell().unwrap();
        assert_eq!(fire(game), Duration::from_millis(SHOW_MS));
        assert_eq!(game.lit_cell(), None);
        assert_eq!(fire(game), Duration::from_millis(GAP_MS));
        let second = game.lit_cell().unwrap();
        assert_ne!(first, second);
        assert_eq!(fire(game), Duration::from_millis(SHOW_MS));
        assert_eq!(game.phase(), Phase::Input);
        assert!(game.pending_step().is_none());

        let pick = if answer_correctly { first } else { (first + 1) % CELL_COUNT };
        game.select(pick);
        assert_eq!(game.phase(), Phase::Feedback { correct: answer_correctly });
        fire(game);
    }

    #[test]
    fn seven_of_ten_solves_the_problem() {
        let mut game = NBackGame::with_rng(StdRng::seed_from_u64(12));
        game.start();
        for round in 0..MAX_ROUNDS {
            assert_eq!(game.round(), round + 1);
            play_round(&mut game, round < 7);
        }
        assert_eq!(game.status(), Status::Ended);
        let result = game.result().unwrap();
        assert_eq!(result.total_problems, MAX_ROUNDS);
        assert_eq!(result.correct_answers, 7);
        assert_eq!(result.incorrect_answers, 3);
        assert!(SOLVED_RULE.is_met(result));
    }

    #[test]
    fn six_of_ten_does_not_solve() {
        let mut game = NBackGame::with_rng(StdRng::seed_from_u64(13));
        game.start();
        for round in 0..MAX_ROUNDS {
            play_round(&mut game, round < 6);
        }
        assert!(!SOLVED_RULE.is_met(game.result().unwrap()));
    }

    #[test]
    fn selection_outside_input_phase_is_ignored() {
        let mut game = NBackGame::with_rng(StdRng::seed_from_u64(14));
        game.start();
        game.select(0);
        assert_eq!(game.tally().total(), 0);
        assert_eq!(game.phase(), Phase::ShowFirst);
    }

    #[test]
    fn ticks_do_not_affect_rounds() {
        let mut game = NBackGame::with_rng(StdRng::seed_from_u64(15));
        game.start();
        for _ in 0..100 {
            game.tick();
        }
        assert_eq!(game.status(), Status::Active);
        assert_eq!(game.round(), 1);
    }

    #[test]
    fn stale_step_is_ignored() {
        let mut game = NBackGame::with_rng(StdRng::seed_from_u64(16));
        game.start();
        let stale = game.pending_step().unwrap().id;
        fire(&mut game);
        assert_eq!(game.phase(), Phase::Gap);
        game.run_step(stale);
        assert_eq!(game.phase(), Phase::Gap);
        assert!(game.pending_step().is_some_and(|step| step.id != stale));
    }
}
