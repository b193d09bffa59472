use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Countdown, PendingStep, SolvedRule, Status, Tally, fresh_rng};
use crate::catalog::ProblemKind;
use crate::result::GameResult;

pub const SOLVED_RULE: SolvedRule = SolvedRule::Majority { min_correct: 5 };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Square,
    Circle,
    Triangle,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Square, Shape::Circle, Shape::Triangle];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Square => "Square",
            Shape::Circle => "Circle",
            Shape::Triangle => "Triangle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong,
    TimeUp,
}

impl Feedback {
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Correct => "Correct!",
            Feedback::Wrong => "Wrong!",
            Feedback::TimeUp => "Time's Up!",
        }
    }
}

pub struct PuzzleGame {
    rng: StdRng,
    status: Status,
    target: Shape,
    options: Vec<Shape>,
    tally: Tally,
    countdown: Countdown,
    feedback: Option<Feedback>,
    result: Option<GameResult>,
}

impl PuzzleGame {
    pub fn new() -> Self {
        Self::with_rng(fresh_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        PuzzleGame {
            rng,
            status: Status::Idle,
            target: Shape::Square,
            options: Vec::new(),
            tally: Tally::default(),
            countdown: Countdown::default(),
            feedback: None,
            result: None,
        }
    }

    pub fn start(&mut self) {
        self.tally = Tally::default();
        self.countdown = Countdown::default();
        self.feedback = None;
        self.result = None;
        self.status = Status::Active;
        self.next_target();
        tracing::info!("shape puzzle run started");
    }

    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.options.clear();
        self.tally = Tally::default();
        self.countdown = Countdown::default();
        self.feedback = None;
        self.result = None;
    }

    fn next_target(&mut self) {
        self.target = Shape::random(&mut self.rng);
        let mut options = Shape::ALL.to_vec();
        options.shuffle(&mut self.rng);
        self.options = options;
    }

    pub fn submit(&mut self, shape: Shape) {
        if self.status != Status::Active {
            return;
        }
        let is_correct = shape == self.target;
        self.tally.record(is_correct);
        self.feedback = Some(if is_correct {
            Feedback::Correct
        } else {
            Feedback::Wrong
        });
        self.next_target();
    }

    pub fn tick(&mut self) {
        if self.status != Status::Active {
            return;
        }
        if self.countdown.tick() {
            self.status = Status::Ended;
            self.feedback = Some(Feedback::TimeUp);
            self.result = Some(GameResult::new(ProblemKind::Puzzle, self.tally, 0));
            tracing::info!(correct = self.tally.correct(), "shape puzzle run ended");
        }
    }

    pub fn target(&self) -> Shape {
        self.target
    }

    pub fn options(&self) -> &[Shape] {
        &self.options
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn pending_step(&self) -> Option<PendingStep> {
        None
    }

    pub fn run_step(&mut self, _id: u64) {}

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }
}

impl Default for PuzzleGame {
    fn default() -> Self {
        Self::new()
    }
}
