use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Countdown, PendingStep, SolvedRule, Status, Tally, fresh_rng};
use crate::catalog::ProblemKind;
use crate::result::GameResult;

pub const SOLVED_RULE: SolvedRule = SolvedRule::Majority { min_correct: 0 };
pub const OPTION_COUNT: usize = 4;
const WRONG_OFFSET: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathProblem {
    pub left: i32,
    pub right: i32,
    pub operation: Operation,
    pub answer: i32,
    pub options: Vec<i32>,
}

impl MathProblem {
    pub fn question_text(&self) -> String {
        format!("{} {} {} = ?", self.left, self.operation.symbol(), self.right)
    }
}

pub fn generate_problem(rng: &mut impl Rng, operation: Operation) -> MathProblem {
    let (left, right, answer) = match operation {
        Operation::Addition => {
            let left = rng.random_range(10..100);
            let right = rng.random_range(10..100);
            (left, right, left + right)
        }
        Operation::Subtraction => {
            let left = rng.random_range(50..200);
            let right = rng.random_range(10..left);
            (left, right, left - right)
        }
        Operation::Multiplication => {
            let left = rng.random_range(2..13);
            let right = rng.random_range(2..13);
            (left, right, left * right)
        }
        Operation::Division => {
            let divisor = rng.random_range(2..13);
            let quotient = rng.random_range(2..13);
            (divisor * quotient, divisor, quotient)
        }
    };
    MathProblem {
        left,
        right,
        operation,
        answer,
        options: generate_options(rng, answer),
    }
}

/// The correct answer plus distinct positive distractors near it, shuffled.
pub fn generate_options(rng: &mut impl Rng, answer: i32) -> Vec<i32> {
    let mut options = vec![answer];
    while options.len() < OPTION_COUNT {
        let candidate = answer + rng.random_range(-WRONG_OFFSET..=WRONG_OFFSET);
        if candidate > 0 && !options.contains(&candidate) {
            options.push(candidate);
        }
    }
    options.shuffle(rng);
    options
}

pub struct MathGame {
    rng: StdRng,
    status: Status,
    problem: Option<MathProblem>,
    tally: Tally,
    countdown: Countdown,
    result: Option<GameResult>,
}

impl MathGame {
    pub fn new() -> Self {
        Self::with_rng(fresh_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        MathGame {
            rng,
            status: Status::Idle,
            problem: None,
            tally: Tally::default(),
            countdown: Countdown::default(),
            result: None,
        }
    }

    pub fn start(&mut self) {
        self.tally = Tally::default();
        self.countdown = Countdown::default();
        self.result = None;
        self.status = Status::Active;
        self.next_problem();
        tracing::info!("math run started");
    }

    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.problem = None;
        self.tally = Tally::default();
        self.countdown = Countdown::default();
        self.result = None;
    }

    fn next_problem(&mut self) {
        let operation = Operation::ALL[self.rng.random_range(0..Operation::ALL.len())];
        self.problem = Some(generate_problem(&mut self.rng, operation));
    }

    pub fn submit(&mut self, answer: i32) {
        if self.status != Status::Active {
            return;
        }
        let Some(problem) = &self.problem else {
            return;
        };
        self.tally.record(answer == problem.answer);
        self.next_problem();
    }

    pub fn tick(&mut self) {
        if self.status != Status::Active {
            return;
        }
        if self.countdown.tick() {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.status = Status::Ended;
        let result = GameResult::new(ProblemKind::Math, self.tally, 0);
        tracing::info!(
            correct = result.correct_answers,
            incorrect = result.incorrect_answers,
            "math run ended"
        );
        self.result = Some(result);
    }

    pub fn problem(&self) -> Option<&MathProblem> {
        self.problem.as_ref()
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

impl Default for MathGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn division_always_has_integral_quotient() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let problem = generate_problem(&mut rng, Operation::Division);
            assert_eq!(problem.left % problem.right, 0);
            assert_eq!(problem.left / problem.right, problem.answer);
            assert!((2..=12).contains(&problem.answer));
        }
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let problem = generate_problem(&mut rng, Operation::Subtraction);
            assert!(problem.answer > 0);
            assert_eq!(problem.left - problem.right, problem.answer);
        }
    }

    #[test]
    fn options_are_distinct_positive_and_contain_answer() {
        let mut rng = StdRng::seed_from_u64(3);
        for operation in Operation::ALL {
            for _ in 0..100 {
                let problem = generate_problem(&mut rng, operation);
                assert_eq!(problem.options.len(), OPTION_COUNT);
                assert!(problem.options.contains(&problem.answer));
                assert!(problem.options.iter().all(|option| *option > 0));
                let mut unique = problem.options.clone();
                unique.sort_unstable();
                unique.dedup();
                assert_eq!(unique.len(), OPTION_COUNT);
            }
        }
    }

    #[test]
    fn question_text_uses_symbols() {
        let problem = MathProblem {
            left: 24,
            right: 6,
            operation: Operation::Division,
            answer: 4,
            options: vec![4, 5, 6, 7],
        };
        assert_eq!(problem.question_text(), "24 ÷ 6 = ?");
    }

    #[test]
    fn run_scores_answers_and_ends_after_thirty_ticks() {
        let mut game = MathGame::with_rng(StdRng::seed_from_u64(5));
        game.start();
        for _ in 0..5 {
            let answer = game.problem().unwrap().answer;
            game.submit(answer);
        }
        for _ in 0..2 {
            let answer = game.problem().unwrap().answer;
            game.submit(answer + 1000);
        }
        for _ in 0..29 {
            game.tick();
        }
        assert_eq!(game.status(), Status::Active);
        assert_eq!(game.time_remaining(), 1);
        game.tick();
        assert_eq!(game.status(), Status::Ended);

        let result = game.result().unwrap();
        assert_eq!(result.game_type, "Math Challenge");
        assert_eq!(result.total_problems, 7);
        assert_eq!(result.accuracy(), 71);
        assert_eq!(result.encouragement().key(), "result_good");
    }

    #[test]
    fn answers_after_the_end_are_ignored() {
        let mut game = MathGame::with_rng(StdRng::seed_from_u64(9));
        game.submit(1);
        assert_eq!(game.tally().total(), 0);
        game.start();
        for _ in 0..30 {
            game.tick();
        }
        game.submit(1);
        assert_eq!(game.tally().total(), 0);
        assert_eq!(game.result().unwrap().total_problems, 0);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut game = MathGame::with_rng(StdRng::seed_from_u64(1));
        game.start();
        game.reset();
        assert_eq!(game.status(), Status::Idle);
        assert!(game.problem().is_none());
        assert!(game.result().is_none());
        assert_eq!(game.time_remaining(), 30);
    }
}
