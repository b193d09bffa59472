use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::puzzle::Shape;
use super::{Countdown, PendingStep, SolvedRule, Status, Steps, Tally, fresh_rng};
use crate::catalog::ProblemKind;
use crate::result::GameResult;

pub const SOLVED_RULE: SolvedRule = SolvedRule::Majority { min_correct: 0 };
pub const SEQUENCE_LEN: usize = 3;
pub const OPTION_COUNT: usize = 4;
const MEMORIZE_MS: u64 = 2000;
const FEEDBACK_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardColor {
    Red,
    Green,
    Blue,
    Yellow,
}

impl CardColor {
    pub const ALL: [CardColor; 4] = [
        CardColor::Red,
        CardColor::Green,
        CardColor::Blue,
        CardColor::Yellow,
    ];

    pub fn rgb(self) -> (f64, f64, f64) {
        match self {
            CardColor::Red => (0.90, 0.27, 0.27),
            CardColor::Green => (0.30, 0.75, 0.40),
            CardColor::Blue => (0.26, 0.52, 0.96),
            CardColor::Yellow => (0.98, 0.80, 0.20),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    pub shape: Shape,
    pub color: CardColor,
}

impl Card {
    pub fn random(rng: &mut impl Rng) -> Self {
        Card {
            shape: Shape::random(rng),
            color: CardColor::ALL[rng.random_range(0..CardColor::ALL.len())],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Memorize,
    Recall,
    Feedback { correct: bool },
}

impl Phase {
    pub fn message(self) -> &'static str {
        match self {
            Phase::Memorize => "Memorize!",
            Phase::Recall => "Repeat the sequence",
            Phase::Feedback { correct: true } => "Correct!",
            Phase::Feedback { correct: false } => "Wrong!",
        }
    }
}

pub struct CardGame {
    rng: StdRng,
    status: Status,
    phase: Phase,
    sequence: Vec<Card>,
    options: Vec<Card>,
    entered: Vec<Card>,
    tally: Tally,
    countdown: Countdown,
    steps: Steps,
    result: Option<GameResult>,
}

impl CardGame {
    pub fn new() -> Self {
        Self::with_rng(fresh_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        CardGame {
            rng,
            status: Status::Idle,
            phase: Phase::Memorize,
            sequence: Vec::new(),
            options: Vec::new(),
            entered: Vec::new(),
            tally: Tally::default(),
            countdown: Countdown::default(),
            steps: Steps::default(),
            result: None,
        }
    }

    pub fn start(&mut self) {
        self.tally = Tally::default();
        self.countdown = Countdown::default();
        self.result = None;
        self.status = Status::Active;
        self.next_sequence();
        tracing::info!("memory sequence run started");
    }

    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.phase = Phase::Memorize;
        self.sequence.clear();
        self.options.clear();
        self.entered.clear();
        self.tally = Tally::default();
        self.countdown = Countdown::default();
        self.steps.clear();
        self.result = None;
    }

    fn next_sequence(&mut self) {
        let sequence: Vec<Card> = (0..SEQUENCE_LEN).map(|_| Card::random(&mut self.rng)).collect();
        let mut options = sequence.clone();
        while options.len() < OPTION_COUNT {
            options.push(Card::random(&mut self.rng));
        }
        options.shuffle(&mut self.rng);

        self.sequence = sequence;
        self.options = options;
        self.entered.clear();
        self.phase = Phase::Memorize;
        self.steps.schedule(MEMORIZE_MS);
    }

    pub fn select(&mut self, card: Card) {
        if self.status != Status::Active || self.phase != Phase::Recall {
            return;
        }
        let Some(expected) = self.sequence.get(self.entered.len()) else {
            return;
        };
        if *expected != card {
            self.settle(false);
            return;
        }
        self.entered.push(card);
        if self.entered.len() == self.sequence.len() {
            self.settle(true);
        }
    }

    fn settle(&mut self, correct: bool) {
        self.tally.record(correct);
        self.phase = Phase::Feedback { correct };
        self.steps.schedule(FEEDBACK_MS);
    }

    pub fn run_step(&mut self, id: u64) {
        if self.status != Status::Active || !self.steps.take(id) {
            return;
        }
        match self.phase {
            Phase::Memorize => {
                self.phase = Phase::Recall;
                tracing::debug!("memory sequence: recall phase");
            }
            Phase::Feedback { .. } => self.next_sequence(),
            Phase::Recall => {}
        }
    }

    pub fn tick(&mut self) {
        if self.status != Status::Active {
            return;
        }
        if self.countdown.tick() {
            self.status = Status::Ended;
            self.steps.clear();
            self.result = Some(GameResult::new(ProblemKind::Card, self.tally, 0));
            tracing::info!(correct = self.tally.correct(), "memory sequence run ended");
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sequence(&self) -> &[Card] {
        &self.sequence
    }

    pub fn options(&self) -> &[Card] {
        &self.options
    }

    pub fn entered(&self) -> &[Card] {
        &self.entered
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
        self.steps.pending()
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }
}

impl Default for CardGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;

    use super::*;

    fn started(seed: u64) -> CardGame {
        let mut game = CardGame::with_rng(StdRng::seed_from_u64(seed));
        game.start();
        game
    }

    fn fire(game: &mut CardGame) {
        let step = game.pending_step().expect("a step is pending");
        game.run_step(step.id);
    }

    #[test]
    fn options_hold_the_whole_sequence() {
        let game = started(1);
        assert_eq!(game.sequence().len(), SEQUENCE_LEN);
        assert_eq!(game.options().len(), OPTION_COUNT);
        for card in game.sequence() {
            assert!(game.options().contains(card));
        }
    }

    #[test]
    fn input_is_locked_while_memorizing() {
        let mut game = started(2);
        assert_eq!(game.phase(), Phase::Memorize);
        assert_eq!(
            game.pending_step().map(|step| step.delay),
            Some(Duration::from_millis(MEMORIZE_MS))
        );
        let first = game.sequence()[0];
        game.select(first);
        assert!(game.entered().is_empty());
        assert_eq!(game.tally().total(), 0);
    }

    #[test]
    fn repeating_the_sequence_scores_and_moves_on() {
        let mut game = started(3);
        fire(&mut game);
        assert_eq!(game.phase(), Phase::Recall);

        let sequence = game.sequence().to_vec();
        for card in &sequence {
            game.select(*card);
        }
        assert_eq!(game.phase(), Phase::Feedback { correct: true });
        assert_eq!(game.tally().correct(), 1);

        fire(&mut game);
        assert_eq!(game.phase(), Phase::Memorize);
        assert!(game.entered().is_empty());
    }

    #[test]
    fn wrong_card_ends_the_attempt() {
        let mut game = started(4);
        fire(&mut game);
        let expected = game.sequence()[0];
        let wrong = Card {
            shape: expected.shape,
            color: CardColor::ALL
                .into_iter()
                .find(|color| *color != expected.color)
                .unwrap(),
        };
        game.select(wrong);
        assert_eq!(game.phase(), Phase::Feedback { correct: false });
        assert_eq!(game.tally().incorrect(), 1);
        assert_eq!(game.tally().total(), 1);
    }

    #[test]
    fn stale_step_is_ignored() {
        let mut game = started(5);
        let stale = game.pending_step().unwrap().id;
        fire(&mut game);
        let sequence = game.sequence().to_vec();
        for card in &sequence {
            game.select(*card);
        }
        game.run_step(stale);
        assert_eq!(game.phase(), Phase::Feedback { correct: true });
    }

    #[test]
    fn countdown_ends_run_and_drops_pending_step() {
        let mut game = started(6);
        for _ in 0..30 {
            game.tick();
        }
        assert_eq!(game.status(), Status::Ended);
        assert!(game.pending_step().is_none());
        assert_eq!(game.result().unwrap().game_type, "Memory Sequence");
    }
}
