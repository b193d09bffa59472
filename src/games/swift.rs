use rand::Rng;
use rand::rngs::StdRng;

use super::{Countdown, PendingStep, SolvedRule, Status, Steps, Tally, fresh_rng};
use crate::catalog::ProblemKind;
use crate::result::GameResult;

pub const SOLVED_RULE: SolvedRule = SolvedRule::Majority { min_correct: 0 };
const SHOW_MS: u64 = 500;
const WAIT_MS: u64 = 1000;
const FEEDBACK_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CentralObject {
    Car,
    Truck,
}

impl CentralObject {
    pub const ALL: [CentralObject; 2] = [CentralObject::Car, CentralObject::Truck];

    pub fn name(self) -> &'static str {
        match self {
            CentralObject::Car => "Car",
            CentralObject::Truck => "Truck",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

impl Location {
    pub const ALL: [Location; 8] = [
        Location::Top,
        Location::TopRight,
        Location::Right,
        Location::BottomRight,
        Location::Bottom,
        Location::BottomLeft,
        Location::Left,
        Location::TopLeft,
    ];

    /// Unit offset from the center, y growing downwards.
    pub fn offset(self) -> (f64, f64) {
        let diagonal = std::f64::consts::FRAC_1_SQRT_2;
        match self {
            Location::Top => (0.0, -1.0),
            Location::TopRight => (diagonal, -diagonal),
            Location::Right => (1.0, 0.0),
            Location::BottomRight => (diagonal, diagonal),
            Location::Bottom => (0.0, 1.0),
            Location::BottomLeft => (-diagonal, diagonal),
            Location::Left => (-1.0, 0.0),
            Location::TopLeft => (-diagonal, -diagonal),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Location::Top => "↑",
            Location::TopRight => "↗",
            Location::Right => "→",
            Location::BottomRight => "↘",
            Location::Bottom => "↓",
            Location::BottomLeft => "↙",
            Location::Left => "←",
            Location::TopLeft => "↖",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stimulus {
    pub central: CentralObject,
    pub location: Location,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Show,
    Wait,
    InputCenter,
    InputPeripheral,
    Feedback { correct: bool },
}

impl Phase {
    pub fn message(self) -> &'static str {
        match self {
            Phase::InputCenter => "What was in the center?",
            Phase::InputPeripheral => "Where was the dot?",
            Phase::Feedback { correct: true } => "Correct!",
            Phase::Feedback { correct: false } => "Wrong!",
            Phase::Show | Phase::Wait => "",
        }
    }
}

pub struct SwiftVisionGame {
    rng: StdRng,
    status: Status,
    phase: Phase,
    stimulus: Stimulus,
    tally: Tally,
    countdown: Countdown,
    steps: Steps,
    result: Option<GameResult>,
}

impl SwiftVisionGame {
    pub fn new() -> Self {
        Self::with_rng(fresh_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        SwiftVisionGame {
            rng,
            status: Status::Idle,
            phase: Phase::Show,
            stimulus: Stimulus {
                central: CentralObject::Car,
                location: Location::Top,
            },
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
        self.next_stimulus();
        tracing::info!("swift vision run started");
    }

    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.phase = Phase::Show;
        self.tally = Tally::default();
        self.countdown = Countdown::default();
        self.steps.clear();
        self.result = None;
    }

    fn next_stimulus(&mut self) {
        self.stimulus = Stimulus {
            central: CentralObject::ALL[self.rng.random_range(0..CentralObject::ALL.len())],
            location: Location::ALL[self.rng.random_range(0..Location::ALL.len())],
        };
        self.phase = Phase::Show;
        self.steps.schedule(SHOW_MS);
    }

    pub fn run_step(&mut self, id: u64) {
        if self.status != Status::Active || !self.steps.take(id) {
            return;
        }
        match self.phase {
            Phase::Show => {
                self.phase = Phase::Wait;
                self.steps.schedule(WAIT_MS);
            }
            Phase::Wait => self.phase = Phase::InputCenter,
            Phase::Feedback { .. } => self.next_stimulus(),
            Phase::InputCenter | Phase::InputPeripheral => {}
        }
    }

    pub fn submit_center(&mut self, central: CentralObject) {
        if self.status != Status::Active || self.phase != Phase::InputCenter {
            return;
        }
        if central == self.stimulus.central {
            self.phase = Phase::InputPeripheral;
        } else {
            self.settle(false);
        }
    }

    pub fn submit_peripheral(&mut self, location: Location) {
        if self.status != Status::Active || self.phase != Phase::InputPeripheral {
            return;
        }
        self.settle(location == self.stimulus.location);
    }

    fn settle(&mut self, correct: bool) {
        self.tally.record(correct);
        self.phase = Phase::Feedback { correct };
        self.steps.schedule(FEEDBACK_MS);
    }

    pub fn tick(&mut self) {
        if self.status != Status::Active {
            return;
        }
        if self.countdown.tick() {
            self.status = Status::Ended;
            self.steps.clear();
            self.result = Some(GameResult::new(ProblemKind::SwiftVision, self.tally, 0));
            tracing::info!(correct = self.tally.correct(), "swift vision run ended");
        }
    }

    /// Stimulus on screen; hidden outside the show phase.
    pub fn visible_stimulus(&self) -> Option<Stimulus> {
        (self.status == Status::Active && self.phase == Phase::Show).then_some(self.stimulus)
    }

    pub fn phase(&self) -> Phase {
        self.phase
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

impl Default for SwiftVisionGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn fire(game: &mut SwiftVisionGame) {
        let step = game.pending_step().expect("a step is pending");
        game.run_step(step.id);
    }

    fn to_input(game: &mut SwiftVisionGame) -> Stimulus {
        let stimulus = game.visible_stimulus().expect("stimulus is shown");
        fire(game);
        assert_eq!(game.phase(), Phase::Wait);
        assert!(game.visible_stimulus().is_none());
        fire(game);
        assert_eq!(game.phase(), Phase::InputCenter);
        stimulus
    }

    fn other_central(central: CentralObject) -> CentralObject {
        match central {
            CentralObject::Car => CentralObject::Truck,
            CentralObject::Truck => CentralObject::Car,
        }
    }

    #[test]
    fn both_answers_right_is_correct() {
        let mut game = SwiftVisionGame::with_rng(StdRng::seed_from_u64(21));
        game.start();
        let stimulus = to_input(&mut game);
        game.submit_center(stimulus.central);
        assert_eq!(game.phase(), Phase::InputPeripheral);
        game.submit_peripheral(stimulus.location);
        assert_eq!(game.phase(), Phase::Feedback { correct: true });
        assert_eq!(game.tally().correct(), 1);
        fire(&mut game);
        assert_eq!(game.phase(), Phase::Show);
    }

    #[test]
    fn wrong_center_skips_peripheral_question() {
        let mut game = SwiftVisionGame::with_rng(StdRng::seed_from_u64(22));
        game.start();
        let stimulus = to_input(&mut game);
        game.submit_center(other_central(stimulus.central));
        assert_eq!(game.phase(), Phase::Feedback { correct: false });
        game.submit_peripheral(stimulus.location);
        assert_eq!(game.tally().total(), 1);
        assert_eq!(game.tally().incorrect(), 1);
    }

    #[test]
    fn wrong_peripheral_is_incorrect() {
        let mut game = SwiftVisionGame::with_rng(StdRng::seed_from_u64(23));
        game.start();
        let stimulus = to_input(&mut game);
        game.submit_center(stimulus.central);
        let wrong = Location::ALL
            .into_iter()
            .find(|location| *location != stimulus.location)
            .unwrap();
        game.submit_peripheral(wrong);
        assert_eq!(game.phase(), Phase::Feedback { correct: false });
    }

    #[test]
    fn answers_during_show_are_ignored() {
        let mut game = SwiftVisionGame::with_rng(StdRng::seed_from_u64(24));
        game.start();
        game.submit_center(CentralObject::Car);
        game.submit_peripheral(Location::Top);
        assert_eq!(game.phase(), Phase::Show);
        assert_eq!(game.tally().total(), 0);
    }

    #[test]
    fn offsets_are_unit_length() {
        for location in Location::ALL {
            let (x, y) = location.offset();
            assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn stale_step_is_ignored() {
        let mut game = SwiftVisionGame::with_rng(StdRng::seed_from_u64(25));
        game.start();
        let stale = game.pending_step().unwrap().id;
        fire(&mut game);
        assert_eq!(game.phase(), Phase::Wait);
        game.run_step(stale);
        assert_eq!(game.phase(), Phase::Wait);
    }

    #[test]
    fn countdown_ends_run() {
        let mut game = SwiftVisionGame::with_rng(StdRng::seed_from_u64(26));
        game.start();
        let stimulus = to_input(&mut game);
        game.submit_center(stimulus.central);
        game.submit_peripheral(stimulus.location);
        for _ in 0..29 {
            game.tick();
        }
        assert_eq!(game.status(), Status::Active);
        assert_eq!(game.time_remaining(), 1);
        game.tick();

        assert_eq!(game.status(), Status::Ended);
        assert!(game.pending_step().is_none());
        assert!(game.visible_stimulus().is_none());
        let result = game.result().unwrap();
        assert_eq!(result.game_type, "Swift Vision");
        assert_eq!((result.correct_answers, result.total_problems), (1, 1));

        game.submit_center(CentralObject::Car);
        assert_eq!(game.tally().total(), 1);
    }
}
