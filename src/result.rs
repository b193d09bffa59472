use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::catalog::ProblemKind;
use crate::games::Tally;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Encouragement {
    KeepPracticing,
    Good,
    Great,
    Excellent,
}

impl Encouragement {
    pub fn for_accuracy(accuracy: u8) -> Self {
        match accuracy {
            90.. => Encouragement::Excellent,
            75.. => Encouragement::Great,
            50.. => Encouragement::Good,
            _ => Encouragement::KeepPracticing,
        }
    }

    /// Message key of the tier; the shell translates it.
    pub fn key(self) -> &'static str {
        match self {
            Encouragement::Excellent => "result_excellent",
            Encouragement::Great => "result_great",
            Encouragement::Good => "result_good",
            Encouragement::KeepPracticing => "result_keep_practicing",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Encouragement::Excellent => "Excellent!",
            Encouragement::Great => "Great job!",
            Encouragement::Good => "Good effort!",
            Encouragement::KeepPracticing => "Keep practicing!",
        }
    }
}

/// Summary of one finished mini-game run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub game_type: String,
    pub total_problems: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    #[serde(default)]
    pub time_taken_seconds: u64,
}

impl GameResult {
    pub fn new(kind: ProblemKind, tally: Tally, time_taken_seconds: u64) -> Self {
        Self::at(kind, tally, time_taken_seconds, now_millis())
    }

    pub fn at(kind: ProblemKind, tally: Tally, time_taken_seconds: u64, timestamp: u64) -> Self {
        GameResult {
            game_type: kind.result_label().to_string(),
            total_problems: tally.total(),
            correct_answers: tally.correct(),
            incorrect_answers: tally.incorrect(),
            timestamp,
            time_taken_seconds,
        }
    }

    pub fn accuracy(&self) -> u8 {
        if self.total_problems == 0 {
            return 0;
        }
        ((self.correct_answers as f64 / self.total_problems as f64) * 100.0)
            .round()
            .min(100.0) as u8
    }

    pub fn encouragement(&self) -> Encouragement {
        Encouragement::for_accuracy(self.accuracy())
    }

    /// Pathfinder results report elapsed time instead of counts.
    pub fn reports_time(&self) -> bool {
        self.game_type == ProblemKind::Pathfinder.result_label()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(correct: u32, incorrect: u32) -> Tally {
        let mut tally = Tally::default();
        for _ in 0..correct {
            tally.record(true);
        }
        for _ in 0..incorrect {
            tally.record(false);
        }
        tally
    }

    #[test]
    fn thirty_second_math_run_example() {
        let result = GameResult::at(ProblemKind::Math, tally(5, 2), 0, 1);
        assert_eq!(result.total_problems, 7);
        assert_eq!(result.accuracy(), 71);
        assert_eq!(result.encouragement().key(), "result_good");
    }

    #[test]
    fn accuracy_rounds_to_nearest() {
        // 2/3 = 66.67 rounds up, 1/3 = 33.33 rounds down.
        assert_eq!(GameResult::at(ProblemKind::Puzzle, tally(2, 1), 0, 0).accuracy(), 67);
        assert_eq!(GameResult::at(ProblemKind::Puzzle, tally(1, 2), 0, 0).accuracy(), 33);
        assert_eq!(GameResult::at(ProblemKind::Puzzle, tally(1, 1), 0, 0).accuracy(), 50);
    }

    #[test]
    fn empty_run_has_zero_accuracy() {
        let result = GameResult::at(ProblemKind::Card, Tally::default(), 0, 0);
        assert_eq!(result.accuracy(), 0);
        assert_eq!(result.encouragement(), Encouragement::KeepPracticing);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Encouragement::for_accuracy(100), Encouragement::Excellent);
        assert_eq!(Encouragement::for_accuracy(90), Encouragement::Excellent);
        assert_eq!(Encouragement::for_accuracy(89), Encouragement::Great);
        assert_eq!(Encouragement::for_accuracy(75), Encouragement::Great);
        assert_eq!(Encouragement::for_accuracy(74), Encouragement::Good);
        assert_eq!(Encouragement::for_accuracy(50), Encouragement::Good);
        assert_eq!(Encouragement::for_accuracy(49), Encouragement::KeepPracticing);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let result = GameResult::at(ProblemKind::Pathfinder, tally(1, 0), 42, 1_700_000_000_000);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["gameType"], "Pathfinder");
        assert_eq!(json["timeTakenSeconds"], 42);
        assert_eq!(json["correctAnswers"], 1);
        assert!(result.reports_time());
    }

    #[test]
    fn missing_time_taken_defaults_to_zero() {
        let raw = r#"{"gameType":"Swift Vision","totalProblems":4,"correctAnswers":3,"incorrectAnswers":1,"timestamp":5}"#;
        let result: GameResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.time_taken_seconds, 0);
        assert_eq!(result.accuracy(), 75);
        assert!(!result.reports_time());
    }
}
