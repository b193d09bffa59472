//! One play-through of a catalog problem.

use crate::catalog::{Problem, ProblemKind, problem_for_kind};
use crate::games::{Controller, Status};
use crate::result::GameResult;
use crate::store::Storage;

pub struct Session {
    problem_id: String,
    controller: Controller,
    recorded: bool,
}

impl Session {
    /// A session for `problem_id`; `kind` picks the controller, so an
    /// unknown or empty id still plays.
    pub fn new(kind: ProblemKind, problem_id: impl Into<String>) -> Self {
        Self::with_controller(Controller::for_kind(kind), problem_id)
    }

    pub fn for_problem(problem: &Problem) -> Self {
        Self::new(problem.kind, problem.id)
    }

    pub fn with_controller(controller: Controller, problem_id: impl Into<String>) -> Self {
        Session {
            problem_id: problem_id.into(),
            controller,
            recorded: false,
        }
    }

    pub fn problem_id(&self) -> &str {
        &self.problem_id
    }

    pub fn kind(&self) -> ProblemKind {
        self.controller.kind()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    /// Starts (or restarts) the run.
    pub fn start(&mut self) {
        self.recorded = false;
        self.controller.start();
    }

    pub fn is_finished(&self) -> bool {
        self.controller.status() == Status::Ended
    }

    /// Persists a finished run once: history first, then the solved flag
    /// when the game's rule is met. Returns the result once the run ended.
    pub fn settle(&mut self, storage: &Storage) -> Option<&GameResult> {
        let result = self.controller.result()?;
        if !self.recorded {
            self.recorded = true;
            if let Err(err) = storage.history().record(result) {
                tracing::warn!("failed to save history: {err}");
            }
            if self.controller.solved_rule().is_met(result) {
                let id = if self.problem_id.is_empty() {
                    problem_for_kind(self.controller.kind()).id
                } else {
                    self.problem_id.as_str()
                };
                if let Err(err) = storage.progress().mark_solved(id) {
                    tracing::warn!(problem_id = id, "failed to save solved flag: {err}");
                }
            }
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pathfinder::trail_sequence;

    fn solve_trail(session: &mut Session) {
        let Controller::Pathfinder(game) = session.controller_mut() else {
            panic!("pathfinder session expected");
        };
        for label in trail_sequence() {
            let index = game
                .nodes()
                .iter()
                .position(|node| node.label == label)
                .unwrap();
            game.tap(index);
        }
    }

    #[test]
    fn unfinished_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path());
        let mut session = Session::new(ProblemKind::Math, "math_1");
        session.start();
        assert!(session.settle(&storage).is_none());
        assert!(storage.history().load().is_empty());
    }

    #[test]
    fn finished_run_is_recorded_once_and_solved() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path());
        let mut session =
            Session::with_controller(Controller::seeded(ProblemKind::Pathfinder, 3), "path_1");
        session.start();
        solve_trail(&mut session);
        assert!(session.is_finished());

        assert!(session.settle(&storage).is_some());
        assert!(session.settle(&storage).is_some());
        assert_eq!(storage.history().load().len(), 1);
        assert!(storage.progress().is_solved("path_1"));
    }

    #[test]
    fn failed_run_is_recorded_but_not_solved() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path());
        let mut session = Session::with_controller(Controller::seeded(ProblemKind::Math, 4), "math_1");
        session.start();
        for _ in 0..30 {
            session.controller_mut().tick();
        }
        let result = session.settle(&storage).unwrap();
        assert_eq!(result.total_problems, 0);
        assert_eq!(storage.history().load().len(), 1);
        assert!(!storage.progress().is_solved("math_1"));
    }

    #[test]
    fn empty_problem_id_marks_the_kind_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path());
        let mut session =
            Session::with_controller(Controller::seeded(ProblemKind::Pathfinder, 5), "");
        session.start();
        solve_trail(&mut session);
        session.settle(&storage);
        assert!(storage.progress().is_solved("path_1"));
    }

    #[test]
    fn write_failure_still_returns_result() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();
        let storage = Storage::open(&blocker);
        let mut session =
            Session::with_controller(Controller::seeded(ProblemKind::Pathfinder, 6), "path_1");
        session.start();
        solve_trail(&mut session);
        assert!(session.settle(&storage).is_some());
    }

    #[test]
    fn restart_allows_a_second_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path());
        let mut session =
            Session::with_controller(Controller::seeded(ProblemKind::Pathfinder, 7), "path_1");
        for _ in 0..2 {
            session.start();
            solve_trail(&mut session);
            session.settle(&storage);
        }
        assert_eq!(storage.history().load().len(), 2);
    }
}
