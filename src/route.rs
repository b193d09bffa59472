//! Screen routes and the back stack.

use crate::catalog::{ProblemKind, problem_for_kind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Title,
    AllProblems,
    History,
    Result,
    Game { kind: ProblemKind, problem_id: String },
}

impl Route {
    pub fn game(kind: ProblemKind, problem_id: impl Into<String>) -> Self {
        Route::Game {
            kind,
            problem_id: problem_id.into(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Title => "title".to_string(),
            Route::AllProblems => "all_problems".to_string(),
            Route::History => "history".to_string(),
            Route::Result => "result".to_string(),
            Route::Game { kind, problem_id } => format!("{}/{problem_id}", kind.route_name()),
        }
    }

    /// Parses a route path. A game route without an argument gets an empty
    /// problem id.
    pub fn parse(path: &str) -> Option<Self> {
        let (name, arg) = match path.split_once('/') {
            Some((name, arg)) => (name, arg),
            None => (path, ""),
        };
        match name {
            "title" => Some(Route::Title),
            "all_problems" => Some(Route::AllProblems),
            "history" => Some(Route::History),
            "result" => Some(Route::Result),
            _ => ProblemKind::from_route_name(name).map(|kind| Route::game(kind, arg)),
        }
    }

    pub fn is_game(&self) -> bool {
        matches!(self, Route::Game { .. })
    }
}

#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            stack: vec![Route::Title],
        }
    }

    pub fn current(&self) -> &Route {
        // The root is never popped.
        &self.stack[self.stack.len() - 1]
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(route = %route.path(), "navigate");
        self.stack.push(route);
    }

    /// The title screen's "Start" button.
    pub fn start(&mut self) {
        let problem = problem_for_kind(ProblemKind::Math);
        self.navigate(Route::game(problem.kind, problem.id));
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.stack.pop();
        true
    }

    /// Swaps the finished game screen for the result screen.
    pub fn finish_game(&mut self) {
        if self.current().is_game() {
            self.stack.pop();
        }
        self.stack.push(Route::Result);
    }

    /// Replaces the result screen with the game it came from. Returns the
    /// game route, or `None` when no game led here.
    pub fn play_again(&mut self, last_game: &Route) -> Option<Route> {
        if !last_game.is_game() {
            return None;
        }
        if *self.current() == Route::Result {
            self.stack.pop();
        }
        self.stack.push(last_game.clone());
        Some(last_game.clone())
    }

    pub fn home(&mut self) {
        self.stack.truncate(1);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        let routes = [
            Route::Title,
            Route::AllProblems,
            Route::History,
            Route::Result,
            Route::game(ProblemKind::SwiftVision, "swift_1"),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
        assert_eq!(
            Route::game(ProblemKind::NBack, "nback_1").path(),
            "nback_game/nback_1"
        );
    }

    #[test]
    fn missing_argument_is_empty_id() {
        assert_eq!(
            Route::parse("pathfinder_game"),
            Some(Route::game(ProblemKind::Pathfinder, ""))
        );
    }

    #[test]
    fn unknown_route_is_none() {
        assert_eq!(Route::parse("settings"), None);
        assert_eq!(Route::parse(""), None);
    }

    #[test]
    fn back_never_pops_the_root() {
        let mut nav = Navigator::new();
        assert!(!nav.back());
        nav.navigate(Route::History);
        assert!(nav.back());
        assert_eq!(*nav.current(), Route::Title);
    }

    #[test]
    fn result_replaces_game_and_play_again_restores_it() {
        let mut nav = Navigator::new();
        nav.navigate(Route::AllProblems);
        let game = Route::game(ProblemKind::Card, "card_1");
        nav.navigate(game.clone());
        nav.finish_game();
        assert_eq!(*nav.current(), Route::Result);

        assert_eq!(nav.play_again(&game), Some(game.clone()));
        assert_eq!(*nav.current(), game);
        assert!(nav.back());
        assert_eq!(*nav.current(), Route::AllProblems);
    }

    #[test]
    fn start_opens_math_and_home_clears() {
        let mut nav = Navigator::new();
        nav.start();
        assert_eq!(*nav.current(), Route::game(ProblemKind::Math, "math_1"));
        nav.finish_game();
        nav.home();
        assert_eq!(*nav.current(), Route::Title);
        assert!(!nav.can_go_back());
    }
}
