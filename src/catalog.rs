#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    Math,
    Puzzle,
    Card,
    NBack,
    SwiftVision,
    Pathfinder,
}

impl ProblemKind {
    pub const ALL: [ProblemKind; 6] = [
        ProblemKind::Math,
        ProblemKind::Puzzle,
        ProblemKind::Card,
        ProblemKind::NBack,
        ProblemKind::SwiftVision,
        ProblemKind::Pathfinder,
    ];

    /// Game-type label stamped on every result this kind produces.
    pub fn result_label(self) -> &'static str {
        match self {
            ProblemKind::Math => "Math Challenge",
            ProblemKind::Puzzle => "Shape Puzzle",
            ProblemKind::Card => "Memory Sequence",
            ProblemKind::NBack => "Memory Match",
            ProblemKind::SwiftVision => "Swift Vision",
            ProblemKind::Pathfinder => "Pathfinder",
        }
    }

    /// Route prefix of the game screen for this kind.
    pub fn route_name(self) -> &'static str {
        match self {
            ProblemKind::Math => "math_game",
            ProblemKind::Puzzle => "puzzle_game",
            ProblemKind::Card => "card_game",
            ProblemKind::NBack => "nback_game",
            ProblemKind::SwiftVision => "swift_vision_game",
            ProblemKind::Pathfinder => "pathfinder_game",
        }
    }

    pub fn from_route_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.route_name() == name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Problem {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ProblemKind,
    pub description: &'static str,
}

pub static PROBLEMS: [Problem; 6] = [
    Problem {
        id: "math_1",
        title: "Math Challenge",
        kind: ProblemKind::Math,
        description: "Solve simple arithmetic problems to win.",
    },
    Problem {
        id: "puzzle_1",
        title: "Shape Puzzle",
        kind: ProblemKind::Puzzle,
        description: "Fit the correct shape into the empty space.",
    },
    Problem {
        id: "card_1",
        title: "Memory Sequence",
        kind: ProblemKind::Card,
        description: "Remember the sequence of cards.",
    },
    Problem {
        id: "nback_1",
        title: "Memory Match: 2-Back",
        kind: ProblemKind::NBack,
        description: "Match the item from 2 steps ago",
    },
    Problem {
        id: "swift_1",
        title: "Swift Vision: Car/Truck",
        kind: ProblemKind::SwiftVision,
        description: "Identify center object + peripheral location",
    },
    Problem {
        id: "path_1",
        title: "Pathfinder: Trail A & B",
        kind: ProblemKind::Pathfinder,
        description: "Connect nodes in correct sequence",
    },
];

pub fn problem_by_id(id: &str) -> Option<&'static Problem> {
    PROBLEMS.iter().find(|problem| problem.id == id)
}

/// First catalog entry of the given kind.
pub fn problem_for_kind(kind: ProblemKind) -> &'static Problem {
    PROBLEMS
        .iter()
        .find(|problem| problem.kind == kind)
        .unwrap_or(&PROBLEMS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_exactly_one_problem() {
        for kind in ProblemKind::ALL {
            let count = PROBLEMS.iter().filter(|p| p.kind == kind).count();
            assert_eq!(count, 1, "{kind:?}");
            assert_eq!(problem_for_kind(kind).kind, kind);
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(problem_by_id("nback_1").map(|p| p.kind), Some(ProblemKind::NBack));
        assert!(problem_by_id("nback_2").is_none());
        assert!(problem_by_id("").is_none());
    }

    #[test]
    fn route_names_round_trip() {
        for kind in ProblemKind::ALL {
            assert_eq!(ProblemKind::from_route_name(kind.route_name()), Some(kind));
        }
        assert_eq!(ProblemKind::from_route_name("chess_game"), None);
    }
}
