use neuroboost::games::Controller;
use neuroboost::{GameResult, Navigator, ProblemKind, Route, Session, Storage, Tally};

fn play_math(session: &mut Session, correct: u32, incorrect: u32) {
    session.start();
    let Controller::Math(game) = session.controller_mut() else {
        panic!("math session expected");
    };
    for round in 0..correct + incorrect {
        let answer = game.problem().unwrap().answer;
        game.submit(if round < correct { answer } else { answer + 1 });
    }
    for _ in 0..30 {
        session.controller_mut().tick();
    }
}

#[test]
fn finished_math_run_lands_in_history_and_solves() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::open(dir.path());
    let mut session = Session::with_controller(Controller::seeded(ProblemKind::Math, 99), "math_1");

    play_math(&mut session, 5, 2);
    let result = session.settle(&storage).cloned().unwrap();
    assert_eq!(result.game_type, "Math Challenge");
    assert_eq!(result.total_problems, 7);
    assert_eq!(result.accuracy(), 71);
    assert_eq!(result.encouragement().key(), "result_good");

    let reopened = Storage::open(dir.path());
    assert_eq!(reopened.history().load(), vec![result]);
    assert!(reopened.progress().is_solved("math_1"));
    assert!(!reopened.progress().is_solved("puzzle_1"));
}

#[test]
fn losing_run_never_clears_an_earlier_solve() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::open(dir.path());
    let mut session = Session::with_controller(Controller::seeded(ProblemKind::Math, 7), "math_1");

    play_math(&mut session, 3, 0);
    session.settle(&storage);
    play_math(&mut session, 0, 4);
    session.settle(&storage);

    let history = storage.history().load();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].correct_answers, 0);
    assert_eq!(history[1].correct_answers, 3);
    assert!(storage.progress().is_solved("math_1"));
}

#[test]
fn history_save_then_load_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::open(dir.path());
    let list = vec![
        GameResult::at(ProblemKind::Pathfinder, Tally::from_counts(1, 0), 58, 3_000),
        GameResult::at(ProblemKind::NBack, Tally::from_counts(8, 2), 0, 2_000),
        GameResult::at(ProblemKind::SwiftVision, Tally::from_counts(4, 4), 0, 1_000),
    ];
    storage.history().save(&list).unwrap();
    assert_eq!(storage.history().load(), list);
}

#[test]
fn navigation_round_trip_through_a_game() {
    let mut nav = Navigator::new();
    nav.navigate(Route::AllProblems);
    let game = Route::parse("nback_game/nback_1").unwrap();
    nav.navigate(game.clone());
    nav.finish_game();
    assert_eq!(*nav.current(), Route::Result);
    nav.play_again(&game);
    nav.finish_game();
    nav.home();
    assert_eq!(*nav.current(), Route::Title);
}
