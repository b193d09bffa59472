use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::build_board;
use super::catalog_view::refresh_catalog;
use super::hud::{
    set_header_game, set_header_menu, start_timer, stop_all, sync_game, update_subtitle,
};
use super::records::refresh_history;
use super::result_view::fill_result;
use super::state::AppState;
use crate::catalog::problem_by_id;
use crate::route::Route;
use crate::session::Session;

fn stack_child_name(route: &Route) -> &'static str {
    match route {
        Route::Title => "title",
        Route::AllProblems => "all_problems",
        Route::History => "history",
        Route::Result => "result",
        Route::Game { .. } => "game",
    }
}

fn switch_stack(state: &Rc<RefCell<AppState>>, child: &str, transition: gtk::StackTransitionType) {
    let st = state.borrow();
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(transition);
        stack.set_visible_child_name(child);
    }
}

/// Renders whatever route the navigator is on.
pub(super) fn show_current(state: &Rc<RefCell<AppState>>, transition: gtk::StackTransitionType) {
    let route = state.borrow().navigator.current().clone();
    tracing::debug!(route = %route.path(), "showing route");
    match &route {
        Route::Game { kind, problem_id } => {
            start_game(state, Session::new(*kind, problem_id.clone()));
            state.borrow_mut().last_game = Some(route.clone());
            set_header_game(state);
        }
        other => {
            leave_game(state);
            match other {
                Route::AllProblems => refresh_catalog(state),
                Route::History => refresh_history(state),
                Route::Result => fill_result(state),
                _ => {}
            }
            set_header_menu(state);
        }
    }
    switch_stack(state, stack_child_name(&route), transition);
}

pub(super) fn navigate(state: &Rc<RefCell<AppState>>, route: Route) {
    state.borrow_mut().navigator.navigate(route);
    show_current(state, gtk::StackTransitionType::SlideLeft);
}

pub(super) fn go_back(state: &Rc<RefCell<AppState>>) {
    let moved = state.borrow_mut().navigator.back();
    if moved {
        show_current(state, gtk::StackTransitionType::SlideRight);
    }
}

pub(super) fn go_home(state: &Rc<RefCell<AppState>>) {
    state.borrow_mut().navigator.home();
    show_current(state, gtk::StackTransitionType::SlideRight);
}

pub(super) fn start_from_title(state: &Rc<RefCell<AppState>>) {
    state.borrow_mut().navigator.start();
    show_current(state, gtk::StackTransitionType::SlideLeft);
}

pub(super) fn play_again(state: &Rc<RefCell<AppState>>) {
    let replayed = {
        let mut st = state.borrow_mut();
        match st.last_game.clone() {
            Some(last_game) => st.navigator.play_again(&last_game).is_some(),
            None => false,
        }
    };
    if replayed {
        show_current(state, gtk::StackTransitionType::SlideRight);
    } else {
        go_home(state);
    }
}

fn leave_game(state: &Rc<RefCell<AppState>>) {
    let mut st = state.borrow_mut();
    stop_all(&mut st);
    st.run_id = st.run_id.wrapping_add(1);
    st.session = None;
    st.board_refresh = None;
}

fn start_game(state: &Rc<RefCell<AppState>>, session: Session) {
    let title = problem_by_id(session.problem_id())
        .map(|problem| problem.title)
        .unwrap_or_else(|| session.kind().result_label());
    {
        let mut st = state.borrow_mut();
        stop_all(&mut st);
        st.run_id = st.run_id.wrapping_add(1);
        st.session = Some(session);
        if let Some(label) = &st.title_game_main {
            label.set_text(&gettextrs::gettext(title));
        }
    }
    rebuild_board(state);
    begin_run(state);
}

fn rebuild_board(state: &Rc<RefCell<AppState>>) {
    let Some(board_container) = state.borrow().board_container.clone() else {
        return;
    };
    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let Some((board, refresh)) = build_board(state) else {
        return;
    };
    board_container.append(&board);
    state.borrow_mut().board_refresh = Some(refresh);
}

fn begin_run(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        stop_all(&mut st);
        st.run_id = st.run_id.wrapping_add(1);
        if let Some(session) = st.session.as_mut() {
            session.start();
        }
        update_subtitle(&st);
    }
    start_timer(state);
    sync_game(state);
}

pub(super) fn restart_game(state: &Rc<RefCell<AppState>>) {
    if state.borrow().session.is_none() {
        return;
    }
    begin_run(state);
}

/// Persists the finished run and moves to the result screen.
pub(super) fn finish_game(state: &Rc<RefCell<AppState>>) {
    {
        let mut st = state.borrow_mut();
        stop_all(&mut st);
        let st = &mut *st;
        let result = match st.session.as_mut() {
            Some(session) => session.settle(&st.storage).cloned(),
            None => None,
        };
        let Some(result) = result else {
            return;
        };
        tracing::info!(
            game = %result.game_type,
            accuracy = result.accuracy(),
            tier = result.encouragement().key(),
            "run finished"
        );
        st.last_result = Some(result);
        st.navigator.finish_game();
    }
    show_current(state, gtk::StackTransitionType::SlideLeft);
}
