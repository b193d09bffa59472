use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gettextrs::gettext;
use gtk4::glib;
use gtk4::prelude::*;

use super::records::format_mm_ss;
use super::scene;
use super::state::AppState;
use crate::games::{Controller, Status};

pub(super) fn set_header_menu(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    if let (Some(header), Some(title)) = (&st.header, &st.title_menu) {
        header.set_title_widget(Some(title));
    }
    if let Some(back) = &st.back_button {
        back.set_visible(st.navigator.can_go_back());
    }
    if let Some(restart) = &st.restart_button {
        restart.set_visible(false);
    }
}

pub(super) fn set_header_game(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    if let (Some(header), Some(title_box)) = (&st.header, &st.title_game) {
        update_subtitle(&st);
        header.set_title_widget(Some(title_box));
    }
    if let Some(back) = &st.back_button {
        back.set_visible(true);
    }
    if let Some(restart) = &st.restart_button {
        restart.set_visible(true);
    }
}

fn progress_text(controller: &Controller) -> String {
    let tally = controller.tally();
    match controller {
        Controller::NBack(game) => format!(
            "{} {}/{} | {} {}",
            gettext("Round"),
            game.round(),
            crate::games::nback::MAX_ROUNDS,
            gettext("Score"),
            game.score()
        ),
        Controller::Pathfinder(game) => format!(
            "{} {}",
            gettext("Next:"),
            game.next_label().unwrap_or("-")
        ),
        _ => format!(
            "{} {} | {} {}",
            gettext("Correct"),
            tally.correct(),
            gettext("Wrong"),
            tally.incorrect()
        ),
    }
}

pub(super) fn update_subtitle(st: &AppState) {
    let Some(subtitle) = &st.title_game_subtitle else {
        return;
    };
    let Some(session) = &st.session else {
        subtitle.set_text("");
        return;
    };
    let controller = session.controller();
    let progress = progress_text(controller);
    match controller.clock_seconds() {
        Some(secs) => subtitle.set_text(&format!("{progress} | {}", format_mm_ss(secs))),
        None => subtitle.set_text(&progress),
    }
}

pub(super) fn stop_timer(st: &mut AppState) {
    if let Some(handle) = st.timer_handle.take() {
        handle.remove();
    }
}

pub(super) fn stop_step(st: &mut AppState) {
    st.scheduled_step = None;
    if let Some(handle) = st.step_handle.take() {
        handle.remove();
    }
}

pub(super) fn stop_all(st: &mut AppState) {
    stop_timer(st);
    stop_step(st);
}

/// One-second clock driving the active controller.
pub(super) fn start_timer(state: &Rc<RefCell<AppState>>) {
    let mut st = state.borrow_mut();
    stop_timer(&mut st);
    let run_id = st.run_id;

    let state_clone = state.clone();
    let handle = glib::timeout_add_local(Duration::from_secs(1), move || {
        let ended = {
            let mut st = state_clone.borrow_mut();
            if st.run_id != run_id {
                st.timer_handle = None;
                return glib::ControlFlow::Break;
            }
            let Some(session) = st.session.as_mut() else {
                st.timer_handle = None;
                return glib::ControlFlow::Break;
            };
            session.controller_mut().tick();
            let ended = session.controller().status() != Status::Active;
            if ended {
                st.timer_handle = None;
            }
            ended
        };
        sync_game(&state_clone);
        if ended {
            glib::ControlFlow::Break
        } else {
            glib::ControlFlow::Continue
        }
    });
    st.timer_handle = Some(handle);
}

/// Arms a glib timeout for the controller's pending step, if it is new.
fn schedule_step(state: &Rc<RefCell<AppState>>) {
    let mut st = state.borrow_mut();
    let pending = st
        .session
        .as_ref()
        .and_then(|session| session.controller().pending_step());
    let Some(step) = pending else {
        stop_step(&mut st);
        return;
    };
    if st.scheduled_step == Some(step.id) {
        return;
    }
    stop_step(&mut st);
    st.scheduled_step = Some(step.id);
    let run_id = st.run_id;

    let state_clone = state.clone();
    let handle = glib::timeout_add_local(step.delay, move || {
        {
            let mut st = state_clone.borrow_mut();
            st.step_handle = None;
            if st.run_id != run_id || st.scheduled_step != Some(step.id) {
                return glib::ControlFlow::Break;
            }
            st.scheduled_step = None;
            if let Some(session) = st.session.as_mut() {
                session.controller_mut().run_step(step.id);
            }
        }
        sync_game(&state_clone);
        glib::ControlFlow::Break
    });
    st.step_handle = Some(handle);
}

pub(super) fn refresh_board(state: &Rc<RefCell<AppState>>) {
    let refresh = state.borrow().board_refresh.clone();
    let Some(refresh) = refresh else {
        return;
    };
    let st = state.borrow();
    if let Some(session) = &st.session {
        refresh(session);
    }
}

/// Call after anything that may have changed the controller.
pub(super) fn sync_game(state: &Rc<RefCell<AppState>>) {
    schedule_step(state);
    update_subtitle(&state.borrow());
    refresh_board(state);

    let finished = state
        .borrow()
        .session
        .as_ref()
        .is_some_and(|session| session.is_finished());
    if finished {
        scene::finish_game(state);
    }
}

/// Applies `input` to the running controller, then syncs the view.
pub(super) fn with_controller(state: &Rc<RefCell<AppState>>, input: impl FnOnce(&mut Controller)) {
    {
        let mut st = state.borrow_mut();
        let Some(session) = st.session.as_mut() else {
            return;
        };
        input(session.controller_mut());
    }
    sync_game(state);
}
