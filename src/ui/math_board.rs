use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::{TILE_GAP, status_label};
use super::hud::with_controller;
use super::state::{AppState, BoardRefresh};
use crate::games::Controller;
use crate::games::math::OPTION_COUNT;
use crate::session::Session;

const OPTION_COLUMNS: usize = 2;

pub(super) fn build(state: &Rc<RefCell<AppState>>) -> (gtk::Widget, BoardRefresh) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 24);
    root.set_valign(gtk::Align::Center);
    root.set_vexpand(true);

    let question = status_label();
    question.remove_css_class("title-3");
    question.add_css_class("title-1");
    question.add_css_class("math-question");

    let grid = gtk::Grid::new();
    grid.set_row_spacing(TILE_GAP as u32);
    grid.set_column_spacing(TILE_GAP as u32);
    grid.set_column_homogeneous(true);
    grid.set_halign(gtk::Align::Center);

    let mut buttons = Vec::with_capacity(OPTION_COUNT);
    for index in 0..OPTION_COUNT {
        let button = gtk::Button::with_label("");
        button.add_css_class("answer-button");
        button.add_css_class("pill");
        button.set_size_request(140, 56);
        button.connect_clicked({
            let state = state.clone();
            move |_| {
                with_controller(&state, |controller| {
                    if let Controller::Math(game) = controller {
                        let picked = game
                            .problem()
                            .and_then(|problem| problem.options.get(index))
                            .copied();
                        if let Some(value) = picked {
                            game.submit(value);
                        }
                    }
                });
            }
        });
        let col = (index % OPTION_COLUMNS) as i32;
        let row = (index / OPTION_COLUMNS) as i32;
        grid.attach(&button, col, row, 1, 1);
        buttons.push(button);
    }

    root.append(&question);
    root.append(&grid);

    let refresh: BoardRefresh = Rc::new(move |session: &Session| {
        let Controller::Math(game) = session.controller() else {
            return;
        };
        let Some(problem) = game.problem() else {
            question.set_text("");
            return;
        };
        question.set_text(&problem.question_text());
        for (button, value) in buttons.iter().zip(&problem.options) {
            button.set_label(&value.to_string());
        }
    });
    (root.upcast(), refresh)
}
