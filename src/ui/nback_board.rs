use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::{TILE_GAP, aspect_wrap, status_label};
use super::hud::with_controller;
use super::i18n::tr;
use super::state::{AppState, BoardRefresh};
use crate::games::Controller;
use crate::games::nback::{CELL_COUNT, GRID_SIZE, Phase};
use crate::session::Session;

pub(super) fn build(state: &Rc<RefCell<AppState>>) -> (gtk::Widget, BoardRefresh) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 16);
    root.set_vexpand(true);

    let message = status_label();

    let grid = gtk::Grid::new();
    grid.add_css_class("nback-grid");
    grid.set_row_spacing(TILE_GAP as u32);
    grid.set_column_spacing(TILE_GAP as u32);
    grid.set_row_homogeneous(true);
    grid.set_column_homogeneous(true);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let mut cells = Vec::with_capacity(CELL_COUNT);
    for index in 0..CELL_COUNT {
        let button = gtk::Button::builder()
            .css_classes(vec!["nback-cell"])
            .hexpand(true)
            .vexpand(true)
            .build();
        button.connect_clicked({
            let state = state.clone();
            move |_| {
                with_controller(&state, |controller| {
                    if let Controller::NBack(game) = controller {
                        game.select(index);
                    }
                });
            }
        });
        let x = (index % GRID_SIZE) as i32;
        let y = (index / GRID_SIZE) as i32;
        grid.attach(&button, x, y, 1, 1);
        cells.push(button);
    }

    root.append(&message);
    root.append(&aspect_wrap(&grid, 1.0));

    let refresh: BoardRefresh = Rc::new(move |session: &Session| {
        let Controller::NBack(game) = session.controller() else {
            return;
        };
        message.set_text(&tr(game.phase().message()));
        let lit = game.lit_cell();
        let accepting = game.phase() == Phase::Input;
        for (index, cell) in cells.iter().enumerate() {
            if lit == Some(index) {
                cell.add_css_class("lit");
            } else {
                cell.remove_css_class("lit");
            }
            cell.set_can_target(accepting);
        }
    });
    (root.upcast(), refresh)
}
