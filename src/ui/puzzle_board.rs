use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::{
    TILE_GAP, aspect_wrap, draw_shape, foreground, redraw_button_child, shape_button,
    square_area, status_label,
};
use super::hud::with_controller;
use super::state::{AppState, BoardRefresh};
use crate::games::Controller;
use crate::games::puzzle::Shape;
use crate::session::Session;

fn puzzle_option(state: &Rc<RefCell<AppState>>, index: usize) -> Option<Shape> {
    let st = state.borrow();
    match st.session.as_ref()?.controller() {
        Controller::Puzzle(game) => game.options().get(index).copied(),
        _ => None,
    }
}

pub(super) fn build(state: &Rc<RefCell<AppState>>) -> (gtk::Widget, BoardRefresh) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 16);
    root.set_vexpand(true);

    let prompt = status_label();
    prompt.set_text(&gettext("Which shape fits the empty space?"));
    let feedback = status_label();
    feedback.remove_css_class("title-3");
    feedback.add_css_class("heading");

    // Target drawn as a dashed outline: the "empty space".
    let target = square_area();
    target.set_draw_func({
        let state = state.clone();
        move |area, cr, width, height| {
            let st = state.borrow();
            let Some(Controller::Puzzle(game)) = st.session.as_ref().map(|s| s.controller()) else {
                return;
            };
            let (r, g, b, a) = foreground(area);
            let min_dim = width.min(height) as f64;
            cr.set_source_rgba(r, g, b, a * 0.35);
            cr.set_line_width(min_dim * 0.02);
            cr.set_dash(&[min_dim * 0.04, min_dim * 0.03], 0.0);
            let (cx, cy, radius) = (width as f64 / 2.0, height as f64 / 2.0, min_dim * 0.3);
            match game.target() {
                Shape::Square => cr.rectangle(cx - radius, cy - radius, radius * 2.0, radius * 2.0),
                Shape::Circle => cr.arc(cx, cy, radius, 0.0, std::f64::consts::TAU),
                Shape::Triangle => {
                    cr.move_to(cx, cy - radius);
                    cr.line_to(cx + radius, cy + radius);
                    cr.line_to(cx - radius, cy + radius);
                    cr.close_path();
                }
            }
            let _ = cr.stroke();
        }
    });

    let options = gtk::Box::new(gtk::Orientation::Horizontal, TILE_GAP);
    options.set_halign(gtk::Align::Center);
    options.set_homogeneous(true);
    let mut buttons = Vec::new();
    for index in 0..Shape::ALL.len() {
        let button = shape_button({
            let state = state.clone();
            move |area, cr, width, height| {
                let Some(shape) = puzzle_option(&state, index) else {
                    return;
                };
                let (r, g, b, a) = foreground(area);
                cr.set_source_rgba(r, g, b, a);
                let radius = width.min(height) as f64 * 0.32;
                draw_shape(cr, shape, width as f64 / 2.0, height as f64 / 2.0, radius);
            }
        });
        button.set_size_request(88, 88);
        button.connect_clicked({
            let state = state.clone();
            move |_| {
                let Some(shape) = puzzle_option(&state, index) else {
                    return;
                };
                with_controller(&state, |controller| {
                    if let Controller::Puzzle(game) = controller {
                        game.submit(shape);
                    }
                });
            }
        });
        options.append(&button);
        buttons.push(button);
    }

    root.append(&prompt);
    root.append(&aspect_wrap(&target, 1.0));
    root.append(&feedback);
    root.append(&options);

    let refresh: BoardRefresh = Rc::new(move |session: &Session| {
        let Controller::Puzzle(game) = session.controller() else {
            return;
        };
        feedback.set_text(&game.feedback().map(|f| gettext(f.message())).unwrap_or_default());
        target.queue_draw();
        for (button, shape) in buttons.iter().zip(game.options()) {
            button.set_tooltip_text(Some(&gettext(shape.name())));
            redraw_button_child(button);
        }
    });
    (root.upcast(), refresh)
}
