use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::{draw_centered_text, foreground, status_label};
use super::hud::with_controller;
use super::state::{AppState, BoardRefresh};
use crate::games::Controller;
use crate::games::pathfinder::{NodeState, PathNode, TapOutcome};
use crate::session::Session;

const NODE_RADIUS: f64 = 0.045;

fn node_radius(width: f64, height: f64) -> f64 {
    width.min(height) * NODE_RADIUS
}

fn node_center(node: &PathNode, width: f64, height: f64) -> (f64, f64) {
    (node.x * width, node.y * height)
}

/// Index of the node under `(x, y)`, if any.
fn hit_node(nodes: &[PathNode], x: f64, y: f64, width: f64, height: f64) -> Option<usize> {
    let radius = node_radius(width, height) * 1.3;
    nodes.iter().position(|node| {
        let (nx, ny) = node_center(node, width, height);
        (nx - x).powi(2) + (ny - y).powi(2) <= radius * radius
    })
}

fn draw_trail(state: &Rc<RefCell<AppState>>, area: &gtk::DrawingArea, cr: &cairo::Context, width: i32, height: i32) {
    let st = state.borrow();
    let Some(Controller::Pathfinder(game)) = st.session.as_ref().map(|s| s.controller()) else {
        return;
    };
    cr.set_antialias(cairo::Antialias::Best);
    let (w, h) = (width as f64, height as f64);
    let radius = node_radius(w, h);
    let (r, g, b, a) = foreground(area);

    let nodes = game.nodes();
    cr.set_source_rgba(0.30, 0.75, 0.40, 0.8);
    cr.set_line_width(radius * 0.18);
    for pair in game.path().windows(2) {
        let (Some(from), Some(to)) = (nodes.get(pair[0]), nodes.get(pair[1])) else {
            continue;
        };
        let (x0, y0) = node_center(from, w, h);
        let (x1, y1) = node_center(to, w, h);
        cr.move_to(x0, y0);
        cr.line_to(x1, y1);
    }
    let _ = cr.stroke();

    for node in nodes {
        let (cx, cy) = node_center(node, w, h);
        cr.arc(cx, cy, radius, 0.0, std::f64::consts::TAU);
        match node.state {
            NodeState::Correct => cr.set_source_rgb(0.30, 0.75, 0.40),
            NodeState::Wrong => cr.set_source_rgb(0.90, 0.27, 0.27),
            NodeState::Normal => cr.set_source_rgba(r, g, b, a * 0.12),
        }
        let _ = cr.fill_preserve();
        cr.set_source_rgba(r, g, b, a * 0.6);
        cr.set_line_width(radius * 0.08);
        let _ = cr.stroke();

        cr.set_source_rgba(r, g, b, a);
        draw_centered_text(cr, &node.label, cx, cy, radius * 0.75, true);
    }
}

pub(super) fn build(state: &Rc<RefCell<AppState>>) -> (gtk::Widget, BoardRefresh) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_vexpand(true);

    let hint = status_label();
    hint.set_text(&gettext("Connect 1 → A → 2 → B … in order"));
    let feedback = status_label();
    feedback.remove_css_class("title-3");
    feedback.add_css_class("heading");

    let canvas = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .content_width(320)
        .content_height(400)
        .build();
    canvas.add_css_class("board-canvas");
    canvas.set_draw_func({
        let state = state.clone();
        move |area, cr, width, height| draw_trail(&state, area, cr, width, height)
    });

    let click = gtk::GestureClick::new();
    click.connect_pressed({
        let state = state.clone();
        let canvas = canvas.clone();
        let feedback = feedback.clone();
        move |_, _, x, y| {
            let (w, h) = (canvas.width() as f64, canvas.height() as f64);
            let mut outcome = TapOutcome::Ignored;
            with_controller(&state, |controller| {
                if let Controller::Pathfinder(game) = controller
                    && let Some(index) = hit_node(game.nodes(), x, y, w, h)
                {
                    outcome = game.tap(index);
                }
            });
            match outcome {
                TapOutcome::Missed => feedback.set_text(&gettext("Wrong node!")),
                TapOutcome::Advanced => feedback.set_text(""),
                TapOutcome::Solved | TapOutcome::Ignored => {}
            }
        }
    });
    canvas.add_controller(click);

    root.append(&hint);
    root.append(&feedback);
    root.append(&canvas);

    let refresh: BoardRefresh = Rc::new(move |session: &Session| {
        if let Controller::Pathfinder(game) = session.controller()
            && game.path().is_empty()
            && game.misses() == 0
        {
            feedback.set_text("");
        }
        canvas.queue_draw();
    });
    (root.upcast(), refresh)
}
