use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::{TILE_GAP, aspect_wrap, draw_centered_text, foreground, square_area, status_label};
use super::hud::with_controller;
use super::i18n::tr;
use super::state::{AppState, BoardRefresh};
use crate::games::Controller;
use crate::games::swift::{CentralObject, Location, Phase};
use crate::session::Session;

/// Dot distance from the center, as a share of the canvas half-size.
const DOT_RING: f64 = 0.78;

fn central_glyph(central: CentralObject) -> &'static str {
    match central {
        CentralObject::Car => "🚗",
        CentralObject::Truck => "🚚",
    }
}

/// Grid cell of each direction in the 3×3 answer pad.
fn pad_cell(location: Location) -> (i32, i32) {
    match location {
        Location::TopLeft => (0, 0),
        Location::Top => (1, 0),
        Location::TopRight => (2, 0),
        Location::Left => (0, 1),
        Location::Right => (2, 1),
        Location::BottomLeft => (0, 2),
        Location::Bottom => (1, 2),
        Location::BottomRight => (2, 2),
    }
}

fn draw_stimulus(state: &Rc<RefCell<AppState>>, area: &gtk::DrawingArea, cr: &cairo::Context, width: i32, height: i32) {
    let st = state.borrow();
    let Some(Controller::Swift(game)) = st.session.as_ref().map(|s| s.controller()) else {
        return;
    };
    cr.set_antialias(cairo::Antialias::Best);
    let (r, g, b, a) = foreground(area);
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let half = width.min(height) as f64 / 2.0;

    let Some(stimulus) = game.visible_stimulus() else {
        if game.phase() == Phase::Wait {
            cr.set_source_rgba(r, g, b, a * 0.5);
            draw_centered_text(cr, "+", cx, cy, half * 0.2, true);
        }
        return;
    };

    cr.set_source_rgba(r, g, b, a);
    draw_centered_text(cr, central_glyph(stimulus.central), cx, cy, half * 0.3, false);

    let (dx, dy) = stimulus.location.offset();
    cr.set_source_rgb(0.98, 0.80, 0.20);
    cr.arc(
        cx + dx * half * DOT_RING,
        cy + dy * half * DOT_RING,
        half * 0.07,
        0.0,
        std::f64::consts::TAU,
    );
    let _ = cr.fill();
}

pub(super) fn build(state: &Rc<RefCell<AppState>>) -> (gtk::Widget, BoardRefresh) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 16);
    root.set_vexpand(true);

    let message = status_label();

    let canvas = square_area();
    canvas.set_draw_func({
        let state = state.clone();
        move |area, cr, width, height| draw_stimulus(&state, area, cr, width, height)
    });

    let center_row = gtk::Box::new(gtk::Orientation::Horizontal, TILE_GAP);
    center_row.set_halign(gtk::Align::Center);
    center_row.set_homogeneous(true);
    for central in CentralObject::ALL {
        let button = gtk::Button::with_label(&format!(
            "{} {}",
            central_glyph(central),
            gettext(central.name())
        ));
        button.add_css_class("pill");
        button.set_size_request(120, 48);
        button.connect_clicked({
            let state = state.clone();
            move |_| {
                with_controller(&state, |controller| {
                    if let Controller::Swift(game) = controller {
                        game.submit_center(central);
                    }
                });
            }
        });
        center_row.append(&button);
    }

    let pad = gtk::Grid::new();
    pad.set_halign(gtk::Align::Center);
    pad.set_row_spacing(TILE_GAP as u32);
    pad.set_column_spacing(TILE_GAP as u32);
    for location in Location::ALL {
        let button = gtk::Button::with_label(location.arrow());
        button.add_css_class("circular");
        button.set_size_request(48, 48);
        button.connect_clicked({
            let state = state.clone();
            move |_| {
                with_controller(&state, |controller| {
                    if let Controller::Swift(game) = controller {
                        game.submit_peripheral(location);
                    }
                });
            }
        });
        let (x, y) = pad_cell(location);
        pad.attach(&button, x, y, 1, 1);
    }

    root.append(&message);
    root.append(&aspect_wrap(&canvas, 1.0));
    root.append(&center_row);
    root.append(&pad);

    let refresh: BoardRefresh = Rc::new(move |session: &Session| {
        let Controller::Swift(game) = session.controller() else {
            return;
        };
        let phase = game.phase();
        message.set_text(&tr(phase.message()));
        center_row.set_visible(phase == Phase::InputCenter);
        pad.set_visible(phase == Phase::InputPeripheral);
        canvas.queue_draw();
    });
    (root.upcast(), refresh)
}
