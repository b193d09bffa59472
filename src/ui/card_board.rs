use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::{
    TILE_GAP, draw_centered_text, draw_shape, foreground, redraw_button_child, shape_button,
    status_label,
};
use super::hud::with_controller;
use super::state::{AppState, BoardRefresh};
use crate::games::cards::{Card, OPTION_COUNT, Phase, SEQUENCE_LEN};
use crate::games::{CardGame, Controller};
use crate::session::Session;

fn draw_card(cr: &cairo::Context, card: Card, width: i32, height: i32) {
    let (r, g, b) = card.color.rgb();
    cr.set_source_rgb(r, g, b);
    let radius = width.min(height) as f64 * 0.3;
    draw_shape(cr, card.shape, width as f64 / 2.0, height as f64 / 2.0, radius);
}

fn read_cards<T>(state: &Rc<RefCell<AppState>>, read: impl FnOnce(&CardGame) -> T) -> Option<T> {
    let st = state.borrow();
    match st.session.as_ref()?.controller() {
        Controller::Cards(game) => Some(read(game)),
        _ => None,
    }
}

pub(super) fn build(state: &Rc<RefCell<AppState>>) -> (gtk::Widget, BoardRefresh) {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 20);
    root.set_valign(gtk::Align::Center);
    root.set_vexpand(true);

    let message = status_label();

    let slots_row = gtk::Box::new(gtk::Orientation::Horizontal, TILE_GAP);
    slots_row.set_halign(gtk::Align::Center);
    let mut slots = Vec::with_capacity(SEQUENCE_LEN);
    for index in 0..SEQUENCE_LEN {
        let slot = gtk::DrawingArea::builder()
            .content_width(72)
            .content_height(72)
            .build();
        slot.add_css_class("card-slot");
        slot.set_draw_func({
            let state = state.clone();
            move |area, cr, width, height| {
                cr.set_antialias(cairo::Antialias::Best);
                let shown = read_cards(&state, |game| match game.phase() {
                    Phase::Memorize => game.sequence().get(index).copied(),
                    _ => game.entered().get(index).copied(),
                });
                match shown.flatten() {
                    Some(card) => draw_card(cr, card, width, height),
                    None => {
                        let (r, g, b, a) = foreground(area);
                        cr.set_source_rgba(r, g, b, a * 0.4);
                        let min_dim = width.min(height) as f64;
                        draw_centered_text(
                            cr,
                            "?",
                            width as f64 / 2.0,
                            height as f64 / 2.0,
                            min_dim * 0.34,
                            true,
                        );
                    }
                }
            }
        });
        slots_row.append(&slot);
        slots.push(slot);
    }

    let options_row = gtk::Box::new(gtk::Orientation::Horizontal, TILE_GAP);
    options_row.set_halign(gtk::Align::Center);
    options_row.set_homogeneous(true);
    let mut buttons = Vec::with_capacity(OPTION_COUNT);
    for index in 0..OPTION_COUNT {
        let button = shape_button({
            let state = state.clone();
            move |_, cr, width, height| {
                if let Some(Some(card)) = read_cards(&state, |game| game.options().get(index).copied()) {
                    draw_card(cr, card, width, height);
                }
            }
        });
        button.set_size_request(80, 80);
        button.connect_clicked({
            let state = state.clone();
            move |_| {
                let Some(Some(card)) = read_cards(&state, |game| game.options().get(index).copied())
                else {
                    return;
                };
                with_controller(&state, |controller| {
                    if let Controller::Cards(game) = controller {
                        game.select(card);
                    }
                });
            }
        });
        options_row.append(&button);
        buttons.push(button);
    }

    root.append(&message);
    root.append(&slots_row);
    root.append(&options_row);

    let refresh: BoardRefresh = Rc::new(move |session: &Session| {
        let Controller::Cards(game) = session.controller() else {
            return;
        };
        message.set_text(&gettext(game.phase().message()));
        let accepting = game.phase() == Phase::Recall;
        for slot in &slots {
            slot.queue_draw();
        }
        for button in &buttons {
            button.set_sensitive(accepting);
            redraw_button_child(button);
        }
    });
    (root.upcast(), refresh)
}
