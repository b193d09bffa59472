use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::pango;
use gtk4::prelude::*;

use super::state::{AppState, BoardRefresh};
use super::{card_board, math_board, nback_board, path_board, puzzle_board, swift_board};
use crate::catalog::ProblemKind;
use crate::games::puzzle::Shape;

pub const CONTENT_MARGIN: i32 = 12;
pub const TILE_GAP: i32 = 6;

/// Builds the board for the active session's game.
pub(super) fn build_board(state: &Rc<RefCell<AppState>>) -> Option<(gtk::Widget, BoardRefresh)> {
    let kind = state.borrow().session.as_ref()?.kind();
    let (board, refresh) = match kind {
        ProblemKind::Math => math_board::build(state),
        ProblemKind::Puzzle => puzzle_board::build(state),
        ProblemKind::Card => card_board::build(state),
        ProblemKind::NBack => nback_board::build(state),
        ProblemKind::SwiftVision => swift_board::build(state),
        ProblemKind::Pathfinder => path_board::build(state),
    };

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);
    content.add_css_class("board-card");
    content.append(&board);
    Some((content.upcast(), refresh))
}

pub(super) fn status_label() -> gtk::Label {
    let label = gtk::Label::new(None);
    label.add_css_class("board-status");
    label.add_css_class("title-3");
    label.set_halign(gtk::Align::Center);
    label.set_wrap(true);
    label
}

pub(super) fn square_area() -> gtk::DrawingArea {
    let area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .content_width(220)
        .content_height(220)
        .build();
    area.add_css_class("board-canvas");
    area
}

pub(super) fn aspect_wrap(child: &impl IsA<gtk::Widget>, ratio: f32) -> gtk::AspectFrame {
    let frame = gtk::AspectFrame::new(0.5, 0.5, ratio, false);
    frame.set_halign(gtk::Align::Fill);
    frame.set_valign(gtk::Align::Fill);
    frame.set_hexpand(true);
    frame.set_vexpand(true);
    frame.set_child(Some(child));
    frame
}

pub(super) fn foreground(area: &impl IsA<gtk::Widget>) -> (f64, f64, f64, f64) {
    let fg = area.style_context().color();
    (
        fg.red() as f64,
        fg.green() as f64,
        fg.blue() as f64,
        fg.alpha() as f64,
    )
}

/// Filled shape centered on `(cx, cy)` with the given half-extent.
pub(super) fn draw_shape(cr: &cairo::Context, shape: Shape, cx: f64, cy: f64, radius: f64) {
    match shape {
        Shape::Square => cr.rectangle(cx - radius, cy - radius, radius * 2.0, radius * 2.0),
        Shape::Circle => cr.arc(cx, cy, radius, 0.0, std::f64::consts::TAU),
        Shape::Triangle => {
            cr.move_to(cx, cy - radius);
            cr.line_to(cx + radius, cy + radius);
            cr.line_to(cx - radius, cy + radius);
            cr.close_path();
        }
    }
    let _ = cr.fill();
}

pub(super) fn draw_centered_text(
    cr: &cairo::Context,
    text: &str,
    cx: f64,
    cy: f64,
    font_size: f64,
    bold: bool,
) {
    let layout = pangocairo::functions::create_layout(cr);
    let mut font_desc = pango::FontDescription::new();
    font_desc.set_family("Cantarell, Noto Sans, sans");
    if bold {
        font_desc.set_weight(pango::Weight::Bold);
    }
    font_desc.set_size((font_size * pango::SCALE as f64) as i32);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    let (text_width, text_height) = layout.pixel_size();
    cr.move_to(cx - text_width as f64 / 2.0, cy - text_height as f64 / 2.0);
    pangocairo::functions::show_layout(cr, &layout);
}

/// Small square button holding a drawn shape, used by the shape and card
/// games.
pub(super) fn shape_button(
    draw: impl Fn(&gtk::DrawingArea, &cairo::Context, i32, i32) + 'static,
) -> gtk::Button {
    let area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .content_width(64)
        .content_height(64)
        .build();
    area.set_draw_func(move |area, cr, width, height| {
        cr.set_antialias(cairo::Antialias::Best);
        draw(area, cr, width, height);
    });
    let button = gtk::Button::builder().css_classes(vec!["shape-button"]).build();
    button.set_child(Some(&area));
    button
}

pub(super) fn redraw_button_child(button: &gtk::Button) {
    if let Some(child) = button.child() {
        child.queue_draw();
    }
}
