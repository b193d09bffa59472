use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::prelude::*;

use super::records::format_mm_ss;
use super::scene::{go_home, play_again};
use super::state::AppState;

fn stat_row(grid: &gtk::Grid, row: i32, label: &str, value: &str) {
    let name = gtk::Label::new(Some(label));
    name.add_css_class("dim-label");
    name.set_xalign(0.0);
    name.set_hexpand(true);
    let value = gtk::Label::new(Some(value));
    value.add_css_class("heading");
    value.set_xalign(1.0);
    grid.attach(&name, 0, row, 1, 1);
    grid.attach(&value, 1, row, 1, 1);
}

pub(super) fn build_result_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("result-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let card = gtk::Box::new(gtk::Orientation::Vertical, 14);
    card.set_halign(gtk::Align::Center);
    card.set_valign(gtk::Align::Center);
    card.add_css_class("result-card");
    card.set_size_request(300, -1);
    card.set_margin_top(28);
    card.set_margin_bottom(28);
    card.set_margin_start(28);
    card.set_margin_end(28);

    let title = gtk::Label::new(Some(&gettext("Result")));
    title.add_css_class("title-1");

    let message = gtk::Label::new(None);
    message.add_css_class("result-message");
    message.add_css_class("title-3");
    message.set_wrap(true);
    message.set_justify(gtk::Justification::Center);

    let stats = gtk::Grid::new();
    stats.set_row_spacing(6);
    stats.set_column_spacing(24);
    stats.add_css_class("result-stats");

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    buttons.set_halign(gtk::Align::Center);
    buttons.set_margin_top(6);

    let again_btn = gtk::Button::with_label(&gettext("Play Again"));
    again_btn.add_css_class("suggested-action");
    again_btn.add_css_class("pill");
    let home_btn = gtk::Button::with_label(&gettext("Back Home"));
    home_btn.add_css_class("pill");

    again_btn.connect_clicked({
        let state = state.clone();
        move |_| play_again(&state)
    });
    home_btn.connect_clicked({
        let state = state.clone();
        move |_| go_home(&state)
    });

    buttons.append(&again_btn);
    buttons.append(&home_btn);

    card.append(&title);
    card.append(&message);
    card.append(&stats);
    card.append(&buttons);
    center.set_center_widget(Some(&card));
    root.append(&center);

    {
        let mut st = state.borrow_mut();
        st.result_title_label = Some(title);
        st.result_message_label = Some(message);
        st.result_stats_grid = Some(stats);
    }
    root
}

/// Fills the result card from the last finished run.
pub(super) fn fill_result(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    let Some(result) = &st.last_result else {
        return;
    };
    if let Some(label) = &st.result_title_label {
        label.set_text(&gettext(result.game_type.as_str()));
    }
    if let Some(label) = &st.result_message_label {
        label.set_text(&gettext(result.encouragement().message()));
    }
    let Some(grid) = &st.result_stats_grid else {
        return;
    };
    while let Some(child) = grid.first_child() {
        grid.remove(&child);
    }
    if result.reports_time() {
        let secs = u32::try_from(result.time_taken_seconds).unwrap_or(u32::MAX);
        stat_row(grid, 0, &gettext("Time Taken"), &format_mm_ss(secs));
        return;
    }
    stat_row(grid, 0, &gettext("Problems Solved"), &result.total_problems.to_string());
    stat_row(grid, 1, &gettext("Correct Answers"), &result.correct_answers.to_string());
    stat_row(grid, 2, &gettext("Incorrect Answers"), &result.incorrect_answers.to_string());
    stat_row(grid, 3, &gettext("Accuracy"), &format!("{}%", result.accuracy()));
}
