use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;

use super::state::AppState;
use crate::result::GameResult;

const HISTORY_ROW_LIMIT: usize = 200;

pub(super) fn format_mm_ss(total_secs: u32) -> String {
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

fn table_cell(text: &str, class_name: &str, width_chars: i32) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.add_css_class(class_name);
    label.add_css_class("body");
    label.set_halign(gtk::Align::Fill);
    label.set_hexpand(true);
    label.set_xalign(0.5);
    if width_chars > 0 {
        label.set_width_chars(width_chars);
    }
    label
}

fn section_title(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.add_css_class("score-section-title");
    label.add_css_class("heading");
    label.set_halign(gtk::Align::Center);
    label.set_xalign(0.5);
    label
}

fn date_label(timestamp_ms: u64) -> String {
    let secs = i64::try_from(timestamp_ms / 1000).unwrap_or(i64::MAX);
    if let Ok(dt) = glib::DateTime::from_unix_local(secs)
        && let Ok(text) = dt.format("%Y-%m-%d %H:%M")
    {
        return text.to_string();
    }
    gettext("Unknown date")
}

/// Score column: elapsed time for timed trails, counts for everything else.
fn score_text(result: &GameResult) -> String {
    if result.reports_time() {
        let secs = u32::try_from(result.time_taken_seconds).unwrap_or(u32::MAX);
        return format_mm_ss(secs);
    }
    format!("{} / {}", result.correct_answers, result.total_problems)
}

fn build_history_grid(entries: &[GameResult]) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.set_halign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_column_homogeneous(true);
    grid.set_column_spacing(10);
    grid.set_row_spacing(5);
    grid.attach(&table_cell(&gettext("Game"), "score-table-head", 12), 0, 0, 1, 1);
    grid.attach(&table_cell(&gettext("Score"), "score-table-head", 7), 1, 0, 1, 1);
    grid.attach(&table_cell(&gettext("Accuracy"), "score-table-head", 7), 2, 0, 1, 1);
    grid.attach(&table_cell(&gettext("Date"), "score-table-head", 14), 3, 0, 1, 1);

    for (idx, entry) in entries.iter().take(HISTORY_ROW_LIMIT).enumerate() {
        let row = (idx + 1) as i32;
        let accuracy = if entry.reports_time() {
            "---".to_string()
        } else {
            format!("{}%", entry.accuracy())
        };
        grid.attach(&table_cell(&gettext(entry.game_type.as_str()), "score-table-row", 12), 0, row, 1, 1);
        grid.attach(&table_cell(&score_text(entry), "score-table-row", 7), 1, row, 1, 1);
        grid.attach(&table_cell(&accuracy, "score-table-row", 7), 2, row, 1, 1);
        grid.attach(&table_cell(&date_label(entry.timestamp), "score-table-row", 14), 3, row, 1, 1);
    }
    grid
}

pub(super) fn build_history_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("history-root");

    let list = gtk::Box::new(gtk::Orientation::Vertical, 8);
    list.add_css_class("score-list-page");
    list.set_margin_top(10);
    list.set_margin_bottom(10);
    list.set_margin_start(10);
    list.set_margin_end(10);

    let clamp = adw::Clamp::builder().maximum_size(720).child(&list).build();
    let scroller = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .vexpand(true)
        .child(&clamp)
        .build();
    root.append(&scroller);

    state.borrow_mut().history_list = Some(list);
    root
}

pub(super) fn refresh_history(state: &Rc<RefCell<AppState>>) {
    let (list, entries) = {
        let st = state.borrow();
        (st.history_list.clone(), st.storage.history().load())
    };
    let Some(list) = list else {
        return;
    };
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }

    list.append(&section_title(&gettext("Performance History")));
    if entries.is_empty() {
        let empty = gtk::Label::new(Some(&gettext("No games played yet.")));
        empty.add_css_class("dim-label");
        empty.set_margin_top(24);
        list.append(&empty);
        return;
    }
    list.append(&build_history_grid(&entries));

    let clear_button = gtk::Button::with_label(&gettext("Clear History"));
    clear_button.add_css_class("destructive-action");
    clear_button.set_halign(gtk::Align::Center);
    clear_button.set_margin_top(12);
    clear_button.connect_clicked({
        let state = state.clone();
        move |button| confirm_clear(&state, button)
    });
    list.append(&clear_button);
}

fn confirm_clear(state: &Rc<RefCell<AppState>>, anchor: &gtk::Button) {
    let alert = adw::AlertDialog::builder()
        .heading(gettext("Clear history?"))
        .body(gettext("Every recorded result will be removed. Solved badges stay."))
        .build();
    alert.add_response("cancel", &gettext("Cancel"));
    alert.add_response("clear", &gettext("Clear"));
    alert.set_response_appearance("clear", adw::ResponseAppearance::Destructive);
    alert.set_default_response(Some("cancel"));
    alert.set_close_response("cancel");
    alert.connect_response(None, {
        let state = state.clone();
        move |_, response| {
            if response != "clear" {
                return;
            }
            let outcome = state.borrow().storage.history().clear();
            if let Err(err) = outcome {
                tracing::warn!("failed to clear history: {err}");
                state.borrow().show_toast(&gettext("Could not clear history"));
            }
            refresh_history(&state);
        }
    });
    alert.present(Some(anchor));
}
