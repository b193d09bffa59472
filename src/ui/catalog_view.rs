use std::cell::RefCell;
use std::rc::Rc;

use gettextrs::gettext;
use gtk4 as gtk;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;

use super::scene::navigate;
use super::state::AppState;
use crate::catalog::PROBLEMS;
use crate::route::Route;

pub(super) fn build_catalog_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("catalog-root");

    let title = gtk::Label::new(Some(&gettext("All Problems")));
    title.add_css_class("title-2");
    title.set_margin_top(18);

    let list = gtk::ListBox::new();
    list.add_css_class("boxed-list");
    list.set_selection_mode(gtk::SelectionMode::None);
    list.set_valign(gtk::Align::Start);

    let clamp = adw::Clamp::builder().maximum_size(560).child(&list).build();
    clamp.set_margin_start(12);
    clamp.set_margin_end(12);
    clamp.set_margin_bottom(18);
    let scroller = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .vexpand(true)
        .child(&clamp)
        .build();

    root.append(&title);
    root.append(&scroller);

    state.borrow_mut().catalog_list = Some(list);
    refresh_catalog(state);
    root
}

/// Rebuilds the problem rows so solved badges are current.
pub(super) fn refresh_catalog(state: &Rc<RefCell<AppState>>) {
    let (list, progress) = {
        let st = state.borrow();
        (st.catalog_list.clone(), st.storage.progress())
    };
    let Some(list) = list else {
        return;
    };
    while let Some(child) = list.first_child() {
        list.remove(&child);
    }

    for problem in &PROBLEMS {
        let row = adw::ActionRow::builder()
            .title(gettext(problem.title))
            .subtitle(gettext(problem.description))
            .activatable(true)
            .build();

        let badge = gtk::Image::from_icon_name("emblem-ok-symbolic");
        badge.add_css_class("success");
        badge.set_tooltip_text(Some(&gettext("Solved")));
        badge.set_visible(progress.is_solved(problem.id));
        row.add_suffix(&badge);
        row.add_suffix(&gtk::Image::from_icon_name("go-next-symbolic"));

        row.connect_activated({
            let state = state.clone();
            move |_| {
                navigate(&state, Route::game(problem.kind, problem.id));
            }
        });
        list.append(&row);
    }
}
