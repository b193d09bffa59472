use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use gettextrs::gettext;
use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;

use super::catalog_view::build_catalog_view;
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud::set_header_menu;
use super::i18n;
use super::records::build_history_view;
use super::result_view::build_result_view;
use super::scene::{go_back, go_home, navigate, restart_game, start_from_title};
use super::state::AppState;
use crate::route::Route;
use crate::store::{Language, Storage};

const APP_ID: &str = "io.github.neuroboost.NeuroBoost";

pub fn run(storage: Storage) -> glib::ExitCode {
    i18n::init(storage.preferences().language());
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        load_css();
        let state = Rc::new(RefCell::new(AppState::new(storage.clone())));
        register_actions(app, &state);
        build_window(app, &state);
    });

    app.run()
}

fn register_actions(app: &adw::Application, state: &Rc<RefCell<AppState>>) {
    let history_action = SimpleAction::new("history", None);
    history_action.connect_activate({
        let state = state.clone();
        move |_, _| navigate(&state, Route::History)
    });
    app.add_action(&history_action);

    let instructions_action = SimpleAction::new("instructions", None);
    instructions_action.connect_activate({
        let app = app.clone();
        move |_, _| {
            show_instructions_dialog(&app);
        }
    });
    app.add_action(&instructions_action);

    let about_action = SimpleAction::new("about", None);
    about_action.connect_activate({
        let app = app.clone();
        move |_, _| {
            show_about_dialog(&app);
        }
    });
    app.add_action(&about_action);

    let quit_action = SimpleAction::new("quit", None);
    quit_action.connect_activate({
        let app = app.clone();
        move |_, _| app.quit()
    });
    app.add_action(&quit_action);
    app.set_accels_for_action("app.quit", &["<Control>q"]);
}

fn build_window(app: &adw::Application, state: &Rc<RefCell<AppState>>) {
    let title_menu = gtk::Label::new(None);
    title_menu.set_markup("<b>NeuroBoost</b>");
    title_menu.set_halign(gtk::Align::Center);

    let title_game_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
    title_game_box.set_valign(gtk::Align::Center);
    title_game_box.set_halign(gtk::Align::Center);
    title_game_box.set_hexpand(true);

    let title_game_main = gtk::Label::builder()
        .label("NeuroBoost")
        .halign(gtk::Align::Center)
        .css_classes(vec!["game-title-main"])
        .build();

    let title_game_subtitle = gtk::Label::builder()
        .label("")
        .halign(gtk::Align::Center)
        .css_classes(vec!["game-title-subtitle", "caption"])
        .build();

    title_game_box.append(&title_game_main);
    title_game_box.append(&title_game_subtitle);

    let header = adw::HeaderBar::builder().title_widget(&title_menu).build();
    header.add_css_class("app-header");
    header.add_css_class("flat");

    let back_button = gtk::Button::builder()
        .icon_name("go-previous-symbolic")
        .build();
    back_button.set_tooltip_text(Some(&gettext("Back")));
    back_button.connect_clicked({
        let state = state.clone();
        move |_| go_back(&state)
    });
    header.pack_start(&back_button);

    let menu_model = gio::Menu::new();
    menu_model.append(Some(&gettext("History")), Some("app.history"));
    menu_model.append(Some(&gettext("Instructions")), Some("app.instructions"));
    menu_model.append(Some(&gettext("About NeuroBoost")), Some("app.about"));
    menu_model.append(Some(&gettext("Quit")), Some("app.quit"));
    let menu_button = gtk::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu_model)
        .build();

    let restart_button = gtk::Button::builder()
        .icon_name("view-refresh-symbolic")
        .build();
    restart_button.set_tooltip_text(Some(&gettext("Restart")));
    restart_button.connect_clicked({
        let state = state.clone();
        move |_| restart_game(&state)
    });
    let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    end_box.append(&restart_button);
    end_box.append(&menu_button);
    header.pack_end(&end_box);

    let view_stack = gtk::Stack::new();
    view_stack.set_hexpand(true);
    view_stack.set_vexpand(true);
    view_stack.set_hhomogeneous(false);
    view_stack.set_vhomogeneous(false);
    view_stack.set_interpolate_size(false);
    view_stack.set_transition_duration(300);

    let toast_overlay = adw::ToastOverlay::new();
    toast_overlay.set_child(Some(&view_stack));

    let toolbar = adw::ToolbarView::new();
    toolbar.set_hexpand(true);
    toolbar.set_vexpand(true);
    toolbar.add_top_bar(&header);
    toolbar.set_content(Some(&toast_overlay));

    let win = adw::ApplicationWindow::builder()
        .application(app)
        .title("NeuroBoost")
        .default_width(720)
        .default_height(760)
        .content(&toolbar)
        .build();
    win.set_size_request(360, 560);
    win.add_css_class("app-window");

    {
        let mut st = state.borrow_mut();
        st.view_stack = Some(view_stack);
        st.header = Some(header);
        st.back_button = Some(back_button);
        st.restart_button = Some(restart_button);
        st.title_menu = Some(title_menu);
        st.title_game = Some(title_game_box.upcast::<gtk::Widget>());
        st.title_game_main = Some(title_game_main);
        st.title_game_subtitle = Some(title_game_subtitle);
        st.toast_overlay = Some(toast_overlay);
    }
    populate_views(state);

    let global_key = gtk::EventControllerKey::new();
    global_key.set_propagation_phase(gtk::PropagationPhase::Capture);
    global_key.connect_key_pressed({
        let state = state.clone();
        move |_, key, _, _| {
            if key == gdk::Key::Escape && state.borrow().navigator.can_go_back() {
                go_back(&state);
                return glib::Propagation::Stop;
            }
            glib::Propagation::Proceed
        }
    });
    win.add_controller(global_key);

    set_header_menu(state);
    win.present();
}

/// (Re)creates every view. Called at startup and after a language change so
/// freshly translated labels are picked up.
fn populate_views(state: &Rc<RefCell<AppState>>) {
    let Some(view_stack) = state.borrow().view_stack.clone() else {
        return;
    };
    while let Some(child) = view_stack.first_child() {
        view_stack.remove(&child);
    }

    let title_view = build_title_view(state);
    view_stack.add_named(&title_view, Some("title"));
    let catalog_view = build_catalog_view(state);
    view_stack.add_named(&catalog_view, Some("all_problems"));
    let history_view = build_history_view(state);
    view_stack.add_named(&history_view, Some("history"));
    let game_view = build_game_view(state);
    view_stack.add_named(&game_view, Some("game"));
    let result_view = build_result_view(state);
    view_stack.add_named(&result_view, Some("result"));

    view_stack.set_transition_type(gtk::StackTransitionType::None);
    view_stack.set_visible_child_name("title");
}

fn build_title_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("main-menu-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 6);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.add_css_class("main-menu-content");

    let title = gtk::Label::new(Some("NeuroBoost"));
    title.add_css_class("main-menu-title");
    title.add_css_class("title-1");

    let subtitle = gtk::Label::new(Some(&gettext("Train your brain every day")));
    subtitle.add_css_class("dim-label");
    subtitle.set_margin_bottom(18);

    let buttons_box = gtk::Box::new(gtk::Orientation::Vertical, 13);
    buttons_box.set_halign(gtk::Align::Center);

    let start_button = gtk::Button::with_label(&gettext("Start"));
    start_button.add_css_class("main-menu-button");
    start_button.add_css_class("suggested-action");
    start_button.set_size_request(164, 40);
    start_button.connect_clicked({
        let state = state.clone();
        move |_| start_from_title(&state)
    });

    let problems_button = gtk::Button::with_label(&gettext("All Problems"));
    problems_button.add_css_class("main-menu-button");
    problems_button.set_size_request(164, 40);
    problems_button.connect_clicked({
        let state = state.clone();
        move |_| navigate(&state, Route::AllProblems)
    });

    let history_button = gtk::Button::with_label(&gettext("History"));
    history_button.add_css_class("main-menu-button");
    history_button.set_size_request(164, 40);
    history_button.connect_clicked({
        let state = state.clone();
        move |_| navigate(&state, Route::History)
    });

    buttons_box.append(&start_button);
    buttons_box.append(&problems_button);
    buttons_box.append(&history_button);

    let language_row = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    language_row.set_halign(gtk::Align::Center);
    language_row.set_margin_top(24);
    let language_label = gtk::Label::new(Some(&gettext("Language")));
    language_label.add_css_class("dim-label");
    let names: Vec<&str> = Language::ALL.iter().map(|lang| lang.name()).collect();
    let language_dropdown = gtk::DropDown::from_strings(&names);
    let current = state.borrow().storage.preferences().language();
    let current_index = Language::ALL
        .iter()
        .position(|lang| *lang == current)
        .unwrap_or(0);
    language_dropdown.set_selected(current_index as u32);
    language_dropdown.set_tooltip_text(Some(&gettext(
        "Text stays in English unless translations for the language are installed",
    )));
    language_dropdown.connect_selected_notify({
        let state = state.clone();
        move |dropdown| {
            let Some(language) = Language::ALL.get(dropdown.selected() as usize).copied() else {
                return;
            };
            change_language(&state, language);
        }
    });
    language_row.append(&language_label);
    language_row.append(&language_dropdown);

    content.append(&title);
    content.append(&subtitle);
    content.append(&buttons_box);
    content.append(&language_row);

    center.set_center_widget(Some(&content));
    root.append(&center);
    root
}

fn change_language(state: &Rc<RefCell<AppState>>, language: Language) {
    let saved = state.borrow().storage.preferences().set_language(language);
    if let Err(err) = saved {
        tracing::warn!("failed to save language: {err}");
        state.borrow().show_toast(&gettext("Could not save language"));
    }
    i18n::apply(language);
    tracing::info!(language = language.code(), "language changed");

    // The dropdown that fired this lives in the stack being rebuilt.
    let state = state.clone();
    glib::idle_add_local_once(move || {
        go_home(&state);
        populate_views(&state);
        set_header_menu(&state);
    });
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_halign(gtk::Align::Fill);
    board_card.set_valign(gtk::Align::Fill);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("board-container");

    let clamp = adw::Clamp::builder()
        .maximum_size(640)
        .child(&board_card)
        .build();
    root.append(&clamp);

    state.borrow_mut().board_container = Some(board_card);
    root
}

fn load_css() {
    static RESOURCES_INIT: Once = Once::new();
    RESOURCES_INIT.call_once(|| {
        if let Err(err) = gio::resources_register_include!("neuroboost.gresource") {
            tracing::warn!("failed to register embedded resources: {err}");
        }
    });

    let Some(display) = gdk::Display::default() else {
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_resource("/io/github/neuroboost/NeuroBoost/style.css");
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
