use std::rc::Rc;

use gtk4 as gtk;
use libadwaita as adw;

use crate::result::GameResult;
use crate::route::{Navigator, Route};
use crate::session::Session;
use crate::store::Storage;

/// Pushes the active session's state into the board widgets.
pub type BoardRefresh = Rc<dyn Fn(&Session)>;

pub struct AppState {
    pub view_stack: Option<gtk::Stack>,
    pub header: Option<adw::HeaderBar>,
    pub back_button: Option<gtk::Button>,
    pub restart_button: Option<gtk::Button>,
    pub title_menu: Option<gtk::Label>,
    pub title_game: Option<gtk::Widget>,
    pub title_game_main: Option<gtk::Label>,
    pub title_game_subtitle: Option<gtk::Label>,
    pub board_container: Option<gtk::Box>,
    pub catalog_list: Option<gtk::ListBox>,
    pub history_list: Option<gtk::Box>,
    pub result_title_label: Option<gtk::Label>,
    pub result_message_label: Option<gtk::Label>,
    pub result_stats_grid: Option<gtk::Grid>,
    pub toast_overlay: Option<adw::ToastOverlay>,

    pub storage: Storage,
    pub navigator: Navigator,
    pub session: Option<Session>,
    pub board_refresh: Option<BoardRefresh>,
    pub last_game: Option<Route>,
    pub last_result: Option<GameResult>,

    pub run_id: u64,
    pub timer_handle: Option<glib::SourceId>,
    pub step_handle: Option<glib::SourceId>,
    pub scheduled_step: Option<u64>,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        AppState {
            view_stack: None,
            header: None,
            back_button: None,
            restart_button: None,
            title_menu: None,
            title_game: None,
            title_game_main: None,
            title_game_subtitle: None,
            board_container: None,
            catalog_list: None,
            history_list: None,
            result_title_label: None,
            result_message_label: None,
            result_stats_grid: None,
            toast_overlay: None,
            storage,
            navigator: Navigator::new(),
            session: None,
            board_refresh: None,
            last_game: None,
            last_result: None,
            run_id: 0,
            timer_handle: None,
            step_handle: None,
            scheduled_step: None,
        }
    }

    pub fn show_toast(&self, text: &str) {
        if let Some(overlay) = &self.toast_overlay {
            overlay.add_toast(adw::Toast::new(text));
        }
    }
}
