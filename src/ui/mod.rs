//! GTK4 + libadwaita shell.

pub mod app;
mod board;
mod card_board;
mod catalog_view;
mod dialogs;
mod hud;
mod i18n;
mod math_board;
mod nback_board;
mod path_board;
mod puzzle_board;
mod records;
mod result_view;
mod scene;
mod state;
mod swift_board;
