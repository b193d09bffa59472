use gettextrs::gettext;
use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

use crate::catalog::PROBLEMS;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let mut body = gettext("Pick a problem and beat it before the clock runs out.");
    for problem in &PROBLEMS {
        body.push_str(&format!(
            "\n\n• {}: {}",
            gettext(problem.title),
            gettext(problem.description)
        ));
    }
    let dialog = adw::AlertDialog::new(Some(&gettext("Instructions")), Some(&body));
    dialog.add_response("ok", &gettext("Got it"));
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("NeuroBoost")
        .application_icon("applications-games-symbolic")
        .developer_name("NeuroBoost developers")
        .version(env!("CARGO_PKG_VERSION"))
        .comments(gettext(
            "Short brain-training mini-games.\n\nJapanese and Korean need installed translations; \
             without them the interface stays in English.",
        ))
        .build();
    dialog.add_legal_section("NeuroBoost", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}
