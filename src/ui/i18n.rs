use gettextrs::{LocaleCategory, bind_textdomain_codeset, bindtextdomain, setlocale, textdomain};

use crate::store::Language;

const GETTEXT_PACKAGE: &str = "neuroboost";
const LOCALE_DIR: &str = match option_env!("NEUROBOOST_LOCALEDIR") {
    Some(dir) => dir,
    None => "/usr/share/locale",
};

pub(super) fn init(language: Language) {
    setlocale(LocaleCategory::LcAll, "");
    if let Err(err) = bindtextdomain(GETTEXT_PACKAGE, LOCALE_DIR) {
        tracing::warn!("failed to bind text domain: {err}");
    }
    if let Err(err) = bind_textdomain_codeset(GETTEXT_PACKAGE, "UTF-8") {
        tracing::warn!("failed to set text domain codeset: {err}");
    }
    if let Err(err) = textdomain(GETTEXT_PACKAGE) {
        tracing::warn!("failed to select text domain: {err}");
    }
    apply(language);
}

fn locale_name(language: Language) -> &'static str {
    match language {
        Language::En => "en_US.UTF-8",
        Language::Ja => "ja_JP.UTF-8",
        Language::Ko => "ko_KR.UTF-8",
    }
}

/// Switches the message catalog. Strings built afterwards use it.
pub(super) fn apply(language: Language) {
    if setlocale(LocaleCategory::LcMessages, locale_name(language)).is_none() {
        tracing::warn!(language = language.code(), "locale not available, messages stay untranslated");
    }
}

/// `gettext`, except that an empty message stays empty instead of
/// resolving to the catalog header.
pub(super) fn tr(msgid: &str) -> String {
    if msgid.is_empty() {
        return String::new();
    }
    gettextrs::gettext(msgid)
}
