use serde_json::Value;

use super::KeyValueFile;
use crate::error::StoreError;

const LANGUAGE_KEY: &str = "language";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ja,
    Ko,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Ja, Language::Ko];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
            Language::Ko => "ko",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Native name, shown in the language picker.
    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ja => "日本語",
            Language::Ko => "한국어",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Preferences {
    file: KeyValueFile,
}

impl Preferences {
    pub fn new(file: KeyValueFile) -> Self {
        Preferences { file }
    }

    pub fn language(&self) -> Language {
        match self.file.get_str(LANGUAGE_KEY) {
            Some(code) => Language::from_code(&code).unwrap_or_else(|| {
                tracing::warn!(code, "unknown language code, using English");
                Language::En
            }),
            None => Language::En,
        }
    }

    pub fn set_language(&self, language: Language) -> Result<(), StoreError> {
        self.file
            .put(LANGUAGE_KEY, Value::String(language.code().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(dir: &tempfile::TempDir) -> Preferences {
        Preferences::new(KeyValueFile::new(dir.path().join("preferences.json")))
    }

    #[test]
    fn defaults_to_english() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(prefs(&dir).language(), Language::En);
    }

    #[test]
    fn language_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        prefs(&dir).set_language(Language::Ko).unwrap();
        assert_eq!(prefs(&dir).language(), Language::Ko);
    }

    #[test]
    fn unknown_code_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = KeyValueFile::new(dir.path().join("preferences.json"));
        file.put(LANGUAGE_KEY, Value::String("fr".into())).unwrap();
        assert_eq!(Preferences::new(file).language(), Language::En);
        assert_eq!(Language::from_code("ja"), Some(Language::Ja));
    }
}
