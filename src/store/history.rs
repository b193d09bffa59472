//! Finished runs, newest first.

use serde_json::Value;

use super::KeyValueFile;
use crate::error::StoreError;
use crate::result::GameResult;

const HISTORY_KEY: &str = "game_history_list";

#[derive(Clone, Debug)]
pub struct HistoryStore {
    file: KeyValueFile,
}

impl HistoryStore {
    pub fn new(file: KeyValueFile) -> Self {
        HistoryStore { file }
    }

    /// The stored list; empty when nothing was saved or the entry is unreadable.
    pub fn load(&self) -> Vec<GameResult> {
        let Some(raw) = self.file.get_str(HISTORY_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(err) => {
                tracing::warn!(path = %self.file.path().display(), "unreadable history, ignoring: {err}");
                Vec::new()
            }
        }
    }

    pub fn save(&self, list: &[GameResult]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(list).map_err(|source| StoreError::Json {
            path: self.file.path().to_path_buf(),
            source,
        })?;
        self.file.put(HISTORY_KEY, Value::String(encoded))
    }

    pub fn record(&self, result: &GameResult) -> Result<(), StoreError> {
        let mut list = self.load();
        list.insert(0, result.clone());
        self.save(&list)?;
        tracing::debug!(entries = list.len(), game = %result.game_type, "history updated");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.file.remove(HISTORY_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProblemKind;
    use crate::games::Tally;

    fn store(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::new(KeyValueFile::new(dir.path().join("history.json")))
    }

    #[test]
    fn record_puts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let history = store(&dir);
        let older = GameResult::at(ProblemKind::Math, Tally::from_counts(5, 2), 0, 1_000);
        let newer = GameResult::at(ProblemKind::Pathfinder, Tally::from_counts(1, 0), 42, 2_000);
        history.record(&older).unwrap();
        history.record(&newer).unwrap();
        assert_eq!(history.load(), vec![newer, older]);
    }

    #[test]
    fn stored_as_encoded_string_under_list_key() {
        let dir = tempfile::tempdir().unwrap();
        let history = store(&dir);
        let result = GameResult::at(ProblemKind::Puzzle, Tally::from_counts(3, 1), 0, 7);
        history.record(&result).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("history.json")).unwrap();
        let map: serde_json::Map<String, Value> = serde_json::from_str(&raw).unwrap();
        let encoded = map[HISTORY_KEY].as_str().unwrap();
        assert!(encoded.contains("\"gameType\":\"Shape Puzzle\""));
    }

    #[test]
    fn garbled_entry_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = KeyValueFile::new(dir.path().join("history.json"));
        file.put(HISTORY_KEY, Value::String("[{oops".into())).unwrap();
        assert!(HistoryStore::new(file).load().is_empty());
    }

    #[test]
    fn clear_empties_the_list() {
        let dir = tempfile::tempdir().unwrap();
        let history = store(&dir);
        history
            .record(&GameResult::at(ProblemKind::Card, Tally::from_counts(1, 1), 0, 3))
            .unwrap();
        history.clear().unwrap();
        assert!(history.load().is_empty());
    }
}
