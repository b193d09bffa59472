//! Solved flags, one boolean per problem id.

use serde_json::Value;

use super::KeyValueFile;
use crate::catalog::PROBLEMS;
use crate::error::StoreError;

const SOLVED_PREFIX: &str = "solved_";

#[derive(Clone, Debug)]
pub struct ProgressStore {
    file: KeyValueFile,
}

impl ProgressStore {
    pub fn new(file: KeyValueFile) -> Self {
        ProgressStore { file }
    }

    pub fn is_solved(&self, problem_id: &str) -> bool {
        self.file.get_bool(&solved_key(problem_id))
    }

    /// Flags only ever go from unsolved to solved.
    pub fn mark_solved(&self, problem_id: &str) -> Result<(), StoreError> {
        if self.is_solved(problem_id) {
            return Ok(());
        }
        self.file.put(&solved_key(problem_id), Value::Bool(true))?;
        tracing::info!(problem_id, "problem solved");
        Ok(())
    }

    /// Catalog ids currently flagged, in catalog order.
    pub fn solved_ids(&self) -> Vec<&'static str> {
        let map = self.file.load();
        PROBLEMS
            .iter()
            .map(|problem| problem.id)
            .filter(|id| map.get(&solved_key(id)).and_then(Value::as_bool) == Some(true))
            .collect()
    }
}

fn solved_key(problem_id: &str) -> String {
    format!("{SOLVED_PREFIX}{problem_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> ProgressStore {
        ProgressStore::new(KeyValueFile::new(dir.path().join("progress.json")))
    }

    #[test]
    fn unsolved_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let progress = store(&dir);
        assert!(!progress.is_solved("math_1"));
        assert!(progress.solved_ids().is_empty());
    }

    #[test]
    fn mark_solved_persists_under_prefixed_key() {
        let dir = tempfile::tempdir().unwrap();
        let progress = store(&dir);
        progress.mark_solved("path_1").unwrap();
        progress.mark_solved("math_1").unwrap();
        progress.mark_solved("math_1").unwrap();

        assert!(store(&dir).is_solved("path_1"));
        assert_eq!(progress.solved_ids(), vec!["math_1", "path_1"]);
        let raw = std::fs::read_to_string(dir.path().join("progress.json")).unwrap();
        assert!(raw.contains("\"solved_path_1\": true"));
    }

    #[test]
    fn unreadable_progress_rejects_new_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::create_dir(&path).unwrap();
        let progress = store(&dir);
        assert!(matches!(
            progress.mark_solved("card_1"),
            Err(StoreError::Io { .. })
        ));
        assert!(path.is_dir());
    }
}
