//! Puzzle inputs kept on disk

use crate::error::InputStoreError;
use std::fs;
use std::path::PathBuf;

/// Directory of puzzle inputs
///
/// Directory structure: `{input_dir}/{year}_day{day:02}.txt`
#[derive(Debug, Clone)]
pub struct InputStore {
    input_dir: PathBuf,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }

    /// Where the input for `year`/`day` lives
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.input_dir.join(format!("{}_day{:02}.txt", year, day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Stored input, or `None` when there is none
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, InputStoreError> {
        let path = self.path(year, day);
        if path.is_file() {
            Ok(Some(fs::read_to_string(&path)?))
        } else {
            Ok(None)
        }
    }

    /// Store input, creating the directory if needed
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), InputStoreError> {
        fs::create_dir_all(&self.input_dir).map_err(|e| {
            InputStoreError::DirCreation(format!(
                "Failed to create {}: {}",
                self.input_dir.display(),
                e
            ))
        })?;

        fs::write(self.path(year, day), input)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn path_format() {
        let store = InputStore::new(PathBuf::from("/inputs"));
        assert_eq!(store.path(2021, 1), PathBuf::from("/inputs/2021_day01.txt"));
        assert_eq!(store.path(2021, 25), PathBuf::from("/inputs/2021_day25.txt"));
    }

    #[test]
    fn put_then_get() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().join("nested").join("inputs"));

        assert!(!store.contains(2021, 9));
        assert!(store.get(2021, 9).unwrap().is_none());

        let input = "2199943210\n3987894921\n";
        store.put(2021, 9, input).unwrap();

        assert!(store.contains(2021, 9));
        assert_eq!(store.get(2021, 9).unwrap(), Some(input.to_string()));
        assert!(!store.contains(2021, 10));
    }

    #[test]
    fn put_fails_when_directory_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("inputs");
        fs::write(&blocker, "not a directory").unwrap();

        let store = InputStore::new(blocker);
        let err = store.put(2021, 1, "199\n").unwrap_err();
        assert!(matches!(err, InputStoreError::DirCreation(_)));
    }
}
