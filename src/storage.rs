//! Whole-file JSON persistence of the current result set.
//!
//! Files are UTF-8, pretty-printed with two-space indentation, and keep
//! non-ASCII text literal. Writes overwrite the file in place.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::AppError;
use crate::models::vacancy::VacancySet;

pub fn save(records: &VacancySet, path: &Path) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    tracing::debug!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Truncate the file to zero length, creating it if needed.
pub fn clear(path: &Path) -> Result<(), AppError> {
    fs::write(path, b"")?;
    Ok(())
}

/// Load a saved set. An empty (cleared) file loads as an empty set.
pub fn load(path: &Path) -> Result<VacancySet, AppError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "No saved vacancies at {}; run a search first",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    if text.trim().is_empty() {
        return Ok(VacancySet::new());
    }
    Ok(serde_json::from_str(&text)?)
}

/// Clear, write, then read back the set as stored.
pub fn replace(records: &VacancySet, path: &Path) -> Result<VacancySet, AppError> {
    clear(path)?;
    save(records, path)?;
    load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vacancy::tests::record;

    #[test]
    fn writes_two_space_indent_and_literal_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut set = VacancySet::new();
        set.insert("item 1", record("Разработчик", Some(1), "Ромашка"));

        save(&set, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.starts_with("{\n  \"item 1\": {\n    \"title\": \"Разработчик\""));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn cleared_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut set = VacancySet::new();
        set.insert("item 1", record("A", Some(1), "X"));
        save(&set, &path).unwrap();

        clear(&path).unwrap();

        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn replace_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut set = VacancySet::new();
        set.insert("item 2", record("B", Some(2), "Y"));
        set.insert("item 1", record("A", Some(1), "X"));

        assert_eq!(replace(&set, &path).unwrap(), set);
    }
}
