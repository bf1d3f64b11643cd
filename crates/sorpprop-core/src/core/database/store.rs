use super::error::DatabaseError;
use super::model::{Entry, EntryKey, EntryKind};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const COMPACT_FILE: &str = "sorpproplib.json";
pub const FORMATTED_FILE: &str = "sorpproplib_formatted.json";

/// The ordered collection of entries making up one database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Database {
    entries: Vec<Entry>,
}

impl Database {
    pub fn new(entries: Vec<Entry>) -> Result<Self, DatabaseError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(&entry.key) {
                return Err(DatabaseError::DuplicateKey(entry.key.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &EntryKey) -> Option<&Entry> {
        self.entries.iter().find(|entry| &entry.key == key)
    }

    pub fn find(
        &self,
        sorbent: &str,
        subtype: &str,
        refrigerant: &str,
        kind: EntryKind,
    ) -> Option<&Entry> {
        self.entries.iter().find(|entry| {
            entry.key.kind == kind
                && entry.key.sorbent == sorbent
                && entry.key.subtype == subtype
                && entry.key.refrigerant == refrigerant
        })
    }

    pub fn entries_of(&self, kind: EntryKind) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |entry| entry.key.kind == kind)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<Entry> = serde_json::from_str(text)?;
        Self::new(entries).map_err(serde::de::Error::custom)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DatabaseError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let entries: Vec<Entry> =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| DatabaseError::Json {
                path: path.display().to_string(),
                source: e,
            })?;
        Self::new(entries)
    }

    pub fn write_compact<W: Write>(&self, writer: W) -> Result<(), DatabaseError> {
        serde_json::to_writer(writer, &self.entries).map_err(DatabaseError::Encode)
    }

    /// Writes the same content with four-space indentation.
    pub fn write_indented<W: Write>(&self, writer: W) -> Result<(), DatabaseError> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.entries
            .serialize(&mut serializer)
            .map_err(DatabaseError::Encode)
    }

    /// Writes both database files into `dir` and returns their paths.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<(PathBuf, PathBuf), DatabaseError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| DatabaseError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        let compact = dir.join(COMPACT_FILE);
        let formatted = dir.join(FORMATTED_FILE);
        self.write_file(&compact, |db, w| db.write_compact(w))?;
        self.write_file(&formatted, |db, w| db.write_indented(w))?;

        info!(
            "Wrote {} entries to '{}' and '{}'.",
            self.len(),
            compact.display(),
            formatted.display()
        );
        Ok((compact, formatted))
    }

    fn write_file<F>(&self, path: &Path, write: F) -> Result<(), DatabaseError>
    where
        F: FnOnce(&Self, &mut BufWriter<File>) -> Result<(), DatabaseError>,
    {
        let io_err = |e| DatabaseError::Io {
            path: path.display().to_string(),
            source: e,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        write(self, &mut writer)?;
        writer.flush().map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::model::EquationSet;
    use crate::core::database::numeric::Numeric;
    use indexmap::IndexMap;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn key(sorbent: &str, kind: EntryKind) -> EntryKey {
        EntryKey {
            sorbent: sorbent.to_string(),
            refrigerant: "water".to_string(),
            subtype: "5a".to_string(),
            kind,
        }
    }

    fn sample() -> Database {
        let mut entry = Entry::new(key("zeolite", EntryKind::Adsorption));
        entry.value.equations.insert(
            "Langmuir".to_string(),
            vec![EquationSet {
                citation: "Doe 2010".to_string(),
                comment: String::new(),
                equation: "Langmuir".to_string(),
                properties: None,
                validity: BTreeMap::from([("temperature-min".to_string(), Numeric::Absent)]),
                errors: None,
                coefficients: IndexMap::from([("K0".to_string(), 1e-9)]),
            }],
        );
        let refrigerant = Entry::new(key("", EntryKind::Refrigerant));
        Database::new(vec![entry, refrigerant]).unwrap()
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let entries = vec![
            Entry::new(key("zeolite", EntryKind::Adsorption)),
            Entry::new(key("zeolite", EntryKind::Adsorption)),
        ];
        assert!(matches!(
            Database::new(entries),
            Err(DatabaseError::DuplicateKey(_))
        ));
    }

    #[test]
    fn find_matches_all_four_identifiers() {
        let database = sample();
        assert!(database.find("zeolite", "5a", "water", EntryKind::Adsorption).is_some());
        assert!(database.find("zeolite", "5a", "water", EntryKind::Absorption).is_none());
        assert!(database.find("zeolite", "13x", "water", EntryKind::Adsorption).is_none());
        assert_eq!(database.entries_of(EntryKind::Refrigerant).count(), 1);
    }

    #[test]
    fn both_files_hold_the_same_database() {
        let dir = tempdir().unwrap();
        let database = sample();
        let (compact, formatted) = database.write_to_dir(dir.path()).unwrap();

        let compact_text = fs::read_to_string(&compact).unwrap();
        let formatted_text = fs::read_to_string(&formatted).unwrap();
        assert!(!compact_text.contains('\n'));
        assert!(formatted_text.contains("\n    {"));

        assert_eq!(Database::from_json(&compact_text).unwrap(), database);
        assert_eq!(Database::load(&formatted).unwrap(), database);
    }

    #[test]
    fn absent_validity_is_written_as_empty_string() {
        let mut buffer = Vec::new();
        sample().write_compact(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains(r#""temperature-min":"""#));
        assert!(!text.contains("_pr_"));
    }

    #[test]
    fn loading_a_missing_file_reports_its_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("none.json");
        match Database::load(&missing) {
            Err(DatabaseError::Io { path, .. }) => assert!(path.ends_with("none.json")),
            other => panic!("expected I/O error, got {:?}", other),
        }
    }
}
