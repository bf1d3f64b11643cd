use std::fs::{self, File};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const DELIMITER: u8 = b';';
const CSV_EXTENSION: &str = "csv";

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Directory '{path}' does not exist")]
    MissingDirectory { path: String },
}

/// A semicolon-separated source table.
///
/// The first line holds the column names and the second line the units of
/// each column; the units line is dropped on read. Every cell is kept as the
/// raw string found in the file, so an empty cell stays the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    name: String,
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn read(path: &Path) -> Result<Self, TableError> {
        let display = path.to_string_lossy().to_string();
        let file = File::open(path).map_err(|e| TableError::Io {
            path: display.clone(),
            source: e,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| TableError::Csv {
                path: display.clone(),
                source: e,
            })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| TableError::Csv {
                path: display.clone(),
                source: e,
            })?;
            if index == 0 {
                continue;
            }
            let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
            cells.resize(headers.len(), String::new());
            rows.push(cells);
        }

        let name = table_name(path);
        debug!(
            "Read table '{}' with {} column(s) and {} row(s) from {:?}",
            name,
            headers.len(),
            rows.len(),
            path
        );

        Ok(Self {
            name,
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    /// Reads every `*.csv` file of `dir`, ordered by file name.
    pub fn read_dir(dir: &Path) -> Result<Vec<Self>, TableError> {
        if !dir.is_dir() {
            return Err(TableError::MissingDirectory {
                path: dir.to_string_lossy().to_string(),
            });
        }

        let entries = fs::read_dir(dir).map_err(|e| TableError::Io {
            path: dir.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TableError::Io {
                path: dir.to_string_lossy().to_string(),
                source: e,
            })?;
            let path = entry.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));
            if path.is_file() && is_csv {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| Self::read(path)).collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().enumerate().map(move |(index, cells)| Row {
            headers: &self.headers,
            cells,
            index,
        })
    }
}

/// One data row of a [`CsvTable`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    cells: &'a [String],
    index: usize,
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == column)
            .map(|i| self.cells[i].as_str())
    }

    /// Line number of this row in the source file, counting the header and
    /// units lines.
    pub fn line(&self) -> usize {
        self.index + 3
    }

    pub fn cells(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.headers
            .iter()
            .zip(self.cells.iter())
            .map(|(h, c)| (h.as_str(), c.as_str()))
    }
}

// The table name is the file name up to its first dot.
fn table_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn read_drops_units_line_and_keeps_empty_cells() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "Toth.csv",
            "sorbent;refrigerant;validity-temperature-min\n-;-;K\nzeolite;water;\nsilica gel;water;293.15\n",
        );

        let table = CsvTable::read(&path).unwrap();
        assert_eq!(table.name(), "Toth");
        assert_eq!(table.len(), 2);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("sorbent"), Some("zeolite"));
        assert_eq!(rows[0].get("validity-temperature-min"), Some(""));
        assert_eq!(rows[1].get("validity-temperature-min"), Some("293.15"));
        assert_eq!(rows[1].line(), 4);
        assert_eq!(rows[0].get("missing"), None);
    }

    #[test]
    fn read_pads_short_rows_with_empty_cells() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "Short.csv", "a;b;c\n-;-;-\n1;2\n");

        let table = CsvTable::read(&path).unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("c"), Some(""));
    }

    #[test]
    fn read_keeps_commas_inside_cells() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "Exp.csv",
            "pressures;temperatures\nPa;K\n100,200,300;293.15,293.15,293.15\n",
        );

        let table = CsvTable::read(&path).unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.get("pressures"), Some("100,200,300"));
    }

    #[test]
    fn read_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = CsvTable::read(&dir.path().join("absent.csv"));
        match result {
            Err(TableError::Io { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("expected I/O error, got {:?}", other),
        }
    }

    #[test]
    fn read_dir_orders_tables_by_file_name_and_skips_other_files() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "Toth.csv", "a\n-\n1\n");
        write_file(dir.path(), "Langmuir.csv", "a\n-\n1\n");
        write_file(dir.path(), "notes.txt", "ignored");

        let tables = CsvTable::read_dir(dir.path()).unwrap();
        let names: Vec<_> = tables.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Langmuir", "Toth"]);
    }

    #[test]
    fn read_dir_fails_for_missing_directory() {
        let dir = tempdir().unwrap();
        let result = CsvTable::read_dir(&dir.path().join("nope"));
        assert!(matches!(result, Err(TableError::MissingDirectory { .. })));
    }
}
