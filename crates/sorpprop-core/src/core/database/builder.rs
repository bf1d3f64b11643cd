use super::error::BuildError;
use super::model::{
    Entry, EntryKey, EntryKind, EquationSet, ExperimentalSet, Measurement, Uncertainty,
};
use super::numeric::{Numeric, parse_finite, parse_measurements};
use super::schema::{self, EquationColumns, ExperimentColumns};
use super::store::Database;
use crate::core::io::table::{CsvTable, Row};
use indexmap::IndexMap;
use phf::OrderedMap;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

type Vocabulary = OrderedMap<&'static str, &'static str>;

/// All source tables of one build, read eagerly so that a missing or
/// unreadable file fails before any conversion starts.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub equations: Vec<CsvTable>,
    pub experiments: Vec<CsvTable>,
}

impl SourceTables {
    pub fn len(&self) -> usize {
        self.equations.len() + self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assembles the JSON database from a coefficient directory and any number
/// of experimental-data directories.
#[derive(Debug, Clone)]
pub struct DatabaseBuilder {
    coefficients_dir: PathBuf,
    experimental_dirs: Vec<PathBuf>,
}

impl DatabaseBuilder {
    pub fn new(coefficients_dir: impl Into<PathBuf>) -> Self {
        Self {
            coefficients_dir: coefficients_dir.into(),
            experimental_dirs: Vec::new(),
        }
    }

    pub fn with_experimental_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.experimental_dirs.push(dir.into());
        self
    }

    pub fn coefficients_dir(&self) -> &Path {
        &self.coefficients_dir
    }

    pub fn experimental_dirs(&self) -> &[PathBuf] {
        &self.experimental_dirs
    }

    pub fn read_sources(&self) -> Result<SourceTables, BuildError> {
        let equations = CsvTable::read_dir(&self.coefficients_dir)?;
        let mut experiments = Vec::new();
        for dir in &self.experimental_dirs {
            experiments.extend(CsvTable::read_dir(dir)?);
        }
        info!(
            "Read {} equation table(s) and {} experimental table(s).",
            equations.len(),
            experiments.len()
        );
        Ok(SourceTables {
            equations,
            experiments,
        })
    }

    pub fn build(&self) -> Result<Database, BuildError> {
        let sources = self.read_sources()?;
        assemble(&sources)
    }
}

/// Converts already-read source tables into a database.
///
/// Entries appear in first-seen order over all equation tables followed by
/// all experimental tables; parameter sets keep their row order.
pub fn assemble(sources: &SourceTables) -> Result<Database, BuildError> {
    let mut keys: Vec<EntryKey> = Vec::new();
    let mut positions: HashMap<EntryKey, usize> = HashMap::new();

    for table in sources.equations.iter().chain(sources.experiments.iter()) {
        require_columns(table, &schema::IDENTIFICATION)?;
        for row in table.rows() {
            let key = entry_key(table, &row)?;
            if !positions.contains_key(&key) {
                positions.insert(key.clone(), keys.len());
                keys.push(key);
            }
        }
    }

    let mut entries: Vec<Entry> = keys.into_iter().map(Entry::new).collect();

    for table in &sources.equations {
        for row in table.rows() {
            let key = entry_key(table, &row)?;
            let set = equation_set(table, &row, key.kind)?;
            let entry = &mut entries[positions[&key]];
            entry
                .value
                .equations
                .entry(table.name().to_string())
                .or_default()
                .push(set);
        }
        debug!("Converted equation table '{}'.", table.name());
    }

    for table in &sources.experiments {
        for row in table.rows() {
            let key = entry_key(table, &row)?;
            let Some(columns) = ExperimentColumns::for_kind(key.kind) else {
                warn!(
                    "Skipping experimental row of type '{}' in table '{}' (line {}).",
                    key.kind,
                    table.name(),
                    row.line()
                );
                continue;
            };
            let set = experimental_set(table, &row, &columns)?;
            entries[positions[&key]].value.experiments.push(set);
        }
        debug!("Converted experimental table '{}'.", table.name());
    }

    info!("Assembled {} database entries.", entries.len());
    Ok(Database::new(entries)?)
}

fn require_columns(table: &CsvTable, columns: &[&str]) -> Result<(), BuildError> {
    match columns.iter().find(|c| !table.has_column(c)) {
        Some(missing) => Err(BuildError::MissingColumn {
            table: table.name().to_string(),
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}

fn text<'a>(table: &CsvTable, row: &Row<'a>, column: &str) -> Result<&'a str, BuildError> {
    row.get(column).ok_or_else(|| BuildError::MissingColumn {
        table: table.name().to_string(),
        column: column.to_string(),
    })
}

fn entry_key(table: &CsvTable, row: &Row<'_>) -> Result<EntryKey, BuildError> {
    let tag = text(table, row, schema::TYPE)?;
    let kind = tag
        .parse::<EntryKind>()
        .map_err(|tag| BuildError::UnknownKind {
            table: table.name().to_string(),
            line: row.line(),
            tag,
        })?;
    Ok(EntryKey {
        sorbent: text(table, row, schema::SORBENT)?.to_string(),
        refrigerant: text(table, row, schema::REFRIGERANT)?.to_string(),
        subtype: text(table, row, schema::SUBTYPE)?.to_string(),
        kind,
    })
}

fn text_record(
    table: &CsvTable,
    row: &Row<'_>,
    vocabulary: &Vocabulary,
) -> Result<BTreeMap<String, String>, BuildError> {
    vocabulary
        .entries()
        .map(|(column, key)| Ok((key.to_string(), text(table, row, column)?.to_string())))
        .collect()
}

fn numeric_record(
    table: &CsvTable,
    row: &Row<'_>,
    vocabulary: &Vocabulary,
) -> Result<BTreeMap<String, Numeric>, BuildError> {
    vocabulary
        .entries()
        .map(|(column, key)| {
            let cell = text(table, row, column)?;
            let value = cell
                .parse::<Numeric>()
                .map_err(|e| conversion(table, row, column, e))?;
            Ok((key.to_string(), value))
        })
        .collect()
}

fn conversion(
    table: &CsvTable,
    row: &Row<'_>,
    column: &str,
    source: super::numeric::NumericParseError,
) -> BuildError {
    BuildError::Conversion {
        table: table.name().to_string(),
        line: row.line(),
        column: column.to_string(),
        source,
    }
}

fn equation_set(
    table: &CsvTable,
    row: &Row<'_>,
    kind: EntryKind,
) -> Result<EquationSet, BuildError> {
    let columns = EquationColumns::for_kind(kind);

    let properties = columns
        .properties
        .map(|vocabulary| text_record(table, row, vocabulary))
        .transpose()?;
    let errors = columns
        .errors
        .map(|vocabulary| numeric_record(table, row, vocabulary))
        .transpose()?;

    let mut coefficients = IndexMap::new();
    for (column, cell) in row.cells() {
        if columns.is_reserved(column) {
            continue;
        }
        let value = parse_finite(cell).map_err(|e| conversion(table, row, column, e))?;
        coefficients.insert(column.to_string(), value);
    }

    Ok(EquationSet {
        citation: text(table, row, schema::LITERATURE)?.to_string(),
        comment: text(table, row, schema::COMMENT)?.to_string(),
        equation: capitalize(table.name()),
        properties,
        validity: numeric_record(table, row, columns.validity)?,
        errors,
        coefficients,
    })
}

fn experimental_set(
    table: &CsvTable,
    row: &Row<'_>,
    columns: &ExperimentColumns,
) -> Result<ExperimentalSet, BuildError> {
    let properties = columns
        .properties
        .map(|vocabulary| text_record(table, row, vocabulary))
        .transpose()?;

    let mut data = BTreeMap::new();
    for (column, cell) in row.cells() {
        if columns.is_reserved(column) {
            continue;
        }
        let values = parse_measurements(cell).map_err(|e| conversion(table, row, column, e))?;
        data.insert(column.to_string(), values);
    }

    Ok(ExperimentalSet {
        citation: text(table, row, schema::LITERATURE)?.to_string(),
        comment: text(table, row, schema::COMMENT)?.to_string(),
        properties,
        measurement: Measurement {
            procedure: text(table, row, "measurements-procedure")?.to_string(),
            kind: text(table, row, "measurements-type")?.to_string(),
        },
        uncertainty: Uncertainty {
            data_source: text(table, row, schema::UNCERTAINTY_SOURCE)?.to_string(),
            values: numeric_record(table, row, columns.uncertainty)?,
        },
        data,
    })
}

/// First character upper case, the rest lower case.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
