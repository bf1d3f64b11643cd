//! Semicolon-separated lists of every equation a database holds.

use super::error::DocsError;
use crate::core::database::{Database, Entry, EntryKind};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const VAPOR_PRESSURE_FILE: &str = "content_refrigerants_vapor_pressure.csv";
pub const LIQUID_DENSITY_FILE: &str = "content_refrigerants_saturated_liquid_density.csv";
pub const ADSORPTION_FILE: &str = "content_adsorption_working_pairs.csv";
pub const ABSORPTION_FILE: &str = "content_absorption_working_pairs.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefrigerantRow {
    pub refrigerant: String,
    #[serde(rename = "name of equation")]
    pub equation: String,
    #[serde(rename = "ID of equation")]
    pub id: usize,
    pub remarks: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairRow {
    pub refrigerant: String,
    pub sorbent: String,
    pub subtype: String,
    #[serde(rename = "name of equation")]
    pub equation: String,
    #[serde(rename = "ID of equation")]
    pub id: usize,
    pub remarks: String,
    pub reference: String,
}

/// The four content lists, each sorted by its identifying columns.
#[derive(Debug, Default, PartialEq)]
pub struct ContentLists {
    pub vapor_pressure: Vec<RefrigerantRow>,
    pub liquid_density: Vec<RefrigerantRow>,
    pub adsorption: Vec<PairRow>,
    pub absorption: Vec<PairRow>,
}

impl ContentLists {
    pub fn collect(database: &Database) -> Self {
        let mut lists = Self::default();
        for entry in database.entries() {
            match entry.kind() {
                EntryKind::Refrigerant => lists.add_refrigerant(entry),
                EntryKind::Adsorption => lists.adsorption.extend(pair_rows(entry)),
                EntryKind::Absorption => lists.absorption.extend(pair_rows(entry)),
            }
        }
        // remarks and references do not take part in the ordering
        lists.vapor_pressure.sort_by(|a, b| {
            (&a.refrigerant, &a.equation, a.id).cmp(&(&b.refrigerant, &b.equation, b.id))
        });
        lists.liquid_density.sort_by(|a, b| {
            (&a.refrigerant, &a.equation, a.id).cmp(&(&b.refrigerant, &b.equation, b.id))
        });
        for rows in [&mut lists.adsorption, &mut lists.absorption] {
            rows.sort_by(|a, b| {
                (&a.refrigerant, &a.sorbent, &a.subtype, &a.equation, a.id)
                    .cmp(&(&b.refrigerant, &b.sorbent, &b.subtype, &b.equation, b.id))
            });
        }
        lists
    }

    fn add_refrigerant(&mut self, entry: &Entry) {
        for (family, sets) in &entry.value.equations {
            if family == "Refrigerants" {
                continue;
            }
            let target = if family.split('_').next() == Some("VaporPressure") {
                &mut self.vapor_pressure
            } else {
                &mut self.liquid_density
            };
            target.extend(sets.iter().enumerate().map(|(index, set)| RefrigerantRow {
                refrigerant: entry.key.refrigerant.clone(),
                equation: family.clone(),
                id: index + 1,
                remarks: set.comment.clone(),
                reference: set.citation.clone(),
            }));
        }
    }

    /// Writes the four lists into `dir` and returns their paths.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>, DocsError> {
        fs::create_dir_all(dir).map_err(|e| DocsError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;
        let paths = vec![
            write_rows(&dir.join(VAPOR_PRESSURE_FILE), &self.vapor_pressure)?,
            write_rows(&dir.join(LIQUID_DENSITY_FILE), &self.liquid_density)?,
            write_rows(&dir.join(ADSORPTION_FILE), &self.adsorption)?,
            write_rows(&dir.join(ABSORPTION_FILE), &self.absorption)?,
        ];
        info!(
            "Wrote content lists of {} refrigerant and {} working-pair equations to '{}'.",
            self.vapor_pressure.len() + self.liquid_density.len(),
            self.adsorption.len() + self.absorption.len(),
            dir.display()
        );
        Ok(paths)
    }
}

fn pair_rows(entry: &Entry) -> impl Iterator<Item = PairRow> + '_ {
    entry.value.equations.iter().flat_map(move |(family, sets)| {
        sets.iter().enumerate().map(move |(index, set)| PairRow {
            refrigerant: entry.key.refrigerant.clone(),
            sorbent: entry.key.sorbent.clone(),
            subtype: entry.key.subtype.clone(),
            equation: family.clone(),
            id: index + 1,
            remarks: set.comment.clone(),
            reference: set.citation.clone(),
        })
    })
}

fn write_rows<R: Serialize>(path: &Path, rows: &[R]) -> Result<PathBuf, DocsError> {
    let csv_err = |e| DocsError::Csv {
        path: path.display().to_string(),
        source: e,
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|e| DocsError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!("Wrote {} rows to '{}'.", rows.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::{EntryKey, EquationSet};
    use indexmap::IndexMap;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn set(citation: &str) -> EquationSet {
        EquationSet {
            citation: citation.to_string(),
            comment: String::new(),
            equation: String::new(),
            properties: None,
            validity: BTreeMap::new(),
            errors: None,
            coefficients: IndexMap::new(),
        }
    }

    fn entry(kind: EntryKind, sorbent: &str, refrigerant: &str, families: &[(&str, usize)]) -> Entry {
        let mut entry = Entry::new(EntryKey {
            sorbent: sorbent.to_string(),
            refrigerant: refrigerant.to_string(),
            subtype: String::new(),
            kind,
        });
        for (family, count) in families {
            let sets = (0..*count).map(|i| set(&format!("{} {}", family, i))).collect();
            entry.value.equations.insert(family.to_string(), sets);
        }
        entry
    }

    fn database() -> Database {
        Database::new(vec![
            entry(
                EntryKind::Refrigerant,
                "",
                "water",
                &[
                    ("VaporPressure_EoS1", 2),
                    ("SaturatedLiquidDensity_EoS1", 1),
                    ("Refrigerants", 1),
                ],
            ),
            entry(EntryKind::Adsorption, "zeolite", "water", &[("Toth", 1)]),
            entry(EntryKind::Adsorption, "silica gel", "water", &[("Langmuir", 1)]),
            entry(EntryKind::Absorption, "IL", "ammonia", &[("WilsonFixedDl", 1)]),
        ])
        .unwrap()
    }

    #[test]
    fn equations_are_sorted_into_their_list() {
        let lists = ContentLists::collect(&database());
        assert_eq!(lists.vapor_pressure.len(), 2);
        assert_eq!(lists.vapor_pressure[1].id, 2);
        assert_eq!(lists.liquid_density.len(), 1);
        assert_eq!(lists.adsorption[0].sorbent, "silica gel");
        assert_eq!(lists.absorption[0].equation, "WilsonFixedDl");
    }

    #[test]
    fn lists_are_written_with_semicolons_and_headers() {
        let dir = tempdir().unwrap();
        let paths = ContentLists::collect(&database())
            .write_to_dir(dir.path())
            .unwrap();
        assert_eq!(paths.len(), 4);

        let text = fs::read_to_string(dir.path().join(ADSORPTION_FILE)).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("refrigerant;sorbent;subtype;name of equation;ID of equation;remarks;reference")
        );
        assert_eq!(lines.next(), Some("water;silica gel;;Langmuir;1;;Langmuir 0"));
    }
}
