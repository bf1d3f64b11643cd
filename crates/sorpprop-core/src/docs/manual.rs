//! The LaTeX manual of a database.
//!
//! The generator writes one fragment per sorbent, subtype and refrigerant
//! combination, one section file per refrigerant that `\input`s those
//! fragments, and one chapter file per entry kind:
//!
//! ```text
//! chapter/refrigerants.tex          chapter/ref/<refrigerant>.tex
//! chapter/adsorption.tex            chapter/ads/<refrigerant>.tex
//!                                   chapter/ads/<refrigerant>_<sorbent>_<subtype>.tex
//! chapter/absorption.tex            chapter/abs/...
//! ```
//!
//! Figures need the native library. Without an engine the visualization
//! sections are left out.

use super::approach::{self, RefrigerantFunctions};
use super::corrections::PairModel;
use super::error::DocsError;
use super::latex::{self, SEPARATOR};
use super::visualization::{self, Grouping};
use super::{equation, overview, properties, validity};
use crate::core::database::builder::capitalize;
use crate::core::database::{Database, Entry, EntryKind, EquationSet};
use crate::engine::progress::ProgressReporter;
use crate::engine::{BindingError, SorptionEngine, WorkingPair, WorkingPairSpec};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What a generation run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualSummary {
    pub files: usize,
    pub equations: usize,
    pub figures: usize,
}

/// One parameter set of one equation family of one entry.
#[derive(Clone, Copy)]
struct Item<'a> {
    entry: &'a Entry,
    family: &'a str,
    index: usize,
    set: &'a EquationSet,
}

impl Item<'_> {
    fn label(&self) -> String {
        format!("{} #{}", self.family, self.index + 1)
    }
}

fn items(database: &Database, kind: EntryKind) -> Vec<Item<'_>> {
    let mut items: Vec<Item<'_>> = database
        .entries_of(kind)
        .flat_map(|entry| {
            entry
                .value
                .equations
                .iter()
                .filter(|(family, _)| family.as_str() != "Refrigerants")
                .flat_map(move |(family, sets)| {
                    sets.iter().enumerate().map(move |(index, set)| Item {
                        entry,
                        family,
                        index,
                        set,
                    })
                })
        })
        .collect();
    items.sort_by(|a, b| {
        let (ka, kb) = (&a.entry.key, &b.entry.key);
        (&ka.refrigerant, &ka.sorbent, &ka.subtype, a.family, a.index)
            .cmp(&(&kb.refrigerant, &kb.sorbent, &kb.subtype, b.family, b.index))
    });
    items
}

pub struct ManualGenerator<'a, E: SorptionEngine> {
    database: &'a Database,
    database_path: PathBuf,
    output_dir: PathBuf,
    engine: Option<Arc<E>>,
}

impl<'a, E: SorptionEngine> ManualGenerator<'a, E> {
    pub fn new(
        database: &'a Database,
        database_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            database,
            database_path: database_path.into(),
            output_dir: output_dir.into(),
            engine: None,
        }
    }

    /// Draws figures through `engine`.
    pub fn with_engine(mut self, engine: Arc<E>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn generate(&self, reporter: &ProgressReporter) -> Result<ManualSummary, DocsError> {
        let mut summary = ManualSummary::default();
        self.write_refrigerants(reporter, &mut summary)?;
        self.write_pairs(EntryKind::Adsorption, reporter, &mut summary)?;
        self.write_pairs(EntryKind::Absorption, reporter, &mut summary)?;
        info!(
            "Wrote {} manual files covering {} equations with {} figures to '{}'.",
            summary.files,
            summary.equations,
            summary.figures,
            self.output_dir.display()
        );
        Ok(summary)
    }

    fn write_refrigerants(
        &self,
        reporter: &ProgressReporter,
        summary: &mut ManualSummary,
    ) -> Result<(), DocsError> {
        let items = items(self.database, EntryKind::Refrigerant);
        let inputs = reporter.phase("Writing refrigerant functions", items.len() as u64, |r| {
            let mut inputs = Vec::new();
            for group in items.chunk_by(|a, b| a.entry.key.refrigerant == b.entry.key.refrigerant) {
                let refrigerant = &group[0].entry.key.refrigerant;
                let mut text = format!(
                    "{SEPARATOR}\n% Chapter 'Refrigerants - {refrigerant}'\n{SEPARATOR}\n\\section{{{refrigerant}}}\n%\n{SEPARATOR}\n"
                );
                for item in group {
                    text.push_str(&self.refrigerant_function(item, summary)?);
                    summary.equations += 1;
                    r.step(format!("{} {}", refrigerant, item.label()));
                }
                let name = format!("{}.tex", latex::file_stem(refrigerant));
                inputs.push(self.write_fragment(EntryKind::Refrigerant, &name, &text, summary)?);
            }
            Ok::<_, DocsError>(inputs)
        })?;
        self.write_chapter(EntryKind::Refrigerant, &inputs, summary)
    }

    fn refrigerant_function(
        &self,
        item: &Item<'_>,
        summary: &mut ManualSummary,
    ) -> Result<String, DocsError> {
        let (name, variant) = item.family.split_once('_').unwrap_or((item.family, ""));
        let mut text = format!(
            "{SEPARATOR}\n\\subsection{{{} - {} - ID {}}}\n%\n",
            latex::camel_words(name),
            variant,
            item.index + 1
        );
        text.push_str(&overview::render(item.entry, item.family, item.index));
        text.push_str(&equation::render(EntryKind::Refrigerant, item.family, item.set));
        text.push_str(&validity::render(EntryKind::Refrigerant, item.set));
        if let Some(engine) = &self.engine {
            text.push_str(&self.refrigerant_visualization(engine, item, summary)?);
        }
        text.push_str(SEPARATOR);
        text.push('\n');
        Ok(text)
    }

    fn refrigerant_visualization(
        &self,
        engine: &Arc<E>,
        item: &Item<'_>,
        summary: &mut ManualSummary,
    ) -> Result<String, DocsError> {
        let refrigerant = &item.entry.key.refrigerant;
        let Some(spec) =
            approach::refrigerant_probe(self.database, refrigerant, item.family, item.index)
        else {
            return Ok(visualization::no_pair_section(refrigerant));
        };
        let Some(pair) = self.open_pair(engine, spec)? else {
            return Ok(visualization::no_pair_section(refrigerant));
        };
        match visualization::refrigerant_figure(item.family, item.set, &pair)? {
            Some(figure) => {
                summary.figures += 1;
                Ok(visualization::refrigerant_section(&figure))
            }
            None => {
                warn!(
                    "'{}' of '{}' has no upper temperature bound; not visualized.",
                    item.label(),
                    refrigerant
                );
                Ok(visualization::no_range_section())
            }
        }
    }

    fn write_pairs(
        &self,
        kind: EntryKind,
        reporter: &ProgressReporter,
        summary: &mut ManualSummary,
    ) -> Result<(), DocsError> {
        let title = chapter_title(kind);
        let items = items(self.database, kind);
        let phase = match kind {
            EntryKind::Absorption => "Writing absorption equations",
            _ => "Writing adsorption equations",
        };
        let sections = reporter.phase(phase, items.len() as u64, |r| {
            let mut sections = Vec::new();
            for by_refrigerant in
                items.chunk_by(|a, b| a.entry.key.refrigerant == b.entry.key.refrigerant)
            {
                let refrigerant = &by_refrigerant[0].entry.key.refrigerant;
                let mut inputs = Vec::new();
                for by_pair in by_refrigerant.chunk_by(|a, b| {
                    a.entry.key.sorbent == b.entry.key.sorbent
                        && a.entry.key.subtype == b.entry.key.subtype
                }) {
                    let key = &by_pair[0].entry.key;
                    let mut text = format!(
                        "{SEPARATOR}\n% Chapter '{title} - {} - {} {}'\n{SEPARATOR}\n\\subsection{{{} {}}}\n%\n{SEPARATOR}\n",
                        key.refrigerant,
                        key.sorbent,
                        key.subtype,
                        capitalize(&key.sorbent),
                        latex::escape_percent(&key.subtype),
                    );
                    for item in by_pair {
                        text.push_str(&self.pair_equation(item, summary)?);
                        summary.equations += 1;
                        r.step(format!(
                            "{} / {} {} {}",
                            key.refrigerant,
                            key.sorbent,
                            key.subtype,
                            item.label()
                        ));
                    }
                    let name = format!(
                        "{}_{}_{}.tex",
                        latex::file_stem(&key.refrigerant),
                        latex::file_stem(&key.sorbent),
                        latex::file_stem(&key.subtype)
                    );
                    inputs.push(self.write_fragment(kind, &name, &text, summary)?);
                }

                let mut text = format!(
                    "{SEPARATOR}\n% Chapter '{title} - {refrigerant}'\n{SEPARATOR}\n\\section{{{refrigerant}}}\n%\n"
                );
                push_inputs(&mut text, &inputs);
                let name = format!("{}.tex", latex::file_stem(refrigerant));
                sections.push(self.write_fragment(kind, &name, &text, summary)?);
            }
            Ok::<_, DocsError>(sections)
        })?;
        self.write_chapter(kind, &sections, summary)
    }

    fn pair_equation(&self, item: &Item<'_>, summary: &mut ManualSummary) -> Result<String, DocsError> {
        let kind = item.entry.kind();
        let mut text = format!(
            "{SEPARATOR}\n\\subsubsection{{{} - ID {}}}\n%\n",
            latex::escape_underscore(item.family),
            item.index + 1
        );
        text.push_str(&overview::render(item.entry, item.family, item.index));
        if kind == EntryKind::Adsorption {
            text.push_str(&properties::render(item.set));
        }
        text.push_str(&equation::render(kind, item.family, item.set));
        text.push_str(&validity::render(kind, item.set));
        if let Some(engine) = &self.engine {
            text.push_str(&self.pair_visualization(engine, item, summary)?);
        }
        text.push_str(SEPARATOR);
        text.push('\n');
        Ok(text)
    }

    fn pair_visualization(
        &self,
        engine: &Arc<E>,
        item: &Item<'_>,
        summary: &mut ManualSummary,
    ) -> Result<String, DocsError> {
        let entry = item.entry;
        let Some(experiment) = entry.experiment_for(&item.set.citation) else {
            return Ok(visualization::no_data_section());
        };
        let Some(grouping) = Grouping::for_measurement(entry.kind(), &experiment.measurement.kind)
        else {
            debug!(
                "Measurement type '{}' of {} cannot be drawn.",
                experiment.measurement.kind,
                item.label()
            );
            return Ok(visualization::no_data_section());
        };
        if entry.kind() == EntryKind::Absorption
            && approach::refrigerant_entry(self.database, &entry.key.refrigerant).is_none()
        {
            warn!(
                "No refrigerant functions exist for '{}'; {} of {} / {} {} is not visualized.",
                entry.key.refrigerant,
                item.label(),
                entry.key.refrigerant,
                entry.key.sorbent,
                entry.key.subtype
            );
            return Ok(visualization::no_data_section());
        }

        let functions = RefrigerantFunctions::select(self.database, &entry.key.refrigerant);
        let spec = approach::working_pair(entry, item.family, item.index, &functions);
        let Some(pair) = self.open_pair(engine, spec)? else {
            return Ok(visualization::no_data_section());
        };
        let Some(model) = PairModel::new(&pair, &entry.key, item.family, &item.set.citation) else {
            return Ok(visualization::no_data_section());
        };
        match visualization::compare(entry.kind(), grouping, experiment, &model)? {
            Some(comparison) => {
                summary.figures += 1;
                Ok(visualization::comparison_section(
                    entry.kind(),
                    item.set,
                    experiment,
                    &comparison,
                    &functions,
                ))
            }
            None => Ok(visualization::no_data_section()),
        }
    }

    /// Opens a working pair; a pair the library does not know is logged and
    /// skipped.
    fn open_pair(
        &self,
        engine: &Arc<E>,
        spec: WorkingPairSpec,
    ) -> Result<Option<WorkingPair<E>>, DocsError> {
        match WorkingPair::new(Arc::clone(engine), self.database_path.clone(), spec) {
            Ok(pair) => Ok(Some(pair)),
            Err(BindingError::PairNotFound { spec, .. }) => {
                warn!("Working pair {} not found; not visualized.", spec);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_chapter(
        &self,
        kind: EntryKind,
        inputs: &[String],
        summary: &mut ManualSummary,
    ) -> Result<(), DocsError> {
        let title = chapter_title(kind);
        let label = title.to_lowercase();
        let mut text = format!(
            "{SEPARATOR}\n% Chapter ' {title} '\n{SEPARATOR}\n\\chapter{{{title}}}\n\\label{{cha:{label}}}\n%\n"
        );
        push_inputs(&mut text, inputs);
        let path = self.output_dir.join("chapter").join(format!("{}.tex", label));
        write_file(&path, &text)?;
        summary.files += 1;
        Ok(())
    }

    /// Writes `chapter/<kind>/<name>` and returns the path to `\input`.
    fn write_fragment(
        &self,
        kind: EntryKind,
        name: &str,
        text: &str,
        summary: &mut ManualSummary,
    ) -> Result<String, DocsError> {
        let relative = format!("chapter/{}/{}", kind.chapter(), name);
        write_file(&self.output_dir.join(&relative), text)?;
        summary.files += 1;
        debug!("Wrote manual fragment '{}'.", relative);
        Ok(relative)
    }
}

fn chapter_title(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Refrigerant => "Refrigerants",
        EntryKind::Adsorption => "Adsorption",
        EntryKind::Absorption => "Absorption",
    }
}

fn push_inputs(text: &mut String, inputs: &[String]) {
    for input in inputs {
        text.push_str("\\input{");
        text.push_str(input);
        text.push_str("}\n");
    }
    text.push_str(SEPARATOR);
    text.push('\n');
}

fn write_file(path: &Path, text: &str) -> Result<(), DocsError> {
    let io_err = |e| DocsError::Io {
        path: path.display().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, text).map_err(io_err)
}
