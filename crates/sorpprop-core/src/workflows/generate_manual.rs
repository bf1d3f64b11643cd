use super::error::WorkflowError;
use crate::core::database::Database;
use crate::docs::{ContentLists, ManualGenerator, ManualSummary};
use crate::engine::NativeLibrary;
use crate::engine::config::ManualConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

#[instrument(skip_all, name = "generate_manual_workflow")]
pub fn run(config: &ManualConfig, reporter: &ProgressReporter) -> Result<ManualSummary, WorkflowError> {
    let database = load(&config.database_path, reporter)?;

    let mut generator =
        ManualGenerator::<NativeLibrary>::new(&database, &config.database_path, &config.output_dir);
    match (&config.library_path, config.figures) {
        (Some(library_path), true) => {
            reporter.report(Progress::PhaseStart {
                name: "Loading native library",
            });
            let library = NativeLibrary::open(library_path)?;
            reporter.report(Progress::PhaseFinish);
            info!("Figures are drawn through '{}'.", library_path.display());
            generator = generator.with_engine(Arc::new(library));
        }
        _ => info!("No native library configured; figures are left out."),
    }

    let summary = generator.generate(reporter)?;
    info!(
        "Manual generation complete: {} equations, {} figures.",
        summary.equations, summary.figures
    );
    Ok(summary)
}

/// Writes the four content lists of the database at `database_path` into `output_dir`.
#[instrument(skip_all, name = "content_lists_workflow")]
pub fn write_content_lists(
    database_path: &Path,
    output_dir: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<PathBuf>, WorkflowError> {
    let database = load(database_path, reporter)?;

    reporter.report(Progress::PhaseStart {
        name: "Writing content lists",
    });
    let paths = ContentLists::collect(&database).write_to_dir(output_dir)?;
    reporter.report(Progress::PhaseFinish);
    Ok(paths)
}

fn load(path: &Path, reporter: &ProgressReporter) -> Result<Database, WorkflowError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading database",
    });
    let database = Database::load(path)?;
    reporter.report(Progress::PhaseFinish);
    info!("Loaded {} entries from '{}'.", database.len(), path.display());
    Ok(database)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::{Entry, EntryKey, EntryKind, EquationSet};
    use crate::engine::config::ManualConfigBuilder;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    fn database() -> Database {
        let mut entry = Entry::new(EntryKey {
            sorbent: "zeolite".to_string(),
            refrigerant: "water".to_string(),
            subtype: "5a".to_string(),
            kind: EntryKind::Adsorption,
        });
        entry.value.equations.insert(
            "Langmuir".to_string(),
            vec![EquationSet {
                citation: "Doe 2010".to_string(),
                comment: String::new(),
                equation: "Langmuir".to_string(),
                properties: Some(BTreeMap::new()),
                validity: BTreeMap::new(),
                errors: Some(BTreeMap::new()),
                coefficients: [("K0".to_string(), 1e-9), ("w_s".to_string(), 0.3)]
                    .into_iter()
                    .collect(),
            }],
        );
        Database::new(vec![entry]).unwrap()
    }

    #[test]
    fn manual_without_library_has_no_figures() {
        let dir = tempdir().unwrap();
        let (database_path, _) = database().write_to_dir(dir.path()).unwrap();
        let config = ManualConfigBuilder::new()
            .database_path(database_path)
            .output_dir(dir.path().join("manual"))
            .build()
            .unwrap();

        let summary = run(&config, &ProgressReporter::new()).unwrap();
        assert_eq!(summary.equations, 1);
        assert_eq!(summary.figures, 0);
        assert!(dir.path().join("manual/chapter/adsorption.tex").is_file());
    }

    #[test]
    fn unreadable_library_aborts_before_writing() {
        let dir = tempdir().unwrap();
        let (database_path, _) = database().write_to_dir(dir.path()).unwrap();
        let config = ManualConfigBuilder::new()
            .database_path(database_path)
            .output_dir(dir.path().join("manual"))
            .library_path(Some(dir.path().join("missing.so")))
            .build()
            .unwrap();

        assert!(matches!(
            run(&config, &ProgressReporter::new()),
            Err(WorkflowError::Binding(_))
        ));
        assert!(!dir.path().join("manual").exists());
    }

    #[test]
    fn content_lists_are_written_next_to_each_other() {
        let dir = tempdir().unwrap();
        let (database_path, _) = database().write_to_dir(dir.path()).unwrap();

        let paths =
            write_content_lists(&database_path, &dir.path().join("lists"), &ProgressReporter::new())
                .unwrap();
        assert_eq!(paths.len(), 4);
        assert!(paths.iter().all(|p| p.starts_with(dir.path().join("lists"))));
        let text = fs::read_to_string(dir.path().join("lists/content_adsorption_working_pairs.csv"))
            .unwrap();
        assert!(text.contains("water;zeolite;5a;Langmuir;1;;Doe 2010"));
    }

    #[test]
    fn missing_database_is_reported() {
        let dir = tempdir().unwrap();
        let result = write_content_lists(
            &dir.path().join("absent.json"),
            dir.path(),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(WorkflowError::Database(_))));
    }
}
