use super::error::WorkflowError;
use crate::core::database::DatabaseBuilder;
use crate::core::database::builder::assemble;
use crate::engine::config::BuildConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub tables: usize,
    pub entries: usize,
    pub compact: PathBuf,
    pub formatted: PathBuf,
}

#[instrument(skip_all, name = "build_database_workflow")]
pub fn run(config: &BuildConfig, reporter: &ProgressReporter) -> Result<BuildSummary, WorkflowError> {
    info!(
        "Building database from '{}' and {} experimental directory(ies).",
        config.coefficients_dir.display(),
        config.experimental_dirs.len()
    );
    let builder = config
        .experimental_dirs
        .iter()
        .fold(DatabaseBuilder::new(&config.coefficients_dir), |b, dir| {
            b.with_experimental_dir(dir)
        });

    reporter.report(Progress::PhaseStart {
        name: "Reading source tables",
    });
    let sources = builder.read_sources()?;
    reporter.report(Progress::PhaseFinish);

    let database = reporter.phase("Assembling database", sources.len() as u64, |r| {
        let database = assemble(&sources);
        for table in sources.equations.iter().chain(&sources.experiments) {
            r.step(table.name());
        }
        database
    })?;

    reporter.report(Progress::PhaseStart {
        name: "Writing database",
    });
    let (compact, formatted) = database.write_to_dir(&config.output_dir)?;
    reporter.report(Progress::PhaseFinish);

    info!("Database build complete: {} entries.", database.len());
    Ok(BuildSummary {
        tables: sources.len(),
        entries: database.len(),
        compact,
        formatted,
    })
}
