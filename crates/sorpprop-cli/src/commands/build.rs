use crate::cli::BuildArgs;
use crate::config::PartialProjectConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use sorpproplib::engine::progress::ProgressReporter;
use sorpproplib::workflows;
use tracing::info;

pub fn run(args: BuildArgs, project: &PartialProjectConfig) -> Result<()> {
    let config = project.build_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Building database from {}...",
        config.coefficients_dir.display()
    );
    info!("Invoking the database build workflow...");
    let summary = workflows::build_database::run(&config, &reporter)?;

    println!(
        "✓ {} entries from {} tables written to:\n  {}\n  {}",
        summary.entries,
        summary.tables,
        summary.compact.display(),
        summary.formatted.display()
    );
    Ok(())
}
