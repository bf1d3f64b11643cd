use crate::cli::ManualArgs;
use crate::config::PartialProjectConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use sorpproplib::engine::progress::ProgressReporter;
use sorpproplib::workflows;
use tracing::info;

pub fn run(args: ManualArgs, project: &PartialProjectConfig) -> Result<()> {
    let config = project.manual_config(&args)?;
    if !config.figures {
        info!("Figures disabled; the manual will contain no visualization sections.");
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Writing manual to {}...", config.output_dir.display());
    let summary = workflows::generate_manual::run(&config, &reporter)?;

    println!(
        "✓ {} files describing {} equations with {} figures written to: {}",
        summary.files,
        summary.equations,
        summary.figures,
        config.output_dir.display()
    );
    Ok(())
}
