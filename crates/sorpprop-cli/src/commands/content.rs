use crate::cli::ContentArgs;
use crate::config::PartialProjectConfig;
use crate::error::Result;
use sorpproplib::engine::progress::ProgressReporter;
use sorpproplib::workflows::generate_manual;

pub fn run(args: ContentArgs, project: &PartialProjectConfig) -> Result<()> {
    let (database, output) = project.content_paths(&args)?;
    let paths = generate_manual::write_content_lists(&database, &output, &ProgressReporter::new())?;
    for path in paths {
        println!("✓ {}", path.display());
    }
    Ok(())
}
