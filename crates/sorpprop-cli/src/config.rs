use crate::cli::{BuildArgs, ContentArgs, ManualArgs, PairArgs};
use crate::error::{CliError, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use sorpproplib::engine::config as core_config;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "sorpprop.toml";

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialPathsConfig {
    coefficients: Option<PathBuf>,
    experimental: Option<Vec<PathBuf>>,
    output: Option<PathBuf>,
    database: Option<PathBuf>,
    library: Option<PathBuf>,
    manual: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialManualConfig {
    figures: Option<bool>,
}

/// The project file with every key optional; command-line arguments fill
/// and override it.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialProjectConfig {
    paths: Option<PartialPathsConfig>,
    manual: Option<PartialManualConfig>,
}

impl PartialProjectConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `explicit` if given, otherwise the first existing project file
    /// of the working directory and the user configuration directory.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidates = [Some(PathBuf::from(CONFIG_FILE)), user_config_file()];
        match candidates.into_iter().flatten().find(|p| p.is_file()) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("No configuration file found, using command-line arguments only.");
                Ok(Self::default())
            }
        }
    }

    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            if key == "manual.figures" {
                self.manual.get_or_insert_with(Default::default).figures =
                    Some(value.parse().map_err(|_| {
                        CliError::Config(format!("Invalid boolean value for {}: {}", key, value))
                    })?);
                continue;
            }

            let paths = self.paths.get_or_insert_with(Default::default);
            let path = Some(PathBuf::from(value));
            match key {
                "paths.coefficients" => paths.coefficients = path,
                "paths.experimental" => paths
                    .experimental
                    .get_or_insert_with(Vec::new)
                    .push(PathBuf::from(value)),
                "paths.output" => paths.output = path,
                "paths.database" => paths.database = path,
                "paths.library" => paths.library = path,
                "paths.manual" => paths.manual = path,
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn paths(&self) -> PartialPathsConfig {
        self.paths.clone().unwrap_or_default()
    }

    pub fn build_config(&self, args: &BuildArgs) -> Result<core_config::BuildConfig> {
        let paths = self.paths();
        let experimental = if args.experimental.is_empty() {
            paths.experimental.unwrap_or_default()
        } else {
            args.experimental.clone()
        };

        let mut builder = core_config::BuildConfigBuilder::new().experimental_dirs(experimental);
        if let Some(dir) = args.coefficients.clone().or(paths.coefficients) {
            builder = builder.coefficients_dir(dir);
        }
        if let Some(dir) = args.output.clone().or(paths.output) {
            builder = builder.output_dir(dir);
        }
        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn manual_config(&self, args: &ManualArgs) -> Result<core_config::ManualConfig> {
        let paths = self.paths();
        let file_figures = self.manual.as_ref().and_then(|m| m.figures);

        let mut builder = core_config::ManualConfigBuilder::new()
            .library_path(args.library.clone().or(paths.library));
        if let Some(path) = args.database.clone().or(paths.database) {
            builder = builder.database_path(path);
        }
        if let Some(dir) = args.output.clone().or(paths.manual) {
            builder = builder.output_dir(dir);
        }
        if args.no_figures {
            builder = builder.figures(false);
        } else if let Some(figures) = file_figures {
            builder = builder.figures(figures);
        }
        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    /// Database and output directory of the content lists.
    pub fn content_paths(&self, args: &ContentArgs) -> Result<(PathBuf, PathBuf)> {
        let paths = self.paths();
        Ok((
            required(args.database.clone().or(paths.database), "paths.database")?,
            required(args.output.clone().or(paths.manual), "paths.manual")?,
        ))
    }

    /// Database and native library of an evaluation.
    pub fn pair_paths(&self, args: &PairArgs) -> Result<(PathBuf, PathBuf)> {
        let paths = self.paths();
        Ok((
            required(args.database.clone().or(paths.database), "paths.database")?,
            required(args.library.clone().or(paths.library), "paths.library")?,
        ))
    }
}

fn required(value: Option<PathBuf>, key: &str) -> Result<PathBuf> {
    value.ok_or_else(|| {
        CliError::Config(format!(
            "A value for '{}' is required either in the config file or via CLI argument.",
            key
        ))
    })
}

fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("org", "sorpproplib", "sorpprop").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    const PROJECT: &str = r#"
[paths]
coefficients = "data/coef"
experimental = ["data/exp_ads", "data/exp_abs"]
output = "json"
database = "json/sorpproplib.json"
library = "lib/libsorpPropLib.so"
manual = "manual"

[manual]
figures = false
"#;

    fn project_file() -> PathBuf {
        let path = TEST_DIR.path().join("project.toml");
        if !path.exists() {
            fs::write(&path, PROJECT).unwrap();
        }
        path
    }

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["sorpprop"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn project_file_fills_the_build_config() {
        let config = PartialProjectConfig::from_file(&project_file()).unwrap();
        let Commands::Build(args) = parse(&["build"]) else {
            panic!("expected build");
        };
        let build = config.build_config(&args).unwrap();
        assert_eq!(build.coefficients_dir, PathBuf::from("data/coef"));
        assert_eq!(build.experimental_dirs.len(), 2);
        assert_eq!(build.output_dir, PathBuf::from("json"));
    }

    #[test]
    fn arguments_override_the_project_file() {
        let config = PartialProjectConfig::from_file(&project_file()).unwrap();
        let Commands::Build(args) = parse(&["build", "-e", "other", "-o", "out"]) else {
            panic!("expected build");
        };
        let build = config.build_config(&args).unwrap();
        assert_eq!(build.experimental_dirs, [PathBuf::from("other")]);
        assert_eq!(build.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn figures_follow_flag_then_file_then_library() {
        let config = PartialProjectConfig::from_file(&project_file()).unwrap();
        let Commands::Manual(args) = parse(&["manual"]) else {
            panic!("expected manual");
        };
        let manual = config.manual_config(&args).unwrap();
        assert!(!manual.figures);
        assert_eq!(manual.output_dir, PathBuf::from("manual"));

        let mut config = config;
        config.apply_set_values(&["manual.figures=true".to_string()]).unwrap();
        assert!(config.manual_config(&args).unwrap().figures);

        let Commands::Manual(args) = parse(&["manual", "--no-figures"]) else {
            panic!("expected manual");
        };
        assert!(!config.manual_config(&args).unwrap().figures);
    }

    #[test]
    fn set_values_override_paths() {
        let mut config = PartialProjectConfig::default();
        config
            .apply_set_values(&[
                "paths.database=db.json".to_string(),
                "paths.library=lib.so".to_string(),
            ])
            .unwrap();
        let Commands::Calc(args) = parse(&[
            "calc", "--sorbent", "zeolite", "--refrigerant", "water", "--isotherm", "Toth", "-f",
            "ads_w_pT", "1000", "300",
        ]) else {
            panic!("expected calc");
        };
        let (database, library) = config.pair_paths(&args.pair).unwrap();
        assert_eq!(database, PathBuf::from("db.json"));
        assert_eq!(library, PathBuf::from("lib.so"));
    }

    #[test]
    fn missing_required_path_names_the_key() {
        let config = PartialProjectConfig::default();
        let Commands::Content(args) = parse(&["content", "-d", "db.json"]) else {
            panic!("expected content");
        };
        let err = config.content_paths(&args).unwrap_err();
        assert!(err.to_string().contains("paths.manual"));
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        let mut config = PartialProjectConfig::default();
        assert!(matches!(
            config.apply_set_values(&["paths.database".to_string()]),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            config.apply_set_values(&["paths.unknown=x".to_string()]),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            config.apply_set_values(&["manual.figures=maybe".to_string()]),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn unknown_keys_in_the_file_are_a_parse_error() {
        let path = TEST_DIR.path().join("unknown.toml");
        fs::write(&path, "[paths]\ncoefficent = \"typo\"\n").unwrap();
        assert!(matches!(
            PartialProjectConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn explicit_missing_file_is_an_io_error() {
        let result = PartialProjectConfig::locate(Some(&TEST_DIR.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
