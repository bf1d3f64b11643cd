use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Inputs and output of a database build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub coefficients_dir: PathBuf,
    pub experimental_dirs: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

#[derive(Default)]
pub struct BuildConfigBuilder {
    coefficients_dir: Option<PathBuf>,
    experimental_dirs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl BuildConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coefficients_dir(mut self, path: PathBuf) -> Self {
        self.coefficients_dir = Some(path);
        self
    }
    pub fn experimental_dir(mut self, path: PathBuf) -> Self {
        self.experimental_dirs.push(path);
        self
    }
    pub fn experimental_dirs(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.experimental_dirs.extend(paths);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }

    pub fn build(self) -> Result<BuildConfig, ConfigError> {
        Ok(BuildConfig {
            coefficients_dir: self
                .coefficients_dir
                .ok_or(ConfigError::MissingParameter("coefficients_dir"))?,
            experimental_dirs: self.experimental_dirs,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
        })
    }
}

/// Inputs and output of a manual generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualConfig {
    pub database_path: PathBuf,
    pub output_dir: PathBuf,
    /// Path of the native library; figures are drawn only when it is set.
    pub library_path: Option<PathBuf>,
    pub figures: bool,
}

#[derive(Default)]
pub struct ManualConfigBuilder {
    database_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    library_path: Option<PathBuf>,
    figures: Option<bool>,
}

impl ManualConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database_path(mut self, path: PathBuf) -> Self {
        self.database_path = Some(path);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }
    pub fn library_path(mut self, path: Option<PathBuf>) -> Self {
        self.library_path = path;
        self
    }
    pub fn figures(mut self, enabled: bool) -> Self {
        self.figures = Some(enabled);
        self
    }

    pub fn build(self) -> Result<ManualConfig, ConfigError> {
        let figures = self.figures.unwrap_or(self.library_path.is_some());
        if figures && self.library_path.is_none() {
            return Err(ConfigError::MissingParameter("library_path"));
        }
        Ok(ManualConfig {
            database_path: self
                .database_path
                .ok_or(ConfigError::MissingParameter("database_path"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            library_path: self.library_path,
            figures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_config_requires_coefficients_and_output() {
        let missing = BuildConfigBuilder::new().output_dir("out".into()).build();
        assert_eq!(missing, Err(ConfigError::MissingParameter("coefficients_dir")));

        let config = BuildConfigBuilder::new()
            .coefficients_dir("coef".into())
            .experimental_dir("exp_ads".into())
            .experimental_dir("exp_abs".into())
            .output_dir("out".into())
            .build()
            .unwrap();
        assert_eq!(config.experimental_dirs.len(), 2);
    }

    #[test]
    fn figures_default_to_library_presence() {
        let config = ManualConfigBuilder::new()
            .database_path("db.json".into())
            .output_dir("doc".into())
            .build()
            .unwrap();
        assert!(!config.figures);

        let config = ManualConfigBuilder::new()
            .database_path("db.json".into())
            .output_dir("doc".into())
            .library_path(Some("lib.so".into()))
            .build()
            .unwrap();
        assert!(config.figures);
    }

    #[test]
    fn figures_without_library_are_rejected() {
        let result = ManualConfigBuilder::new()
            .database_path("db.json".into())
            .output_dir("doc".into())
            .figures(true)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("library_path")));
    }
}
