//! Configuration loading.
//!
//! Layers, lowest precedence first: serde defaults, the YAML config file,
//! then `MDBLOG_`-prefixed environment variables (`MDBLOG_SITE__TITLE`).

use std::path::{Path, PathBuf};

use super::{BlogConfig, ConfigError};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "mdblog.yaml";

const ENV_PREFIX: &str = "MDBLOG";

impl BlogConfig {
    /// Load the config from the command line argument.
    ///
    /// An explicitly named file must exist; the default `mdblog.yaml` is optional.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let config = Self::load_layers(&path, required, None)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge the config file with the environment.
    ///
    /// `env` replaces the process environment when given.
    fn load_layers(
        path: &Path,
        required: bool,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        Ok(config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize::<BlogConfig>()?)
    }

    /// Reject values that would make every article fail later on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "defaults.words_per_minute must be greater than zero".to_string(),
            ));
        }
        let ext = self.paths.page_extension.trim_start_matches('.');
        if ext.is_empty() || ext.contains('/') {
            return Err(ConfigError::Validation(format!(
                "invalid paths.page_extension: {:?}",
                self.paths.page_extension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog.yaml");
        std::fs::write(
            &path,
            "site:\n  title: Notes\nindex:\n  latest: 5\npaths:\n  output: _site\n",
        )
        .unwrap();

        let config = BlogConfig::load_from_arg(Some(&path)).unwrap();
        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.index.latest, 5);
        assert_eq!(config.index.featured, 3);
        assert_eq!(config.paths.output, PathBuf::from("_site"));
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog.yaml");
        std::fs::write(&path, "site:\n  title: From File\n  description: Kept\n").unwrap();

        let config = BlogConfig::load_layers(
            &path,
            true,
            env(&[
                ("MDBLOG_SITE__TITLE", "From Env"),
                ("MDBLOG_INDEX__LATEST", "4"),
                ("OTHER_SITE__TITLE", "Ignored"),
            ]),
        )
        .unwrap();
        assert_eq!(config.site.title, "From Env");
        assert_eq!(config.site.description, "Kept");
        assert_eq!(config.index.latest, 4);
        assert_eq!(config.index.featured, 3);
    }

    #[test]
    fn test_defaults_without_file_or_environment() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            BlogConfig::load_layers(&dir.path().join("mdblog.yaml"), false, env(&[])).unwrap();
        assert_eq!(config.site.title, "My Blog");
        assert_eq!(config.paths.content, PathBuf::from("content"));
        assert_eq!(config.defaults.words_per_minute, 200);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = BlogConfig::load_from_arg(Some(&dir.path().join("nope.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_reading_speed() {
        let mut config = BlogConfig::default();
        config.defaults.words_per_minute = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_extension() {
        let mut config = BlogConfig::default();
        config.paths.page_extension = ".".to_string();
        assert!(config.validate().is_err());
    }
}
