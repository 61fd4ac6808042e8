use crate::error::Result;
use crate::utils::constants::{
    CONFIG_FILE, DEFAULT_DATA_PATH, DEFAULT_TOP_LIMIT, ENV_PREFIX, IBTRACS_URL,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Runtime settings: built-in defaults, then an optional `ibtracs.toml`,
/// then `IBTRACS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    pub data_path: PathBuf,

    #[validate(url)]
    pub source_url: String,

    #[validate(range(min = 1))]
    pub top_limit: usize,

    pub require_atcf_id: bool,

    pub verify_remote_size: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            source_url: IBTRACS_URL.to_string(),
            top_limit: DEFAULT_TOP_LIMIT,
            require_atcf_id: true,
            verify_remote_size: true,
        }
    }
}

impl Settings {
    /// Load settings, reading `config_file` when given (it must then exist).
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("data_path", DEFAULT_DATA_PATH)?
            .set_default("source_url", IBTRACS_URL)?
            .set_default("top_limit", DEFAULT_TOP_LIMIT as i64)?
            .set_default("require_atcf_id", true)?
            .set_default("verify_remote_size", true)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IbtracsError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.top_limit, 10);
        assert!(settings.require_atcf_id);
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "data_path = \"/tmp/tracks.csv\"")?;
        writeln!(file, "top_limit = 5")?;
        writeln!(file, "require_atcf_id = false")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.data_path, PathBuf::from("/tmp/tracks.csv"));
        assert_eq!(settings.top_limit, 5);
        assert!(!settings.require_atcf_id);
        assert_eq!(settings.source_url, IBTRACS_URL);
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "top_limit = 0")?;
        writeln!(file, "source_url = \"not a url\"")?;

        let err = Settings::load(Some(file.path())).unwrap_err();

        assert!(matches!(err, IbtracsError::Validation(_)));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = Settings::load(Some(Path::new("/nonexistent/ibtracs.toml")));
        assert!(matches!(result, Err(IbtracsError::Config(_))));
    }
}
