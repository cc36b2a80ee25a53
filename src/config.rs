//! Layered settings.
//!
//! Values come from, lowest precedence first: built-in defaults, an
//! optional `census-dashboard.toml` (or the file given with `--config`),
//! then `CENSUS_*` environment variables. Command-line flags are applied
//! on top by the binary.
//!
//! ```toml
//! source = "https://example.org/census.jsonl"
//! output = "public/index.html"
//! layout = "site/index.html"
//! theme = "site/ashes.json"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_NAME: &str = "census-dashboard";

/// ECharts ESM build the generated page imports.
pub const DEFAULT_ECHARTS_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.esm.js";

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Census location: path, http(s) URL, or `-` for stdin.
    pub source: String,
    /// Where `render` writes the page.
    pub output: PathBuf,
    /// HTML layout to fill; the built-in layout when unset.
    pub layout: Option<PathBuf>,
    /// ECharts theme JSON; the built-in Ashes theme when unset.
    pub theme: Option<PathBuf>,
    /// Module URL the page imports ECharts from.
    pub echarts_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: "census.jsonl".to_string(),
            output: PathBuf::from("index.html"),
            layout: None,
            theme: None,
            echarts_url: DEFAULT_ECHARTS_URL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings, reading `path` if given (it must exist) or the
    /// optional default config file otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix("CENSUS"))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Config::builder()
            .set_default("source", defaults.source)?
            .set_default("output", defaults.output.to_string_lossy().to_string())?
            .set_default("echarts_url", defaults.echarts_url)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::Builder;

    fn no_env() -> Environment {
        Environment::with_prefix("CENSUS").source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults() {
        // The default file is optional; without it the defaults stand
        let settings = Settings::load_with_env(None, no_env()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
source = "https://example.org/census.jsonl"
output = "public/index.html"
theme = "ashes.json"
"#
        )
        .unwrap();

        let settings = Settings::load_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(settings.source, "https://example.org/census.jsonl");
        assert_eq!(settings.output, PathBuf::from("public/index.html"));
        assert_eq!(settings.theme, Some(PathBuf::from("ashes.json")));
        assert_eq!(settings.layout, None);
        assert_eq!(settings.echarts_url, DEFAULT_ECHARTS_URL);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"source = "from-file.jsonl""#).unwrap();

        let env = Environment::with_prefix("CENSUS").source(Some(HashMap::from([(
            "CENSUS_SOURCE".to_string(),
            "from-env.jsonl".to_string(),
        )])));

        let settings = Settings::load_with_env(Some(file.path()), env).unwrap();
        assert_eq!(settings.source, "from-env.jsonl");
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Settings::load_with_env(Some(Path::new("/nonexistent/census.toml")), no_env());
        assert!(result.is_err());
    }
}
