use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    AnalysisConfig, FeedConfig, LagCriterion, LoggingConfig, OutputConfig, RegressionConfig,
    Settings, StationarityConfig,
};

/// Prefix of the environment variables that override file settings,
/// e.g. `HECKSCHER__FEED__TIMEOUT_SECS=5`.
pub const ENV_PREFIX: &str = "HECKSCHER";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: the TOML file at `path` (or an optional
/// `config.toml` in the working directory), then `HECKSCHER__*` environment
/// variables, with a local `.env` file loaded into the environment beforehand.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();

    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

/// Parses settings from TOML text, applying the same defaults and validation as `load_config`.
pub fn load_config_from_str(toml: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings = load_config_from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.feed.start_year, 1960);
        assert_eq!(settings.analysis.stationarity.lag_criterion, LagCriterion::Aic);
        assert_eq!(settings.analysis.regression.confidence_level, 0.95);
    }

    #[test]
    fn sections_override_individual_fields() {
        let settings = load_config_from_str(
            r#"
            [feed]
            start_year = 1970
            end_year = 2020
            offline = true

            [analysis.stationarity]
            max_lag = 4
            lag_criterion = "bic"

            [output]
            dir = "out"
            "#,
        )
        .unwrap();

        assert_eq!(settings.feed.year_range(), 1970..=2020);
        assert!(settings.feed.offline);
        assert_eq!(settings.feed.timeout_secs, 20);
        assert_eq!(settings.analysis.stationarity.max_lag, Some(4));
        assert_eq!(settings.analysis.stationarity.lag_criterion, LagCriterion::Bic);
        assert_eq!(settings.output.panel_path(), Path::new("out").join("heckscher_ohlin_data.csv"));
    }

    #[test]
    fn inverted_year_range_is_rejected() {
        let err = load_config_from_str("[feed]\nstart_year = 2000\nend_year = 1990\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn zero_timeout_and_bad_confidence_are_rejected() {
        assert!(matches!(
            load_config_from_str("[feed]\ntimeout_secs = 0\n"),
            Err(ConfigError::ValidationError(_))
        ));
        assert!(matches!(
            load_config_from_str("[analysis.regression]\nconfidence_level = 1.5\n"),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn unknown_lag_criterion_fails_to_load() {
        let err = load_config_from_str("[analysis.stationarity]\nlag_criterion = \"hqic\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn environment_overrides_the_file() {
        let path = std::env::temp_dir().join(format!("heckscher-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[feed]\ntimeout_secs = 5\n[output]\ndir = \"from-file\"\n").unwrap();

        // SAFETY: no other test in this crate reads or writes HECKSCHER__* variables.
        unsafe {
            std::env::set_var("HECKSCHER__FEED__TIMEOUT_SECS", "7");
            std::env::set_var("HECKSCHER__OUTPUT__FIT_FILE", "env_fit.csv");
        }
        let loaded = load_config(Some(&path));
        unsafe {
            std::env::remove_var("HECKSCHER__FEED__TIMEOUT_SECS");
            std::env::remove_var("HECKSCHER__OUTPUT__FIT_FILE");
        }
        std::fs::remove_file(&path).unwrap();

        let settings = loaded.unwrap();
        assert_eq!(settings.feed.timeout_secs, 7);
        assert_eq!(settings.output.fit_file, "env_fit.csv");
        assert_eq!(settings.output.dir, std::path::PathBuf::from("from-file"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("heckscher-config-does-not-exist.toml");
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::LoadError(_))));
    }
}
