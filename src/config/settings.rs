use crate::config::toml_config::RosterFileConfig;
use crate::core::directory::{DEFAULT_ADMISSION_THRESHOLD, MAX_SCORE, MIN_SCORE};
use crate::core::enrollment::StatusPolicy;
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_STORE_PATH: &str = "students.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub const NAMES: [&'static str; 2] = ["compact", "json"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "compact" => Some(LogFormat::Compact),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub store_path: Option<PathBuf>,
    pub threshold: Option<f64>,
    pub status_policy: Option<StatusPolicy>,
    pub seed: Option<u64>,
    pub verbose: bool,
    pub log_format: Option<LogFormat>,
}

/// Fully resolved configuration: defaults, then the config file, then flags.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSettings {
    pub store_path: PathBuf,
    pub threshold: f64,
    pub status_policy: StatusPolicy,
    pub seed: Option<u64>,
    pub verbose: bool,
    pub log_format: LogFormat,
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            threshold: DEFAULT_ADMISSION_THRESHOLD,
            status_policy: StatusPolicy::default(),
            seed: None,
            verbose: false,
            log_format: LogFormat::default(),
        }
    }
}

impl RosterSettings {
    pub fn resolve(file: Option<&RosterFileConfig>, overrides: SettingsOverrides) -> Result<Self> {
        let mut settings = match file {
            Some(file) => {
                file.validate()?;
                Self::from_file_config(file)?
            }
            None => Self::default(),
        };

        if let Some(path) = overrides.store_path {
            settings.store_path = path;
        }
        if let Some(threshold) = overrides.threshold {
            settings.threshold = threshold;
        }
        if let Some(policy) = overrides.status_policy {
            settings.status_policy = policy;
        }
        if overrides.seed.is_some() {
            settings.seed = overrides.seed;
        }
        settings.verbose |= overrides.verbose;
        if let Some(format) = overrides.log_format {
            settings.log_format = format;
        }

        settings.validate()?;
        Ok(settings)
    }

    fn from_file_config(file: &RosterFileConfig) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(path) = file.store_path() {
            settings.store_path = PathBuf::from(path);
        }
        if let Some(threshold) = file.admission.as_ref().and_then(|a| a.threshold) {
            settings.threshold = threshold;
        }
        if let Some(enrollment) = &file.enrollment {
            if let Some(status) = &enrollment.status {
                settings.status_policy = StatusPolicy::parse(status).ok_or_else(|| {
                    RosterError::ConfigValidationError {
                        field: "enrollment.status".to_string(),
                        message: format!("unknown policy '{}'", status),
                    }
                })?;
            }
            settings.seed = enrollment.seed;
        }
        if let Some(logging) = &file.logging {
            settings.verbose = logging.verbose.unwrap_or(false);
            if let Some(format) = &logging.format {
                settings.log_format = LogFormat::parse(format).ok_or_else(|| {
                    RosterError::ConfigValidationError {
                        field: "logging.format".to_string(),
                        message: format!("unknown format '{}'", format),
                    }
                })?;
            }
        }

        Ok(settings)
    }
}

impl Validate for RosterSettings {
    fn validate(&self) -> Result<()> {
        validate_path("store.path", &self.store_path.to_string_lossy())?;
        validate_range("admission.threshold", self.threshold, MIN_SCORE, MAX_SCORE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let settings = RosterSettings::resolve(None, SettingsOverrides::default()).unwrap();
        assert_eq!(settings, RosterSettings::default());
        assert_eq!(settings.store_path, PathBuf::from("students.json"));
        assert_eq!(settings.threshold, 4.3);
    }

    #[test]
    fn test_flags_override_file() {
        let file = RosterFileConfig::from_toml_str(
            r#"
[store]
path = "from-file.json"

[admission]
threshold = 4.0

[enrollment]
status = "admitted"
seed = 7
"#,
        )
        .unwrap();

        let overrides = SettingsOverrides {
            store_path: Some(PathBuf::from("from-flag.json")),
            seed: Some(99),
            ..Default::default()
        };
        let settings = RosterSettings::resolve(Some(&file), overrides).unwrap();

        assert_eq!(settings.store_path, PathBuf::from("from-flag.json"));
        assert_eq!(settings.threshold, 4.0);
        assert_eq!(settings.status_policy, StatusPolicy::Admitted);
        assert_eq!(settings.seed, Some(99));
    }

    #[test]
    fn test_threshold_flag_is_validated() {
        let overrides = SettingsOverrides {
            threshold: Some(7.5),
            ..Default::default()
        };
        assert!(RosterSettings::resolve(None, overrides).is_err());
    }
}
