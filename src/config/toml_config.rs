use crate::core::directory::{MAX_SCORE, MIN_SCORE};
use crate::core::enrollment::StatusPolicy;
use crate::config::settings::LogFormat;
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{
    validate_one_of, validate_path, validate_range, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFileConfig {
    pub store: Option<StoreConfig>,
    pub admission: Option<AdmissionConfig>,
    pub enrollment: Option<EnrollmentConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionConfig {
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentConfig {
    pub status: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<String>,
}

impl RosterFileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RosterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROSTER_STORE})，未設定者保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn store_path(&self) -> Option<&str> {
        self.store.as_ref().and_then(|s| s.path.as_deref())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(store) = &self.store {
            let path = validate_required_field("store.path", &store.path)?;
            validate_path("store.path", path)?;
        }

        if let Some(threshold) = self.admission.as_ref().and_then(|a| a.threshold) {
            validate_range("admission.threshold", threshold, MIN_SCORE, MAX_SCORE)?;
        }

        if let Some(status) = self.enrollment.as_ref().and_then(|e| e.status.as_deref()) {
            validate_one_of("enrollment.status", status, &StatusPolicy::NAMES)?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            validate_one_of("logging.format", format, &LogFormat::NAMES)?;
        }

        Ok(())
    }
}

impl Validate for RosterFileConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
