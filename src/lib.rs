pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::JsonFileStore;
pub use app::Menu;
pub use config::settings::{RosterSettings, SettingsOverrides};
pub use config::toml_config::RosterFileConfig;
pub use core::directory::{AdmissionOutcome, EnrollmentPartition, StudentDirectory};
pub use core::enrollment::{AdmissionDerived, FixedStatus, RandomStatus, StatusPolicy};
pub use domain::model::Student;
pub use domain::ports::{RecordStore, StatusSource};
pub use utils::error::{Result, RosterError};
