pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use crate::app::input::{parse_enrollment_date, parse_score};
    use crate::config::settings::{LogFormat, SettingsOverrides};
    use crate::core::enrollment::StatusPolicy;
    use chrono::NaiveDate;
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "student-roster")]
    #[command(about = "Console roster manager for university students")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// JSON file holding the roster
        #[arg(long)]
        pub store: Option<PathBuf>,

        /// Minimum average score for admission
        #[arg(long)]
        pub threshold: Option<f64>,

        /// How a new student's enrollment flag is chosen
        #[arg(long, value_enum)]
        pub status_policy: Option<StatusPolicy>,

        /// Seed for the random enrollment policy
        #[arg(long)]
        pub seed: Option<u64>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, value_enum)]
        pub log_format: Option<LogFormat>,

        #[command(subcommand)]
        pub command: Option<Command>,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Interactive menu (default)
        Menu,
        /// Admit a student
        Admit {
            #[arg(long)]
            name: String,
            #[arg(long, default_value = "")]
            gender: String,
            /// Enrollment date, yyyy-mm-dd
            #[arg(long, value_parser = date_arg)]
            date: NaiveDate,
            /// Average score, 1.0 - 5.0 (`,` or `.` as separator)
            #[arg(long, value_parser = score_arg)]
            score: f64,
        },
        /// Remove a student by name
        Remove { name: String },
        /// Show whether a student is enrolled
        Show { name: String },
        /// List every student
        List,
        /// Enrollment status report
        Status,
        /// Students enrolled in the given year
        ByYear { year: i32 },
    }

    impl CliConfig {
        pub fn overrides(&self) -> SettingsOverrides {
            SettingsOverrides {
                store_path: self.store.clone(),
                threshold: self.threshold,
                status_policy: self.status_policy,
                seed: self.seed,
                verbose: self.verbose,
                log_format: self.log_format,
            }
        }
    }

    fn date_arg(raw: &str) -> Result<NaiveDate, String> {
        parse_enrollment_date(raw).ok_or_else(|| format!("'{}' is not a yyyy-mm-dd date", raw))
    }

    fn score_arg(raw: &str) -> Result<f64, String> {
        parse_score(raw).ok_or_else(|| format!("'{}' is not a score between 1.0 and 5.0", raw))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_admit_command() {
            let cli = CliConfig::try_parse_from([
                "student-roster",
                "--store",
                "roster.json",
                "--status-policy",
                "admitted",
                "admit",
                "--name",
                "Ivan Petrov",
                "--gender",
                "M",
                "--date",
                "2021-09-01",
                "--score",
                "4,5",
            ])
            .unwrap();

            let overrides = cli.overrides();
            assert_eq!(overrides.store_path, Some(PathBuf::from("roster.json")));
            assert_eq!(overrides.status_policy, Some(StatusPolicy::Admitted));
            match cli.command {
                Some(Command::Admit { name, score, date, .. }) => {
                    assert_eq!(name, "Ivan Petrov");
                    assert_eq!(score, 4.5);
                    assert_eq!(date, NaiveDate::from_ymd_opt(2021, 9, 1).unwrap());
                }
                other => panic!("unexpected command {:?}", other),
            }
        }

        #[test]
        fn test_rejects_out_of_range_score() {
            let result = CliConfig::try_parse_from([
                "student-roster",
                "admit",
                "--name",
                "Ivan",
                "--date",
                "2021-09-01",
                "--score",
                "6.0",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn test_by_year_subcommand() {
            let cli = CliConfig::try_parse_from(["student-roster", "by-year", "2021"]).unwrap();
            assert!(matches!(cli.command, Some(Command::ByYear { year: 2021 })));
        }
    }
}
