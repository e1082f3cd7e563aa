use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use student_roster::core::report;
use student_roster::utils::error::ErrorSeverity;
use student_roster::utils::logger;
use student_roster::{
    CliConfig, Command, JsonFileStore, Menu, RosterError, RosterFileConfig, RosterSettings,
    StatusSource, StudentDirectory,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => Some(
            RosterFileConfig::from_file(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?,
        ),
        None => None,
    };

    let settings = match RosterSettings::resolve(file_config.as_ref(), cli.overrides()) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    // 初始化日誌
    logger::init_cli_logger(settings.verbose, settings.log_format);

    tracing::info!("Starting student-roster");
    tracing::debug!("Resolved settings: {:?}", settings);

    let store = JsonFileStore::new(settings.store_path.clone());
    let status_source = settings.status_policy.into_source(settings.seed);
    let mut directory = match StudentDirectory::open(store, status_source) {
        Ok(directory) => directory.with_threshold(settings.threshold),
        Err(e) => exit_with(&e),
    };

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            let mut menu = Menu::new(&mut directory, stdin.lock(), io::stdout());
            menu.run().context("console I/O failed")?;
        }
        command => match run_command(&mut directory, command) {
            Ok(text) => writeln!(io::stdout(), "{}", text)?,
            Err(e) => exit_with(&e),
        },
    }

    tracing::debug!("student-roster finished");
    Ok(())
}

fn run_command<E: StatusSource>(
    directory: &mut StudentDirectory<JsonFileStore, E>,
    command: Command,
) -> student_roster::Result<String> {
    let text = match command {
        Command::Admit {
            name,
            gender,
            date,
            score,
        } => report::render_admission(&directory.admit(&name, &gender, date, score)?),
        Command::Remove { name } => {
            let removed = directory.remove(&name)?;
            report::render_removal(&name, removed.as_ref())
        }
        Command::Show { name } => report::render_lookup(&name, directory.find(&name)),
        Command::List => report::render_roster(directory.students()),
        Command::Status => report::render_enrollment_status(&directory.enrollment_partition()),
        Command::ByYear { year } => {
            report::render_enrollment_year(year, &directory.by_enrollment_year(year))
        }
        // 互動選單由 main 直接處理
        Command::Menu => String::new(),
    };
    Ok(text)
}

fn exit_with(e: &RosterError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
