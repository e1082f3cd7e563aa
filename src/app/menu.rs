use chrono::{Datelike, Local};
use std::io::{BufRead, Write};

use crate::app::input::{parse_enrollment_date, parse_name, parse_score, parse_year};
use crate::core::directory::StudentDirectory;
use crate::core::report;
use crate::domain::ports::{RecordStore, StatusSource};
use crate::utils::error::Result;

const MENU: &str = "\n--- Menu ---
1. Admit a student
2. Show all students
3. Remove a student
4. Check whether a student is enrolled
5. Enrollment status
6. Students by enrollment year
0. Exit";

/// Interactive numbered menu over a directory.
///
/// Reads one line per answer from `input`. Malformed answers are asked again;
/// end of input leaves the loop as if `0` had been chosen. Only failures of
/// the console streams themselves are returned as errors.
pub struct Menu<'d, S: RecordStore, E: StatusSource, R: BufRead, W: Write> {
    directory: &'d mut StudentDirectory<S, E>,
    input: R,
    output: W,
    current_year: i32,
}

impl<'d, S, E, R, W> Menu<'d, S, E, R, W>
where
    S: RecordStore,
    E: StatusSource,
    R: BufRead,
    W: Write,
{
    pub fn new(directory: &'d mut StudentDirectory<S, E>, input: R, output: W) -> Self {
        Self {
            directory,
            input,
            output,
            current_year: Local::now().year(),
        }
    }

    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(option) = self.prompt("Choose an option: ")? else {
                break;
            };

            let keep_going = match option.trim() {
                "1" => self.admit()?,
                "2" => {
                    let text = report::render_roster(self.directory.students());
                    writeln!(self.output, "{}", text)?;
                    true
                }
                "3" => self.remove()?,
                "4" => self.check_enrollment()?,
                "5" => {
                    let text = report::render_enrollment_status(&self.directory.enrollment_partition());
                    writeln!(self.output, "{}", text)?;
                    true
                }
                "6" => self.list_by_year()?,
                "0" => false,
                other => {
                    tracing::debug!("Unknown menu option {:?}", other);
                    writeln!(self.output, "Please choose an option from the menu.")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn admit(&mut self) -> Result<bool> {
        let Some(name) = self.prompt_until("Full name: ", "Name cannot be empty. Try again: ", parse_name)? else {
            return Ok(false);
        };
        let Some(gender) = self.prompt("Gender (M/F): ")? else {
            return Ok(false);
        };
        let Some(date) = self.prompt_until(
            "Enrollment date (yyyy-mm-dd): ",
            "Invalid date. Try again (yyyy-mm-dd): ",
            parse_enrollment_date,
        )?
        else {
            return Ok(false);
        };
        let Some(score) = self.prompt_until(
            "Average score (1,0 - 5,0): ",
            "Invalid score. Try again (1,0 - 5,0): ",
            parse_score,
        )?
        else {
            return Ok(false);
        };

        match self.directory.admit(&name, &gender, date, score) {
            Ok(outcome) => writeln!(self.output, "{}", report::render_admission(&outcome))?,
            Err(e) => {
                tracing::error!("❌ Failed to admit {}: {}", name, e);
                writeln!(self.output, "Error while admitting student: {}", e.user_friendly_message())?;
            }
        }
        Ok(true)
    }

    fn remove(&mut self) -> Result<bool> {
        let Some(name) = self.prompt("Full name of the student to remove: ")? else {
            return Ok(false);
        };

        match self.directory.remove(&name) {
            Ok(removed) => writeln!(self.output, "{}", report::render_removal(&name, removed.as_ref()))?,
            Err(e) => {
                tracing::error!("❌ Failed to remove {}: {}", name.trim(), e);
                writeln!(self.output, "Error while removing student: {}", e.user_friendly_message())?;
            }
        }
        Ok(true)
    }

    fn check_enrollment(&mut self) -> Result<bool> {
        let Some(name) = self.prompt("Full name of the student to check: ")? else {
            return Ok(false);
        };
        let text = report::render_lookup(&name, self.directory.find(&name));
        writeln!(self.output, "{}", text)?;
        Ok(true)
    }

    fn list_by_year(&mut self) -> Result<bool> {
        let current_year = self.current_year;
        let Some(year) = self.prompt_until(
            "Enrollment year (yyyy): ",
            "Invalid year. Try again (yyyy): ",
            |raw| parse_year(raw, current_year),
        )?
        else {
            return Ok(false);
        };

        let text = report::render_enrollment_year(year, &self.directory.by_enrollment_year(year));
        writeln!(self.output, "{}", text)?;
        Ok(true)
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            // EOF
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_until<T>(
        &mut self,
        text: &str,
        retry: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        let mut current = text;
        loop {
            let Some(line) = self.prompt(current)? else {
                return Ok(None);
            };
            if let Some(value) = parse(&line) {
                return Ok(Some(value));
            }
            current = retry;
        }
    }
}
