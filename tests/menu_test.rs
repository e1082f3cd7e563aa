use anyhow::Result;
use std::io::Cursor;
use student_roster::{FixedStatus, JsonFileStore, Menu, StudentDirectory};
use tempfile::TempDir;

fn run_session(
    directory: &mut StudentDirectory<JsonFileStore, FixedStatus>,
    script: &str,
) -> Result<String> {
    let mut output = Vec::new();
    Menu::new(directory, Cursor::new(script.as_bytes()), &mut output)
        .with_current_year(2026)
        .run()?;
    Ok(String::from_utf8(output)?)
}

fn open(temp_dir: &TempDir) -> Result<StudentDirectory<JsonFileStore, FixedStatus>> {
    let store = JsonFileStore::new(temp_dir.path().join("students.json"));
    Ok(StudentDirectory::open(store, FixedStatus(true))?)
}

#[test]
fn test_admit_list_and_exit() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut directory = open(&temp_dir)?;

    let script = "1\nIvan Petrov\nM\n2021-09-01\n4,5\n2\n0\n";
    let output = run_session(&mut directory, script)?;

    assert!(output.contains("--- Menu ---"));
    assert!(output.contains("Student Ivan Petrov has been admitted."));
    assert!(output.contains(
        "Name: Ivan Petrov, Gender: M, Enrolled: 2021-09-01, Graduates: 2024-09-01, Admission average: 4.5"
    ));
    assert_eq!(directory.len(), 1);

    let reopened = open(&temp_dir)?;
    assert!(reopened.find("ivan petrov").is_some());
    Ok(())
}

#[test]
fn test_malformed_answers_are_asked_again() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut directory = open(&temp_dir)?;

    let script = "1\n   \nAnna\nF\n01/09/2021\n2021-09-01\n6,5\nabc\n4.8\n0\n";
    let output = run_session(&mut directory, script)?;

    assert!(output.contains("Name cannot be empty. Try again: "));
    assert!(output.contains("Invalid date. Try again (yyyy-mm-dd): "));
    assert_eq!(output.matches("Invalid score. Try again (1,0 - 5,0): ").count(), 2);
    assert!(directory.find("Anna").is_some());
    Ok(())
}

#[test]
fn test_rejection_and_status_reports() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut directory = open(&temp_dir)?;

    let script = "1\nLow Score\nM\n2021-09-01\n3,0\n\
                  1\nHigh Score\nF\n2020-09-01\n4,9\n\
                  4\nhigh score\n\
                  4\nlow score\n\
                  5\n\
                  6\n1999\n2020\n\
                  0\n";
    let output = run_session(&mut directory, script)?;

    assert!(output.contains("Student Low Score was not admitted: average score 3.0 is below 4.3."));
    assert!(output.contains("High Score is enrolled"));
    assert!(output.contains("Student not found."));
    assert!(output.contains("Currently enrolled:\n  High Score\nNot enrolled:\n  No students are outside of studies."));
    assert!(output.contains("Invalid year. Try again (yyyy): "));
    assert!(output.contains("Students enrolled in 2020:\n  High Score"));
    assert_eq!(directory.len(), 1);
    Ok(())
}

#[test]
fn test_remove_duplicate_and_unknown_option() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut directory = open(&temp_dir)?;

    let script = "1\nIvan\nM\n2021-09-01\n4.5\n\
                  1\nIVAN\nM\n2021-09-01\n4.5\n\
                  9\n\
                  3\nNobody\n\
                  3\nivan\n\
                  2\n\
                  0\n";
    let output = run_session(&mut directory, script)?;

    assert!(output.contains("A student with this name already exists."));
    assert!(output.contains("Please choose an option from the menu."));
    assert!(output.contains("Student not found."));
    assert!(output.contains("Student Ivan has been removed."));
    assert!(output.contains("No students have been added."));
    assert!(directory.is_empty());
    Ok(())
}

#[test]
fn test_end_of_input_ends_the_session() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut directory = open(&temp_dir)?;

    // 輸入在填寫途中結束
    let output = run_session(&mut directory, "1\nHalf Way\n")?;
    assert!(output.contains("Gender (M/F): "));
    assert!(directory.is_empty());
    Ok(())
}
