use crate::core::directory::{AdmissionOutcome, EnrollmentPartition};
use crate::domain::model::Student;

pub const NO_STUDENTS: &str = "No students have been added.";
pub const NOT_FOUND: &str = "Student not found.";

pub fn render_roster(students: &[Student]) -> String {
    if students.is_empty() {
        return NO_STUDENTS.to_string();
    }
    students
        .iter()
        .map(Student::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_enrollment_status(partition: &EnrollmentPartition<'_>) -> String {
    let mut lines = vec!["Currently enrolled:".to_string()];
    push_names(&mut lines, &partition.enrolled, "  No students are currently enrolled.");
    lines.push("Not enrolled:".to_string());
    push_names(&mut lines, &partition.not_enrolled, "  No students are outside of studies.");
    lines.join("\n")
}

pub fn render_enrollment_year(year: i32, students: &[&Student]) -> String {
    let mut lines = vec![format!("Students enrolled in {}:", year)];
    push_names(&mut lines, students, "  No students enrolled in that year.");
    lines.join("\n")
}

pub fn render_lookup(full_name: &str, student: Option<&Student>) -> String {
    match student {
        Some(s) if s.is_enrolled() => format!("{} is enrolled", s.full_name()),
        Some(s) => format!("{} is not enrolled", s.full_name()),
        None => {
            tracing::debug!("Lookup for {} found nothing", full_name.trim());
            NOT_FOUND.to_string()
        }
    }
}

pub fn render_admission(outcome: &AdmissionOutcome) -> String {
    match outcome {
        AdmissionOutcome::Admitted(student) => {
            format!("Student {} has been admitted.", student.full_name())
        }
        AdmissionOutcome::Rejected {
            candidate,
            threshold,
        } => format!(
            "Student {} was not admitted: average score {:.1} is below {:.1}.",
            candidate.full_name(),
            candidate.average_score(),
            threshold
        ),
        AdmissionOutcome::Duplicate { .. } => "A student with this name already exists.".to_string(),
    }
}

pub fn render_removal(full_name: &str, removed: Option<&Student>) -> String {
    match removed {
        Some(student) => format!("Student {} has been removed.", student.full_name()),
        None => {
            tracing::debug!("Nothing removed for {}", full_name.trim());
            NOT_FOUND.to_string()
        }
    }
}

fn push_names(lines: &mut Vec<String>, students: &[&Student], empty_message: &str) {
    if students.is_empty() {
        lines.push(empty_message.to_string());
    } else {
        lines.extend(students.iter().map(|s| format!("  {}", s.full_name())));
    }
}
