use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

use crate::domain::model::Student;
use crate::domain::ports::{RecordStore, StatusSource};
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::validate_range;

pub const DEFAULT_ADMISSION_THRESHOLD: f64 = 4.3;
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;

#[derive(Debug, Clone)]
pub enum AdmissionOutcome {
    Admitted(Student),
    /// The candidate scored below the threshold; it is returned with its
    /// enrollment flag cleared and was not added to the roster.
    Rejected { candidate: Student, threshold: f64 },
    Duplicate { full_name: String },
}

impl AdmissionOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmissionOutcome::Admitted(_))
    }
}

#[derive(Debug, Default)]
pub struct EnrollmentPartition<'a> {
    pub enrolled: Vec<&'a Student>,
    pub not_enrolled: Vec<&'a Student>,
}

/// In-memory roster kept in sync with a [`RecordStore`].
///
/// Records stay in insertion order. Every successful mutation rewrites the
/// whole store; if that write fails the mutation is undone, so the in-memory
/// roster never holds anything the store does not.
pub struct StudentDirectory<S: RecordStore, E: StatusSource> {
    store: S,
    status_source: E,
    threshold: f64,
    students: Vec<Student>,
}

impl<S: RecordStore, E: StatusSource> StudentDirectory<S, E> {
    pub fn open(store: S, status_source: E) -> Result<Self> {
        let mut directory = Self {
            store,
            status_source,
            threshold: DEFAULT_ADMISSION_THRESHOLD,
            students: Vec::new(),
        };
        directory.reload()?;
        Ok(directory)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn find(&self, full_name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.matches_name(full_name))
    }

    fn position(&self, full_name: &str) -> Option<usize> {
        self.students.iter().position(|s| s.matches_name(full_name))
    }

    pub fn admit(
        &mut self,
        full_name: &str,
        gender: &str,
        enrollment_date: NaiveDate,
        average_score: f64,
    ) -> Result<AdmissionOutcome> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(RosterError::validation("full name cannot be empty"));
        }
        validate_range("average_score", average_score, MIN_SCORE, MAX_SCORE)
            .map_err(|e| RosterError::validation(e.to_string()))?;

        if self.find(full_name).is_some() {
            tracing::warn!("Student {} already exists", full_name);
            return Ok(AdmissionOutcome::Duplicate {
                full_name: full_name.to_string(),
            });
        }

        let status = self.status_source.initial_status();
        let mut candidate =
            Student::new(full_name, gender.trim(), enrollment_date, average_score, status)?;

        if average_score >= self.threshold {
            self.students.push(candidate.clone());
            if let Err(e) = self.save() {
                self.students.pop();
                return Err(e);
            }
            tracing::info!(
                "✅ Admitted {} (score {:.1}, enrolled: {})",
                candidate.full_name(),
                average_score,
                candidate.is_enrolled()
            );
            Ok(AdmissionOutcome::Admitted(candidate))
        } else {
            candidate.set_enrolled(false);
            tracing::info!(
                "Rejected {}: score {:.1} below threshold {:.1}",
                candidate.full_name(),
                average_score,
                self.threshold
            );
            Ok(AdmissionOutcome::Rejected {
                candidate,
                threshold: self.threshold,
            })
        }
    }

    pub fn remove(&mut self, full_name: &str) -> Result<Option<Student>> {
        let Some(index) = self.position(full_name) else {
            tracing::debug!("No student named {} to remove", full_name.trim());
            return Ok(None);
        };

        let removed = self.students.remove(index);
        if let Err(e) = self.save() {
            self.students.insert(index, removed);
            return Err(e);
        }
        tracing::info!("🗑️ Removed {}", removed.full_name());
        Ok(Some(removed))
    }

    pub fn enrollment_partition(&self) -> EnrollmentPartition<'_> {
        let (enrolled, not_enrolled): (Vec<&Student>, Vec<&Student>) =
            self.students.iter().partition(|s| s.is_enrolled());
        EnrollmentPartition {
            enrolled,
            not_enrolled,
        }
    }

    pub fn by_enrollment_year(&self, year: i32) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.enrollment_date().year() == year)
            .collect()
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.students)?;
        tracing::debug!(
            "💾 Saved {} students to {}",
            self.students.len(),
            self.store.location()
        );
        Ok(())
    }

    /// Replaces the in-memory roster with what the store currently holds.
    pub fn reload(&mut self) -> Result<()> {
        let Some(loaded) = self.store.load()? else {
            self.students.clear();
            return Ok(());
        };

        let mut seen = HashSet::new();
        let mut students = Vec::with_capacity(loaded.len());
        for student in loaded {
            if seen.insert(student.name_key()) {
                students.push(student);
            } else {
                tracing::warn!(
                    "Skipping duplicate record {} in {}",
                    student.full_name(),
                    self.store.location()
                );
            }
        }

        tracing::info!(
            "📁 Loaded {} students from {}",
            students.len(),
            self.store.location()
        );
        self.students = students;
        Ok(())
    }
}
