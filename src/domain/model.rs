use chrono::{Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::utils::error::{Result, RosterError};

/// Length of a programme: students graduate this many months after enrolling.
pub const PROGRAMME_MONTHS: u32 = 36;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One student's admission facts.
///
/// Identity is the full name compared case-insensitively: two records with the
/// same name in different letter case are equal and hash the same, whatever
/// their other fields hold. Use [`Student::same_fields`] for a full comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "StoredStudent")]
pub struct Student {
    full_name: String,
    gender: String,
    #[serde(with = "date_format")]
    enrollment_date: NaiveDate,
    #[serde(with = "date_format")]
    graduation_date: NaiveDate,
    is_enrolled: bool,
    average_score: f64,
}

impl Student {
    pub fn new(
        full_name: impl Into<String>,
        gender: impl Into<String>,
        enrollment_date: NaiveDate,
        average_score: f64,
        is_enrolled: bool,
    ) -> Result<Self> {
        let full_name: String = full_name.into();
        let graduation_date = graduation_date_for(enrollment_date).ok_or_else(|| {
            RosterError::validation(format!(
                "graduation date for {} is out of range (enrolled {})",
                full_name, enrollment_date
            ))
        })?;

        Ok(Self {
            full_name,
            gender: gender.into(),
            enrollment_date,
            graduation_date,
            is_enrolled,
            average_score,
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn enrollment_date(&self) -> NaiveDate {
        self.enrollment_date
    }

    pub fn graduation_date(&self) -> NaiveDate {
        self.graduation_date
    }

    pub fn is_enrolled(&self) -> bool {
        self.is_enrolled
    }

    pub fn average_score(&self) -> f64 {
        self.average_score
    }

    pub(crate) fn set_enrolled(&mut self, enrolled: bool) {
        self.is_enrolled = enrolled;
    }

    pub fn name_key(&self) -> String {
        normalize_name(&self.full_name)
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name_key() == normalize_name(name)
    }

    /// Field-by-field comparison, unlike `==` which only looks at the name.
    pub fn same_fields(&self, other: &Student) -> bool {
        self.full_name == other.full_name
            && self.gender == other.gender
            && self.enrollment_date == other.enrollment_date
            && self.graduation_date == other.graduation_date
            && self.is_enrolled == other.is_enrolled
            && self.average_score == other.average_score
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.name_key() == other.name_key()
    }
}

impl Eq for Student {}

impl Hash for Student {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name_key().hash(state);
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Gender: {}, Enrolled: {}, Graduates: {}, Admission average: {:.1}",
            self.full_name,
            self.gender,
            self.enrollment_date.format(DATE_FORMAT),
            self.graduation_date.format(DATE_FORMAT),
            self.average_score
        )
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Enrollment date plus three years. Feb 29 lands on Feb 28.
pub fn graduation_date_for(enrollment_date: NaiveDate) -> Option<NaiveDate> {
    enrollment_date.checked_add_months(Months::new(PROGRAMME_MONTHS))
}

/// Parses `YYYY-MM-DD`, or a `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp truncated to its date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
}

// 檔案中的記錄；畢業日期一律由入學日期重新推算
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StoredStudent {
    full_name: String,
    gender: String,
    #[serde(with = "date_format")]
    enrollment_date: NaiveDate,
    is_enrolled: bool,
    average_score: f64,
}

impl TryFrom<StoredStudent> for Student {
    type Error = RosterError;

    fn try_from(stored: StoredStudent) -> Result<Self> {
        Student::new(
            stored.full_name,
            stored.gender,
            stored.enrollment_date,
            stored.average_score,
            stored.is_enrolled,
        )
    }
}

mod date_format {
    use super::{parse_date, DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_graduation_is_three_years_after_enrollment() {
        let student = Student::new("Ivan Petrov", "M", date(2021, 9, 1), 4.5, true).unwrap();
        assert_eq!(student.graduation_date(), date(2024, 9, 1));
    }

    #[test]
    fn test_leap_day_enrollment_clamps_to_feb_28() {
        let student = Student::new("Leap", "F", date(2020, 2, 29), 4.5, true).unwrap();
        assert_eq!(student.graduation_date(), date(2023, 2, 28));
    }

    #[test]
    fn test_equality_and_hash_ignore_case_and_other_fields() {
        let a = Student::new("Ivan Petrov", "M", date(2021, 9, 1), 4.5, true).unwrap();
        let b = Student::new("IVAN PETROV", "F", date(2019, 1, 1), 3.1, false).unwrap();
        assert_eq!(a, b);
        assert!(!a.same_fields(&b));

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_display_format() {
        let student = Student::new("Ivan Petrov", "M", date(2021, 9, 1), 4.46, true).unwrap();
        assert_eq!(
            student.to_string(),
            "Name: Ivan Petrov, Gender: M, Enrolled: 2021-09-01, Graduates: 2024-09-01, Admission average: 4.5"
        );
    }

    #[test]
    fn test_parse_date_accepts_plain_and_timestamp() {
        assert_eq!(parse_date("2021-09-01"), Some(date(2021, 9, 1)));
        assert_eq!(parse_date(" 2021-09-01T00:00:00 "), Some(date(2021, 9, 1)));
        assert_eq!(parse_date("2021-09-01T10:15:30.250"), Some(date(2021, 9, 1)));
        assert_eq!(parse_date("01.09.2021"), None);
        assert_eq!(parse_date("2021-13-01"), None);
    }

    #[test]
    fn test_serialized_keys_and_recomputed_graduation() {
        let student = Student::new("Anna", "F", date(2022, 9, 1), 4.8, false).unwrap();
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["FullName"], "Anna");
        assert_eq!(json["EnrollmentDate"], "2022-09-01");
        assert_eq!(json["GraduationDate"], "2025-09-01");
        assert_eq!(json["IsEnrolled"], false);

        let tampered = r#"{
            "FullName": "Anna",
            "Gender": "F",
            "EnrollmentDate": "2022-09-01T00:00:00",
            "GraduationDate": "2099-01-01T00:00:00",
            "IsEnrolled": true,
            "AverageScore": 4.8
        }"#;
        let loaded: Student = serde_json::from_str(tampered).unwrap();
        assert_eq!(loaded.graduation_date(), date(2025, 9, 1));
        assert!(loaded.is_enrolled());
    }
}
