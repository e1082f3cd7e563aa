use chrono::NaiveDate;

use crate::core::directory::{MAX_SCORE, MIN_SCORE};
use crate::domain::model::parse_date;

pub const MIN_ENROLLMENT_YEAR: i32 = 2000;

pub fn parse_enrollment_date(raw: &str) -> Option<NaiveDate> {
    parse_date(raw)
}

/// Accepts either `,` or `.` as the decimal separator ("4,5" and "4.5").
pub fn parse_score(raw: &str) -> Option<f64> {
    let score: f64 = raw.trim().replace(',', ".").parse().ok()?;
    (score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score)).then_some(score)
}

pub fn parse_year(raw: &str, current_year: i32) -> Option<i32> {
    let year: i32 = raw.trim().parse().ok()?;
    (MIN_ENROLLMENT_YEAR..=current_year)
        .contains(&year)
        .then_some(year)
}

pub fn parse_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_accepts_both_separators() {
        assert_eq!(parse_score("4,5"), Some(4.5));
        assert_eq!(parse_score(" 4.5 "), Some(4.5));
        assert_eq!(parse_score("5"), Some(5.0));
        assert_eq!(parse_score("5,1"), None);
        assert_eq!(parse_score("0.9"), None);
        assert_eq!(parse_score("NaN"), None);
        assert_eq!(parse_score("four"), None);
    }

    #[test]
    fn test_parse_year_bounds() {
        assert_eq!(parse_year("2021", 2026), Some(2021));
        assert_eq!(parse_year("2000", 2026), Some(2000));
        assert_eq!(parse_year("1999", 2026), None);
        assert_eq!(parse_year("2027", 2026), None);
        assert_eq!(parse_year("twenty", 2026), None);
    }

    #[test]
    fn test_parse_enrollment_date() {
        assert_eq!(
            parse_enrollment_date("2021-09-01"),
            NaiveDate::from_ymd_opt(2021, 9, 1)
        );
        assert_eq!(parse_enrollment_date("2021-02-30"), None);
        assert_eq!(parse_enrollment_date(""), None);
    }

    #[test]
    fn test_parse_name() {
        assert_eq!(parse_name("  Anna Ivanova "), Some("Anna Ivanova".to_string()));
        assert_eq!(parse_name("   "), None);
    }
}
