use crate::error::{HrmError, HrmResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumString};
use utoipa::{IntoParams, ToSchema};

const ISO_DATE: &str = "%Y-%m-%d";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "employee_id": "EMP001",
    "employee_name": "Asha Rao",
    "date": "2026-01-05",
    "status": "Present"
}))]
pub struct AttendanceRecord {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    /// Full name of the employee at read time
    #[schema(example = "Asha Rao")]
    pub employee_name: String,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "2026-01-05", format = "date")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: String,
}

/// A mark request that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceMark {
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl MarkAttendance {
    pub fn validate(&self) -> HrmResult<AttendanceMark> {
        let employee_id = self.employee_id.trim();
        if employee_id.is_empty() {
            return Err(HrmError::Validation("employee_id must not be empty".into()));
        }

        let date = parse_date("date", &self.date)?;

        let status = AttendanceStatus::from_str(self.status.trim()).map_err(|_| {
            HrmError::Validation(format!(
                "Invalid status '{}'. Allowed: Present, Absent",
                self.status
            ))
        })?;

        Ok(AttendanceMark {
            employee_id: employee_id.to_string(),
            date,
            status,
        })
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(field: &str, value: &str) -> HrmResult<NaiveDate> {
    let value = value.trim();
    let malformed = || {
        HrmError::Validation(format!(
            "{} must be a calendar date in YYYY-MM-DD format, got '{}'",
            field, value
        ))
    };

    if !has_iso_shape(value) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(value, ISO_DATE).map_err(|_| malformed())
}

/// Four digits, dash, two digits, dash, two digits. chrono alone accepts padding and signs.
fn has_iso_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Inclusive date window; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn all() -> Self {
        Self::default()
    }

    /// An inverted window (`from > to`) matches nothing.
    pub fn is_empty(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilter {
    /// Earliest date to include (YYYY-MM-DD)
    #[schema(example = "2026-01-01")]
    pub date_from: Option<String>,
    /// Latest date to include (YYYY-MM-DD)
    #[schema(example = "2026-01-31")]
    pub date_to: Option<String>,
}

impl AttendanceFilter {
    pub fn range(&self) -> HrmResult<DateRange> {
        let from = optional_date("date_from", self.date_from.as_deref())?;
        let to = optional_date("date_to", self.date_to.as_deref())?;
        Ok(DateRange::new(from, to))
    }
}

/// Empty query values are treated as absent, the way browser forms send them.
fn optional_date(field: &str, value: Option<&str>) -> HrmResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(field, v).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, ISO_DATE).unwrap()
    }

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(AttendanceStatus::from_str("Present").unwrap(), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::Absent.as_ref(), "Absent");
        assert_eq!(AttendanceStatus::Absent.to_string(), "Absent");
        assert!(AttendanceStatus::from_str("Late").is_err());
        assert!(AttendanceStatus::from_str("present").is_err());
    }

    #[test]
    fn mark_validation_rejects_bad_input() {
        let mark = |id: &str, date: &str, status: &str| {
            MarkAttendance {
                employee_id: id.into(),
                date: date.into(),
                status: status.into(),
            }
            .validate()
        };

        assert!(mark("EMP001", "2026-01-05", "Present").is_ok());
        assert!(matches!(mark(" ", "2026-01-05", "Present"), Err(HrmError::Validation(_))));
        assert!(matches!(mark("EMP001", "2026-02-30", "Present"), Err(HrmError::Validation(_))));
        assert!(matches!(mark("EMP001", "05/01/2026", "Present"), Err(HrmError::Validation(_))));
        assert!(matches!(mark("EMP001", "2026-1-5", "Present"), Err(HrmError::Validation(_))));
        assert!(matches!(mark("EMP001", "2026-01-05", "Late"), Err(HrmError::Validation(_))));

        for date in ["2026- 1-05", "2026-01- 5", "+2026-1-05", "2026/01/05", "２０２６-01-05"] {
            assert!(
                matches!(mark("EMP001", date, "Present"), Err(HrmError::Validation(_))),
                "{} accepted",
                date
            );
        }
    }

    #[test]
    fn parse_date_requires_exact_shape() {
        assert_eq!(parse_date("date", "2026-01-05").unwrap(), day("2026-01-05"));
        assert!(matches!(parse_date("date_from", "2026-01- 5"), Err(HrmError::Validation(_))));
        assert!(matches!(parse_date("date_to", "+2026-1-05"), Err(HrmError::Validation(_))));
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = DateRange::new(Some(day("2026-02-01")), Some(day("2026-01-01")));
        assert!(range.is_empty());
        assert!(!range.contains(day("2026-01-15")));

        let same_day = DateRange::new(Some(day("2026-01-01")), Some(day("2026-01-01")));
        assert!(!same_day.is_empty());
        assert!(same_day.contains(day("2026-01-01")));
    }

    #[test]
    fn open_bounds_are_independent() {
        let from_only = DateRange::new(Some(day("2026-01-05")), None);
        assert!(from_only.contains(day("2026-01-05")));
        assert!(from_only.contains(day("2030-12-31")));
        assert!(!from_only.contains(day("2026-01-04")));

        let to_only = DateRange::new(None, Some(day("2026-01-05")));
        assert!(to_only.contains(day("1999-01-01")));
        assert!(!to_only.contains(day("2026-01-06")));

        assert!(DateRange::all().contains(day("2026-01-05")));
    }

    #[test]
    fn filter_treats_blank_as_absent() {
        let filter = AttendanceFilter {
            date_from: Some("".into()),
            date_to: Some("2026-01-31".into()),
        };
        assert_eq!(filter.range().unwrap(), DateRange::new(None, Some(day("2026-01-31"))));

        let bad = AttendanceFilter {
            date_from: Some("yesterday".into()),
            date_to: None,
        };
        assert!(matches!(bad.range(), Err(HrmError::Validation(_))));
    }
}
