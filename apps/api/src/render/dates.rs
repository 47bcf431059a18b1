//! Date labels shown next to work and education entries.

use chrono::{Datelike, NaiveDate};

use crate::models::{EducationItem, WorkExperienceItem};

const PRESENT: &str = "Present";

/// Parses `YYYY-MM-DD`, `YYYY-MM` or `YYYY`. The boolean is whether a month
/// was present.
fn parse(raw: &str) -> Option<(NaiveDate, bool)> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some((date, true));
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some((date, true));
    }
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        let year = raw.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1).map(|d| (d, false));
    }
    None
}

/// `Jan 2020`; a bare year stays a year; unparseable input is returned as-is.
pub fn month_year(raw: &str) -> String {
    match parse(raw) {
        Some((date, true)) => date.format("%b %Y").to_string(),
        Some((date, false)) => date.year().to_string(),
        None => raw.trim().to_string(),
    }
}

/// `2020`; unparseable input is returned as-is.
pub fn year(raw: &str) -> String {
    match parse(raw) {
        Some((date, _)) => date.year().to_string(),
        None => raw.trim().to_string(),
    }
}

fn join_range(start: String, end: String) -> Option<String> {
    match (start.is_empty(), end.is_empty()) {
        (true, true) => None,
        (false, true) => Some(start),
        (true, false) => Some(end),
        (false, false) => Some(format!("{start} - {end}")),
    }
}

/// `Mon YYYY - Present` for current roles, `Mon YYYY - Mon YYYY` otherwise.
/// A blank end date is left off. `None` when there is nothing to show.
pub fn work_range(item: &WorkExperienceItem) -> Option<String> {
    let end = if item.current {
        PRESENT.to_string()
    } else {
        month_year(&item.end_date)
    };
    join_range(month_year(&item.start_date), end)
}

/// `YYYY - YYYY`, or `YYYY - Present` when the end date is blank.
pub fn education_range(item: &EducationItem) -> Option<String> {
    let end = if item.end_date.trim().is_empty() {
        PRESENT.to_string()
    } else {
        year(&item.end_date)
    };
    join_range(year(&item.start_date), end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn job(start: &str, end: &str, current: bool) -> WorkExperienceItem {
        WorkExperienceItem {
            id: Uuid::new_v4(),
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            current,
            description: String::new(),
        }
    }

    fn school(start: &str, end: &str) -> EducationItem {
        EducationItem {
            id: Uuid::new_v4(),
            school: "State University".to_string(),
            degree: "BSc".to_string(),
            field_of_study: String::new(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_month_year_formats() {
        assert_eq!(month_year("2020-01-15"), "Jan 2020");
        assert_eq!(month_year("2021-03"), "Mar 2021");
        assert_eq!(month_year("2019"), "2019");
        assert_eq!(month_year("last spring"), "last spring");
        assert_eq!(month_year(""), "");
    }

    #[test]
    fn test_year_formats() {
        assert_eq!(year("2016-09-01"), "2016");
        assert_eq!(year("2016-09"), "2016");
        assert_eq!(year("2016"), "2016");
        assert_eq!(year("n/a"), "n/a");
    }

    #[test]
    fn test_work_range_current() {
        assert_eq!(
            work_range(&job("2020-01-01", "", true)).as_deref(),
            Some("Jan 2020 - Present")
        );
        // A stored end date is not shown for a current role.
        assert_eq!(
            work_range(&job("2020-01", "2022-05", true)).as_deref(),
            Some("Jan 2020 - Present")
        );
    }

    #[test]
    fn test_work_range_closed_and_open() {
        assert_eq!(
            work_range(&job("2018-06", "2020-02", false)).as_deref(),
            Some("Jun 2018 - Feb 2020")
        );
        assert_eq!(work_range(&job("2018-06", "", false)).as_deref(), Some("Jun 2018"));
        assert_eq!(work_range(&job("", "", false)), None);
    }

    #[test]
    fn test_education_range() {
        assert_eq!(
            education_range(&school("2012-09-01", "2016-06-30")).as_deref(),
            Some("2012 - 2016")
        );
        assert_eq!(
            education_range(&school("2022-09", "")).as_deref(),
            Some("2022 - Present")
        );
        assert_eq!(education_range(&school("", "")).as_deref(), Some("Present"));
    }
}
