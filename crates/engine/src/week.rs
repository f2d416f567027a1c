use chrono::{Datelike, Duration, NaiveDate};

use crate::model::ProjectionWeek;

/// Week bucket directly from the days-overdue count. Days 1-7 fall in the
/// first collection week, and anything past day 28 lands in the fifth.
pub fn week_of_overdue(days_overdue: i64) -> ProjectionWeek {
    if days_overdue <= 7 {
        ProjectionWeek::Semana1
    } else if days_overdue <= 14 {
        ProjectionWeek::Semana2
    } else if days_overdue <= 21 {
        ProjectionWeek::Semana3
    } else if days_overdue <= 28 {
        ProjectionWeek::Semana4
    } else {
        ProjectionWeek::Semana5
    }
}

/// Week bucket from the net due date, for invoices not yet overdue.
///
/// No date means the record simply stays "POR VENCER". The day-of-month
/// buckets start at SEMANA_2, one week later than [`week_of_overdue`]:
/// a document falling due in week N of the month is worked in effort week
/// N+1. Documented business rule; flagged with the business owner but
/// preserved as-is.
pub fn week_of_due_date(date: Option<NaiveDate>) -> ProjectionWeek {
    let Some(date) = date else {
        return ProjectionWeek::PorVencer;
    };
    match date.day() {
        1..=7 => ProjectionWeek::Semana2,
        8..=14 => ProjectionWeek::Semana3,
        15..=21 => ProjectionWeek::Semana4,
        _ => ProjectionWeek::Semana5,
    }
}

/// Week bucket for promissory notes: the base payment date shifted by
/// 8 days, then bucketed by day-of-month from SEMANA_1. A missing or
/// unparsable base date falls back to the first week rather than failing.
pub fn week_of_base_date(date: Option<NaiveDate>) -> ProjectionWeek {
    let Some(base) = date else {
        return ProjectionWeek::Semana1;
    };
    let adjusted = base + Duration::days(8);
    match adjusted.day() {
        1..=7 => ProjectionWeek::Semana1,
        8..=14 => ProjectionWeek::Semana2,
        15..=21 => ProjectionWeek::Semana3,
        22..=28 => ProjectionWeek::Semana4,
        _ => ProjectionWeek::Semana5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        Some(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn overdue_buckets() {
        assert_eq!(week_of_overdue(1), ProjectionWeek::Semana1);
        assert_eq!(week_of_overdue(7), ProjectionWeek::Semana1);
        assert_eq!(week_of_overdue(8), ProjectionWeek::Semana2);
        assert_eq!(week_of_overdue(10), ProjectionWeek::Semana2);
        assert_eq!(week_of_overdue(14), ProjectionWeek::Semana2);
        assert_eq!(week_of_overdue(21), ProjectionWeek::Semana3);
        assert_eq!(week_of_overdue(28), ProjectionWeek::Semana4);
        assert_eq!(week_of_overdue(29), ProjectionWeek::Semana5);
        assert_eq!(week_of_overdue(400), ProjectionWeek::Semana5);
    }

    #[test]
    fn due_date_buckets_start_one_week_later() {
        assert_eq!(week_of_due_date(date(2026, 3, 5)), ProjectionWeek::Semana2);
        assert_eq!(week_of_due_date(date(2026, 3, 7)), ProjectionWeek::Semana2);
        assert_eq!(week_of_due_date(date(2026, 3, 8)), ProjectionWeek::Semana3);
        assert_eq!(week_of_due_date(date(2026, 3, 14)), ProjectionWeek::Semana3);
        assert_eq!(week_of_due_date(date(2026, 3, 21)), ProjectionWeek::Semana4);
        assert_eq!(week_of_due_date(date(2026, 3, 28)), ProjectionWeek::Semana5);
        assert_eq!(week_of_due_date(date(2026, 3, 31)), ProjectionWeek::Semana5);
    }

    #[test]
    fn due_date_missing_stays_por_vencer() {
        assert_eq!(week_of_due_date(None), ProjectionWeek::PorVencer);
    }

    #[test]
    fn base_date_shifts_eight_days() {
        // day 20 + 8 = day 28
        assert_eq!(week_of_base_date(date(2026, 1, 20)), ProjectionWeek::Semana4);
        // day 1 + 8 = day 9
        assert_eq!(week_of_base_date(date(2026, 1, 1)), ProjectionWeek::Semana2);
        // day 29 + 8 rolls into the next month, day 6
        assert_eq!(week_of_base_date(date(2026, 1, 29)), ProjectionWeek::Semana1);
    }

    #[test]
    fn base_date_missing_falls_back_to_first_week() {
        assert_eq!(week_of_base_date(None), ProjectionWeek::Semana1);
    }
}
