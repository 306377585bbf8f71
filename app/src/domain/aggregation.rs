//! Record aggregation: grouping a teacher's records by subject for reports.
//!
//! Everything here is pure. Groups appear in the order their subject is first
//! seen in the input and are never seeded from the subject catalogue, so a
//! subject without records has no group. Inside a group records run newest
//! first: date descending, then period descending, with input order kept for
//! exact ties.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::subject::SubjectId;
use super::teaching_record::TeachingRecord;

/// All records for one subject, ready to render as one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRecordGroup {
    subject_id: SubjectId,
    subject_name: String,
    records: Vec<TeachingRecord>,
}

impl SubjectRecordGroup {
    #[must_use]
    pub const fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    /// Name taken from the first record seen for the subject.
    #[must_use]
    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    /// Records, newest first.
    #[must_use]
    pub fn records(&self) -> &[TeachingRecord] {
        &self.records
    }

    /// Consume the group, yielding its records.
    #[must_use]
    pub fn into_records(self) -> Vec<TeachingRecord> {
        self.records
    }
}

fn newest_first(a: &TeachingRecord, b: &TeachingRecord) -> Ordering {
    b.date()
        .cmp(&a.date())
        .then_with(|| b.period().cmp(&a.period()))
}

/// Sort records newest first in place. The sort is stable.
pub fn sort_newest_first(records: &mut [TeachingRecord]) {
    records.sort_by(newest_first);
}

/// Partition records into per-subject groups.
///
/// # Examples
/// ```
/// use teaching_buddy::domain::group_by_subject;
///
/// assert!(group_by_subject(Vec::new()).is_empty());
/// ```
#[must_use]
pub fn group_by_subject(records: Vec<TeachingRecord>) -> Vec<SubjectRecordGroup> {
    let mut groups: Vec<SubjectRecordGroup> = Vec::new();
    for record in records {
        match groups
            .iter_mut()
            .find(|group| group.subject_id == *record.subject_id())
        {
            Some(group) => group.records.push(record),
            None => groups.push(SubjectRecordGroup {
                subject_id: record.subject_id().clone(),
                subject_name: record.subject_name().to_owned(),
                records: vec![record],
            }),
        }
    }
    for group in &mut groups {
        sort_newest_first(&mut group.records);
    }
    groups
}

/// Error returned when a month string is not `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("month must be written as YYYY-MM, got '{input}'")]
pub struct ReportMonthParseError {
    input: String,
}

/// Calendar month used to narrow a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportMonth {
    year: i32,
    month: u32,
}

impl ReportMonth {
    /// Month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whether `date` falls in this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for ReportMonth {
    type Err = ReportMonthParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let error = || ReportMonthParseError {
            input: input.to_owned(),
        };
        let (year, month) = input.trim().split_once('-').ok_or_else(error)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(error());
        }
        let year = year.parse::<i32>().map_err(|_| error())?;
        let month = month.parse::<u32>().map_err(|_| error())?;
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::containing)
            .ok_or_else(error)
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Keep only records dated inside `month`, preserving order.
#[must_use]
pub fn records_in_month(records: Vec<TeachingRecord>, month: ReportMonth) -> Vec<TeachingRecord> {
    records
        .into_iter()
        .filter(|record| month.contains(record.date()))
        .collect()
}

#[cfg(test)]
mod tests {
    //! Grouping and ordering rules, including permutation properties.
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{Period, RecordId, TeachingRecordParts, UserId};

    fn record(id: &str, date: (i32, u32, u32), period: u8, subject: &str) -> TeachingRecord {
        let name = match subject {
            "sub1" => "Mathematics",
            "sub2" => "Science",
            "sub3" => "English",
            _ => "Art",
        };
        TeachingRecord::new(TeachingRecordParts {
            id: RecordId::new(id).expect("id"),
            owner: UserId::new("1").expect("user id"),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("date"),
            period: Period::new(period).expect("period"),
            subject_id: SubjectId::new(subject).expect("subject id"),
            subject_name: name.to_owned(),
            description: format!("lesson {id}"),
            grade: None,
        })
    }

    #[fixture]
    fn mixed() -> Vec<TeachingRecord> {
        vec![
            record("a", (2024, 7, 15), 1, "sub1"),
            record("b", (2024, 7, 15), 2, "sub2"),
            record("c", (2024, 7, 16), 1, "sub3"),
            record("d", (2024, 7, 16), 3, "sub1"),
            record("e", (2024, 7, 14), 5, "sub1"),
            record("f", (2024, 8, 1), 2, "sub2"),
        ]
    }

    fn ids(records: &[TeachingRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id().as_ref()).collect()
    }

    #[rstest]
    fn groups_follow_first_seen_subject_order(mixed: Vec<TeachingRecord>) {
        let groups = group_by_subject(mixed);
        let subjects: Vec<&str> = groups.iter().map(|g| g.subject_id().as_ref()).collect();
        assert_eq!(subjects, ["sub1", "sub2", "sub3"]);
    }

    #[rstest]
    fn each_group_runs_newest_first(mixed: Vec<TeachingRecord>) {
        let groups = group_by_subject(mixed);
        assert_eq!(ids(groups[0].records()), ["d", "a", "e"]);
        assert_eq!(ids(groups[1].records()), ["f", "b"]);
    }

    #[rstest]
    fn grouping_neither_drops_nor_duplicates(mixed: Vec<TeachingRecord>) {
        let total = mixed.len();
        let groups = group_by_subject(mixed.clone());
        let mut seen: Vec<&str> = groups.iter().flat_map(|g| ids(g.records())).collect();
        seen.sort_unstable();
        let mut expected = ids(&mixed);
        expected.sort_unstable();
        assert_eq!(seen.len(), total);
        assert_eq!(seen, expected);
        for group in &groups {
            assert!(
                group
                    .records()
                    .iter()
                    .all(|r| r.subject_id() == group.subject_id())
            );
        }
    }

    #[rstest]
    fn grouping_is_idempotent(mixed: Vec<TeachingRecord>) {
        let once = group_by_subject(mixed);
        let flattened: Vec<TeachingRecord> = once
            .iter()
            .flat_map(|group| group.records().to_vec())
            .collect();
        assert_eq!(group_by_subject(flattened), once);
    }

    #[rstest]
    fn group_contents_ignore_input_permutation(mixed: Vec<TeachingRecord>) {
        let forward = group_by_subject(mixed.clone());
        let mut reversed_input = mixed;
        reversed_input.reverse();
        let reversed = group_by_subject(reversed_input);
        for group in &forward {
            let other = reversed
                .iter()
                .find(|g| g.subject_id() == group.subject_id())
                .expect("same subjects");
            assert_eq!(ids(other.records()), ids(group.records()));
        }
    }

    #[test]
    fn exact_ties_keep_input_order() {
        let groups = group_by_subject(vec![
            record("first", (2024, 7, 15), 2, "sub1"),
            record("second", (2024, 7, 15), 2, "sub1"),
        ]);
        assert_eq!(ids(groups[0].records()), ["first", "second"]);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_subject(Vec::new()).is_empty());
    }

    #[rstest]
    fn month_filter_keeps_only_that_month(mixed: Vec<TeachingRecord>) {
        let july: ReportMonth = "2024-07".parse().expect("month");
        let kept = records_in_month(mixed, july);
        assert_eq!(ids(&kept), ["a", "b", "c", "d", "e"]);
    }

    #[rstest]
    #[case("2024-7")]
    #[case("2024-13")]
    #[case("July")]
    #[case("24-07")]
    fn malformed_months_are_rejected(#[case] input: &str) {
        assert!(input.parse::<ReportMonth>().is_err());
    }

    #[test]
    fn month_displays_zero_padded() {
        let month: ReportMonth = "2024-07".parse().expect("month");
        assert_eq!(month.to_string(), "2024-07");
    }
}
