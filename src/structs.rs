use chrono::NaiveDate;
use serde::Serialize;

use crate::serial::{parse_serial, serial_to_date};

/// Builds a record out of one spreadsheet row.
///
/// `row` holds the rendered cell texts in column order and may be shorter
/// than the record expects. Building never fails; malformed cells fall back
/// to defaults.
pub trait FromRow: Sized {
    fn from_row(row: &[String]) -> Self;

    /// Whether the record came from a blank row and should be ignored.
    fn is_blank(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    /// `None` when the date cell was missing, blank or not a day-count.
    pub date: Option<NaiveDate>,
    pub name: String,
    pub place: String,
    pub subject: String,
    pub goals: String,
    pub meeting_place: String,
    pub time_table_info: String,
    pub main_person: String,
    pub other_person1: String,
    pub other_person2: String,
    #[serde(skip)]
    pub is_empty_row: bool,
}

impl FromRow for Meeting {
    fn from_row(row: &[String]) -> Self {
        let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();

        let date = row
            .first()
            .and_then(|raw| parse_serial(raw))
            .and_then(serial_to_date);

        Meeting {
            date,
            name: cell(1),
            place: cell(2),
            subject: cell(3),
            goals: cell(4),
            meeting_place: cell(5),
            time_table_info: cell(6),
            main_person: cell(7),
            other_person1: cell(8),
            other_person2: cell(9),
            is_empty_row: row.is_empty(),
        }
    }

    fn is_blank(&self) -> bool {
        self.is_empty_row
    }
}

impl Meeting {
    /// Whether `person` occurs anywhere in one of the personnel columns.
    /// Plain, case-sensitive substring match.
    pub fn involves(&self, person: &str) -> bool {
        [&self.main_person, &self.other_person1, &self.other_person2]
            .into_iter()
            .any(|field| field.contains(person))
    }

    /// Whether the meeting carries everything an event needs.
    pub fn is_schedulable(&self) -> bool {
        !self.is_empty_row && self.date.is_some()
    }
}

/// Keeps the meetings `person` takes part in, in their original order.
pub fn meetings_for<'a, I>(meetings: I, person: &str) -> Vec<Meeting>
where
    I: IntoIterator<Item = &'a Meeting>,
{
    meetings
        .into_iter()
        .filter(|meeting| meeting.involves(person))
        .cloned()
        .collect()
}
