use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use ics::parameters::Value;
use ics::properties::{Description, DtEnd, DtStart, Location, Method, Summary};
use ics::{escape_text, ICalendar};
use log::info;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::structs::Meeting;

const PRODUCT_ID: &str = "-//ol-ics//Meeting Schedule//DE";

/// Builds a calendar holding one all-day event per meeting.
///
/// Meetings without a date are left out unless `include_empty` is set.
/// Blank rows never make it into the calendar.
pub fn build_calendar<'a>(
    meetings: &'a [Meeting],
    title_prefix: &'a str,
    include_empty: bool,
) -> ICalendar<'a> {
    let mut icalendar = ICalendar::new("2.0", PRODUCT_ID);
    icalendar.push(Method::new("PUBLISH"));
    icalendar.push(ics::components::Property::new(
        "X-WR-CALNAME",
        escape_text(title_prefix),
    ));

    for meeting in meetings {
        if meeting.is_empty_row || !(meeting.is_schedulable() || include_empty) {
            continue;
        }
        icalendar.add_event(meeting.to_ics(title_prefix));
    }

    icalendar
}

impl Meeting {
    pub fn summary(&self, title_prefix: &str) -> String {
        format!("{title_prefix} - {} - {}", self.name, self.subject)
    }

    pub fn description(&self) -> String {
        format!(
            "Ziele: {}\nTreffpunkt: {}\nZeitplan: {}\nLeitung: {}\nWeitere: {}, {}",
            self.goals,
            self.meeting_place,
            self.time_table_info,
            self.main_person,
            self.other_person1,
            self.other_person2,
        )
    }

    #[must_use]
    pub fn to_ics(&self, title_prefix: &str) -> ics::Event<'_> {
        let id = Uuid::new_v4().to_string();

        let stamp = match self.date {
            Some(date) => format!("{}T000000Z", date.format("%Y%m%d")),
            None => Utc::now().format("%Y%m%dT%H%M%SZ").to_string(),
        };

        let mut ics_event = ics::Event::new(id, stamp);

        if let Some(date) = self.date {
            ics_event.push(all_day(DtStart::new(ics_date(date))));
            if let Some(next) = date.succ_opt() {
                ics_event.push(all_day(DtEnd::new(ics_date(next))));
            }
        }

        ics_event.push(Summary::new(escape_text(self.summary(title_prefix))));
        ics_event.push(Description::new(escape_text(self.description())));
        ics_event.push(Location::new(escape_text(self.place.as_str())));

        ics_event
    }
}

fn ics_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn all_day<'a, P>(property: P) -> ics::components::Property<'a>
where
    P: Into<ics::components::Property<'a>>,
{
    let mut property = property.into();
    property.add(Value::new("DATE"));
    property
}

/// Writes `contents` to `<stem>.ics`, replacing any existing file.
pub fn write_calendar(stem: impl AsRef<Path>, contents: &str) -> Result<PathBuf> {
    let mut name = stem.as_ref().as_os_str().to_owned();
    name.push(".ics");
    let path = PathBuf::from(name);

    fs::write(&path, contents).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;

    info!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::structs::FromRow;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    fn dated(serial: &str, name: &str) -> Meeting {
        Meeting::from_row(&row(&[serial, name, "Wald", "Sprint"]))
    }

    fn uids(calendar: &str) -> Vec<&str> {
        calendar
            .lines()
            .filter_map(|line| line.strip_prefix("UID:"))
            .collect()
    }

    fn count_events(calendar: &str) -> usize {
        calendar.matches("BEGIN:VEVENT").count()
    }

    #[test]
    fn round_trip() {
        let meetings = [
            row(&["3", "Alice", "Forest", "OL", "Run fast", "Start hut", "14:00-16:00", "Bob", "", ""]),
            row(&["", "", "", "", "", "", "", "", "", ""]),
        ]
        .iter()
        .map(|cells| Meeting::from_row(cells))
        .collect::<Vec<_>>();

        let calendar = build_calendar(&meetings, "Training", false).to_string();

        assert_eq!(count_events(&calendar), 1);
        assert!(calendar.contains("SUMMARY:Training - Alice - OL\r\n"));
        assert!(calendar.contains("LOCATION:Forest\r\n"));
        assert!(calendar.contains("DTSTART;VALUE=DATE:19000102\r\n"));
        assert!(calendar.contains("DTEND;VALUE=DATE:19000103\r\n"));
        assert!(calendar.contains("DTSTAMP:19000102T000000Z\r\n"));
        assert!(calendar.contains("METHOD:PUBLISH\r\n"));
        assert!(calendar.contains(&format!("PRODID:{PRODUCT_ID}\r\n")));
    }

    #[test]
    fn one_event_per_meeting_with_unique_ids() {
        let meetings = (0..25)
            .map(|idx| dated(&(45000 + idx).to_string(), &format!("run {idx}")))
            .collect::<Vec<_>>();

        let calendar = build_calendar(&meetings, "OL", false).to_string();
        let ids = uids(&calendar);

        assert_eq!(count_events(&calendar), 25);
        assert_eq!(ids.len(), 25);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 25);
    }

    #[test]
    fn empty_rows_never_emitted() {
        let meetings = vec![Meeting::from_row(&[]), Meeting::from_row(&[])];

        for include_empty in [false, true] {
            let calendar = build_calendar(&meetings, "OL", include_empty).to_string();
            assert_eq!(count_events(&calendar), 0);
            assert!(calendar.contains("BEGIN:VCALENDAR"));
            assert!(calendar.contains("END:VCALENDAR"));
        }
    }

    #[test]
    fn undated_meetings_need_include_empty() {
        let meetings = vec![dated("45000", "dated"), dated("soon", "undated")];

        let calendar = build_calendar(&meetings, "OL", false).to_string();
        assert_eq!(count_events(&calendar), 1);
        assert!(!calendar.contains("undated"));

        let calendar = build_calendar(&meetings, "OL", true).to_string();
        assert_eq!(count_events(&calendar), 2);
        assert!(calendar.contains("SUMMARY:OL - undated - Sprint"));
        assert_eq!(calendar.matches("DTSTART").count(), 1);
    }

    #[test]
    fn stamps_are_utc() {
        let meetings = vec![dated("45000", "dated"), dated("soon", "undated")];
        let calendar = build_calendar(&meetings, "OL", true).to_string();

        let stamps = calendar
            .lines()
            .filter_map(|line| line.strip_prefix("DTSTAMP:"))
            .collect::<Vec<_>>();

        assert_eq!(stamps.len(), 2);
        assert_eq!(stamps[0], "20230315T000000Z");
        assert!(stamps.iter().all(|stamp| stamp.len() == 16 && stamp.ends_with('Z')));
    }

    #[test]
    fn description_template() {
        let meeting = Meeting::from_row(&row(&[
            "45000", "Alice", "Forest", "OL", "Run fast", "Start hut", "14:00", "Bob", "Carol", "Dave",
        ]));

        assert_eq!(
            meeting.description(),
            "Ziele: Run fast\nTreffpunkt: Start hut\nZeitplan: 14:00\nLeitung: Bob\nWeitere: Carol, Dave"
        );

        let calendar = build_calendar(std::slice::from_ref(&meeting), "OL", false).to_string();
        assert!(calendar.contains("DESCRIPTION:Ziele: Run fast\\nTreffpunkt: Start hut"));
    }

    #[test]
    fn writes_lowercase_stem_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("enea");

        let path = write_calendar(&stem, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();

        assert_eq!(path, dir.path().join("enea.ics"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"
        );

        write_calendar(&stem, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn dotted_stem_keeps_its_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_calendar(dir.path().join("ol.training"), "x").unwrap();
        assert_eq!(path, dir.path().join("ol.training.ics"));
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("missing").join("enea");

        let result = write_calendar(&stem, "x");
        assert!(matches!(result, Err(Error::Write { .. })));
    }
}
