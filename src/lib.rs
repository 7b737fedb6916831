mod error;
mod ics;
mod serial;
mod sheet;
mod structs;

pub mod cli;
pub mod config;

use std::io::{self, Write};
use std::path::PathBuf;

use log::{info, warn};

pub use crate::error::{Error, Result};
pub use crate::ics::{build_calendar, write_calendar};
pub use crate::serial::{parse_serial, serial_to_date};
pub use crate::sheet::{cell_text, parse_range, read_sheet};
pub use crate::structs::{meetings_for, FromRow, Meeting};

use crate::config::{Config, Selection};

/// Narrows the meetings read from the sheet down to the configured selection.
pub fn select(meetings: Vec<Meeting>, selection: &Selection) -> Vec<Meeting> {
    match selection {
        Selection::All => meetings,
        Selection::Person(person) => {
            let selected = meetings_for(&meetings, person);
            if selected.is_empty() {
                warn!("no meetings found for {person:?}");
            }
            selected
        }
    }
}

/// Reads the sheet, applies the selection and writes the calendar.
///
/// Returns the path of the written calendar, or `None` when the meetings
/// were printed as JSON instead.
pub fn run(config: &Config) -> anyhow::Result<Option<PathBuf>> {
    let meetings = read_sheet::<Meeting>(&config.input, &config.sheet)?;
    info!(
        "read {} rows from sheet {:?} of {}",
        meetings.len(),
        config.sheet,
        config.input.display()
    );

    let meetings = select(meetings, &config.selection);
    info!("{} meetings selected", meetings.len());

    if config.json {
        let meetings = meetings
            .iter()
            .filter(|meeting| !meeting.is_blank())
            .collect::<Vec<_>>();

        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &meetings)?;
        writeln!(stdout)?;
        return Ok(None);
    }

    let calendar = build_calendar(&meetings, &config.title_prefix, config.include_empty);
    let path = write_calendar(config.output_stem(), &calendar.to_string())?;

    Ok(Some(path))
}
