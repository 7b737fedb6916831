use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use log::debug;

use crate::error::{Error, Result};
use crate::structs::FromRow;

/// Reads `sheet` from the workbook at `path` and builds one record per row.
///
/// The first row is a header and is skipped. Rows are handed to the builder
/// as rendered cell texts with trailing blanks removed, so a blank row
/// arrives as an empty slice.
pub fn read_sheet<T: FromRow>(path: impl AsRef<Path>, sheet: &str) -> Result<Vec<T>> {
    let path = path.as_ref();

    let mut workbook = open_workbook_auto(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(Error::MissingSheet {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|source| Error::Sheet {
            sheet: sheet.to_string(),
            source,
        })?;

    Ok(parse_range(&range))
}

/// Maps every row but the header through `T::from_row`.
pub fn parse_range<T: FromRow>(range: &Range<Data>) -> Vec<T> {
    range
        .rows()
        .enumerate()
        .skip(1)
        .map(|(idx, cells)| {
            let row = row_texts(cells);
            if row.is_empty() {
                debug!("row {} is blank", sheet_row(range, idx));
            }
            T::from_row(&row)
        })
        .collect()
}

/// 1-based row number in the sheet of the `idx`-th row of `range`.
fn sheet_row(range: &Range<Data>, idx: usize) -> usize {
    let first = range.start().map_or(0, |(row, _)| row as usize);
    first + idx + 1
}

fn row_texts(cells: &[Data]) -> Vec<String> {
    let mut row = cells.iter().map(cell_text).collect::<Vec<_>>();

    while row.last().is_some_and(String::is_empty) {
        row.pop();
    }

    row
}

/// Renders a cell the way it reads in the spreadsheet.
///
/// Date cells come out as their serial day-count so the date column can be
/// read uniformly whether or not it carries a date format.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{f:.0}"),
        Data::Float(f) => f.to_string(),
        Data::DateTime(dt) => format!("{:.0}", dt.as_f64().trunc()),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
    }
}
