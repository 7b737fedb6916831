use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "ol.xlsx";
pub const DEFAULT_SHEET: &str = "alle Anlässe";
pub const DEFAULT_TITLE_PREFIX: &str = "OL-Training";
pub const ALL_STEM: &str = "alle";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Person(String),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub sheet: String,
    pub selection: Selection,
    pub title_prefix: String,
    pub output: Option<String>,
    pub include_empty: bool,
    pub json: bool,
}

impl Config {
    pub fn new(selection: Selection) -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            sheet: DEFAULT_SHEET.to_string(),
            selection,
            title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
            output: None,
            include_empty: false,
            json: false,
        }
    }

    /// Lowercased file stem of the calendar, without the `.ics` extension.
    pub fn output_stem(&self) -> String {
        let stem = match (&self.output, &self.selection) {
            (Some(output), _) => output.to_lowercase(),
            (None, Selection::Person(person)) => person.to_lowercase(),
            (None, Selection::All) => ALL_STEM.to_string(),
        };

        stem.strip_suffix(".ics").map(str::to_string).unwrap_or(stem)
    }
}
