use std::env;
use std::path::PathBuf;
use std::process;

use getopts::Options;

use crate::config::{Config, Selection, DEFAULT_INPUT, DEFAULT_SHEET, DEFAULT_TITLE_PREFIX};

#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    Help(String),
    Run(Config),
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "p",
        "person",
        "Only include meetings this person takes part in",
        "NAME",
    );
    opts.optflag("a", "all", "Include every meeting of the sheet");
    opts.optopt(
        "i",
        "input",
        &format!("Spreadsheet to read [Default: {DEFAULT_INPUT}]"),
        "FILE",
    );
    opts.optopt(
        "s",
        "sheet",
        &format!("Sheet holding the schedule [Default: {DEFAULT_SHEET}]"),
        "NAME",
    );
    opts.optopt(
        "t",
        "title-prefix",
        &format!("Prefix of every event title [Default: {DEFAULT_TITLE_PREFIX}]"),
        "TEXT",
    );
    opts.optopt(
        "o",
        "output",
        "File name of the calendar, lowercased, `.ics` is appended [Default: person name or `alle`]",
        "STEM",
    );
    opts.optflag(
        "e",
        "include-empty",
        "Also emit meetings without a valid date [Default: false]",
    );
    opts.optflag(
        "j",
        "json",
        "Print the selected meetings as JSON instead of writing a calendar",
    );
    opts
}

fn usage(opts: &Options) -> String {
    opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME")))
}

pub fn try_parse(args: Vec<String>) -> Result<Parsed, String> {
    let opts = opts();
    let matches = opts.parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(Parsed::Help(usage(&opts)));
    }

    let selection = match (matches.opt_str("person"), matches.opt_present("all")) {
        (Some(person), false) if !person.is_empty() => Selection::Person(person),
        (Some(_), false) => return Err("Option 'person' needs a non-empty name".into()),
        (None, true) => Selection::All,
        (Some(_), true) => return Err("Options 'person' and 'all' are mutually exclusive".into()),
        (None, false) => return Err("Either 'person' or 'all' is required".into()),
    };

    let mut config = Config::new(selection);

    if let Some(input) = matches.opt_str("input") {
        config.input = PathBuf::from(input);
    }
    if let Some(sheet) = matches.opt_str("sheet") {
        config.sheet = sheet;
    }
    if let Some(title_prefix) = matches.opt_str("title-prefix") {
        config.title_prefix = title_prefix;
    }
    config.output = matches.opt_str("output");
    config.include_empty = matches.opt_present("include-empty");
    config.json = matches.opt_present("json");

    Ok(Parsed::Run(config))
}

pub fn parse(args: Vec<String>) -> Config {
    match try_parse(args) {
        Ok(Parsed::Run(config)) => config,
        Ok(Parsed::Help(usage)) => {
            println!("{usage}");
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{}", opts().short_usage(env!("CARGO_PKG_NAME")));
            process::exit(1);
        }
    }
}
