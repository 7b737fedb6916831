use std::env;
use std::process;

use log::{error, info};

use ol_ics::cli;

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "ol_ics=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

fn main() {
    let config = cli::parse(env::args().skip(1).collect());

    setup_logging();

    match ol_ics::run(&config) {
        Ok(Some(path)) => info!("calendar written to {}", path.display()),
        Ok(None) => {}
        Err(err) => {
            error!("{err:#}");
            process::exit(1);
        }
    }
}
