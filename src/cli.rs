mod highlight;
mod ingest;
mod show;

use clap::ArgMatches;
use std::process::exit;

use crate::{
    config::Config,
    crayon_handler::CrayonHandler,
    gateway::HighlightGateway,
    logging::GatedLog,
    propagation::PropagationMode
};

#[derive(Debug)]
pub(crate) struct CrayonCLIError {
    error: String
}

impl<T> From<T> for CrayonCLIError where T: ToString {
    fn from(e: T) -> Self {
        Self { error: e.to_string() }
    }
}

impl From<CrayonCLIError> for String {
    fn from(e: CrayonCLIError) -> Self {
        e.error
    }
}

fn report_and_exit(command: &str, err: CrayonCLIError, code: i32) -> ! {
    let err_msg: String = err.into();
    eprintln!("Error occured while {} executed: {}", command, err_msg);
    exit(code);
}

pub(crate) fn launch(command: &ArgMatches, config: &Config) -> Result<(), CrayonCLIError> {
    let handler = CrayonHandler::new(
        &config.highlight,
        GatedLog::from_settings(&config.highlight),
        HighlightGateway
    );

    match command.subcommand() {
        Some(("ingest", args)) => {
            let capture_path = match args.get_one::<String>("capture") {
                Some(path) => shellexpand::tilde(path).to_string(),
                None => config.capture_path()?
            };

            if let Err(err) = ingest::execute(&capture_path, &config.http_data_path()?, &handler) {
                report_and_exit("ingest", err, 1);
            }
        },
        Some(("show", args)) => {
            let selection = highlight::SelectionSettings::try_from(args)?;
            if let Err(err) = show::execute(&selection, args.get_flag("urls"), &config.http_data_path()?) {
                report_and_exit("show", err, 2);
            }
        },
        Some(("highlight", args)) => {
            let selection = highlight::SelectionSettings::try_from(args)?;
            if let Err(err) = highlight::execute(&selection, PropagationMode::Apply, &config.http_data_path()?, &handler) {
                report_and_exit("highlight", err, 3);
            }
        },
        Some(("clear", args)) => {
            let selection = highlight::SelectionSettings::try_from(args)?;
            if let Err(err) = highlight::execute(&selection, PropagationMode::Clear, &config.http_data_path()?, &handler) {
                report_and_exit("clear", err, 3);
            }
        },
        Some(("prefix", args)) => {
            let id = *args
                .get_one::<usize>("ID")
                .ok_or(CrayonCLIError::from("'ID' arg not found"))?;
            if let Err(err) = highlight::execute_prefix(id, PropagationMode::Apply, &config.http_data_path()?, &handler) {
                report_and_exit("prefix", err, 4);
            }
        },
        Some(("prefix-clear", args)) => {
            let id = *args
                .get_one::<usize>("ID")
                .ok_or(CrayonCLIError::from("'ID' arg not found"))?;
            if let Err(err) = highlight::execute_prefix(id, PropagationMode::Clear, &config.http_data_path()?, &handler) {
                report_and_exit("prefix-clear", err, 4);
            }
        },
        Some(("settings", _)) => {
            show::print_settings(&config.highlight, &GatedLog::from_settings(&config.highlight));
        },
        _ => {
            return Err(CrayonCLIError::from("Unknown command, see 'crayon --help'"));
        }
    }

    Ok(())
}
