mod classify;
mod cli;
mod config;
mod crayon_handler;
mod gateway;
mod http_storage;
mod logging;
mod palette;
mod propagation;
mod scope;
mod settings;
mod traffic;
mod utils;

use std::process::exit;

fn main() {
    let (config, command) = match config::handle_user_input() {
        Ok(input) => input,
        Err(err) => {
            eprintln!("Could not load config: {}", err);
            exit(1);
        }
    };

    if let Err(err) = logging::init(config.log_file.as_deref(), config.highlight.debug_mode) {
        eprintln!("Could not initialize logging: {}", err);
        exit(1);
    }

    if let Err(err) = cli::launch(&command, &config) {
        let err_msg: String = err.into();
        eprintln!("Error: {}", err_msg);
        exit(1);
    }
}
