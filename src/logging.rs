use log::{debug, error, info, Level, LevelFilter};
use log4rs::{
    self,
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder
};

use crate::{
    settings::{SettingsStore, DEBUG_MODE_KEY, LOG_ENABLED_KEY},
    utils::CrayonError
};

/// Leveled logging capability handed to every component that reports something.
///
/// Implementations decide on their own whether a message is emitted, call sites just log.
pub(crate) trait HostLog {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}

impl<T: HostLog + ?Sized> HostLog for &T {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }

    fn debug(&self, message: &str) {
        (**self).debug(message)
    }
}

/// Forwards to the `log` facade, gated by the `logging-enabled` and `debug-mode` toggles.
/// Errors are never gated.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GatedLog {
    logging_enabled: bool,
    debug_mode: bool
}

impl GatedLog {
    pub(crate) fn from_settings(settings: &dyn SettingsStore) -> Self {
        GatedLog {
            logging_enabled: settings.get_bool(LOG_ENABLED_KEY),
            debug_mode: settings.get_bool(DEBUG_MODE_KEY)
        }
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        match level {
            Level::Error | Level::Warn => true,
            Level::Info => self.logging_enabled,
            Level::Debug | Level::Trace => self.debug_mode
        }
    }
}

impl HostLog for GatedLog {
    fn info(&self, message: &str) {
        if self.enabled(Level::Info) {
            info!("{}", message);
        }
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }

    fn debug(&self, message: &str) {
        if self.enabled(Level::Debug) {
            debug!("{}", message);
        }
    }
}

pub(crate) fn init(log_file: Option<&str>, debug_mode: bool) -> Result<(), CrayonError> {
    let pattern = "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {m}{n}";
    let appender: Box<dyn log4rs::append::Append> = match log_file {
        Some(path) => {
            let file_appender = FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new(pattern)))
                .build(path)?;
            Box::new(file_appender)
        },
        None => {
            let console_appender = ConsoleAppender::builder()
                .encoder(Box::new(PatternEncoder::new(pattern)))
                .build();
            Box::new(console_appender)
        }
    };

    let level = if debug_mode { LevelFilter::Debug } else { LevelFilter::Info };
    let log_config = log4rs::Config::builder()
        .appender(Appender::builder().build("main", appender))
        .logger(Logger::builder().build("crayon", level))
        .build(Root::builder()
            .appender("main")
            .build(LevelFilter::Off))
        .map_err(|e| CrayonError::ConfigError(format!("Could not configure logger: {}", e)))?;

    log4rs::init_config(log_config)
        .map_err(|e| CrayonError::ConfigError(format!("Could not install logger: {}", e)))?;

    debug!("Logging initialized, debug mode: {}", debug_mode);
    Ok(())
}

// ---------------------------------------------------------------------------------------------- //

#[cfg(test)]
pub(crate) use recording::RecordingLog;

#[cfg(test)]
mod recording {
    use std::sync::Mutex;
    use super::HostLog;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub(crate) enum Level {
        Info,
        Error,
        Debug
    }

    /// Keeps every message regardless of level, for assertions
    #[derive(Default)]
    pub(crate) struct RecordingLog {
        messages: Mutex<Vec<(Level, String)>>
    }

    impl RecordingLog {
        fn of_level(&self, level: Level) -> Vec<String> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }

        pub(crate) fn infos(&self) -> Vec<String> {
            self.of_level(Level::Info)
        }

        pub(crate) fn errors(&self) -> Vec<String> {
            self.of_level(Level::Error)
        }

        pub(crate) fn debugs(&self) -> Vec<String> {
            self.of_level(Level::Debug)
        }
    }

    impl HostLog for RecordingLog {
        fn info(&self, message: &str) {
            self.messages.lock().unwrap().push((Level::Info, message.to_string()));
        }

        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push((Level::Error, message.to_string()));
        }

        fn debug(&self, message: &str) {
            self.messages.lock().unwrap().push((Level::Debug, message.to_string()));
        }
    }
}
