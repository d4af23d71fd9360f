use std::sync::{Arc, Mutex};

use colored::Colorize;

pub trait Logger: Send {
    fn debug(&self, msg: &str);

    fn info(&self, msg: &str);

    fn warn(&self, msg: &str);

    fn error(&self, msg: &str);
}

/// The logger handle that gets passed around the app.
pub type SharedLogger = Arc<Mutex<dyn Logger>>;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum Level {
    Info,
    Debug,
}

impl Level {
    /// Parses the `LOG_LEVEL` setting. Anything but "debug" means info.
    #[must_use]
    pub fn from_setting(setting: &str) -> Self {
        if setting.trim().eq_ignore_ascii_case("debug") {
            Self::Debug
        } else {
            Self::Info
        }
    }
}

pub struct ConsoleLogger {
    verbosity: Level,
}

impl ConsoleLogger {
    #[must_use]
    pub fn new(verbosity: Level) -> Self {
        Self { verbosity }
    }

    #[must_use]
    pub fn shared(verbosity: Level) -> SharedLogger {
        Arc::new(Mutex::new(Self::new(verbosity)))
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, msg: &str) {
        if self.verbosity >= Level::Debug {
            println!("{}", msg.cyan());
        }
    }

    fn info(&self, msg: &str) {
        println!("{msg}");
    }

    fn warn(&self, msg: &str) {
        eprintln!("{}", msg.yellow());
    }

    fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }
}

/// Runs `f` against the shared logger. A poisoned lock drops the message
/// rather than taking the request down with it.
pub fn with_logger(logger: &SharedLogger, f: impl FnOnce(&dyn Logger)) {
    if let Ok(guard) = logger.lock() {
        f(&*guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_debug_setting_enables_debug_output() {
        assert_eq!(Level::from_setting("debug"), Level::Debug);
        assert_eq!(Level::from_setting(" DEBUG "), Level::Debug);
        assert_eq!(Level::from_setting("info"), Level::Info);
        assert_eq!(Level::from_setting("verbose"), Level::Info);
        assert!(Level::Debug > Level::Info);
    }
}
