use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();
static MISSING_LOGGER_REPORTED: AtomicBool = AtomicBool::new(false);

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    fn format_line(&self, timestamp: &str, file: &str, line: u32, message: &str) -> String {
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message),
            None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        println!("{}", self.format_line(&timestamp, file, line, message));
    }
}

pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    } else if !MISSING_LOGGER_REPORTED.swap(true, Ordering::Relaxed) {
        eprintln!("Logger not initialized! Call init_logger() first.");
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_strips_directories() {
        let logger = Logger::new(None);
        let line = logger.format_line("2024-01-01 00:00:00", "common/src/games/snake/game_state.rs", 42, "hello");
        assert_eq!(line, "[2024-01-01 00:00:00][game_state.rs:42] hello");
    }

    #[test]
    fn test_format_line_with_prefix() {
        let logger = Logger::new(Some("Server".to_string()));
        let line = logger.format_line("2024-01-01 00:00:00", "C:\\src\\main.rs", 7, "up");
        assert_eq!(line, "[2024-01-01 00:00:00][Server][main.rs:7] up");
    }
}
