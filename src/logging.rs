//! Optional transcript logging to a plain-text file.
//!
//! When enabled, each settled exchange is appended as the same two-line
//! block the screen shows. Internal diagnostics go through `tracing`
//! instead; see [`init_tracing`].

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::message::Turn;

pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut logging = LoggingState {
            file_path: log_file,
            is_active: false,
        };

        if let Some(path) = logging.file_path.clone() {
            logging.test_file_access(&path)?;
            logging.is_active = true;
        }

        Ok(logging)
    }

    /// Append one settled turn. A no-op unless logging is active, so callers
    /// can log unconditionally.
    pub fn log_turn(&self, turn: &Turn) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active {
            return Ok(());
        }

        // new() guarantees file_path is set whenever is_active is.
        let file_path = self.file_path.as_ref().ok_or("logging active without a file path")?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "You: {}", turn.user)?;
        writeln!(writer, "Bot: {}", turn.bot)?;
        // Blank line between exchanges, matching screen spacing.
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn get_status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "disabled".to_string(),
            (Some(path), true) => format!(
                "logging to {}",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
            (Some(path), false) => format!(
                "paused ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
        }
    }

    fn test_file_access(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}

/// Route `tracing` diagnostics to the file named by `CAUSERIE_DEBUG_LOG`.
/// Stderr is not an option while the alternate screen is active, so without
/// the variable set, diagnostics are dropped.
pub fn init_tracing() {
    let Ok(path) = std::env::var("CAUSERIE_DEBUG_LOG") else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn inactive_logger_writes_nothing() {
        let logging = LoggingState::new(None).unwrap();
        assert!(!logging.is_active());
        logging.log_turn(&Turn::resolved("hi", "hello")).unwrap();
        assert_eq!(logging.get_status_string(), "disabled");
    }

    #[test]
    fn turns_are_appended_as_two_line_blocks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.log");
        let logging = LoggingState::new(Some(path.to_string_lossy().into_owned())).unwrap();
        assert!(logging.is_active());

        logging.log_turn(&Turn::resolved("hi", "hello")).unwrap();
        logging.log_turn(&Turn::resolved("bye", "later")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "You: hi\nBot: hello\n\nYou: bye\nBot: later\n\n");
    }

    #[test]
    fn unwritable_log_file_fails_at_startup() {
        let result = LoggingState::new(Some("/nonexistent-dir/chat.log".to_string()));
        assert!(result.is_err());
    }
}
