use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

/// `log` sink appending to a file, since the terminal belongs to the game
pub struct DebugLog {
    file: Mutex<File>,
    level: LevelFilter,
}

impl DebugLog {
    /// Truncate `path` and route all log output there
    pub fn install(path: &str, level: LevelFilter) -> color_eyre::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        log::set_boxed_logger(Box::new(DebugLog {
            file: Mutex::new(file),
            level,
        }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for DebugLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}
