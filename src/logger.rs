use anyhow::Result;
use parking_lot::Mutex;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Per-session log file with timestamped lines and retention cleanup.
pub struct SessionLogger {
    buffer: Mutex<Vec<String>>,
    log_path: PathBuf,
    log_dir: PathBuf,
    retention_count: usize,
    app_name: String,
    stream_to_stdout: bool,
}

impl SessionLogger {
    pub fn new(
        log_dir: PathBuf,
        app_name: &str,
        retention_count: usize,
        stream_to_stdout: bool,
    ) -> Result<Self> {
        fs::create_dir_all(&log_dir)?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("{}_{}.log", app_name, timestamp));

        let logger = Self {
            buffer: Mutex::new(Vec::new()),
            log_path,
            log_dir,
            retention_count,
            app_name: app_name.to_string(),
            stream_to_stdout,
        };

        logger.clean_old_logs();
        logger.write(format!("=== {} session started ===", app_name));

        Ok(logger)
    }

    fn write(&self, message: impl AsRef<str>) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = format!("[{}] {}", timestamp, message.as_ref());

        if self.stream_to_stdout {
            println!("{}", line);
        }
        self.buffer.lock().push(line);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.write(message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.write(format!("WARN: {}", message.as_ref()));
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.write(format!("ERROR: {}", message.as_ref()));
    }

    fn clean_old_logs(&self) {
        let prefix = format!("{}_", self.app_name);
        let mut log_files: Vec<(PathBuf, std::time::SystemTime)> = Vec::new();

        if let Ok(entries) = fs::read_dir(&self.log_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                let is_log = path.extension().and_then(|s| s.to_str()) == Some("log")
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(&prefix));
                if !is_log {
                    continue;
                }
                if let Ok(modified) = entry.metadata().and_then(|m| m.modified()) {
                    log_files.push((path, modified));
                }
            }
        }

        log_files.sort_by(|a, b| b.1.cmp(&a.1));
        for (path, _) in log_files.iter().skip(self.retention_count) {
            let _ = fs::remove_file(path);
        }
    }

    pub fn flush_to_disk(&self) -> Result<()> {
        let mut buffer = self.buffer.lock();
        if buffer.is_empty() {
            return Ok(());
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        for line in buffer.iter() {
            writeln!(file, "{}", line)?;
        }
        file.flush()?;
        buffer.clear();

        Ok(())
    }

    pub fn finalize(&self) -> Result<()> {
        self.write(format!("=== {} session ended ===", self.app_name));
        self.flush_to_disk()
    }
}

impl Drop for SessionLogger {
    fn drop(&mut self) {
        let _ = self.finalize();
    }
}

static LOGGER: once_cell::sync::OnceCell<SessionLogger> = once_cell::sync::OnceCell::new();

pub fn init_logger(
    log_dir: PathBuf,
    app_name: &str,
    retention_count: usize,
    stream_to_stdout: bool,
) -> Result<()> {
    let logger = SessionLogger::new(log_dir, app_name, retention_count, stream_to_stdout)?;
    LOGGER
        .set(logger)
        .map_err(|_| anyhow::anyhow!("Logger already initialized"))?;
    Ok(())
}

pub fn log_info(message: impl AsRef<str>) {
    if let Some(logger) = LOGGER.get() {
        logger.info(message);
    }
}

pub fn log_warn(message: impl AsRef<str>) {
    if let Some(logger) = LOGGER.get() {
        logger.warn(message);
    }
}

pub fn log_error(message: impl AsRef<str>) {
    if let Some(logger) = LOGGER.get() {
        logger.error(message);
    }
}

pub fn finalize_logs() -> Result<()> {
    if let Some(logger) = LOGGER.get() {
        logger.finalize()?;
    }
    Ok(())
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::log_info(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::log_warn(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::log_error(format!($($arg)*))
    };
}
