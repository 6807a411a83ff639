//! Rolling Logger
//!
//! A rolling file logger with a circular buffer of recent lines.
//! Installs a `tracing` subscriber; records sent through the `log` facade
//! are bridged into it, so library crates only need `log`.

mod file;
mod ring;

pub use file::{log_file_name, prune_old_logs, DailyFile};
pub use ring::RingBuffer;

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("log directory error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
    #[error("logger not initialized")]
    NotInitialized,
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub app_name: String,
    pub level: Level,
    /// Number of daily files kept on disk
    pub retain_files: usize,
    /// Number of recent lines kept in memory
    pub buffer_lines: usize,
    /// Mirror output to stderr
    pub console: bool,
}

impl LoggerConfig {
    pub fn new(log_dir: PathBuf, app_name: &str) -> Self {
        Self {
            log_dir,
            app_name: app_name.to_string(),
            level: Level::INFO,
            retain_files: 7,
            buffer_lines: 500,
            console: true,
        }
    }
}

static RECENT: OnceLock<Arc<Mutex<RingBuffer>>> = OnceLock::new();
static INSTALLED: OnceLock<()> = OnceLock::new();

/// Writer handed to the fmt layer: appends to the daily file and the ring buffer
#[derive(Clone)]
pub struct RollingWriter {
    file: Arc<Mutex<DailyFile>>,
    recent: Arc<Mutex<RingBuffer>>,
}

impl RollingWriter {
    pub fn new(file: DailyFile, recent: Arc<Mutex<RingBuffer>>) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
            recent,
        }
    }
}

impl io::Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let today = chrono::Local::now().date_naive();
        {
            let mut file = self
                .file
                .lock()
                .map_err(|_| io::Error::other("log file lock poisoned"))?;
            file.write_on(today, buf)?;
        }
        if let Ok(mut recent) = self.recent.lock() {
            let text = String::from_utf8_lossy(buf);
            for line in text.lines().filter(|l| !l.is_empty()) {
                recent.push(line.to_string());
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn log_level_filter(level: Level) -> log::LevelFilter {
    if level == Level::TRACE {
        log::LevelFilter::Trace
    } else if level == Level::DEBUG {
        log::LevelFilter::Debug
    } else if level == Level::INFO {
        log::LevelFilter::Info
    } else if level == Level::WARN {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Error
    }
}

/// Initialize with defaults: INFO level, 7 days of files, stderr mirror
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_with(LoggerConfig::new(log_dir, app_name))
}

/// Install the global subscriber. Can succeed only once per process.
pub fn init_with(config: LoggerConfig) -> Result<(), LoggerError> {
    let today = chrono::Local::now().date_naive();
    let file = DailyFile::open(&config.log_dir, &config.app_name, today)?;
    let pruned = prune_old_logs(&config.log_dir, &config.app_name, config.retain_files);

    let recent = RECENT
        .get_or_init(|| Arc::new(Mutex::new(RingBuffer::new(config.buffer_lines))))
        .clone();
    let writer = RollingWriter::new(file, recent);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);
    let console_layer = config
        .console
        .then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(config.level))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;
    log::set_max_level(log_level_filter(config.level));
    let _ = INSTALLED.set(());

    match pruned {
        Ok(0) => {}
        Ok(n) => tracing::debug!("pruned {} old log files", n),
        Err(e) => tracing::warn!("failed to prune old log files: {}", e),
    }
    Ok(())
}

fn ensure_installed() -> Result<(), LoggerError> {
    INSTALLED.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_installed()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_installed()?;
    tracing::warn!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_installed()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Most recent formatted lines, oldest first
pub fn recent_lines() -> Vec<String> {
    RECENT
        .get()
        .and_then(|ring| ring.lock().ok().map(|r| r.snapshot()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_writer_feeds_file_and_ring() {
        let dir = tempfile::tempdir().unwrap();
        let today = chrono::Local::now().date_naive();
        let file = DailyFile::open(dir.path(), "Test", today).unwrap();
        let path = file.path();
        let ring = Arc::new(Mutex::new(RingBuffer::new(10)));

        let mut writer = RollingWriter::new(file, ring.clone());
        writer.write_all(b"line one\nline two\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(ring.lock().unwrap().snapshot(), vec!["line one", "line two"]);
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("line two"));
    }

    #[test]
    fn test_helpers_require_init() {
        if INSTALLED.get().is_none() {
            assert!(matches!(info("hello"), Err(LoggerError::NotInitialized)));
        }
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(log_level_filter(Level::DEBUG), log::LevelFilter::Debug);
        assert_eq!(log_level_filter(Level::ERROR), log::LevelFilter::Error);
    }
}
