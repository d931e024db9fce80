use colored::Colorize;
use log::{Level, LevelFilter};
use std::sync::OnceLock;

/// Colored `log` backend for flowdash tests and embedding binaries.
#[derive(Clone)]
pub struct Logger {
  level: LevelFilter,
}

impl Logger {
  pub fn new(level: Level) -> Self {
    Logger {
      level: level.to_level_filter(),
    }
  }
}

impl log::Log for Logger {
  fn enabled(&self, metadata: &log::Metadata) -> bool {
    metadata.level() <= self.level
  }

  fn log(&self, record: &log::Record) {
    if !self.enabled(record.metadata()) {
      return;
    }

    let time = chrono::Local::now()
      .format("%Y-%m-%d %H:%M:%S%.3f")
      .to_string()
      .magenta();

    let level = match record.level() {
      Level::Error => "ERROR".red(),
      Level::Warn => "WARN ".yellow(),
      Level::Info => "INFO ".green(),
      Level::Debug => "DEBUG".blue(),
      Level::Trace => "TRACE".dimmed(),
    };

    let location = match (record.file(), record.line()) {
      (Some(file), Some(line)) => format!(" {}:{}", file, line).cyan(),
      _ => String::new().normal(),
    };

    println!(
      "{} {} [{}]{} {}",
      time,
      level,
      record.target(),
      location,
      record.args()
    );
  }

  fn flush(&self) {}
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_logger() {
  init_logger_with_level(Level::Debug);
}

/// Installs the logger once per process. Later calls keep the first level.
pub fn init_logger_with_level(level: Level) {
  if LOGGER.get().is_some() {
    return;
  }

  let logger = LOGGER.get_or_init(|| Logger::new(level));
  // Another logger may already be installed by the host, which is fine.
  if log::set_logger(logger).is_ok() {
    log::set_max_level(logger.level);
  }
}
