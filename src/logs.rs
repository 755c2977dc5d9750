use std::fs;
use std::path::Path;

use anyhow::Result;
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

pub const LOG_FILE: &str = "logs/server.log";

fn rotating_file(log_dir: &Path) -> Result<FileRotate<AppendTimestamp>> {
    let path = log_dir.join(LOG_FILE);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(FileRotate::new(
        path,
        AppendTimestamp::default(FileLimit::MaxFiles(3)),
        ContentLimit::Lines(1000),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}

/// Logs go to stderr, and additionally to a rolling file under `log_dir`
/// when one is given.
pub fn init(log_dir: Option<&Path>, level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if let Some(log_dir) = log_dir {
        loggers.push(WriteLogger::new(level, config, rotating_file(log_dir)?));
    }
    CombinedLogger::init(loggers)?;
    info!("logging initialized at {level}");
    Ok(())
}
