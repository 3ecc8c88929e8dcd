use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};
use time::macros::format_description;
use time::OffsetDateTime;

/// Prints `[LEVEL yyyy.mm.dd hh:mm:ss UTC] message`; warnings and errors go to stderr.
struct StampedLogger {
    level: LevelFilter,
}

impl Log for StampedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let stamp = OffsetDateTime::now_utc()
            .format(format_description!("[year].[month].[day] [hour]:[minute]:[second]"))
            .unwrap_or_default();
        let line = format!("[{} {} UTC] {}", record.level(), stamp, record.args());
        if record.level() <= Level::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// `verbosity`: 0 = info, 1 = debug, 2+ = trace; `quiet` keeps warnings only.
pub fn init(verbosity: u8, quiet: bool) -> Result<(), log::SetLoggerError> {
    let level = if quiet {
        LevelFilter::Warn
    } else {
        match verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    log::set_boxed_logger(Box::new(StampedLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}
