use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes `[target] message` lines to stderr.
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = record.args().to_string();
        match record.level() {
            // Library messages already carry a [module] prefix.
            _ if msg.starts_with('[') => eprintln!("{msg}"),
            Level::Error | Level::Warn => eprintln!("[{}] {}: {msg}", record.target(), record.level()),
            _ => eprintln!("[{}] {msg}", record.target()),
        }
    }

    fn flush(&self) {}
}

/// Install the stderr logger: warnings by default, `-v` for info, `-vv` for debug.
pub fn init(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_boxed_logger(Box::new(StderrLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}
