//! The process-wide destination of statistics. Every statistic is written as one line of the form
//! `{prefix} {name}={value}`.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

/// Where and how statistics are written; installed with [`configure_statistic_logging`].
pub struct StatisticOptions {
    prefix: &'static str,
    closing_line: Option<&'static str>,
    casing: Option<Case>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl StatisticOptions {
    /// Statistics prefixed with `prefix`, written to stdout with their names unchanged.
    pub fn new(prefix: &'static str) -> StatisticOptions {
        StatisticOptions {
            prefix,
            closing_line: None,
            casing: None,
            writer: Mutex::new(Box::new(std::io::stdout())),
        }
    }

    /// A line written by [`log_statistic_postfix`] once all statistics are out.
    pub fn with_closing_line(mut self, closing_line: &'static str) -> Self {
        self.closing_line = Some(closing_line);
        self
    }

    /// Converts every statistic name to `casing` before writing it.
    pub fn with_casing(mut self, casing: Case) -> Self {
        self.casing = Some(casing);
        self
    }

    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Mutex::new(Box::new(writer));
        self
    }

    fn write_line(&self, line: impl Display) {
        // A poisoned writer only loses statistics.
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{line}");
        }
    }
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("closing_line", &self.closing_line)
            .field("casing", &self.casing)
            .finish_non_exhaustive()
    }
}

static STATISTIC_OPTIONS: OnceLock<StatisticOptions> = OnceLock::new();

/// Enables statistic logging for the rest of the process.
///
/// Nothing is written before this is called. Only the first call has an effect; it returns whether
/// `options` were installed.
pub fn configure_statistic_logging(options: StatisticOptions) -> bool {
    STATISTIC_OPTIONS.set(options).is_ok()
}

/// Writes `{prefix} {name}={value}` if statistic logging is configured.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(options) = STATISTIC_OPTIONS.get() else {
        return;
    };

    let name = match options.casing {
        Some(casing) => name.to_string().to_case(casing),
        None => name.to_string(),
    };
    options.write_line(format_args!("{} {name}={value}", options.prefix));
}

/// Writes the closing line, if one was configured.
pub fn log_statistic_postfix() {
    if let Some(options) = STATISTIC_OPTIONS.get() {
        if let Some(closing_line) = options.closing_line {
            options.write_line(closing_line);
        }
    }
}

pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
