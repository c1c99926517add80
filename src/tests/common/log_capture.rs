//! Capture `log` records emitted on the current thread.
//!
//! Installs a process-wide logger once; records are only kept while the
//! emitting thread is inside [`capture`], so parallel tests do not see each
//! other's diagnostics.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub level: Level,
    pub target: String,
    pub message: String,
}

thread_local! {
    static BUFFER: RefCell<Option<Vec<Captured>>> = const { RefCell::new(None) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        BUFFER.with(|buffer| {
            if let Some(records) = buffer.borrow_mut().as_mut() {
                records.push(Captured {
                    level: record.level(),
                    target: record.target().to_string(),
                    message: record.args().to_string(),
                });
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

fn install() {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Run `f`, returning its result and every record it logged on this thread.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<Captured>) {
    install();
    BUFFER.with(|buffer| *buffer.borrow_mut() = Some(Vec::new()));
    let result = f();
    let records = BUFFER.with(|buffer| buffer.borrow_mut().take().unwrap_or_default());
    (result, records)
}

/// Records at `level` or more severe.
pub fn at_least(records: &[Captured], level: Level) -> Vec<&Captured> {
    records.iter().filter(|r| r.level <= level).collect()
}
