//! Console logger
//!
//! Forwards `log` records to the browser console. Widget messages already
//! carry their `[kind]` tag, so only warnings and errors get a level prefix.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Error | Level::Warn => log(&format!("{} {}", record.level(), record.args())),
            _ => log(&record.args().to_string()),
        }
    }

    fn flush(&self) {}
}

/// Level used until the page asks for another one
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Install the console logger once per page
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(DEFAULT_LEVEL);
    }
}

pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}

/// Parse a level name, `None` for anything unrecognized
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}
