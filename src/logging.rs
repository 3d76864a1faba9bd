use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};
    use wasm_bindgen::JsValue;
    use web_sys::console;

    /// Forwards `log` records to the browser console.
    pub struct ConsoleLogger;

    pub static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let msg = JsValue::from_str(&format!(
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            ));
            match record.level() {
                Level::Error => console::error_1(&msg),
                Level::Warn => console::warn_1(&msg),
                Level::Info => console::info_1(&msg),
                Level::Debug | Level::Trace => console::debug_1(&msg),
            }
        }

        fn flush(&self) {}
    }
}

pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Installs the console logger on wasm32. Native hosts bring their own
/// `log` backend, so there only the level is applied. Later calls only
/// adjust the level.
pub fn init(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    let _ = log::set_logger(&console::LOGGER);
    log::set_max_level(level);
}
