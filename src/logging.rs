use log::Level;
use log::Log;
use log::Metadata;
use log::Record;
use std::fmt::Display;
use std::sync::Arc;

const TARGET: &str = "dataloader";

/// Explicit structured logger handed to every component.
///
/// Wraps any `log::Log` sink without installing it as the global
/// logger, so several loaders (and tests) can log to different places
/// in one process. Lines are rendered logfmt style:
/// `request_id=abc msg="copy command complete" table_name=foo`.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn Log>,
    context: Vec<(&'static str, String)>,
}

impl Logger {
    pub fn new(sink: Arc<dyn Log>) -> Self {
        Self {
            sink,
            context: Vec::new(),
        }
    }

    /// Discards every line.
    pub fn nop() -> Self {
        Self::new(Arc::new(Nop))
    }

    /// Timestamped stdout logger. DEBUG when `debug` is set, INFO otherwise.
    #[cfg(feature = "server")]
    pub fn stdout(debug: bool) -> Self {
        let level = match debug {
            true => log::LevelFilter::Debug,
            false => log::LevelFilter::Info,
        };
        let config = simplelog::ConfigBuilder::new()
            .set_location_level(log::LevelFilter::Off)
            .set_target_level(log::LevelFilter::Off)
            .set_thread_level(log::LevelFilter::Off)
            .set_time_format_rfc3339()
            .build();
        let sink: Box<dyn Log> = simplelog::WriteLogger::new(level, config, std::io::stdout());
        Self::new(Arc::from(sink))
    }

    /// Child logger that prefixes every line with `key=value`.
    pub fn with(&self, key: &'static str, value: impl Display) -> Self {
        let mut child = self.clone();
        child.context.push((key, value.to_string()));
        child
    }

    pub fn debug(&self, msg: &str, fields: &[(&str, &dyn Display)]) {
        self.emit(Level::Debug, msg, fields)
    }
    pub fn info(&self, msg: &str, fields: &[(&str, &dyn Display)]) {
        self.emit(Level::Info, msg, fields)
    }
    pub fn warn(&self, msg: &str, fields: &[(&str, &dyn Display)]) {
        self.emit(Level::Warn, msg, fields)
    }
    pub fn error(&self, msg: &str, fields: &[(&str, &dyn Display)]) {
        self.emit(Level::Error, msg, fields)
    }

    fn emit(&self, level: Level, msg: &str, fields: &[(&str, &dyn Display)]) {
        let ref metadata = Metadata::builder().level(level).target(TARGET).build();
        if !self.sink.enabled(metadata) {
            return;
        }
        let line = self.render(msg, fields);
        self.sink.log(
            &Record::builder()
                .metadata(metadata.clone())
                .args(format_args!("{}", line))
                .build(),
        );
    }

    fn render(&self, msg: &str, fields: &[(&str, &dyn Display)]) -> String {
        self.context
            .iter()
            .map(|(k, v)| pair(k, v))
            .chain(std::iter::once(pair("msg", &msg)))
            .chain(fields.iter().map(|(k, v)| pair(k, v)))
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Values containing whitespace, quotes or `=` are quoted.
fn pair(key: &str, value: &dyn Display) -> String {
    let value = value.to_string();
    match value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '"' || c == '=') {
        true => format!("{}={:?}", key, value),
        false => format!("{}={}", key, value),
    }
}

struct Nop;

impl Log for Nop {
    fn enabled(&self, _: &Metadata) -> bool {
        false
    }
    fn log(&self, _: &Record) {}
    fn flush(&self) {}
}
