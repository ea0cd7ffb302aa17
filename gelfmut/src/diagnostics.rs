/*!
Self-diagnostics, written as CLEF to stderr.
*/

use chrono::{DateTime, Utc};
use std::{
    fmt::Display,
    sync::atomic::{AtomicUsize, Ordering},
};

/**
Declare a set of counters for the current module.
*/
macro_rules! metrics {
    ($($metric:ident),+) => {
        #[allow(non_upper_case_globals)]
        pub(crate) mod metrics {
            use std::sync::atomic::{AtomicUsize, Ordering};

            $(
                pub(crate) static $metric: AtomicUsize = AtomicUsize::new(0);
            )+

            pub(crate) fn snapshot() -> Vec<(&'static str, usize)> {
                vec![
                    $(
                        (stringify!($metric), $metric.load(Ordering::Relaxed)),
                    )+
                ]
            }
        }
    };
}

/**
Increment a counter declared with `metrics!`.
*/
macro_rules! increment {
    ($module:ident . $metric:ident) => {
        $crate::$module::metrics::$metric.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
}

impl Level {
    fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub min_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_level: Level::Info,
        }
    }
}

static MIN_LEVEL: AtomicUsize = AtomicUsize::new(Level::Info as usize);

/**
Initialize diagnostics.
*/
pub fn init(config: Config) {
    MIN_LEVEL.store(config.min_level as usize, Ordering::Relaxed);

    emit_debug("Diagnostics initialized");
}

/**
Stop diagnostics, flushing a final snapshot of counters.
*/
pub fn stop() {
    emit_metrics();
    emit_debug("Diagnostics stopped");
}

/**
Emit the current value of every counter as a debug event.
*/
pub fn emit_metrics() {
    let modules = [
        ("message", crate::message::metrics::snapshot()),
        ("mutate", crate::mutate::metrics::snapshot()),
        ("stack", crate::stack::metrics::snapshot()),
    ];

    for (module, metrics) in &modules {
        for (name, value) in metrics {
            emit_event(
                Level::Debug,
                None,
                "Collected metric {module}.{name} {value}",
                Some(MetricEvent {
                    module: *module,
                    name: *name,
                    value: *value,
                }),
            );
        }
    }
}

#[derive(Serialize)]
struct DiagnosticEvent<'a> {
    #[serde(rename = "@t")]
    timestamp: DateTime<Utc>,

    #[serde(rename = "@l")]
    level: &'static str,

    #[serde(rename = "@mt")]
    message_template: &'static str,

    #[serde(rename = "@x")]
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,

    #[serde(flatten)]
    metric: Option<MetricEvent<'a>>,
}

#[derive(Serialize)]
struct MetricEvent<'a> {
    module: &'a str,
    name: &'a str,
    value: usize,
}

fn enabled(level: Level) -> bool {
    level as usize >= MIN_LEVEL.load(Ordering::Relaxed)
}

fn emit_event(
    level: Level,
    error: Option<&str>,
    message_template: &'static str,
    metric: Option<MetricEvent>,
) {
    if !enabled(level) {
        return;
    }

    let evt = DiagnosticEvent {
        timestamp: Utc::now(),
        level: level.name(),
        message_template,
        error,
        metric,
    };

    if let Ok(json) = serde_json::to_string(&evt) {
        eprintln!("{}", json);
    }
}

pub fn emit_debug(message_template: &'static str) {
    emit_event(Level::Debug, None, message_template, None);
}

pub(crate) fn emit_debug_err(error: &impl Display, message_template: &'static str) {
    let err_str = format!("{}", error);

    emit_event(Level::Debug, Some(&err_str), message_template, None);
}
