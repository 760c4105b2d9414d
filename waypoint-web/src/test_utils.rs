//! Helpers for tests that run the app in process.

use httpmock::MockServer;
use serde::Deserialize;
use serde_json::Value;
use std::{
    collections::HashMap,
    io::Write,
    sync::{Arc, Mutex},
};
use tracing_subscriber::fmt::MakeWriter;
use waypoint_settings::Settings;

/// Test settings with the upstream pointed at `upstream`.
pub fn settings_for_upstream(upstream: &MockServer) -> Settings {
    let mut settings = Settings::load_for_tests();
    settings.maps.base_url = upstream
        .url("/")
        .parse()
        .expect("mock server URL should parse");
    settings
}

/// Collects JSON log events written by Tracing so tests can make assertions
/// about them.
#[derive(Clone, Default)]
pub struct LogWatcher {
    /// Newline separated JSON objects, as written by the subscriber.
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogWatcher {
    /// A subscriber that writes events at DEBUG and above into this watcher.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(self.clone())
            .finish()
    }

    /// Everything written so far.
    pub fn raw(&self) -> String {
        let buf = self.buf.lock().expect("mutex was poisoned");
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// The complete events written so far.
    pub fn events(&self) -> Vec<TracingJsonEvent> {
        self.raw()
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|_| panic!("Bad JSON in log line: {}", line))
            })
            .collect()
    }

    /// Test if any event received matches `predicate`.
    #[must_use = "LogWatcher::has does not make assertions alone, you probably want to wrap it in assert!()"]
    pub fn has<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&TracingJsonEvent) -> bool,
    {
        self.events().iter().any(predicate)
    }
}

impl<'a> MakeWriter<'a> for LogWatcher {
    type Writer = LogWatcherWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWatcherWriter {
            buf: self.buf.clone(),
        }
    }
}

/// The half of a [`LogWatcher`] handed to Tracing.
pub struct LogWatcherWriter {
    /// The parent watcher's buffer.
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Write for LogWatcherWriter {
    fn write(&mut self, new_bytes: &[u8]) -> std::io::Result<usize> {
        let mut buf = self
            .buf
            .lock()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        buf.extend_from_slice(new_bytes);
        Ok(new_bytes.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// The parts of [`tracing_subscriber::fmt::format::Json`]'s output that tests
/// look at.
#[derive(Debug, Deserialize)]
pub struct TracingJsonEvent {
    /// The key-value fields logged on the event, usually including `message`.
    pub fields: HashMap<String, Value>,
    /// The level the event was emitted at.
    pub level: String,
}

impl TracingJsonEvent {
    /// Test if the field named `field_name` is a string that contains `pat`.
    pub fn field_contains(&self, field_name: &str, pat: &str) -> bool {
        self.fields
            .get(field_name)
            .and_then(Value::as_str)
            .map_or(false, |value| value.contains(pat))
    }
}
