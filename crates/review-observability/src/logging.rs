//! Structured logging with request context.

use std::collections::BTreeMap;
use std::time::Instant;

use review_core::RequestId;
use serde::Serialize;

/// Severity of a board log entry; filtering is left to the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One board log line: the message plus its request context and fields.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub request_id: String,
    /// Stage that emitted it (fetcher, pipeline, plugin, cli).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    pub elapsed_us: u64,
}

impl LogEntry {
    /// Single-line JSON, for `--json` runs.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// `[component] message (Nus) | k=v k=v`
    pub fn to_human(&self) -> String {
        let head = match &self.component {
            Some(component) => format!("[{}] {} ({}us)", component, self.message, self.elapsed_us),
            None => format!("{} ({}us)", self.message, self.elapsed_us),
        };
        if self.fields.is_empty() {
            return head;
        }

        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(text) => format!("{}={}", k, text),
                other => format!("{}={}", k, other),
            })
            .collect();
        format!("{} | {}", head, fields.join(" "))
    }
}

/// How an entry is rendered into the `tracing` event message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Human,
}

/// Request-scoped logger for one board invocation.
///
/// Every entry carries the invocation's request ID and is handed to
/// `tracing` at the matching level, so the installed subscriber decides
/// where it ends up and which levels survive.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    request_id: RequestId,
    component: Option<String>,
    start_time: Instant,
    format: LogFormat,
}

impl StructuredLogger {
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            component: None,
            start_time: Instant::now(),
            format: LogFormat::Human,
        }
    }

    /// Set the component name.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Derive a logger for a sub-component sharing request ID and clock.
    pub fn child(&self, component: impl Into<String>) -> Self {
        Self {
            component: Some(component.into()),
            ..self.clone()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn debug(&self, message: &str) {
        self.emit(self.entry(LogLevel::Debug, message, BTreeMap::new()));
    }

    pub fn info(&self, message: &str) {
        self.emit(self.entry(LogLevel::Info, message, BTreeMap::new()));
    }

    pub fn error(&self, message: &str) {
        self.emit(self.entry(LogLevel::Error, message, BTreeMap::new()));
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    fn entry(
        &self,
        level: LogLevel,
        message: &str,
        fields: BTreeMap<String, serde_json::Value>,
    ) -> LogEntry {
        LogEntry {
            level,
            message: message.to_string(),
            request_id: self.request_id.to_string(),
            component: self.component.clone(),
            fields,
            elapsed_us: self.start_time.elapsed().as_micros() as u64,
        }
    }

    fn emit(&self, entry: LogEntry) {
        let line = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };
        let request_id = entry.request_id.as_str();

        match entry.level {
            LogLevel::Debug => tracing::debug!(request_id, "{}", line),
            LogLevel::Info => tracing::info!(request_id, "{}", line),
            LogLevel::Warn => tracing::warn!(request_id, "{}", line),
            LogLevel::Error => tracing::error!(request_id, "{}", line),
        }
    }

    fn builder(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.builder(LogLevel::Debug, message)
    }

    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.builder(LogLevel::Info, message)
    }

    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.builder(LogLevel::Warn, message)
    }

    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.builder(LogLevel::Error, message)
    }
}

/// Fields collected for one entry before it is emitted.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl LogBuilder<'_> {
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Whole milliseconds.
    pub fn duration_ms(mut self, key: &str, duration: std::time::Duration) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(duration.as_millis() as u64));
        self
    }

    /// The entry as it would be emitted.
    pub fn build(&self) -> LogEntry {
        self.logger
            .entry(self.level, &self.message, self.fields.clone())
    }

    pub fn emit(self) {
        let entry = self.logger.entry(self.level, &self.message, self.fields);
        self.logger.emit(entry);
    }
}
