use std::fmt;

/// Severity of a diagnostic event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(s)
    }
}

/// One entry on the diagnostic channel.
///
/// `kind` is a short stable tag (`"map.load"`, `"chat.ask"`) so callers and
/// tests can filter without matching on message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// 0-based emission order.
    pub seq: u64,
    pub level: Level,
    pub kind: &'static str,
    pub message: String,
}

/// Diagnostic channel for UI-side failures and state transitions.
///
/// Every event is forwarded to `tracing` as it is emitted and also kept in
/// memory, so handlers stay observable without a subscriber installed.
#[derive(Debug, Default)]
pub struct EventBus {
    next_seq: u64,
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, level: Level, kind: &'static str, message: impl Into<String>) {
        let message = message.into();
        match level {
            Level::Debug => tracing::debug!(kind, "{message}"),
            Level::Info => tracing::info!(kind, "{message}"),
            Level::Warn => tracing::warn!(kind, "{message}"),
            Level::Error => tracing::error!(kind, "{message}"),
        }
        self.events.push(Event {
            seq: self.next_seq,
            level,
            kind,
            message,
        });
        self.next_seq += 1;
    }

    pub fn debug(&mut self, kind: &'static str, message: impl Into<String>) {
        self.emit(Level::Debug, kind, message);
    }

    pub fn info(&mut self, kind: &'static str, message: impl Into<String>) {
        self.emit(Level::Info, kind, message);
    }

    pub fn warn(&mut self, kind: &'static str, message: impl Into<String>) {
        self.emit(Level::Warn, kind, message);
    }

    pub fn error(&mut self, kind: &'static str, message: impl Into<String>) {
        self.emit(Level::Error, kind, message);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events at `level` or above.
    pub fn at_least(&self, level: Level) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.level >= level)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.level == Level::Error)
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
