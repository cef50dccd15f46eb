//! Log events emitted by the reconciliation core.
//!
//! The core never prints. Every notice, warning and error is a typed event
//! handed to an injected [`Logger`]. The CLI renders events to the console;
//! tests capture them with [`MemoryLogger`].

use std::sync::Mutex;

use enum_dispatch::enum_dispatch;

// ============================================================
// Level and File Kind
// ============================================================

/// Level of a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Per-file progress, only shown in verbose mode.
    Debug,
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Debug => write!(f, "debug"),
            Level::Info => write!(f, "info"),
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// Which kind of file an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// General source file scanned for quoted keys.
    Source,
    /// UI-definition (markup) file scanned for `%`-prefixed keys.
    UiDefinition,
    /// Translation (`.properties`) file.
    Translation,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Source => write!(f, "source"),
            FileKind::UiDefinition => write!(f, "UI definition"),
            FileKind::Translation => write!(f, "translation"),
        }
    }
}

// ============================================================
// Event Types
// ============================================================

/// Effective settings of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsEvent {
    pub resource_dir: String,
    pub source_dir: String,
    pub namespace_id: String,
    pub sort: bool,
    pub remove_unused: bool,
}

/// Number of distinct keys referenced by the scanned sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysDetectedEvent {
    pub count: usize,
}

/// A translation file is about to be reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingEvent {
    pub file_path: String,
}

/// A translation file was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedEvent {
    pub file_path: String,
    pub kept: usize,
    pub unused: usize,
}

/// A translation file already had the reconciled content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnchangedEvent {
    pub file_path: String,
}

/// Dry-run: a translation file would be rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WouldUpdateEvent {
    pub file_path: String,
    pub kept: usize,
    pub unused: usize,
}

/// A file or directory entry could not be read and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableFileEvent {
    pub file_path: String,
    pub kind: FileKind,
    pub reason: String,
}

/// A translation value contains U+FFFD, left over from a broken encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCharacterEvent {
    pub file_path: String,
    pub key: String,
}

/// Writing a reconciled translation file failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailedEvent {
    pub file_path: String,
    pub reason: String,
}

/// A key referenced in source is absent from a translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyEvent {
    pub file_path: String,
    pub key: String,
}

/// A translation entry is not referenced anywhere (check mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyEvent {
    pub file_path: String,
    pub key: String,
}

// ============================================================
// Report Trait
// ============================================================

/// Common interface for rendering events.
#[enum_dispatch]
pub trait Report {
    fn level(&self) -> Level;

    /// Human-readable, single-line message.
    fn message(&self) -> String;

    /// File the event refers to, if any.
    fn file_path(&self) -> Option<&str> {
        None
    }
}

impl Report for SettingsEvent {
    fn level(&self) -> Level {
        Level::Info
    }

    fn message(&self) -> String {
        format!(
            "resource dir: {}, source dir: {}, namespace: {}, sort: {}, remove unused: {}",
            self.resource_dir, self.source_dir, self.namespace_id, self.sort, self.remove_unused
        )
    }
}

impl Report for KeysDetectedEvent {
    fn level(&self) -> Level {
        Level::Info
    }

    fn message(&self) -> String {
        format!(
            "Detected {} used {} in source code",
            self.count,
            if self.count == 1 { "key" } else { "keys" }
        )
    }
}

impl Report for ProcessingEvent {
    fn level(&self) -> Level {
        Level::Debug
    }

    fn message(&self) -> String {
        format!("Processing: {}", self.file_path)
    }

    fn file_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }
}

impl Report for UpdatedEvent {
    fn level(&self) -> Level {
        Level::Info
    }

    fn message(&self) -> String {
        format!(
            "Updated: {} ({} kept, {} unused)",
            self.file_path, self.kept, self.unused
        )
    }

    fn file_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }
}

impl Report for UnchangedEvent {
    fn level(&self) -> Level {
        Level::Debug
    }

    fn message(&self) -> String {
        format!("Unchanged: {}", self.file_path)
    }

    fn file_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }
}

impl Report for WouldUpdateEvent {
    fn level(&self) -> Level {
        Level::Info
    }

    fn message(&self) -> String {
        format!(
            "Would update: {} ({} kept, {} unused)",
            self.file_path, self.kept, self.unused
        )
    }

    fn file_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }
}

impl Report for UnreadableFileEvent {
    fn level(&self) -> Level {
        Level::Warning
    }

    fn message(&self) -> String {
        format!(
            "Could not read {} file {}: {}",
            self.kind, self.file_path, self.reason
        )
    }

    fn file_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }
}

impl Report for InvalidCharacterEvent {
    fn level(&self) -> Level {
        Level::Warning
    }

    fn message(&self) -> String {
        format!(
            "Found invalid character in property '{}' in file {}",
            self.key, self.file_path
        )
    }

    fn file_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }
}

impl Report for WriteFailedEvent {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        format!("Failed to write {}: {}", self.file_path, self.reason)
    }

    fn file_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }
}

impl Report for MissingKeyEvent {
    fn level(&self) -> Level {
        Level::Warning
    }

    fn message(&self) -> String {
        format!("Missing key in {}: {}", self.file_path, self.key)
    }

    fn file_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }
}

impl Report for UnusedKeyEvent {
    fn level(&self) -> Level {
        Level::Warning
    }

    fn message(&self) -> String {
        format!("Unused key in {}: {}", self.file_path, self.key)
    }

    fn file_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }
}

// ============================================================
// Event Enum
// ============================================================

/// A log event emitted during a run.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Settings(SettingsEvent),
    KeysDetected(KeysDetectedEvent),
    Processing(ProcessingEvent),
    Updated(UpdatedEvent),
    Unchanged(UnchangedEvent),
    WouldUpdate(WouldUpdateEvent),
    UnreadableFile(UnreadableFileEvent),
    InvalidCharacter(InvalidCharacterEvent),
    WriteFailed(WriteFailedEvent),
    MissingKey(MissingKeyEvent),
    UnusedKey(UnusedKeyEvent),
}

// ============================================================
// Logger
// ============================================================

/// Output sink the core reports into.
///
/// `Sync` so a logger can be shared with the rayon workers that scan files.
pub trait Logger: Sync {
    fn log(&self, event: Event);

    /// Log a batch of events in order.
    fn log_all(&self, events: Vec<Event>) {
        for event in events {
            self.log(event);
        }
    }
}

/// Logger that records every event, for tests and library callers.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<Event>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events logged so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Events at `level` or above.
    pub fn at_least(&self, level: Level) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.level() >= level)
            .collect()
    }

    /// Messages of all events, in order.
    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(|e| e.message()).collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
