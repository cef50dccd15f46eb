//! Core reconciliation engine.
//!
//! - `pattern`: key reference patterns built from the namespace identifier
//! - `file_scanner`: directory walking and file classification
//! - `scanner`: used-key discovery over source and UI-definition files
//! - `properties`: `.properties` reader, writer and atomic replace
//! - `reconcile`: kept/unused partition, ordering and rendering
//! - `consistency`: missing-key report per translation file
//! - `processor`: the full run tying the pieces together

use std::collections::HashSet;

pub mod consistency;
pub mod file_scanner;
pub mod pattern;
pub mod processor;
pub mod properties;
pub mod reconcile;
pub mod scanner;

pub use file_scanner::FileRules;
pub use pattern::KeyPatterns;
pub use processor::{CheckSummary, RunSummary, Settings, TranslationProcessor, WriteMode};
pub use properties::{Entry, Translations};
pub use reconcile::{Partition, ReconcileOptions, Reconciled};

/// Fully-qualified keys (`namespace:key.path`) referenced by the sources.
pub type UsedKeys = HashSet<String>;
