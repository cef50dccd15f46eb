//! Partitioning translation entries into kept and unused.
//!
//! This is the policy point of a run: classification and ordering are pure
//! functions of the used-key set, the file content and the options, so
//! reconciling the same input twice yields byte-identical output.

use crate::core::{
    UsedKeys,
    properties::{Entry, Translations, render},
};

/// How kept and unused entries are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Order kept entries by key.
    pub sort: bool,
    /// Drop unused entries instead of moving them to the unused block.
    pub remove_unused: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            sort: true,
            remove_unused: false,
        }
    }
}

/// Entries of one file split by membership in the used-key set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub kept: Vec<Entry>,
    pub unused: Vec<Entry>,
}

/// Split entries into kept (referenced) and unused, both in declaration order.
pub fn partition(translations: &Translations, used_keys: &UsedKeys) -> Partition {
    let (kept, unused) = translations
        .entries()
        .iter()
        .cloned()
        .partition(|entry| used_keys.contains(&entry.key));
    Partition { kept, unused }
}

/// Reconciled content of one translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// Text to write back.
    pub content: String,
    pub partition: Partition,
    /// True if the unused entries were left out of `content`.
    pub removed_unused: bool,
}

impl Reconciled {
    pub fn kept_count(&self) -> usize {
        self.partition.kept.len()
    }

    pub fn unused_count(&self) -> usize {
        self.partition.unused.len()
    }
}

/// Classify, order and render one file.
///
/// Sorting applies to kept entries only; the unused block keeps declaration
/// order.
pub fn reconcile(
    translations: &Translations,
    used_keys: &UsedKeys,
    options: ReconcileOptions,
) -> Reconciled {
    let mut partition = partition(translations, used_keys);

    if options.sort {
        partition.kept.sort_by(|a, b| a.key.cmp(&b.key));
    }

    let unused = (!options.remove_unused).then_some(partition.unused.as_slice());
    let content = render(&partition.kept, unused);

    Reconciled {
        content,
        partition,
        removed_unused: options.remove_unused,
    }
}
