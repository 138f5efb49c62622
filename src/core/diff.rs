//! Minimal add/remove reconciliation between an existing and a proposed slot
//! collection. Structural equality on the key decides identity; output order
//! follows the input vectors.

use crate::domain::model::CategoryRef;

#[derive(Debug, Clone, PartialEq)]
pub struct Diff<K> {
    pub added: Vec<K>,
    pub removed: Vec<K>,
}

impl<K> Default for Diff<K> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<K> Diff<K> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// `added` keeps the order of `proposed`, `removed` the order of `existing`.
/// An absent `proposed` means no change was requested, not "remove all".
pub fn diff<K: PartialEq + Clone>(existing: &[K], proposed: Option<&[K]>) -> Diff<K> {
    let Some(proposed) = proposed else {
        return Diff::default();
    };

    let added = proposed
        .iter()
        .filter(|key| !existing.contains(key))
        .cloned()
        .collect();
    let removed = existing
        .iter()
        .filter(|key| !proposed.contains(key))
        .cloned()
        .collect();

    Diff { added, removed }
}

/// Category reconciliation works on names: the proposed list names categories,
/// the existing list holds resolved references. Added names still need to be
/// resolved against storage before they can be associated.
pub fn diff_categories(
    existing: &[CategoryRef],
    proposed: Option<&[String]>,
) -> (Vec<String>, Vec<CategoryRef>) {
    let Some(proposed) = proposed else {
        return (Vec::new(), Vec::new());
    };

    let added = proposed
        .iter()
        .filter(|name| !existing.iter().any(|c| c.name == **name))
        .cloned()
        .collect();
    let removed = existing
        .iter()
        .filter(|c| !proposed.contains(&c.name))
        .cloned()
        .collect();

    (added, removed)
}
