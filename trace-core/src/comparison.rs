//! Side-by-side comparison of saved traces.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use crate::format::parse_timestamp;
use crate::history::{HistoryEntry, HistoryId};

/// Ids picked for comparison. Entries are always looked up in the history
/// cache, never copied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComparisonSelection {
    ids: BTreeSet<HistoryId>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the id is selected afterwards.
    pub fn toggle(&mut self, id: HistoryId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn select(&mut self, id: HistoryId) {
        self.ids.insert(id);
    }

    pub fn deselect(&mut self, id: &HistoryId) {
        self.ids.remove(id);
    }

    pub fn replace(&mut self, ids: impl IntoIterator<Item = HistoryId>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &HistoryId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &HistoryId> {
        self.ids.iter()
    }

    /// Selected entries in cache order. Ids no longer cached are skipped.
    pub fn resolve<'a>(&self, cache: &'a [HistoryEntry]) -> Vec<&'a HistoryEntry> {
        cache
            .iter()
            .filter(|entry| self.ids.contains(&entry.id))
            .collect()
    }
}

/// Entries for the selection list, newest first. Unparseable timestamps
/// sort last, keeping cache order among themselves.
pub fn selection_options(cache: &[HistoryEntry]) -> Vec<&HistoryEntry> {
    let mut options: Vec<&HistoryEntry> = cache.iter().collect();
    options.sort_by_key(|entry| {
        let parsed = parse_timestamp(&entry.timestamp);
        (parsed.is_none(), Reverse(parsed))
    });
    options
}

/// IPs that show up on the main route of two or more of the given entries.
pub fn shared_hop_ips(entries: &[&HistoryEntry]) -> BTreeSet<String> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        let Some(hops) = entry.main_route().value() else {
            continue;
        };
        let distinct: BTreeSet<&str> = hops
            .iter()
            .map(|hop| hop.ip.as_str())
            .filter(|ip| !ip.is_empty())
            .collect();
        for ip in distinct {
            *seen.entry(ip).or_default() += 1;
        }
    }
    seen.into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(ip, _)| ip.to_string())
        .collect()
}
