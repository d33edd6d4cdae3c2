use std::collections::HashMap;

use super::itinerary::ItineraryItem;

/// Local per-item vote counter. Never sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    counts: HashMap<String, u32>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vote(&mut self, item_name: &str) -> u32 {
        let count = self.counts.entry(item_name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, item_name: &str) -> u32 {
        self.counts.get(item_name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }

    /// Picks the item with the strictly greatest count, scanning in
    /// itinerary order. Ties go to the earlier item; with no votes at all
    /// the first item wins.
    pub fn finalize<'a>(&self, items: &'a [ItineraryItem]) -> Option<&'a ItineraryItem> {
        let mut best: Option<&ItineraryItem> = None;
        let mut best_count: i64 = -1;
        for item in items {
            let count = i64::from(self.count(&item.name));
            if count > best_count {
                best_count = count;
                best = Some(item);
            }
        }
        best
    }
}
