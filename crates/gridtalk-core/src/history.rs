use gridtalk_model::PageId;

/// Preview sessions can run for a long time; the back-history keeps only
/// the most recent entries.
pub const NAV_HISTORY_CAP: usize = 50;

/// Stack of visited pages, most-recent-last. The top entry is the page
/// currently shown in preview.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<PageId>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over from a single page (entering preview mode).
    pub fn reset(&mut self, start: PageId) {
        self.entries.clear();
        self.entries.push(start);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Record a navigation. Oldest entries are dropped beyond the cap.
    pub fn push(&mut self, page: PageId) {
        self.entries.push(page);
        if self.entries.len() > NAV_HISTORY_CAP {
            let excess = self.entries.len() - NAV_HISTORY_CAP;
            self.entries.drain(..excess);
        }
    }

    /// Pop the current page and return the page to go back to. `None` when
    /// there is nowhere to go (fewer than two entries).
    pub fn pop(&mut self) -> Option<PageId> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        self.entries.last().cloned()
    }

    pub fn current(&self) -> Option<&PageId> {
        self.entries.last()
    }

    /// All recorded pages, oldest first.
    pub fn pages(&self) -> &[PageId] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize) -> PageId {
        PageId::new(format!("page-{n}")).unwrap()
    }

    #[test]
    fn pop_needs_two_entries() {
        let mut history = NavigationHistory::new();
        assert_eq!(history.pop(), None);
        history.reset(page(1));
        assert_eq!(history.pop(), None);
        history.push(page(2));
        assert_eq!(history.pop(), Some(page(1)));
    }

    #[test]
    fn oldest_entries_are_dropped_at_the_cap() {
        let mut history = NavigationHistory::new();
        history.reset(page(0));
        for n in 1..=NAV_HISTORY_CAP + 10 {
            history.push(page(n));
        }
        assert_eq!(history.len(), NAV_HISTORY_CAP);
        assert_eq!(history.current(), Some(&page(NAV_HISTORY_CAP + 10)));
    }
}
