//! Conversation cache — bounded, insertion-ordered query/response store.
//!
//! DESIGN
//! ======
//! Holds the last N distinct (query, response) pairs for one chat session,
//! oldest first. Storing past capacity evicts the single oldest entry.
//! Re-storing an existing query overwrites its response in place: the
//! entry keeps its insertion position and capacity counts distinct keys
//! only. Single-owner; the session shell guarantees one logical thread of
//! control, so there is no interior locking.

pub const DEFAULT_CACHE_CAPACITY: usize = 3;

#[derive(Debug, Clone)]
pub struct ConversationCache {
    capacity: usize,
    entries: Vec<(String, String)>,
}

impl ConversationCache {
    /// Cache with the default capacity of 3 entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, entries: Vec::with_capacity(capacity) }
    }

    /// Insert or overwrite the entry for `query`.
    ///
    /// An existing query keeps its position and only its response changes.
    /// A new query evicts the oldest entry first when the cache is full.
    pub fn store(&mut self, query: impl Into<String>, response: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        let query = query.into();
        let response = response.into();

        if let Some(entry) = self.entries.iter_mut().find(|(q, _)| *q == query) {
            entry.1 = response;
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push((query, response));
    }

    /// Remove all entries. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Full ordered mapping, oldest first. Does not mutate.
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Ordered queries, oldest first.
    #[must_use]
    pub fn queries(&self) -> Vec<&str> {
        self.entries.iter().map(|(q, _)| q.as_str()).collect()
    }

    /// Ordered responses, oldest first.
    #[must_use]
    pub fn responses(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, r)| r.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConversationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
