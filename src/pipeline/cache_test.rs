use super::*;

// =============================================================================
// EVICTION
// =============================================================================

#[test]
fn stores_up_to_capacity() {
    let mut cache = ConversationCache::new();
    cache.store("q1", "r1");
    cache.store("q2", "r2");
    cache.store("q3", "r3");
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.queries(), vec!["q1", "q2", "q3"]);
    assert_eq!(cache.responses(), vec!["r1", "r2", "r3"]);
}

#[test]
fn evicts_oldest_beyond_capacity() {
    let mut cache = ConversationCache::new();
    cache.store("q1", "r1");
    cache.store("q2", "r2");
    cache.store("q3", "r3");
    cache.store("q4", "r4");
    assert_eq!(cache.queries(), vec!["q2", "q3", "q4"]);
}

#[test]
fn retains_n_most_recent_over_long_sequence() {
    let mut cache = ConversationCache::with_capacity(2);
    for i in 0..10 {
        cache.store(format!("q{i}"), format!("r{i}"));
        assert!(cache.len() <= 2);
    }
    assert_eq!(cache.queries(), vec!["q8", "q9"]);
}

// =============================================================================
// OVERWRITE SEMANTICS
// =============================================================================

#[test]
fn restore_overwrites_in_place() {
    let mut cache = ConversationCache::new();
    cache.store("q1", "r1");
    cache.store("q2", "r2");
    cache.store("q1", "r1-updated");

    // Position preserved, value replaced, no extra entry.
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.queries(), vec!["q1", "q2"]);
    assert_eq!(cache.responses(), vec!["r1-updated", "r2"]);
}

#[test]
fn restore_at_capacity_does_not_evict() {
    let mut cache = ConversationCache::new();
    cache.store("q1", "r1");
    cache.store("q2", "r2");
    cache.store("q3", "r3");
    cache.store("q2", "r2-updated");

    assert_eq!(cache.queries(), vec!["q1", "q2", "q3"]);
    assert_eq!(cache.responses(), vec!["r1", "r2-updated", "r3"]);
}

// =============================================================================
// CLEAR
// =============================================================================

#[test]
fn clear_empties_the_cache() {
    let mut cache = ConversationCache::new();
    cache.store("q1", "r1");
    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.queries().is_empty());
    assert!(cache.responses().is_empty());
}

#[test]
fn clear_is_idempotent() {
    let mut cache = ConversationCache::new();
    cache.clear();
    cache.clear();
    assert!(cache.is_empty());

    cache.store("q1", "r1");
    assert_eq!(cache.len(), 1);
}

// =============================================================================
// VIEWS
// =============================================================================

#[test]
fn entries_returns_ordered_pairs() {
    let mut cache = ConversationCache::new();
    cache.store("q1", "r1");
    cache.store("q2", "r2");
    assert_eq!(
        cache.entries(),
        &[("q1".to_string(), "r1".to_string()), ("q2".to_string(), "r2".to_string())]
    );
}

#[test]
fn zero_capacity_stores_nothing() {
    let mut cache = ConversationCache::with_capacity(0);
    cache.store("q1", "r1");
    assert!(cache.is_empty());
}
