//! Per-selection response cache.
//!
//! Each key moves `uncached -> in flight -> cached`. A failed request puts the
//! key back to `uncached` so the next submit retries. A submit for a key that is
//! already in flight is absorbed rather than issuing a second request.
//!
//! [`SelectionState`] layers the currently selected key and its failure message
//! on top: only the selected key's data or failure is ever visible.

use std::collections::HashMap;
use std::hash::Hash;

/// What a caller should do after asking for a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<V> {
    /// Render this value; no request needed.
    Hit(V),
    /// Issue the request, then call `complete` or `abandon`.
    Miss,
    /// A request for this key is already running; wait for it.
    InFlight,
}

#[derive(Debug, Clone)]
enum Entry<V> {
    Pending,
    Ready(V),
}

#[derive(Debug, Clone)]
pub struct SelectionCache<K, V> {
    entries: HashMap<K, Entry<V>>,
}

impl<K, V> Default for SelectionCache<K, V> {
    fn default() -> Self {
        SelectionCache {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> SelectionCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, marking it in flight when it is not yet known.
    pub fn begin(&mut self, key: &K) -> Lookup<V> {
        match self.entries.get(key) {
            Some(Entry::Ready(v)) => Lookup::Hit(v.clone()),
            Some(Entry::Pending) => Lookup::InFlight,
            None => {
                self.entries.insert(key.clone(), Entry::Pending);
                Lookup::Miss
            }
        }
    }

    /// Store a successful response.
    pub fn complete(&mut self, key: K, value: V) {
        self.entries.insert(key, Entry::Ready(value));
    }

    /// Forget a failed request so it can be retried.
    pub fn abandon(&mut self, key: &K) {
        if matches!(self.entries.get(key), Some(Entry::Pending)) {
            self.entries.remove(key);
        }
    }

    /// The cached value for `key`, if one has arrived.
    pub fn get(&self, key: &K) -> Option<&V> {
        match self.entries.get(key) {
            Some(Entry::Ready(v)) => Some(v),
            _ => None,
        }
    }

    pub fn is_in_flight(&self, key: &K) -> bool {
        matches!(self.entries.get(key), Some(Entry::Pending))
    }

    /// Number of cached (not in-flight) entries.
    pub fn len(&self) -> usize {
        self.entries
            .values()
            .filter(|e| matches!(e, Entry::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A select-driven form: the chosen key, the cache behind it, and the failure
/// (if any) to show for the chosen key.
#[derive(Debug, Clone)]
pub struct SelectionState<K, V> {
    selected: Option<K>,
    failure: Option<String>,
    cache: SelectionCache<K, V>,
}

impl<K, V> Default for SelectionState<K, V> {
    fn default() -> Self {
        SelectionState {
            selected: None,
            failure: None,
            cache: SelectionCache::default(),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> SelectionState<K, V> {
    pub fn selected(&self) -> Option<&K> {
        self.selected.as_ref()
    }

    /// Message for the danger alert, set only by a failure of the selected key.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Cached data for the selected key.
    pub fn current(&self) -> Option<&V> {
        self.cache.get(self.selected.as_ref()?)
    }

    /// Select `key` and clear any previous failure. `Lookup::Miss` means the
    /// caller must issue the request and report back through [`settle`](Self::settle).
    pub fn submit(&mut self, key: K) -> Lookup<V> {
        self.failure = None;
        let lookup = self.cache.begin(&key);
        self.selected = Some(key);
        lookup
    }

    /// Record the outcome of the request for `key`. Data is always cached; a
    /// failure is shown only while `key` is still selected.
    pub fn settle(&mut self, key: K, outcome: Result<V, String>) {
        match outcome {
            Ok(value) => self.cache.complete(key, value),
            Err(message) => {
                self.cache.abandon(&key);
                if self.selected.as_ref() == Some(&key) {
                    self.failure = Some(message);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Cache = SelectionCache<String, Vec<f64>>;

    fn key(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_first_lookup_is_a_miss() {
        let mut cache = Cache::new();
        assert_eq!(cache.begin(&key("B02")), Lookup::Miss);
        assert!(cache.is_in_flight(&key("B02")));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_complete_then_hit() {
        let mut cache = Cache::new();
        cache.begin(&key("B02"));
        cache.complete(key("B02"), vec![1.0, 2.0]);
        assert_eq!(cache.begin(&key("B02")), Lookup::Hit(vec![1.0, 2.0]));
        assert_eq!(cache.get(&key("B02")), Some(&vec![1.0, 2.0]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_repeat_submit_requests_once() {
        let mut cache = Cache::new();
        let mut requests = 0;
        for _ in 0..3 {
            if cache.begin(&key("B02")) == Lookup::Miss {
                requests += 1;
            }
        }
        cache.complete(key("B02"), vec![5.0]);
        for _ in 0..3 {
            if cache.begin(&key("B02")) == Lookup::Miss {
                requests += 1;
            }
        }
        assert_eq!(requests, 1);
    }

    #[test]
    fn test_failure_allows_retry() {
        let mut cache = Cache::new();
        assert_eq!(cache.begin(&key("Mission")), Lookup::Miss);
        cache.abandon(&key("Mission"));
        assert!(!cache.is_in_flight(&key("Mission")));
        assert_eq!(cache.begin(&key("Mission")), Lookup::Miss);
    }

    #[test]
    fn test_abandon_keeps_cached_value() {
        let mut cache = Cache::new();
        cache.begin(&key("B01"));
        cache.complete(key("B01"), vec![1.0]);
        cache.abandon(&key("B01"));
        assert_eq!(cache.get(&key("B01")), Some(&vec![1.0]));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut cache = Cache::new();
        cache.begin(&key("B01"));
        cache.complete(key("B01"), vec![1.0]);
        assert_eq!(cache.begin(&key("B02")), Lookup::Miss);
        assert!(cache.get(&key("B02")).is_none());
        assert_eq!(cache.get(&key("B01")), Some(&vec![1.0]));
    }

    // --- Selection state ---

    type State = SelectionState<String, Vec<f64>>;

    #[test]
    fn test_selected_failure_is_shown() {
        let mut state = State::default();
        assert_eq!(state.submit(key("B99")), Lookup::Miss);
        state.settle(key("B99"), Err("No data for battalion. Please try again.".to_string()));
        assert_eq!(state.failure(), Some("No data for battalion. Please try again."));
        assert!(state.current().is_none());
    }

    #[test]
    fn test_superseded_failure_is_hidden() {
        let mut state = State::default();
        state.submit(key("B01"));
        state.submit(key("B02"));
        state.settle(key("B01"), Err("timeout".to_string()));
        assert_eq!(state.failure(), None);
        assert_eq!(state.selected(), Some(&key("B02")));
        // The failed key can be retried.
        assert_eq!(state.submit(key("B01")), Lookup::Miss);
    }

    #[test]
    fn test_late_response_is_cached_but_not_shown() {
        let mut state = State::default();
        state.submit(key("B01"));
        state.submit(key("B02"));
        state.settle(key("B01"), Ok(vec![1.0]));
        assert!(state.current().is_none());
        state.settle(key("B02"), Ok(vec![2.0]));
        assert_eq!(state.current(), Some(&vec![2.0]));
        assert_eq!(state.submit(key("B01")), Lookup::Hit(vec![1.0]));
        assert_eq!(state.current(), Some(&vec![1.0]));
    }

    #[test]
    fn test_resubmit_clears_failure() {
        let mut state = State::default();
        state.submit(key("Mission"));
        state.settle(key("Mission"), Err("Server error. Please try again.".to_string()));
        assert!(state.failure().is_some());
        assert_eq!(state.submit(key("Mission")), Lookup::Miss);
        assert_eq!(state.failure(), None);
        state.settle(key("Mission"), Ok(vec![3.0]));
        assert_eq!(state.failure(), None);
        assert_eq!(state.current(), Some(&vec![3.0]));
    }
}
