use std::time::{Duration, Instant};

/// Time-to-live freshness tracker for the loaded sheet.
///
/// The dataset itself lives in `AppState`; the cache only remembers when it
/// was loaded. Callers pass `now` explicitly so expiry can be tested without
/// sleeping.
#[derive(Debug)]
pub struct SourceCache {
    ttl: Duration,
    loaded_at: Option<Instant>,
}

impl SourceCache {
    pub fn new(ttl: Duration) -> Self {
        SourceCache {
            ttl,
            loaded_at: None,
        }
    }

    /// Whether the last load is still fresh at `now`.
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.remaining(now).is_some()
    }

    /// Whether a new fetch is due at `now`.
    pub fn is_stale(&self, now: Instant) -> bool {
        !self.is_fresh(now)
    }

    /// Record a successful load at `now`.
    pub fn mark_loaded(&mut self, now: Instant) {
        self.loaded_at = Some(now);
    }

    /// Forget the last load so the next check triggers a fetch.
    pub fn force_invalidate(&mut self) {
        log::debug!("Source cache invalidated");
        self.loaded_at = None;
    }

    /// Time left before the entry expires, `None` when empty or expired.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let loaded_at = self.loaded_at?;
        self.ttl
            .checked_sub(now.saturating_duration_since(loaded_at))
            .filter(|d| !d.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cache_is_stale() {
        let cache = SourceCache::new(Duration::from_secs(30));
        assert!(cache.is_stale(Instant::now()));
        assert!(cache.remaining(Instant::now()).is_none());
    }

    #[test]
    fn entry_expires_after_ttl() {
        let t0 = Instant::now();
        let mut cache = SourceCache::new(Duration::from_secs(30));
        cache.mark_loaded(t0);
        assert!(cache.is_fresh(t0 + Duration::from_secs(29)));
        assert_eq!(
            cache.remaining(t0 + Duration::from_secs(10)),
            Some(Duration::from_secs(20))
        );
        assert!(cache.is_stale(t0 + Duration::from_secs(30)));
    }

    #[test]
    fn force_invalidate_clears_fresh_entry() {
        let t0 = Instant::now();
        let mut cache = SourceCache::new(Duration::from_secs(30));
        cache.mark_loaded(t0);
        cache.force_invalidate();
        assert!(cache.is_stale(t0));
    }
}
