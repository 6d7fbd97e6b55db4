//! Authorization result cache
//!
//! Keeps authorize-start results per token until their cached-result end of
//! life. Results without an end of life are never stored, which is how
//! timeouts, rate limits and errors stay out of the cache.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use crate::domain::{AuthToken, AuthorizationResult, Outcome};

/// Thread-safe, token-keyed cache of authorization results
pub struct AuthorizationCache<O: Outcome> {
    entries: DashMap<AuthToken, AuthorizationResult<O>>,
}

pub type SharedAuthorizationCache<O> = Arc<AuthorizationCache<O>>;

impl<O: Outcome> AuthorizationCache<O> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn shared() -> SharedAuthorizationCache<O> {
        Arc::new(Self::new())
    }

    /// Store `result` for `token`. Returns false when the result carries no
    /// end of life or is already expired.
    pub fn insert(&self, token: AuthToken, result: AuthorizationResult<O>) -> bool {
        self.insert_at(token, result, Utc::now())
    }

    pub fn insert_at(
        &self,
        token: AuthToken,
        result: AuthorizationResult<O>,
        now: DateTime<Utc>,
    ) -> bool {
        if !result.is_cache_valid_at(now) {
            debug!(
                token = token.as_str(),
                outcome = result.outcome().as_str(),
                "Result not cacheable"
            );
            return false;
        }
        self.entries.insert(token, result);
        true
    }

    pub fn get(&self, token: &AuthToken) -> Option<AuthorizationResult<O>> {
        self.get_at(token, Utc::now())
    }

    /// Cached result still alive at `now`; expired entries are evicted.
    pub fn get_at(&self, token: &AuthToken, now: DateTime<Utc>) -> Option<AuthorizationResult<O>> {
        let hit = self.entries.get(token).map(|entry| entry.value().clone())?;
        if hit.is_cache_valid_at(now) {
            return Some(hit);
        }
        debug!(token = token.as_str(), "Evicting expired cached result");
        self.entries
            .remove_if(token, |_, cached| !cached.is_cache_valid_at(now));
        None
    }

    pub fn invalidate(&self, token: &AuthToken) -> bool {
        self.entries.remove(token).is_some()
    }

    /// Drop all expired entries; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, result| result.is_cache_valid_at(now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<O: Outcome> Default for AuthorizationCache<O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthStartOutcome, AuthStartResult, Provenance};
    use chrono::Duration;

    fn cache() -> AuthorizationCache<AuthStartOutcome> {
        AuthorizationCache::new()
    }

    #[test]
    fn stores_and_returns_live_results() {
        let cache = cache();
        let result = AuthStartResult::authorized("DE*ABC", Provenance::None)
            .cache_until(Utc::now() + Duration::minutes(5))
            .build()
            .unwrap();

        assert!(cache.insert("TOKEN-1".into(), result.clone()));
        assert_eq!(cache.get(&"TOKEN-1".into()), Some(result));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn rejects_results_without_end_of_life() {
        let cache = cache();
        let timeout = AuthStartResult::communication_timeout("DE*ABC", Provenance::None)
            .cache_until(Utc::now() + Duration::minutes(5))
            .build()
            .unwrap();
        let plain = AuthStartResult::blocked("DE*ABC", Provenance::None)
            .build()
            .unwrap();

        assert!(!cache.insert("T1".into(), timeout));
        assert!(!cache.insert("T2".into(), plain));
        assert!(cache.is_empty());
    }

    #[test]
    fn expired_entries_are_evicted_on_read() {
        let cache = cache();
        let now = Utc::now();
        let result = AuthStartResult::not_authorized("DE*ABC", Provenance::None)
            .cache_until(now + Duration::seconds(10))
            .build()
            .unwrap();
        assert!(cache.insert_at("T1".into(), result, now));

        assert!(cache.get_at(&"T1".into(), now + Duration::seconds(5)).is_some());
        assert!(cache.get_at(&"T1".into(), now + Duration::seconds(11)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn purge_removes_only_expired() {
        let cache = cache();
        let now = Utc::now();
        let long = AuthStartResult::authorized("DE*ABC", Provenance::None)
            .cache_until(now + Duration::hours(1))
            .build()
            .unwrap();
        let short = AuthStartResult::expired("DE*ABC", Provenance::None)
            .cache_until(now + Duration::milliseconds(1))
            .build()
            .unwrap();
        cache.insert_at("LONG".into(), long, now);
        cache.insert_at("SHORT".into(), short, now);

        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.get(&"LONG".into()).is_some());
    }

    #[test]
    fn invalidate_removes_entry() {
        let cache = cache();
        let result = AuthStartResult::authorized("DE*ABC", Provenance::None)
            .cache_until(Utc::now() + Duration::minutes(1))
            .build()
            .unwrap();
        cache.insert("T1".into(), result);
        assert!(cache.invalidate(&"T1".into()));
        assert!(!cache.invalidate(&"T1".into()));
    }
}
