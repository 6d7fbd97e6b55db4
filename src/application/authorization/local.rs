//! Local authorizator
//!
//! Decides authorize-start / authorize-stop requests against an in-memory
//! token list. Every decision picks exactly one result factory; the result is
//! cached (when its outcome allows), counted and announced on the event bus.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::cache::AuthorizationCache;
use crate::application::events::{AuthResultEvent, Event, SharedEventBus};
use crate::config::AuthorizationConfig;
use crate::domain::{
    AuthStartOutcome, AuthStartRequest, AuthStartResult, AuthStopRequest, AuthStopResult,
    AuthToken, AuthorizationResult, AuthorizatorId, AuthorizeStartStop, ContractId,
    LocationScope, Outcome, PartyId, Provenance, ProviderId, SessionId,
};
use crate::shared::errors::DomainResult;

/// Token status as maintained by the token owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TokenStatus {
    #[default]
    Accepted,
    Blocked,
    Expired,
    NoCredit,
}

/// Known authentication token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub token: AuthToken,
    #[serde(default)]
    pub status: TokenStatus,
    #[serde(default)]
    pub provider_id: Option<ProviderId>,
    #[serde(default)]
    pub contract_id: Option<ContractId>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}

impl TokenEntry {
    pub fn new(token: impl Into<AuthToken>) -> Self {
        Self {
            token: token.into(),
            status: TokenStatus::Accepted,
            provider_id: None,
            contract_id: None,
            expiry_date: None,
        }
    }

    /// Status at `now`; a passed expiry date wins over the stored status.
    pub fn status_at(&self, now: DateTime<Utc>) -> TokenStatus {
        match self.expiry_date {
            Some(expiry) if now > expiry => TokenStatus::Expired,
            _ => self.status,
        }
    }
}

#[derive(Debug, Clone)]
struct SessionEntry {
    token: AuthToken,
    provider_id: Option<ProviderId>,
    location: Option<LocationScope>,
    stopped_at: Option<DateTime<Utc>>,
}

impl SessionEntry {
    fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }
}

pub struct LocalAuthorizator {
    authorizator_id: AuthorizatorId,
    tokens: DashMap<AuthToken, TokenEntry>,
    sessions: DashMap<SessionId, SessionEntry>,
    cache: AuthorizationCache<AuthStartOutcome>,
    cache_ttl: Duration,
    admin_down: AtomicBool,
    event_bus: Option<SharedEventBus>,
}

impl LocalAuthorizator {
    /// # Errors
    /// [`DomainError::EmptyIdentifier`](crate::shared::errors::DomainError)
    /// when `authorizator_id` is empty.
    pub fn new(authorizator_id: impl Into<String>, cache_ttl: Duration) -> DomainResult<Self> {
        Ok(Self {
            authorizator_id: AuthorizatorId::parse(authorizator_id)?,
            tokens: DashMap::new(),
            sessions: DashMap::new(),
            cache: AuthorizationCache::new(),
            cache_ttl,
            admin_down: AtomicBool::new(false),
            event_bus: None,
        })
    }

    pub fn from_config(config: &AuthorizationConfig) -> DomainResult<Self> {
        let ttl = Duration::seconds(i64::try_from(config.cache_ttl_secs).unwrap_or(i64::MAX));
        let authorizator = Self::new(config.authorizator_id.clone(), ttl)?;
        for entry in &config.tokens {
            authorizator.add_token(entry.clone());
        }
        info!(
            authorizator_id = authorizator.authorizator_id.as_str(),
            tokens = authorizator.tokens.len(),
            "Local authorizator configured"
        );
        Ok(authorizator)
    }

    #[must_use]
    pub fn with_event_bus(mut self, event_bus: SharedEventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Add or replace a token; drops any cached decision for it.
    pub fn add_token(&self, entry: TokenEntry) {
        self.cache.invalidate(&entry.token);
        self.tokens.insert(entry.token.clone(), entry);
    }

    pub fn remove_token(&self, token: &AuthToken) -> bool {
        self.cache.invalidate(token);
        self.tokens.remove(token).is_some()
    }

    pub fn set_token_status(&self, token: &AuthToken, status: TokenStatus) -> bool {
        self.cache.invalidate(token);
        match self.tokens.get_mut(token) {
            Some(mut entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    pub fn set_admin_down(&self, down: bool) {
        if self.admin_down.swap(down, Ordering::SeqCst) != down {
            warn!(
                authorizator_id = self.authorizator_id.as_str(),
                admin_down = down,
                "Authorization service admin status changed"
            );
        }
    }

    pub fn is_admin_down(&self) -> bool {
        self.admin_down.load(Ordering::SeqCst)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.iter().filter(|s| !s.is_stopped()).count()
    }

    /// Running sessions plus stopped ones still remembered for
    /// `AlreadyStopped` answers.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Forget sessions stopped more than the cache TTL ago and drop expired
    /// cached results. Returns how many sessions were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        let retention = self.cache_ttl;
        self.sessions
            .retain(|_, s| s.stopped_at.map_or(true, |at| at + retention > now));
        let removed = before.saturating_sub(self.sessions.len());
        let evicted = self.cache.purge_expired();
        if removed > 0 || evicted > 0 {
            debug!(
                authorizator_id = self.authorizator_id.as_str(),
                sessions = removed,
                cached_results = evicted,
                "Purged stopped sessions and expired results"
            );
        }
        removed
    }

    /// A cached start result answers a request only for the same location
    /// and, when the caller proposes one, the same session id.
    fn cached_start(&self, request: &AuthStartRequest) -> Option<AuthStartResult> {
        let cached = self.cache.get(&request.token)?;
        if cached.location() != request.location.as_ref() {
            return None;
        }
        match &request.session_id {
            Some(proposed) if cached.session_id() != Some(proposed) => None,
            _ => Some(cached),
        }
    }

    fn provenance(&self) -> Provenance {
        Provenance::Granter(PartyId::new(self.authorizator_id.as_str()))
    }

    fn decide_start(
        &self,
        request: &AuthStartRequest,
        started: Instant,
    ) -> DomainResult<AuthStartResult> {
        let id = self.authorizator_id.clone();
        let provenance = self.provenance();
        let now = Utc::now();
        let entry = self.tokens.get(&request.token).map(|e| e.value().clone());

        let builder = match entry {
            None => AuthStartResult::invalid_token(id, provenance),
            Some(entry) => match entry.status_at(now) {
                TokenStatus::Expired => AuthStartResult::expired(id, provenance)
                    .provider_id_opt(entry.provider_id.clone())
                    .cache_until(now + self.cache_ttl),
                TokenStatus::Blocked => AuthStartResult::blocked(id, provenance)
                    .provider_id_opt(entry.provider_id.clone())
                    .cache_until(now + self.cache_ttl),
                TokenStatus::NoCredit => AuthStartResult::no_credit(id, provenance)
                    .provider_id_opt(entry.provider_id.clone())
                    .cache_until(now + self.cache_ttl),
                TokenStatus::Accepted => {
                    let session_id = request.session_id.clone().unwrap_or_else(SessionId::random);
                    self.sessions.insert(
                        session_id.clone(),
                        SessionEntry {
                            token: request.token.clone(),
                            provider_id: entry.provider_id.clone(),
                            location: request.location.clone(),
                            stopped_at: None,
                        },
                    );
                    let mut builder = AuthStartResult::authorized(id, provenance)
                        .session_id(session_id)
                        .provider_id_opt(entry.provider_id.clone())
                        .auth_stop_tokens([request.token.clone()])
                        .cache_until(now + self.cache_ttl);
                    if let Some(contract_id) = entry.contract_id.clone() {
                        builder = builder.contract_id(contract_id);
                    }
                    if let Some(expiry) = entry.expiry_date {
                        builder = builder.expiry_date(expiry);
                    }
                    builder
                }
            },
        };

        let builder = match &request.location {
            Some(location) => builder.location(location.clone()),
            None => builder,
        };

        builder.runtime(started.elapsed()).build()
    }

    fn decide_stop(
        &self,
        request: &AuthStopRequest,
        started: Instant,
    ) -> DomainResult<AuthStopResult> {
        let id = self.authorizator_id.clone();
        let provenance = self.provenance();

        let builder = match self.sessions.get_mut(&request.session_id) {
            None => AuthStopResult::invalid_session_id(id, provenance),
            Some(session) if session.is_stopped() => {
                AuthStopResult::already_stopped(id, provenance)
            }
            Some(session) if session.token != request.token => {
                AuthStopResult::not_authorized(id, provenance)
            }
            Some(mut session) => {
                session.stopped_at = Some(Utc::now());
                self.cache.invalidate(&session.token);
                let builder = AuthStopResult::authorized(id, provenance)
                    .provider_id_opt(session.provider_id.clone());
                match (&request.location, &session.location) {
                    (None, Some(started_at)) => builder.location(started_at.clone()),
                    _ => builder,
                }
            }
        }
        .session_id(request.session_id.clone());

        let builder = match &request.location {
            Some(location) => builder.location(location.clone()),
            None => builder,
        };

        builder.runtime(started.elapsed()).build()
    }

    fn announce<O: Outcome>(
        &self,
        wrap: fn(AuthResultEvent) -> Event,
        token: &AuthToken,
        caller: &Provenance,
        result: &AuthorizationResult<O>,
        cached: bool,
    ) {
        let caller = caller.party_id().map(ToString::to_string);

        metrics::counter!(
            "wwcp_auth_results_total",
            "kind" => O::KIND,
            "outcome" => result.outcome().as_str()
        )
        .increment(1);

        info!(
            authorizator_id = self.authorizator_id.as_str(),
            kind = O::KIND,
            outcome = result.outcome().as_str(),
            session_id = result.session_id().map(SessionId::as_str),
            caller = caller.as_deref(),
            cached,
            "Authorization decided"
        );

        if let Some(bus) = &self.event_bus {
            bus.publish(wrap(AuthResultEvent {
                authorizator_id: self.authorizator_id.to_string(),
                token: token.to_string(),
                outcome: result.outcome().as_str().to_string(),
                session_id: result.session_id().map(ToString::to_string),
                caller,
                cached,
                runtime_ms: result
                    .runtime()
                    .map(|r| u64::try_from(r.as_millis()).unwrap_or(u64::MAX)),
                timestamp: Utc::now(),
            }));
        }
    }
}

#[async_trait]
impl AuthorizeStartStop for LocalAuthorizator {
    fn authorizator_id(&self) -> &AuthorizatorId {
        &self.authorizator_id
    }

    async fn authorize_start(&self, request: AuthStartRequest) -> DomainResult<AuthStartResult> {
        let started = Instant::now();

        if self.is_admin_down() {
            let id = self.authorizator_id.clone();
            let result = AuthStartResult::admin_down(id, self.provenance())
                .runtime(started.elapsed())
                .build()?;
            self.announce(Event::AuthStartResult, &request.token, &request.caller, &result, false);
            return Ok(result);
        }

        if let Some(cached) = self.cached_start(&request) {
            self.announce(Event::AuthStartResult, &request.token, &request.caller, &cached, true);
            return Ok(cached);
        }

        let result = self.decide_start(&request, started)?;
        self.cache.insert(request.token.clone(), result.clone());
        self.announce(Event::AuthStartResult, &request.token, &request.caller, &result, false);
        Ok(result)
    }

    async fn authorize_stop(&self, request: AuthStopRequest) -> DomainResult<AuthStopResult> {
        let started = Instant::now();

        if self.is_admin_down() {
            let id = self.authorizator_id.clone();
            let result = AuthStopResult::admin_down(id, self.provenance())
                .session_id(request.session_id.clone())
                .runtime(started.elapsed())
                .build()?;
            self.announce(Event::AuthStopResult, &request.token, &request.caller, &result, false);
            return Ok(result);
        }

        let result = self.decide_stop(&request, started)?;
        self.announce(Event::AuthStopResult, &request.token, &request.caller, &result, false);
        if result.is_authorized() {
            self.purge_expired();
        }
        Ok(result)
    }
}
